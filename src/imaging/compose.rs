//! Pixel compositors shared by the poster templates.
//!
//! All functions here operate on in-memory RGBA buffers and are pure with
//! respect to their inputs — no I/O, no globals. The rounded-rectangle
//! routines use per-pixel coverage for antialiased edges rather than a hard
//! inside/outside test.

use image::{Rgba, RgbaImage, imageops};

/// Antialiased coverage of pixel (x, y) by a rounded rectangle of size
/// `w`×`h` with corner radius `radius`, anchored at the buffer origin.
///
/// 1.0 inside the shape, 0.0 outside, fractional within half a pixel of the
/// corner arcs.
fn rounded_rect_coverage(x: u32, y: u32, w: u32, h: u32, radius: u32) -> f32 {
    let r = radius.min(w / 2).min(h / 2) as f32;
    let px = x as f32 + 0.5;
    let py = y as f32 + 0.5;
    let (w, h) = (w as f32, h as f32);

    // Outside the corner squares the shape is a plain rectangle
    if (px >= r && px <= w - r) || (py >= r && py <= h - r) {
        return 1.0;
    }

    let cx = if px < r { r } else { w - r };
    let cy = if py < r { r } else { h - r };
    let dist = ((px - cx).powi(2) + (py - cy).powi(2)).sqrt();
    (r - dist + 0.5).clamp(0.0, 1.0)
}

/// Clip a buffer to a rounded-rectangle silhouette.
///
/// Allocates a fresh buffer; the source's color channels are kept and its
/// alpha is scaled by shape coverage, so everything beyond the corner arcs
/// ends up fully transparent. Equivalent to a SRC_IN composite against a
/// filled rounded rectangle.
pub fn round_mask(src: &RgbaImage, radius: u32) -> RgbaImage {
    let (w, h) = src.dimensions();
    RgbaImage::from_fn(w, h, |x, y| {
        let coverage = rounded_rect_coverage(x, y, w, h, radius);
        let p = src.get_pixel(x, y);
        Rgba([p[0], p[1], p[2], (p[3] as f32 * coverage).round() as u8])
    })
}

/// A solid rounded-rectangle sprite on a transparent background.
///
/// The drop shadow starts as one of these, blurred and offset.
pub fn rounded_rect_sprite(w: u32, h: u32, radius: u32, color: Rgba<u8>) -> RgbaImage {
    RgbaImage::from_fn(w, h, |x, y| {
        let coverage = rounded_rect_coverage(x, y, w, h, radius);
        Rgba([
            color[0],
            color[1],
            color[2],
            (color[3] as f32 * coverage).round() as u8,
        ])
    })
}

/// Alpha-composite `over` onto `base` with its top-left corner at (x, y).
///
/// Coordinates may be negative or extend past the base; out-of-bounds source
/// pixels are simply not drawn.
pub fn overlay_alpha(base: &mut RgbaImage, over: &RgbaImage, x: i64, y: i64) {
    for oy in 0..over.height() {
        for ox in 0..over.width() {
            let bx = x + ox as i64;
            let by = y + oy as i64;
            if bx < 0 || by < 0 || bx >= base.width() as i64 || by >= base.height() as i64 {
                continue;
            }
            let p = over.get_pixel(ox, oy);
            let sa = p[3] as f32 / 255.0;
            if sa <= 0.0 {
                continue;
            }
            let dst = base.get_pixel_mut(bx as u32, by as u32);
            let da = dst[3] as f32 / 255.0;
            let inv = 1.0 - sa;
            dst[0] = (p[0] as f32 * sa + dst[0] as f32 * inv) as u8;
            dst[1] = (p[1] as f32 * sa + dst[1] as f32 * inv) as u8;
            dst[2] = (p[2] as f32 * sa + dst[2] as f32 * inv) as u8;
            dst[3] = ((sa + da * inv) * 255.0).round() as u8;
        }
    }
}

/// Blend a uniform black layer of the given alpha over the whole buffer.
pub fn dark_wash(img: &mut RgbaImage, alpha: u8) {
    let sa = alpha as f32 / 255.0;
    let inv = 1.0 - sa;
    for p in img.pixels_mut() {
        p[0] = (p[0] as f32 * inv) as u8;
        p[1] = (p[1] as f32 * inv) as u8;
        p[2] = (p[2] as f32 * inv) as u8;
    }
}

/// Paint a vertical transparent→dark gradient from `start_y` to the bottom
/// edge, reaching `max_alpha` on the last row.
pub fn bottom_gradient(img: &mut RgbaImage, start_y: u32, max_alpha: u8) {
    let h = img.height();
    if start_y >= h {
        return;
    }
    let span = (h - start_y) as f32;
    for y in start_y..h {
        let t = (y - start_y) as f32 / span;
        let sa = max_alpha as f32 / 255.0 * t;
        let inv = 1.0 - sa;
        for x in 0..img.width() {
            let p = img.get_pixel_mut(x, y);
            p[0] = (p[0] as f32 * inv) as u8;
            p[1] = (p[1] as f32 * inv) as u8;
            p[2] = (p[2] as f32 * inv) as u8;
        }
    }
}

/// Center-crop to the target aspect ratio, trimming whichever dimension
/// overshoots. Output keeps source resolution on the retained axis.
pub fn center_crop_to_aspect(src: &RgbaImage, target_w: u32, target_h: u32) -> RgbaImage {
    let (sw, sh) = src.dimensions();
    let src_ratio = sw as f64 / sh as f64;
    let target_ratio = target_w as f64 / target_h as f64;

    let (cx, cy, cw, ch) = if src_ratio > target_ratio {
        let cw = ((sh as f64 * target_ratio) as u32).max(1);
        ((sw - cw) / 2, 0, cw, sh)
    } else {
        let ch = ((sw as f64 / target_ratio) as u32).max(1);
        (0, (sh - ch) / 2, sw, ch)
    };

    imageops::crop_imm(src, cx, cy, cw, ch).to_image()
}

/// Rec. 601 luma of one pixel, normalized to [0, 1].
pub fn luma(p: &Rgba<u8>) -> f64 {
    (0.299 * p[0] as f64 + 0.587 * p[1] as f64 + 0.114 * p[2] as f64) / 255.0
}

/// Mean luma of a horizontal band, sampled on a sparse grid.
///
/// Grid step is max(width / 20, 10) px — enough samples to characterize the
/// band without touching every pixel. Returns 0.5 (neutral) when the band is
/// empty or fully out of bounds.
pub fn sample_band_luma(img: &RgbaImage, start_y: u32, band_height: u32) -> f64 {
    let w = img.width();
    let h = img.height();
    if start_y >= h || band_height == 0 || w == 0 {
        return 0.5;
    }
    let end_y = (start_y + band_height).min(h);
    let step = (w / 20).max(10) as usize;

    let mut total = 0.0;
    let mut count = 0u32;
    for y in (start_y..end_y).step_by(step) {
        for x in (0..w).step_by(step) {
            total += luma(img.get_pixel(x, y));
            count += 1;
        }
    }
    if count == 0 { 0.5 } else { total / count as f64 }
}
