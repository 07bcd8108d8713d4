//! Text measurement and drawing.
//!
//! Fonts are embedded at compile time (DejaVu Sans, regular and bold) so the
//! binary renders identically on any machine — no fontconfig, no system font
//! lookup. Glyphs are rasterized with `rusttype` and alpha-blended straight
//! onto the canvas; letter tracking is applied as a fixed per-glyph advance
//! in pixels.

use image::{Rgba, RgbaImage};
use rusttype::{Font, Scale, point};
use std::sync::LazyLock;

static SANS: LazyLock<Font<'static>> = LazyLock::new(|| {
    Font::try_from_bytes(include_bytes!("../../assets/fonts/DejaVuSans.ttf"))
        .expect("embedded DejaVuSans.ttf parses")
});

static SANS_BOLD: LazyLock<Font<'static>> = LazyLock::new(|| {
    Font::try_from_bytes(include_bytes!("../../assets/fonts/DejaVuSans-Bold.ttf"))
        .expect("embedded DejaVuSans-Bold.ttf parses")
});

/// The regular text face.
pub fn sans() -> &'static Font<'static> {
    &SANS
}

/// The bold text face, used for the camera-model line.
pub fn sans_bold() -> &'static Font<'static> {
    &SANS_BOLD
}

/// Vertical metrics of a font at a given pixel size.
#[derive(Debug, Clone, Copy)]
pub struct LineMetrics {
    /// Baseline to the top of the tallest glyphs (positive).
    pub ascent: f32,
    /// Baseline to the bottom of descenders (positive).
    pub descent: f32,
    /// Recommended extra gap between consecutive lines.
    pub line_gap: f32,
}

impl LineMetrics {
    /// Full line height: ascent + descent + line gap, rounded up.
    pub fn height(&self) -> u32 {
        (self.ascent + self.descent + self.line_gap).ceil() as u32
    }
}

pub fn line_metrics(font: &Font<'_>, px: f32) -> LineMetrics {
    let vm = font.v_metrics(Scale::uniform(px));
    LineMetrics {
        ascent: vm.ascent,
        descent: -vm.descent,
        line_gap: vm.line_gap,
    }
}

/// Advance width of `text` at `px`, including `tracking` px between glyphs.
pub fn text_width(font: &Font<'_>, px: f32, text: &str, tracking: f32) -> f32 {
    let scale = Scale::uniform(px);
    let mut width = 0.0;
    let mut glyphs = 0u32;
    for ch in text.chars() {
        width += font.glyph(ch).scaled(scale).h_metrics().advance_width;
        glyphs += 1;
    }
    if glyphs > 1 {
        width += tracking * (glyphs - 1) as f32;
    }
    width
}

/// Draw `text` with its baseline at `baseline_y`, starting at `x`.
///
/// Glyph coverage is alpha-blended with the color's own alpha, so
/// semi-transparent shadow text works without a separate layer. Pixels
/// falling outside the canvas are clipped.
pub fn draw_text(
    img: &mut RgbaImage,
    font: &Font<'_>,
    px: f32,
    x: f32,
    baseline_y: f32,
    color: Rgba<u8>,
    text: &str,
    tracking: f32,
) {
    let scale = Scale::uniform(px);
    let mut caret = x;

    for ch in text.chars() {
        let glyph = font.glyph(ch).scaled(scale);
        let advance = glyph.h_metrics().advance_width;
        let positioned = glyph.positioned(point(caret, baseline_y));

        if let Some(bb) = positioned.pixel_bounding_box() {
            positioned.draw(|gx, gy, coverage| {
                let tx = gx as i32 + bb.min.x;
                let ty = gy as i32 + bb.min.y;
                if tx < 0 || ty < 0 || tx >= img.width() as i32 || ty >= img.height() as i32 {
                    return;
                }
                let sa = coverage * color[3] as f32 / 255.0;
                if sa <= 0.0 {
                    return;
                }
                let inv = 1.0 - sa;
                let dst = img.get_pixel_mut(tx as u32, ty as u32);
                dst[0] = (color[0] as f32 * sa + dst[0] as f32 * inv) as u8;
                dst[1] = (color[1] as f32 * sa + dst[1] as f32 * inv) as u8;
                dst[2] = (color[2] as f32 * sa + dst[2] as f32 * inv) as u8;
                dst[3] = dst[3].max((sa * 255.0) as u8);
            });
        }
        caret += advance + tracking;
    }
}

/// Draw `text` horizontally centered in the canvas at the given baseline.
pub fn draw_centered(
    img: &mut RgbaImage,
    font: &Font<'_>,
    px: f32,
    baseline_y: f32,
    color: Rgba<u8>,
    text: &str,
    tracking: f32,
) {
    let width = text_width(font, px, text, tracking);
    let x = (img.width() as f32 - width) / 2.0;
    draw_text(img, font, px, x, baseline_y, color, text, tracking);
}
