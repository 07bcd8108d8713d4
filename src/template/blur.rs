//! The frosted-glass layout.
//!
//! Five layers, bottom to top: a blurred center-cropped copy of the photo
//! stretched over the whole canvas, a dark wash plus bottom gradient to keep
//! the text zone quiet, a soft drop shadow, the rounded photo itself, and
//! the text block. Text color flips between white and black based on the
//! sampled brightness of the band it lands on.

use super::{PosterTemplate, format_camera_model, params_line};
use crate::imaging::compose::{
    bottom_gradient, center_crop_to_aspect, dark_wash, overlay_alpha, round_mask,
    rounded_rect_sprite, sample_band_luma,
};
use crate::imaging::text::{draw_text, line_metrics, sans, sans_bold, text_width};
use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};
use rusttype::Font;

use crate::metadata::ShotMeta;

const BORDER_RATIO: f64 = 0.08;
const CORNER_RADIUS_RATIO: f64 = 0.03;
const WATERMARK_HEIGHT_RATIO: f64 = 0.18;
const FONT_BRAND_RATIO: f64 = 0.045;
const FONT_LENS_RATIO: f64 = 0.02;
const FONT_PARAMS_RATIO: f64 = 0.028;
const BLUR_RADIUS_RATIO: f64 = 0.05;

// Backdrop is blurred at quarter resolution and scaled back up. The blur
// dominates the cost, so the downscale buys a large speedup at no visible
// quality loss.
const BG_SCALE_FACTOR: f64 = 0.25;

// Tracking as a fraction of the font size.
const LETTER_SPACING_RATIO: f32 = 0.12;
const LINE_SPACING_RATIO: f64 = 0.015;
const SHADOW_EXPAND_RATIO: f64 = 0.012;
const SHADOW_BLUR_RATIO: f64 = 0.015;
const SHADOW_OFFSET_RATIO: f64 = 0.006;

const MIN_FONT_BRAND: f64 = 28.0;
const MIN_FONT_LENS: f64 = 18.0;
const MIN_FONT_PARAMS: f64 = 22.0;

// Text flips to white below this band brightness.
const CONTRAST_LUMA_THRESHOLD: f64 = 0.45;

const WASH_ALPHA: u8 = 50;
const GRADIENT_MAX_ALPHA: u8 = 100;
const SHADOW_ALPHA: u8 = 140;

/// Photo floating on a blurred enlargement of itself, parameters in the
/// darkened band underneath.
pub struct BlurBackgroundTemplate;

impl PosterTemplate for BlurBackgroundTemplate {
    fn id(&self) -> &'static str {
        "blur-background"
    }

    fn name(&self) -> &'static str {
        "Blur Background"
    }

    fn description(&self) -> &'static str {
        "Frosted-glass border from the photo itself, floating card look"
    }

    fn render(&self, photo: RgbaImage, meta: &ShotMeta) -> RgbaImage {
        let (photo_w, photo_h) = photo.dimensions();
        let base = photo_w.min(photo_h) as f64;

        let border = (base * BORDER_RATIO) as u32;
        let corner_radius = (base * CORNER_RADIUS_RATIO) as u32;
        let watermark_h = (base * WATERMARK_HEIGHT_RATIO) as u32;
        let line_spacing = (base * LINE_SPACING_RATIO) as u32;
        let shadow_expand = (base * SHADOW_EXPAND_RATIO) as u32;
        let shadow_blur = ((base * SHADOW_BLUR_RATIO) as u32).clamp(8, 50);
        let shadow_offset = (base * SHADOW_OFFSET_RATIO) as u32;

        let font_brand = (base * FONT_BRAND_RATIO).max(MIN_FONT_BRAND) as f32;
        let font_lens = (base * FONT_LENS_RATIO).max(MIN_FONT_LENS) as f32;
        let font_params = (base * FONT_PARAMS_RATIO).max(MIN_FONT_PARAMS) as f32;

        let canvas_w = photo_w + border * 2;
        let canvas_h = photo_h + border * 2 + watermark_h;
        let photo_x = border;
        let photo_y = border;

        // Layer 1: blurred backdrop, darkened so the photo pops
        let mut canvas = blurred_backdrop(&photo, canvas_w, canvas_h);
        dark_wash(&mut canvas, WASH_ALPHA);

        // Layer 2: bottom gradient starting one border-width above the
        // photo's lower edge, easing into the text band
        let gradient_start = photo_y + photo_h - border;
        bottom_gradient(&mut canvas, gradient_start, GRADIENT_MAX_ALPHA);

        // Layer 3: soft drop shadow, nudged downward
        let shadow = soft_drop_shadow(photo_w, photo_h, corner_radius, shadow_expand, shadow_blur);
        overlay_alpha(
            &mut canvas,
            &shadow,
            photo_x as i64 - shadow_expand as i64,
            photo_y as i64 - shadow_expand as i64 + shadow_offset as i64,
        );

        // Layer 4: the photo, rounded to match the shadow
        let rounded = round_mask(&photo, corner_radius);
        overlay_alpha(&mut canvas, &rounded, photo_x as i64, photo_y as i64);
        drop(rounded);
        drop(photo);

        // Layer 5: text, with contrast adapted to the band it sits on
        let brightness = sample_band_luma(&canvas, canvas_h - watermark_h, watermark_h);
        let (text_color, shadow_color) = if brightness < CONTRAST_LUMA_THRESHOLD {
            (Rgba([255, 255, 255, 255]), Rgba([0, 0, 0, 120]))
        } else {
            (Rgba([0, 0, 0, 255]), Rgba([255, 255, 255, 100]))
        };

        let mut text_y = photo_y + photo_h + border / 2 + line_spacing;

        let camera_text = format_camera_model(meta);
        text_y = draw_shadowed_line(
            &mut canvas,
            sans_bold(),
            font_brand,
            text_y,
            &camera_text,
            text_color,
            shadow_color,
        );
        text_y += line_spacing;

        if meta.has_lens() {
            text_y = draw_shadowed_line(
                &mut canvas,
                sans(),
                font_lens,
                text_y,
                &meta.lens_model,
                text_color,
                shadow_color,
            );
            text_y += line_spacing * 2;
        }

        draw_shadowed_line(
            &mut canvas,
            sans(),
            font_params,
            text_y,
            &params_line(meta),
            text_color,
            shadow_color,
        );

        canvas
    }
}

/// Center-crop the photo to the canvas aspect, blur a downscaled copy, then
/// stretch it over the full canvas.
fn blurred_backdrop(photo: &RgbaImage, target_w: u32, target_h: u32) -> RgbaImage {
    let cropped = center_crop_to_aspect(photo, target_w, target_h);

    let process_w = ((target_w as f64 * BG_SCALE_FACTOR) as u32).max(100);
    let process_h = ((target_h as f64 * BG_SCALE_FACTOR) as u32).max(100);
    let small = imageops::resize(&cropped, process_w, process_h, FilterType::Triangle);

    let short_side = process_w.min(process_h) as f64;
    let sigma = (short_side * BLUR_RADIUS_RATIO).clamp(10.0, 60.0) as f32;
    let blurred = imageops::blur(&small, sigma);

    imageops::resize(&blurred, target_w, target_h, FilterType::Triangle)
}

/// A blurred rounded-rectangle silhouette, `expand` px larger than the photo
/// on every side so the blur has room to feather.
fn soft_drop_shadow(
    photo_w: u32,
    photo_h: u32,
    corner_radius: u32,
    expand: u32,
    blur_radius: u32,
) -> RgbaImage {
    let mut sprite = RgbaImage::new(photo_w + expand * 2, photo_h + expand * 2);
    let rect = rounded_rect_sprite(photo_w, photo_h, corner_radius, Rgba([0, 0, 0, SHADOW_ALPHA]));
    overlay_alpha(&mut sprite, &rect, expand as i64, expand as i64);
    imageops::blur(&sprite, blur_radius as f32 / 2.0)
}

/// Draw one centered line with a 2 px offset shadow underneath it.
/// Returns the y where the next element starts (baseline plus descent).
fn draw_shadowed_line(
    canvas: &mut RgbaImage,
    font: &Font<'_>,
    px: f32,
    y: u32,
    text: &str,
    color: Rgba<u8>,
    shadow: Rgba<u8>,
) -> u32 {
    let metrics = line_metrics(font, px);
    let tracking = px * LETTER_SPACING_RATIO;
    let width = text_width(font, px, text, tracking);
    let x = (canvas.width() as f32 - width) / 2.0;
    let baseline = y as f32 + metrics.ascent;

    draw_text(canvas, font, px, x + 2.0, baseline + 2.0, shadow, text, tracking);
    draw_text(canvas, font, px, x, baseline, color, text, tracking);

    (baseline + metrics.descent).ceil() as u32
}
