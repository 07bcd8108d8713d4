//! The classic white-background layout.

use super::{PosterTemplate, format_camera_model, params_line};
use crate::imaging::compose::{overlay_alpha, round_mask};
use crate::imaging::text::{draw_centered, line_metrics, sans, sans_bold};
use crate::metadata::ShotMeta;
use image::{Rgba, RgbaImage};

// Proportions relative to the photo's short edge, so the design scales
// uniformly with resolution.
const PADDING_RATIO: f64 = 0.05;
const PHOTO_TEXT_GAP_RATIO: f64 = 0.025;
const MODEL_GAP_RATIO: f64 = 0.01;
const SEPARATOR_GAP_RATIO: f64 = 0.018;
const SEPARATOR_WIDTH_RATIO: f64 = 0.4;
const CORNER_RADIUS_RATIO: f64 = 0.008;

const FONT_CAMERA_RATIO: f64 = 0.035;
const FONT_LENS_RATIO: f64 = 0.02;
const FONT_PARAMS_RATIO: f64 = 0.025;

// Pixel floors keep text readable on tiny photos.
const MIN_FONT_CAMERA: f64 = 28.0;
const MIN_FONT_LENS: f64 = 18.0;
const MIN_FONT_PARAMS: f64 = 22.0;

const COLOR_BACKGROUND: Rgba<u8> = Rgba([255, 255, 255, 255]);
const COLOR_TEXT_PRIMARY: Rgba<u8> = Rgba([26, 26, 26, 255]);
const COLOR_TEXT_SECONDARY: Rgba<u8> = Rgba([136, 136, 136, 255]);
const COLOR_SEPARATOR: Rgba<u8> = Rgba([220, 220, 220, 255]);

/// Plain light background: photo on top, camera/lens/parameters stacked
/// beneath a thin separator, everything horizontally centered.
pub struct ClassicTemplate;

impl PosterTemplate for ClassicTemplate {
    fn id(&self) -> &'static str {
        "classic"
    }

    fn name(&self) -> &'static str {
        "Classic White"
    }

    fn description(&self) -> &'static str {
        "Clean white background with centered shooting parameters"
    }

    fn render(&self, photo: RgbaImage, meta: &ShotMeta) -> RgbaImage {
        let (photo_w, photo_h) = photo.dimensions();
        let base = photo_w.min(photo_h) as f64;

        let padding = (base * PADDING_RATIO) as u32;
        let photo_text_gap = (base * PHOTO_TEXT_GAP_RATIO) as u32;
        let model_gap = (base * MODEL_GAP_RATIO) as u32;
        let separator_gap = (base * SEPARATOR_GAP_RATIO) as u32;
        let corner_radius = (base * CORNER_RADIUS_RATIO) as u32;

        let font_camera = (base * FONT_CAMERA_RATIO).max(MIN_FONT_CAMERA) as f32;
        let font_lens = (base * FONT_LENS_RATIO).max(MIN_FONT_LENS) as f32;
        let font_params = (base * FONT_PARAMS_RATIO).max(MIN_FONT_PARAMS) as f32;

        let camera_metrics = line_metrics(sans_bold(), font_camera);
        let lens_metrics = line_metrics(sans(), font_lens);
        let params_metrics = line_metrics(sans(), font_params);

        // The canvas height is exact: no measurement pass beyond the font
        // line metrics. The lens line's space collapses entirely when the
        // lens is unknown.
        let has_lens = meta.has_lens();
        let lens_height = if has_lens { lens_metrics.height() } else { 0 };
        let text_area = photo_text_gap
            + camera_metrics.height()
            + model_gap
            + lens_height
            + separator_gap
            + 1
            + separator_gap
            + params_metrics.height();

        let canvas_w = photo_w + padding * 2;
        let canvas_h = padding + photo_h + text_area + padding;
        let mut canvas = RgbaImage::from_pixel(canvas_w, canvas_h, COLOR_BACKGROUND);

        if corner_radius > 0 {
            let rounded = round_mask(&photo, corner_radius);
            overlay_alpha(&mut canvas, &rounded, padding as i64, padding as i64);
        } else {
            overlay_alpha(&mut canvas, &photo, padding as i64, padding as i64);
        }
        drop(photo);

        let mut current_y = padding + photo_h + photo_text_gap;

        let camera_text = format_camera_model(meta);
        draw_centered(
            &mut canvas,
            sans_bold(),
            font_camera,
            current_y as f32 + camera_metrics.ascent,
            COLOR_TEXT_PRIMARY,
            &camera_text,
            0.0,
        );
        current_y += camera_metrics.height() + model_gap;

        if has_lens {
            draw_centered(
                &mut canvas,
                sans(),
                font_lens,
                current_y as f32 + lens_metrics.ascent,
                COLOR_TEXT_SECONDARY,
                &meta.lens_model,
                0.0,
            );
            current_y += lens_metrics.height();
        }
        current_y += separator_gap;

        let separator_w = (canvas_w as f64 * SEPARATOR_WIDTH_RATIO) as u32;
        let separator_x = (canvas_w - separator_w) / 2;
        for x in separator_x..separator_x + separator_w {
            canvas.put_pixel(x, current_y, COLOR_SEPARATOR);
        }
        current_y += 1 + separator_gap;

        draw_centered(
            &mut canvas,
            sans(),
            font_params,
            current_y as f32 + params_metrics.ascent,
            COLOR_TEXT_PRIMARY,
            &params_line(meta),
            0.0,
        );

        canvas
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::ShotMeta;

    fn test_photo(w: u32, h: u32) -> RgbaImage {
        RgbaImage::from_pixel(w, h, Rgba([80, 120, 160, 255]))
    }

    fn test_meta() -> ShotMeta {
        ShotMeta {
            camera_model: "NIKON Z 8".to_string(),
            lens_model: "NIKKOR Z 50mm f/1.8 S".to_string(),
            aperture: "f/2.8".to_string(),
            shutter_speed: "1/250 sec".to_string(),
            iso: "100".to_string(),
            focal_length: "50 mm".to_string(),
            ..ShotMeta::default()
        }
    }

    #[test]
    fn canvas_width_is_photo_plus_symmetric_padding() {
        let poster = ClassicTemplate.render(test_photo(400, 300), &test_meta());
        let padding = (300.0 * PADDING_RATIO) as u32;
        assert_eq!(poster.width(), 400 + 2 * padding);
    }

    #[test]
    fn canvas_height_matches_exact_stack_formula() {
        let meta = test_meta();
        let poster = ClassicTemplate.render(test_photo(400, 300), &meta);

        let base = 300.0;
        let padding = (base * PADDING_RATIO) as u32;
        let gap = (base * PHOTO_TEXT_GAP_RATIO) as u32;
        let model_gap = (base * MODEL_GAP_RATIO) as u32;
        let sep_gap = (base * SEPARATOR_GAP_RATIO) as u32;
        let camera_h = line_metrics(sans_bold(), MIN_FONT_CAMERA as f32).height();
        let lens_h = line_metrics(sans(), MIN_FONT_LENS as f32).height();
        let params_h = line_metrics(sans(), MIN_FONT_PARAMS as f32).height();

        let expected = padding
            + 300
            + gap
            + camera_h
            + model_gap
            + lens_h
            + sep_gap
            + 1
            + sep_gap
            + params_h
            + padding;
        assert_eq!(poster.height(), expected);
    }

    #[test]
    fn missing_lens_collapses_its_line() {
        let with_lens = ClassicTemplate.render(test_photo(400, 300), &test_meta());

        let mut meta = test_meta();
        meta.lens_model = crate::metadata::UNKNOWN.to_string();
        let without_lens = ClassicTemplate.render(test_photo(400, 300), &meta);

        let lens_h = line_metrics(sans(), MIN_FONT_LENS as f32).height();
        assert_eq!(with_lens.height() - without_lens.height(), lens_h);
        assert_eq!(with_lens.width(), without_lens.width());
    }

    #[test]
    fn photo_lands_at_padding_offset() {
        let poster = ClassicTemplate.render(test_photo(400, 300), &test_meta());
        let padding = (300.0 * PADDING_RATIO) as u32;
        // Center of the photo region carries the photo color
        let p = poster.get_pixel(padding + 200, padding + 150);
        assert_eq!(&p.0[..3], &[80, 120, 160]);
        // Margin stays background white
        assert_eq!(poster.get_pixel(2, 2), &COLOR_BACKGROUND);
    }

    #[test]
    fn extreme_panorama_renders_without_panic() {
        let poster = ClassicTemplate.render(test_photo(2000, 50), &test_meta());
        assert!(poster.width() >= 2000);
        assert!(poster.height() > 50);
    }

    #[test]
    fn tiny_photo_uses_font_floors() {
        // base = 20 → all ratio-derived fonts would collapse without floors
        let poster = ClassicTemplate.render(test_photo(20, 20), &test_meta());
        let camera_h = line_metrics(sans_bold(), MIN_FONT_CAMERA as f32).height();
        assert!(poster.height() > 20 + camera_h);
    }
}
