//! The single-photo pipeline: decode, read EXIF, normalize orientation,
//! hand the upright buffer to a template.
//!
//! Both the CLI and the batch path funnel through [`RenderEngine::render`],
//! so orientation handling and template fallback behave identically
//! everywhere.

use crate::imaging;
use crate::metadata::ShotMeta;
use crate::template::{TemplateInfo, TemplateRegistry};
use image::RgbaImage;
use std::time::Instant;

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("could not decode image: {0}")]
    Decode(#[from] image::ImageError),
}

/// Owns the template registry and runs the per-photo pipeline.
pub struct RenderEngine {
    registry: TemplateRegistry,
}

impl RenderEngine {
    pub fn new(registry: TemplateRegistry) -> Self {
        Self { registry }
    }

    /// An engine wired with the shipping templates.
    pub fn builtin() -> Self {
        Self::new(TemplateRegistry::builtin())
    }

    /// Render one photo into a poster canvas.
    ///
    /// EXIF extraction is lenient: unreadable or absent metadata yields
    /// sentinel values and the render proceeds. Decoding is not: bytes that
    /// are not a decodable image are an error.
    pub fn render(
        &self,
        template_id: &str,
        bytes: &[u8],
        original_filename: &str,
    ) -> Result<(RgbaImage, ShotMeta), RenderError> {
        let started = Instant::now();

        let photo = image::load_from_memory(bytes)?.to_rgba8();
        let meta = ShotMeta::from_bytes(bytes, Some(original_filename));
        let upright = imaging::normalize(photo, meta.orientation);

        let template = self.registry.resolve(template_id);
        let poster = template.render(upright, &meta);

        tracing::info!(
            template = template.id(),
            file = original_filename,
            width = poster.width(),
            height = poster.height(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "rendered poster"
        );
        Ok((poster, meta))
    }

    /// The registered templates, in registration order.
    pub fn templates(&self) -> Vec<TemplateInfo> {
        self.registry.list()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgba};
    use std::io::Cursor;

    fn png_bytes(w: u32, h: u32) -> Vec<u8> {
        let img = RgbaImage::from_pixel(w, h, Rgba([120, 60, 180, 255]));
        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, ImageFormat::Png).unwrap();
        buf.into_inner()
    }

    #[test]
    fn renders_plain_png_with_sentinel_metadata() {
        let engine = RenderEngine::builtin();
        let (poster, meta) = engine
            .render("classic", &png_bytes(120, 90), "shot.png")
            .unwrap();
        assert!(poster.width() > 120);
        assert!(poster.height() > 90);
        assert_eq!(meta.original_filename, "shot.png");
        assert_eq!(meta.camera_model, crate::metadata::UNKNOWN);
    }

    #[test]
    fn unknown_template_still_renders_via_default() {
        let engine = RenderEngine::builtin();
        let result = engine.render("no-such-layout", &png_bytes(80, 80), "x.png");
        assert!(result.is_ok());
    }

    #[test]
    fn undecodable_bytes_are_an_error() {
        let engine = RenderEngine::builtin();
        let result = engine.render("classic", b"definitely not an image", "bad.bin");
        assert!(matches!(result, Err(RenderError::Decode(_))));
    }

    #[test]
    fn empty_bytes_are_an_error() {
        let engine = RenderEngine::builtin();
        assert!(engine.render("classic", &[], "empty.png").is_err());
    }
}
