//! Poster encoding.
//!
//! Two output formats, both encoded in memory:
//!
//! | Format | Alpha | Quality knob |
//! |---|---|---|
//! | PNG | preserved | none (lossless) |
//! | JPEG | flattened onto white | fraction in (0, 1] |
//!
//! Encoder availability is checked up front so a build without the needed
//! codec fails loudly instead of producing a cryptic encode error mid-batch.

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, ImageFormat, RgbImage, RgbaImage};
use std::io::Cursor;

/// Default JPEG quality when the caller does not pick one.
pub const DEFAULT_JPEG_QUALITY: f32 = 0.9;

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// The binary was built without the codec for this format. This is a
    /// deployment problem, not an input problem, so callers treat it as
    /// fatal rather than per-item.
    #[error("no encoder available for {0}")]
    EncoderUnavailable(&'static str),
    #[error("encoding failed: {0}")]
    Encode(#[from] image::ImageError),
}

/// Poster output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Png,
    Jpeg,
}

impl OutputFormat {
    /// Lenient parse: `jpg` and `jpeg` (any case) select JPEG, everything
    /// else falls back to PNG.
    pub fn parse(s: &str) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" => Self::Jpeg,
            _ => Self::Png,
        }
    }

    /// File extension without the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpg",
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

/// Encode a poster to the requested format.
///
/// `quality` only affects JPEG; a value outside (0, 1] is clamped into range.
pub fn export(canvas: &RgbaImage, format: OutputFormat, quality: f32) -> Result<Vec<u8>, ExportError> {
    match format {
        OutputFormat::Png => export_png(canvas),
        OutputFormat::Jpeg => export_jpeg(canvas, quality),
    }
}

/// Encode as PNG, alpha preserved.
pub fn export_png(canvas: &RgbaImage) -> Result<Vec<u8>, ExportError> {
    if !ImageFormat::Png.writing_enabled() {
        return Err(ExportError::EncoderUnavailable("png"));
    }
    let mut buf = Cursor::new(Vec::new());
    PngEncoder::new(&mut buf).write_image(
        canvas.as_raw(),
        canvas.width(),
        canvas.height(),
        ExtendedColorType::Rgba8,
    )?;
    Ok(buf.into_inner())
}

/// Encode as JPEG at the given quality fraction, flattening any transparency
/// onto white first. JPEG carries no alpha channel.
pub fn export_jpeg(canvas: &RgbaImage, quality: f32) -> Result<Vec<u8>, ExportError> {
    if !ImageFormat::Jpeg.writing_enabled() {
        return Err(ExportError::EncoderUnavailable("jpeg"));
    }
    let flattened = flatten_onto_white(canvas);
    let q = (quality.clamp(0.01, 1.0) * 100.0).round() as u8;
    let mut buf = Cursor::new(Vec::new());
    JpegEncoder::new_with_quality(&mut buf, q).write_image(
        flattened.as_raw(),
        flattened.width(),
        flattened.height(),
        ExtendedColorType::Rgb8,
    )?;
    Ok(buf.into_inner())
}

fn flatten_onto_white(canvas: &RgbaImage) -> RgbImage {
    RgbImage::from_fn(canvas.width(), canvas.height(), |x, y| {
        let p = canvas.get_pixel(x, y);
        let a = p[3] as f32 / 255.0;
        let inv = 1.0 - a;
        image::Rgb([
            (p[0] as f32 * a + 255.0 * inv) as u8,
            (p[1] as f32 * a + 255.0 * inv) as u8,
            (p[2] as f32 * a + 255.0 * inv) as u8,
        ])
    })
}
