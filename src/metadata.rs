//! Shooting metadata: the immutable snapshot templates render from.
//!
//! [`ShotMeta`] is constructed once per input image and never mutated. Every
//! string field defaults to the [`UNKNOWN`] sentinel — layout code checks
//! sentinel equality (e.g. to omit the lens line) and never branches on
//! `Option`/empty strings.
//!
//! Extraction is deliberately lenient: a file with no EXIF block, a truncated
//! EXIF block, or any unreadable tag yields a snapshot of sentinels rather
//! than an error. Absence of metadata is a rendering input, not a failure.

use exif::{In, Reader, Tag, Value};
use std::io::Cursor;

/// Sentinel substituted for any metadata field that could not be determined.
pub const UNKNOWN: &str = "unknown";

/// Immutable record of the shooting parameters embedded in a photo.
///
/// String fields are never empty: absent values carry the [`UNKNOWN`]
/// sentinel. The orientation code is one of the eight EXIF values (1–8),
/// defaulting to 1 (upright) when the tag is missing or out of range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShotMeta {
    pub camera_make: String,
    pub camera_model: String,
    pub lens_model: String,
    pub shutter_speed: String,
    pub aperture: String,
    pub iso: String,
    pub focal_length: String,
    pub exposure_bias: String,
    pub metering_mode: String,
    pub white_balance: String,
    pub flash: String,
    pub captured_at: String,
    pub original_filename: String,
    /// EXIF orientation code, 1–8. See [`crate::imaging::orientation`].
    pub orientation: u32,
}

impl Default for ShotMeta {
    fn default() -> Self {
        Self {
            camera_make: UNKNOWN.to_string(),
            camera_model: UNKNOWN.to_string(),
            lens_model: UNKNOWN.to_string(),
            shutter_speed: UNKNOWN.to_string(),
            aperture: UNKNOWN.to_string(),
            iso: UNKNOWN.to_string(),
            focal_length: UNKNOWN.to_string(),
            exposure_bias: UNKNOWN.to_string(),
            metering_mode: UNKNOWN.to_string(),
            white_balance: UNKNOWN.to_string(),
            flash: UNKNOWN.to_string(),
            captured_at: UNKNOWN.to_string(),
            original_filename: UNKNOWN.to_string(),
            orientation: 1,
        }
    }
}

impl ShotMeta {
    /// Extract a snapshot from raw image bytes.
    ///
    /// Never fails: images without EXIF data (or with unreadable EXIF) give
    /// a snapshot where every field is the sentinel and orientation is 1.
    pub fn from_bytes(bytes: &[u8], original_filename: Option<&str>) -> Self {
        let mut meta = Self {
            original_filename: original_filename
                .map(str::to_string)
                .unwrap_or_else(|| UNKNOWN.to_string()),
            ..Self::default()
        };

        let mut cursor = Cursor::new(bytes);
        let Ok(exif) = Reader::new().read_from_container(&mut cursor) else {
            return meta;
        };

        if let Some(v) = get_string(&exif, Tag::Make) {
            meta.camera_make = v;
        }
        if let Some(v) = get_string(&exif, Tag::Model) {
            meta.camera_model = v;
        }
        if let Some(v) = get_string(&exif, Tag::LensModel) {
            meta.lens_model = v;
        }
        if let Some(v) = get_string(&exif, Tag::ExposureTime) {
            meta.shutter_speed = format!("{} sec", v);
        }
        if let Some(v) = get_string(&exif, Tag::FNumber) {
            meta.aperture = format!("f/{}", v);
        }
        if let Some(v) = get_string(&exif, Tag::PhotographicSensitivity) {
            meta.iso = v;
        }
        if let Some(v) = get_focal_length(&exif) {
            meta.focal_length = v;
        }
        if let Some(v) = get_string(&exif, Tag::ExposureBiasValue) {
            meta.exposure_bias = format!("{} EV", v);
        }
        if let Some(v) = get_string(&exif, Tag::MeteringMode) {
            meta.metering_mode = v;
        }
        if let Some(v) = get_string(&exif, Tag::WhiteBalance) {
            meta.white_balance = v;
        }
        if let Some(v) = get_string(&exif, Tag::Flash) {
            meta.flash = v;
        }
        if let Some(v) = get_datetime(&exif) {
            meta.captured_at = v;
        }
        if let Some(v) = get_u32(&exif, Tag::Orientation) {
            // Out-of-range codes are left at the identity default
            if (1..=8).contains(&v) {
                meta.orientation = v;
            }
        }

        meta
    }

    /// Whether the lens model carries a real value worth rendering.
    pub fn has_lens(&self) -> bool {
        self.lens_model != UNKNOWN && !self.lens_model.is_empty()
    }
}

/// Get a string field, stripping the quotes kamadak-exif wraps ASCII in.
fn get_string(exif: &exif::Exif, tag: Tag) -> Option<String> {
    exif.get_field(tag, In::PRIMARY).map(|f| {
        let s = f.display_value().to_string();
        s.trim_matches('"').trim().to_string()
    })
}

fn get_u32(exif: &exif::Exif, tag: Tag) -> Option<u32> {
    exif.get_field(tag, In::PRIMARY)
        .and_then(|f| match &f.value {
            Value::Short(v) => v.first().map(|&x| x as u32),
            Value::Long(v) => v.first().copied(),
            _ => None,
        })
}

/// Capture datetime, preferring DateTimeOriginal over DateTime.
fn get_datetime(exif: &exif::Exif) -> Option<String> {
    exif.get_field(Tag::DateTimeOriginal, In::PRIMARY)
        .or_else(|| exif.get_field(Tag::DateTime, In::PRIMARY))
        .map(|f| f.display_value().to_string().trim_matches('"').to_string())
}

/// Focal length as "<n> mm". Rational values drop a fractional part of zero
/// so `50/1` reads "50 mm" rather than "50.0 mm".
fn get_focal_length(exif: &exif::Exif) -> Option<String> {
    exif.get_field(Tag::FocalLength, In::PRIMARY)
        .and_then(|f| match &f.value {
            Value::Rational(v) => v.first().map(|r| {
                let mm = r.to_f64();
                if mm.fract() == 0.0 {
                    format!("{} mm", mm as u64)
                } else {
                    format!("{:.1} mm", mm)
                }
            }),
            _ => None,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::ImageEncoder;

    #[test]
    fn default_is_all_sentinels_and_upright() {
        let meta = ShotMeta::default();
        assert_eq!(meta.camera_model, UNKNOWN);
        assert_eq!(meta.lens_model, UNKNOWN);
        assert_eq!(meta.shutter_speed, UNKNOWN);
        assert_eq!(meta.aperture, UNKNOWN);
        assert_eq!(meta.iso, UNKNOWN);
        assert_eq!(meta.orientation, 1);
        assert!(!meta.has_lens());
    }

    #[test]
    fn bytes_without_exif_give_sentinels() {
        // A bare PNG has no EXIF container at all
        let img = image::RgbImage::from_pixel(4, 4, image::Rgb([10, 20, 30]));
        let mut bytes = Vec::new();
        image::codecs::png::PngEncoder::new(&mut bytes)
            .write_image(img.as_raw(), 4, 4, image::ExtendedColorType::Rgb8)
            .unwrap();

        let meta = ShotMeta::from_bytes(&bytes, Some("DSC_0073.JPG"));
        assert_eq!(meta.camera_model, UNKNOWN);
        assert_eq!(meta.orientation, 1);
        assert_eq!(meta.original_filename, "DSC_0073.JPG");
    }

    #[test]
    fn garbage_bytes_give_sentinels() {
        let meta = ShotMeta::from_bytes(b"not an image at all", None);
        assert_eq!(meta, ShotMeta::default());
    }

    #[test]
    fn has_lens_rejects_sentinel_and_empty() {
        let mut meta = ShotMeta::default();
        assert!(!meta.has_lens());
        meta.lens_model = String::new();
        assert!(!meta.has_lens());
        meta.lens_model = "NIKKOR Z 24-70mm f/2.8 S".to_string();
        assert!(meta.has_lens());
    }
}
