//! EXIF orientation normalization.
//!
//! Cameras store sensor rows as shot and record the display transform in the
//! orientation tag (1–8). Rendering needs upright pixels, so the pipeline
//! applies the correction once, immediately after decode.
//!
//! | code | transform |
//! |---|---|
//! | 1 | identity |
//! | 2 | horizontal mirror |
//! | 3 | 180° rotation |
//! | 4 | vertical mirror |
//! | 5 | rotate 90° CW, then horizontal mirror (transpose) |
//! | 6 | rotate 90° CW |
//! | 7 | rotate 90° CCW, then horizontal mirror (transverse) |
//! | 8 | rotate 90° CCW |
//!
//! Codes 5–8 swap output width and height. Every transform is an exact pixel
//! permutation — no resampling, no precision loss, and round-tripping through
//! the inverse code restores the original buffer bit for bit.

use image::RgbaImage;
use image::imageops;

/// Apply the correction for an EXIF orientation code.
///
/// Takes the buffer by value: codes 2–8 consume it and return a fresh
/// buffer; code 1 (and any out-of-range code, treated as identity) returns
/// the input unchanged without copying.
pub fn normalize(photo: RgbaImage, code: u32) -> RgbaImage {
    match code {
        2 => imageops::flip_horizontal(&photo),
        3 => imageops::rotate180(&photo),
        4 => imageops::flip_vertical(&photo),
        5 => imageops::flip_horizontal(&imageops::rotate90(&photo)),
        6 => imageops::rotate90(&photo),
        7 => imageops::flip_horizontal(&imageops::rotate270(&photo)),
        8 => imageops::rotate270(&photo),
        _ => photo,
    }
}

/// The code that undoes `code`. Mirrors and 180° are self-inverse; the two
/// pure rotations invert each other; the two transposes are self-inverse.
pub fn inverse(code: u32) -> u32 {
    match code {
        6 => 8,
        8 => 6,
        other => other,
    }
}
