//! # Shotcard
//!
//! Turn a photo and its EXIF shooting data into a styled poster card:
//! the image framed on a designed canvas with the camera model, lens, and
//! exposure parameters typeset underneath.
//!
//! # Architecture: One Pipeline, Swappable Layouts
//!
//! Every poster goes through the same four steps:
//!
//! ```text
//! 1. Decode      bytes      →  RGBA buffer
//! 2. Extract     EXIF       →  ShotMeta     (lenient — absent data becomes sentinels)
//! 3. Normalize   orientation →  upright buffer
//! 4. Compose     template    →  poster canvas
//! ```
//!
//! Only step 4 varies: templates are strategies behind the
//! [`template::PosterTemplate`] trait, looked up in an immutable
//! [`template::TemplateRegistry`]. An unknown template id silently resolves
//! to the default so a stale id in a script still produces a poster.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`metadata`] | EXIF extraction into [`metadata::ShotMeta`], sentinel-based (never `Option`) |
//! | [`imaging`] | Pure-Rust pixel work: orientation, masks, gradients, text |
//! | [`template`] | The layout strategies, their registry, and shared parameter formatting |
//! | [`render`] | The per-photo pipeline, shared by CLI and batch |
//! | [`export`] | PNG/JPEG encoding, alpha flattening |
//! | [`batch`] | Sequential multi-photo runs packed into a zip archive |
//!
//! # Design Decisions
//!
//! ## Sentinels Over Options
//!
//! [`metadata::ShotMeta`] carries every field as a `String`, with `"unknown"`
//! standing in for absent EXIF data. Templates format sentinels into display
//! placeholders (`?mm`, `f/?`) instead of branching on `Option` at every
//! draw call. The one structural decision driven by missing data — dropping
//! the lens line — goes through [`metadata::ShotMeta::has_lens`].
//!
//! ## Orientation as Exact Permutation
//!
//! The eight EXIF orientation codes map to lossless pixel permutations
//! (flips, quarter-turn rotations) via `image::imageops`. No resampling, no
//! interpolation: normalizing then inverting reproduces the original buffer
//! exactly.
//!
//! ## Pure-Rust Imaging
//!
//! Decoding, blurring, compositing, and encoding all come from the `image`
//! crate; text comes from `rusttype` with DejaVu Sans embedded at compile
//! time. No ImageMagick, no fontconfig, no system dependencies — the binary
//! renders the same poster on any machine.

pub mod batch;
pub mod export;
pub mod imaging;
pub mod metadata;
pub mod render;
pub mod template;
