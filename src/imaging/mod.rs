//! Pure-Rust image operations — no system dependencies.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Orientation** | exact pixel permutations via `image::imageops` |
//! | **Rounded mask / shadow** | per-pixel coverage compositing |
//! | **Gaussian blur** | `image::imageops::blur` |
//! | **Text** | `rusttype` + embedded DejaVu Sans |
//!
//! The module is split into:
//! - **orientation**: the 8-code EXIF orientation normalizer
//! - **compose**: rounded masks, shadows, gradients, luma sampling
//! - **text**: font metrics and letter-spaced glyph drawing

pub mod compose;
pub mod orientation;
pub mod text;

pub use orientation::normalize;
