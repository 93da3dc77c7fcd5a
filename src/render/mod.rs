//! Selection overlay rendering
//!
//! `overlay` computes marker positions, `pixmap` rasterizes them with tiny-skia.

pub mod overlay;
pub mod pixmap;
