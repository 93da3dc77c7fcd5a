//! Pure domain types with minimal dependencies
//!
//! Types here have no knowledge of gestures, rendering or the host, so every
//! other module can depend on them.

pub mod geometry;
pub mod selection;

pub use geometry::*;
pub use selection::*;
