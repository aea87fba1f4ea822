//! Geometry: scalar helpers, 2D vectors and anchors

pub mod math;
mod anchor;
mod vector2;

pub use anchor::*;
pub use vector2::*;
