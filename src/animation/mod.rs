//! Tween driver, easing curves and frame scheduling

pub mod easing;
mod scheduler;
mod tween;

pub use easing::Easing;
pub use scheduler::*;
pub use tween::*;
