//! coinburst - coins that fly along randomized Bézier arcs
//!
//! The engine is split into three layers:
//! - [`motion`] - scalar helpers, [`Vector2`](motion::Vector2) and anchors
//! - [`animation`] - the [`Tween`](animation::Tween) driver and its scheduler
//! - [`batch`] - [`Unit`](batch::Unit) trajectories and [`Batch`](batch::Batch)
//!   orchestration
//!
//! Nothing here draws. Hosts observe positions through
//! [`BatchObserver`](batch::BatchObserver) and render them however they like.

pub mod animation;
pub mod batch;
pub mod config;
pub mod error;
pub mod motion;

pub use animation::{Easing, FrameScheduler, Scheduler, Tween, TweenConfig, TweenDuration};
pub use batch::{Batch, BatchConfig, BatchObserver, QuantitySplit, Unit, UnitConfig};
pub use motion::{Anchor, Region, Vector2};
