//! Geometry providers that resolve to a point on demand

use std::cell::Cell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use super::Vector2;

/// Something whose on-screen location can be queried.
///
/// A batch resolves its source and destination anchors once per run.
pub trait Anchor {
    fn locate(&self) -> Vector2;
}

/// Axis-aligned box, e.g. a widget's bounding rectangle
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Region {
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn center(&self) -> Vector2 {
        Vector2::new(self.left + self.width / 2.0, self.top + self.height / 2.0)
    }
}

impl Anchor for Region {
    fn locate(&self) -> Vector2 {
        self.center()
    }
}

impl Anchor for Vector2 {
    fn locate(&self) -> Vector2 {
        *self
    }
}

/// Shared geometry the host can keep updating between runs
impl<A: Anchor + Copy> Anchor for Rc<Cell<A>> {
    fn locate(&self) -> Vector2 {
        self.get().locate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_center() {
        let region = Region::new(10.0, 20.0, 30.0, 4.0);
        assert_eq!(region.locate(), Vector2::new(25.0, 22.0));
    }

    #[test]
    fn test_vector_anchor() {
        let point = Vector2::new(-1.0, 7.5);
        assert_eq!(point.locate(), point);
    }

    #[test]
    fn test_shared_anchor_follows_updates() {
        let shared = Rc::new(Cell::new(Region::new(0.0, 0.0, 2.0, 2.0)));
        let anchor: Box<dyn Anchor> = Box::new(Rc::clone(&shared));
        assert_eq!(anchor.locate(), Vector2::new(1.0, 1.0));

        shared.set(Region::new(10.0, 10.0, 2.0, 2.0));
        assert_eq!(anchor.locate(), Vector2::new(11.0, 11.0));
    }
}
