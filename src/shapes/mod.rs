//! Placeable shapes and their brush-aware collision test
//!
//! A shape is any drawable region that can report its bounding edges grown
//! by half the brush diameter. Layout and drawing only talk to shapes through
//! the [`Shape`] trait, so a new kind of shape only has to supply geometry.

pub mod square;

pub use square::Square;

use serde::{Deserialize, Serialize};

use crate::core::types::{Point, Region};

/// Bounding edges of a shape, already expanded by its brush clearance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edges {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Edges {
    /// True if one box lies strictly beside, above or below the other
    ///
    /// Edges that touch do not separate.
    pub fn separated_from(&self, other: &Edges) -> bool {
        self.left > other.right
            || other.left > self.right
            || self.bottom < other.top
            || other.bottom < self.top
    }
}

pub trait Shape {
    /// Half the brush diameter, added on every side before collision tests
    fn brush_clearance(&self) -> i32;

    /// Bounding edges grown outward by [`Shape::brush_clearance`]
    fn edges(&self) -> Edges;

    /// Closed outline for a single continuous stroke; first and last points
    /// are the same
    fn contour_points(&self) -> Vec<Point>;

    /// Exactly the painted footprint, without the brush margin
    fn capture_region(&self) -> Region;

    /// Inclusive overlap of the brush-expanded boxes
    ///
    /// Symmetric, and every shape collides with itself.
    fn collides_with(&self, other: &dyn Shape) -> bool {
        !self.edges().separated_from(&other.edges())
    }
}

/// Index pair of the first two shapes that collide, if any
pub fn first_collision<S: Shape>(shapes: &[S]) -> Option<(usize, usize)> {
    for (i, a) in shapes.iter().enumerate() {
        for (j, b) in shapes.iter().enumerate().skip(i + 1) {
            if a.collides_with(b) {
                return Some((i, j));
            }
        }
    }
    None
}
