//! Axis-aligned square (or rectangle) drawn with a round brush

use serde::{Deserialize, Serialize};

use crate::core::error::Result;
use crate::core::types::{Point, Region, Size};
use crate::shapes::{Edges, Shape};

/// A placed square with the brush it will be drawn with
///
/// Only the top-left anchor and the size are stored; the other corners are
/// derived on every access, so they can never disagree with the anchor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Square {
    top_left: Point,
    size: Size,
    brush_size: u32,
}

impl Square {
    pub fn new(top_left: Point, size: Size, brush_size: u32) -> Self {
        Self { top_left, size, brush_size }
    }

    /// Build from raw dimensions, validating them first
    pub fn from_dimensions(top_left: Point, width: i32, height: i32, brush_size: u32) -> Result<Self> {
        Ok(Self::new(top_left, Size::new(width, height)?, brush_size))
    }

    pub fn size(&self) -> Size {
        self.size
    }

    /// Full brush diameter
    pub fn brush_size(&self) -> u32 {
        self.brush_size
    }

    pub fn top_left(&self) -> Point {
        self.top_left
    }

    pub fn top_right(&self) -> Point {
        self.top_left.offset(self.size.width(), 0)
    }

    pub fn bottom_left(&self) -> Point {
        self.top_left.offset(0, self.size.height())
    }

    pub fn bottom_right(&self) -> Point {
        self.top_left.offset(self.size.width(), self.size.height())
    }

    /// Corners in drawing order: top left, top right, bottom right, bottom left
    pub fn corners(&self) -> [Point; 4] {
        [self.top_left(), self.top_right(), self.bottom_right(), self.bottom_left()]
    }

    /// Move the anchor; the other corners follow
    pub fn relocate(&mut self, top_left: Point) {
        self.top_left = top_left;
    }

    pub fn set_size(&mut self, size: Size) {
        self.size = size;
    }

    /// Validate and apply new raw dimensions
    ///
    /// On failure the previous size is kept.
    pub fn resize(&mut self, width: i32, height: i32) -> Result<()> {
        self.size = Size::new(width, height)?;
        Ok(())
    }

    pub fn set_brush_size(&mut self, brush_size: u32) {
        self.brush_size = brush_size;
    }
}

impl Shape for Square {
    fn brush_clearance(&self) -> i32 {
        (self.brush_size / 2) as i32
    }

    fn edges(&self) -> Edges {
        let clearance = self.brush_clearance();
        Edges {
            left: self.top_left().x - clearance,
            top: self.top_left().y - clearance,
            right: self.top_right().x + clearance,
            bottom: self.bottom_left().y + clearance,
        }
    }

    fn contour_points(&self) -> Vec<Point> {
        let [top_left, top_right, bottom_right, bottom_left] = self.corners();
        vec![top_left, top_right, bottom_right, bottom_left, top_left]
    }

    fn capture_region(&self) -> Region {
        Region::new(self.top_left.x, self.top_left.y, self.size.width(), self.size.height())
    }
}

impl std::fmt::Display for Square {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Square {} brush={} (clearance {}) corners [{} {} {} {}]",
            self.size,
            self.brush_size,
            self.brush_clearance(),
            self.top_left(),
            self.top_right(),
            self.bottom_right(),
            self.bottom_left()
        )
    }
}
