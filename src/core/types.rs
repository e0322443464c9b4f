//! Core geometry value types used throughout the codebase

use serde::{Deserialize, Serialize};

use crate::core::error::{InvalidDimension, Result, ScatterError};

/// Integer screen position
///
/// Arithmetic saturates at the `i32` limits instead of overflowing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn offset(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
        }
    }
}

impl std::ops::Add for Point {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        self.offset(rhs.x, rhs.y)
    }
}

impl std::ops::Sub for Point {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self {
            x: self.x.saturating_sub(rhs.x),
            y: self.y.saturating_sub(rhs.y),
        }
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Width and height of a shape, both strictly positive
///
/// The fields are private so that every `Size` in circulation has passed
/// [`Size::new`]. Deserialization goes through the same check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawSize")]
pub struct Size {
    width: i32,
    height: i32,
}

#[derive(Deserialize)]
struct RawSize {
    width: i32,
    height: i32,
}

impl TryFrom<RawSize> for Size {
    type Error = ScatterError;

    fn try_from(raw: RawSize) -> Result<Self> {
        Size::new(raw.width, raw.height)
    }
}

impl Size {
    /// Validate and build a size
    ///
    /// Fails with [`ScatterError::InvalidSize`] naming the width, the height,
    /// or both when they are not positive.
    pub fn new(width: i32, height: i32) -> Result<Self> {
        match InvalidDimension::classify(width, height) {
            Some(dimension) => Err(ScatterError::InvalidSize { width, height, dimension }),
            None => Ok(Self { width, height }),
        }
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// True if this size fits inside `region` without moving past its far edges
    pub fn fits_within(&self, region: &Region) -> bool {
        self.width <= region.width && self.height <= region.height
    }
}

impl std::fmt::Display for Size {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Axis-aligned area of interest: a canvas, a drawable area or a capture box
///
/// Unlike [`Size`], zero extents are allowed. Negative extents are never
/// produced by this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Region {
    pub left: i32,
    pub top: i32,
    pub width: i32,
    pub height: i32,
}

impl Region {
    pub const fn new(left: i32, top: i32, width: i32, height: i32) -> Self {
        Self { left, top, width, height }
    }

    /// Build from inclusive edge coordinates
    pub fn from_edges(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            width: right.saturating_sub(left).max(0),
            height: bottom.saturating_sub(top).max(0),
        }
    }

    #[inline]
    pub fn right(&self) -> i32 {
        self.left.saturating_add(self.width)
    }

    #[inline]
    pub fn bottom(&self) -> i32 {
        self.top.saturating_add(self.height)
    }

    pub fn top_left(&self) -> Point {
        Point::new(self.left, self.top)
    }

    /// Inclusive containment: points on the edges are inside
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.left && point.x <= self.right() && point.y >= self.top && point.y <= self.bottom()
    }

    /// Move the left and top edges inward by `margin`, shortening the extents
    /// by the same amount so the right and bottom edges stay put
    ///
    /// Extents saturate at zero.
    pub fn shrink(&self, margin: i32) -> Self {
        Self {
            left: self.left.saturating_add(margin),
            top: self.top.saturating_add(margin),
            width: self.width.saturating_sub(margin).max(0),
            height: self.height.saturating_sub(margin).max(0),
        }
    }
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Region(left={}, top={}, width={}, height={})", self.left, self.top, self.width, self.height)
    }
}
