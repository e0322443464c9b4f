//! Uniform random points inside a region

use rand::Rng;

use crate::core::types::{Point, Region, Size};

/// Per-edge adjustments applied before sampling
///
/// Positive values move an edge right/down, negative values left/up.
/// Pulling the right and bottom edges in by a shape's size keeps the whole
/// shape inside the region when the sample is used as its top-left corner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BorderModifiers {
    pub top: i32,
    pub bottom: i32,
    pub left: i32,
    pub right: i32,
}

impl BorderModifiers {
    /// Modifiers that keep a `size` footprint anchored at the sample inside the region
    pub fn for_footprint(size: Size) -> Self {
        Self {
            right: -size.width(),
            bottom: -size.height(),
            ..Self::default()
        }
    }
}

/// Uniform point in `boundary`, edges inclusive
pub fn random_point_within<R: Rng + ?Sized>(boundary: &Region, rng: &mut R) -> Point {
    let x = rng.gen_range(boundary.left..=boundary.right().max(boundary.left));
    let y = rng.gen_range(boundary.top..=boundary.bottom().max(boundary.top));
    Point::new(x, y)
}

/// Uniform point in `boundary` after shifting its edges by `modifiers`
///
/// Returns `None` without touching the generator when the adjusted range is
/// empty on either axis.
pub fn random_point_with_modifiers<R: Rng + ?Sized>(
    boundary: &Region,
    modifiers: BorderModifiers,
    rng: &mut R,
) -> Option<Point> {
    let (min_x, max_x) = (boundary.left + modifiers.left, boundary.right() + modifiers.right);
    let (min_y, max_y) = (boundary.top + modifiers.top, boundary.bottom() + modifiers.bottom);
    if min_x > max_x || min_y > max_y {
        return None;
    }
    let x = rng.gen_range(min_x..=max_x);
    let y = rng.gen_range(min_y..=max_y);
    Some(Point::new(x, y))
}

/// Top-left corner for a `size` footprint that lies fully inside `boundary`
pub fn random_top_left<R: Rng + ?Sized>(boundary: &Region, size: Size, rng: &mut R) -> Option<Point> {
    random_point_with_modifiers(boundary, BorderModifiers::for_footprint(size), rng)
}

/// Drawable area for a brush: strokes centred on its near edges stay on the paper
pub fn painting_border_for_brush(area: &Region, brush_size: u32) -> Region {
    area.shrink((brush_size / 2) as i32)
}
