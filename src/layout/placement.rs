//! Rejection-sampling placement of mutually non-colliding shapes
//!
//! Each slot draws a uniformly random top-left corner that keeps the painted
//! footprint inside the boundary, and redraws while the candidate collides
//! with an already accepted shape. A slot that collides `max_retries` times in
//! a row fails the whole layout; partial layouts are never returned.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::error::{Result, ScatterError};
use crate::core::types::{Point, Region, Size};
use crate::layout::sampling::random_top_left;
use crate::shapes::{first_collision, Shape, Square};

/// Consecutive collisions tolerated per slot unless configured otherwise
pub const DEFAULT_MAX_RETRIES: u32 = 100;

/// Inclusive range for the number of shapes drawn in one session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountRange {
    min: usize,
    max: usize,
}

impl CountRange {
    /// Build a range, collapsing it to `min..=min` when `max < min`
    pub fn new(min: usize, max: usize) -> Self {
        if max < min {
            tracing::warn!(
                "Max shapes ({}) lower than min shapes ({}), using {} for both",
                max,
                min,
                min
            );
            return Self { min, max: min };
        }
        Self { min, max }
    }

    pub fn bounds(&self) -> (usize, usize) {
        (self.min, self.max)
    }

    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        rng.gen_range(self.min..=self.max)
    }
}

/// Pick how many shapes to draw this session
pub fn choose_shape_count<R: Rng + ?Sized>(range: CountRange, rng: &mut R) -> usize {
    range.choose(rng)
}

/// Place `count` squares of `shape_size` inside `boundary` without collisions
///
/// The collision test includes half of `brush_size` on every side of every
/// square, so the rendered strokes never merge.
pub fn place_non_overlapping<R: Rng + ?Sized>(
    count: usize,
    boundary: &Region,
    shape_size: Size,
    brush_size: u32,
    max_retries: u32,
    rng: &mut R,
) -> Result<Vec<Square>> {
    place_shapes(count, boundary, shape_size, max_retries, rng, |top_left| {
        Square::new(top_left, shape_size, brush_size)
    })
}

/// Generic placement over any shape kind
///
/// `footprint` is the unexpanded size used to keep candidates inside
/// `boundary`; `make` turns a sampled top-left corner into a shape.
pub fn place_shapes<S, R, F>(
    count: usize,
    boundary: &Region,
    footprint: Size,
    max_retries: u32,
    rng: &mut R,
    mut make: F,
) -> Result<Vec<S>>
where
    S: Shape,
    R: Rng + ?Sized,
    F: FnMut(Point) -> S,
{
    if count == 0 {
        return Ok(Vec::new());
    }

    let infeasible = || ScatterError::LayoutInfeasible {
        shape: footprint,
        boundary: *boundary,
    };
    if !footprint.fits_within(boundary) {
        return Err(infeasible());
    }

    // `count` is caller-controlled, so it never sizes an allocation up front
    let mut placed: Vec<S> = Vec::new();
    for slot in 0..count {
        let mut collisions = 0;
        loop {
            let top_left = random_top_left(boundary, footprint, rng).ok_or_else(infeasible)?;
            let candidate = make(top_left);

            if !placed.iter().any(|shape| candidate.collides_with(shape)) {
                tracing::debug!(slot, collisions, "Placed shape at {}", top_left);
                placed.push(candidate);
                break;
            }

            collisions += 1;
            tracing::debug!(slot, collisions, "Illegal position at {}", top_left);
            if collisions >= max_retries {
                return Err(ScatterError::LayoutRetriesExhausted {
                    slot,
                    count,
                    max_retries,
                });
            }
        }
    }

    debug_assert!(first_collision(&placed).is_none());
    Ok(placed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::Edges;
    use rand::{RngCore, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    fn size(side: i32) -> Size {
        Size::new(side, side).unwrap()
    }

    #[test]
    fn test_zero_count_consumes_no_randomness() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let mut untouched = rng.clone();

        // Even an infeasible request succeeds when nothing is asked for
        let shapes = place_non_overlapping(0, &Region::new(0, 0, 5, 5), size(50), 40, 100, &mut rng).unwrap();

        assert!(shapes.is_empty());
        assert_eq!(rng.next_u64(), untouched.next_u64());
    }

    #[test]
    fn test_oversized_shape_is_infeasible_before_sampling() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let mut untouched = rng.clone();

        let result = place_non_overlapping(1, &Region::new(0, 0, 10, 10), size(20), 0, 100, &mut rng);

        assert!(matches!(result, Err(ScatterError::LayoutInfeasible { .. })));
        assert_eq!(rng.next_u64(), untouched.next_u64());
    }

    #[test]
    fn test_single_shape_fits_exactly() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let shapes = place_non_overlapping(1, &Region::new(7, 9, 20, 20), size(20), 40, 100, &mut rng).unwrap();
        assert_eq!(shapes.len(), 1);
        assert_eq!(shapes[0].top_left(), Point::new(7, 9));
    }

    #[test]
    fn test_crowded_layout_exhausts_retries() {
        // Only one position exists, so the second slot can never succeed
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let result = place_non_overlapping(2, &Region::new(0, 0, 20, 20), size(20), 0, 25, &mut rng);

        match result {
            Err(ScatterError::LayoutRetriesExhausted { slot, count, max_retries }) => {
                assert_eq!(slot, 1);
                assert_eq!(count, 2);
                assert_eq!(max_retries, 25);
            }
            other => panic!("Expected exhausted retries, got {:?}", other),
        }
    }

    #[test]
    fn test_huge_count_fails_without_allocating() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let result = place_non_overlapping(1usize << 40, &Region::new(0, 0, 20, 20), size(20), 0, 5, &mut rng);

        match result {
            Err(ScatterError::LayoutRetriesExhausted { slot, count, .. }) => {
                assert_eq!(slot, 1);
                assert_eq!(count, 1usize << 40);
            }
            other => panic!("Expected exhausted retries, got {:?}", other),
        }
    }

    /// Unit square at a scripted column, ignoring the sampled position
    struct Column(i32);

    impl Shape for Column {
        fn brush_clearance(&self) -> i32 {
            0
        }

        fn edges(&self) -> Edges {
            Edges { left: self.0, top: 0, right: self.0 + 1, bottom: 1 }
        }

        fn contour_points(&self) -> Vec<Point> {
            vec![Point::new(self.0, 0), Point::new(self.0 + 1, 1), Point::new(self.0, 0)]
        }

        fn capture_region(&self) -> Region {
            Region::new(self.0, 0, 1, 1)
        }
    }

    /// Candidates for each slot: `misses` copies of column 0, then a free column
    fn scripted_columns(slots: i32, misses: usize) -> impl FnMut(Point) -> Column {
        let mut script = vec![0];
        for slot in 1..slots {
            script.extend(std::iter::repeat(0).take(misses));
            script.push(slot * 10);
        }
        let mut next = script.into_iter();
        move |_| Column(next.next().unwrap_or(0))
    }

    #[test]
    fn test_retry_budget_is_per_slot() {
        // Three misses per slot, six in total: only a per-slot budget of four survives
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let shapes = place_shapes(3, &Region::new(0, 0, 100, 100), size(1), 4, &mut rng, scripted_columns(3, 3)).unwrap();

        let columns: Vec<i32> = shapes.iter().map(|c| c.0).collect();
        assert_eq!(columns, vec![0, 10, 20]);
    }

    #[test]
    fn test_retry_budget_counts_consecutive_collisions() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let result = place_shapes(3, &Region::new(0, 0, 100, 100), size(1), 4, &mut rng, scripted_columns(3, 4));

        match result {
            Err(ScatterError::LayoutRetriesExhausted { slot, max_retries, .. }) => {
                assert_eq!(slot, 1);
                assert_eq!(max_retries, 4);
            }
            other => panic!("Expected exhausted retries, got {:?}", other.map(|s| s.len())),
        }
    }

    #[test]
    fn test_placed_shapes_stay_inside_boundary() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let boundary = Region::new(120, 70, 2540, 1420);
        let shapes = place_non_overlapping(5, &boundary, size(100), 40, 100, &mut rng).unwrap();

        for shape in &shapes {
            let region = shape.capture_region();
            assert!(region.left >= boundary.left && region.right() <= boundary.right());
            assert!(region.top >= boundary.top && region.bottom() <= boundary.bottom());
            assert_eq!(shape.brush_size(), 40);
        }
    }

    #[test]
    fn test_count_range_normalises_inverted_bounds() {
        assert_eq!(CountRange::new(4, 2).bounds(), (4, 4));
        assert_eq!(CountRange::new(2, 5).bounds(), (2, 5));
    }

    #[test]
    fn test_choose_shape_count_within_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let range = CountRange::new(2, 5);
        let mut seen = [false; 6];
        for _ in 0..500 {
            let n = choose_shape_count(range, &mut rng);
            assert!((2..=5).contains(&n));
            seen[n] = true;
        }
        assert!(seen[2] && seen[5], "both ends of the range should be drawn");
    }
}
