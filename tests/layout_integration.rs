//! Integration tests for brush-aware layout generation

use canvas_scatter::layout::{place_non_overlapping, place_shapes, DEFAULT_MAX_RETRIES};
use canvas_scatter::shapes::{first_collision, Edges, Shape, Square};
use canvas_scatter::{Point, Region, ScatterError, Size};
use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn canvas() -> Region {
    Region::new(20, 20, 2540, 1420)
}

#[test]
fn test_layout_is_pairwise_non_colliding() {
    for seed in 0..50 {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let shapes = place_non_overlapping(
            5,
            &canvas(),
            Size::new(100, 100).unwrap(),
            40,
            DEFAULT_MAX_RETRIES,
            &mut rng,
        )
        .unwrap();

        assert_eq!(shapes.len(), 5);
        for (i, a) in shapes.iter().enumerate() {
            for b in shapes.iter().skip(i + 1) {
                assert!(!a.collides_with(b), "seed {}: {} collides with {}", seed, a, b);
            }
        }
    }
}

#[test]
fn test_seeded_layouts_are_identical() {
    let run = |seed| {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        place_non_overlapping(4, &canvas(), Size::new(80, 120).unwrap(), 20, 100, &mut rng).unwrap()
    };

    assert_eq!(run(42), run(42));
    assert_ne!(run(42), run(7));
}

#[test]
fn test_shape_larger_than_boundary_is_infeasible() {
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let result = place_non_overlapping(1, &Region::new(0, 0, 10, 10), Size::new(20, 20).unwrap(), 0, 100, &mut rng);

    match result {
        Err(ScatterError::LayoutInfeasible { shape, boundary }) => {
            assert_eq!(shape, Size::new(20, 20).unwrap());
            assert_eq!(boundary, Region::new(0, 0, 10, 10));
        }
        other => panic!("Expected infeasible layout, got {:?}", other),
    }
}

#[test]
fn test_taller_than_boundary_is_infeasible() {
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let result = place_non_overlapping(3, &Region::new(0, 0, 500, 50), Size::new(10, 60).unwrap(), 0, 100, &mut rng);
    assert!(matches!(result, Err(ScatterError::LayoutInfeasible { .. })));
}

#[test]
fn test_brush_clearance_blocks_tight_packing() {
    let size = Size::new(40, 40).unwrap();

    // Without a brush any first position leaves room for a second square
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let roomy = place_non_overlapping(2, &Region::new(0, 0, 200, 40), size, 0, 10_000, &mut rng).unwrap();
    assert_eq!(first_collision(&roomy), None);

    // A 20px brush needs a raw gap of 21px; 90px of width can never hold both
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let crowded = place_non_overlapping(2, &Region::new(0, 0, 90, 40), size, 20, 200, &mut rng);
    assert!(matches!(crowded, Err(ScatterError::LayoutRetriesExhausted { slot: 1, .. })));
}

/// A shape kind with a fixed margin instead of a brush
struct Tile {
    origin: Point,
    side: i32,
}

impl Shape for Tile {
    fn brush_clearance(&self) -> i32 {
        2
    }

    fn edges(&self) -> Edges {
        Edges {
            left: self.origin.x - 2,
            top: self.origin.y - 2,
            right: self.origin.x + self.side + 2,
            bottom: self.origin.y + self.side + 2,
        }
    }

    fn contour_points(&self) -> Vec<Point> {
        vec![self.origin, self.origin.offset(self.side, self.side), self.origin]
    }

    fn capture_region(&self) -> Region {
        Region::new(self.origin.x, self.origin.y, self.side, self.side)
    }
}

#[test]
fn test_other_shape_kinds_plug_into_placement() {
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let tiles = place_shapes(8, &Region::new(0, 0, 300, 300), Size::new(25, 25).unwrap(), 100, &mut rng, |origin| Tile {
        origin,
        side: 25,
    })
    .unwrap();

    assert_eq!(tiles.len(), 8);
    assert_eq!(first_collision(&tiles), None);

    // Shapes of different kinds share one collision test
    let square = Square::new(tiles[0].origin, Size::new(5, 5).unwrap(), 0);
    assert!(square.collides_with(&tiles[0]));
    assert!(tiles[0].collides_with(&square));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_successful_layouts_never_collide(
        seed in any::<u64>(),
        count in 0usize..6,
        side in 10i32..80,
        brush in 0u32..30,
    ) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let boundary = Region::new(0, 0, 800, 600);
        match place_non_overlapping(count, &boundary, Size::new(side, side).unwrap(), brush, 100, &mut rng) {
            Ok(shapes) => {
                prop_assert_eq!(shapes.len(), count);
                prop_assert_eq!(first_collision(&shapes), None);
                for shape in &shapes {
                    let region = shape.capture_region();
                    prop_assert!(region.left >= boundary.left && region.right() <= boundary.right());
                    prop_assert!(region.top >= boundary.top && region.bottom() <= boundary.bottom());
                }
            }
            Err(ScatterError::LayoutRetriesExhausted { .. }) => {}
            Err(e) => prop_assert!(false, "unexpected error {}", e),
        }
    }
}
