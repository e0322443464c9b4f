//! Randomized layout of non-overlapping shapes

pub mod placement;
pub mod sampling;

pub use placement::{
    choose_shape_count, place_non_overlapping, place_shapes, CountRange, DEFAULT_MAX_RETRIES,
};
pub use sampling::{painting_border_for_brush, random_point_within, BorderModifiers};
