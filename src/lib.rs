//! Canvas Scatter - randomized shape layout and scribble-until-gone erasing
//!
//! Places non-overlapping, brush-aware squares on a drawing canvas and
//! repeatedly scribbles over a region until an external detector stops
//! finding them.

pub mod automation;
pub mod core;
pub mod erase;
pub mod layout;
pub mod shapes;

pub use crate::core::error::{InvalidDimension, Result, ScatterError};
pub use crate::core::types::{Point, Region, Size};
