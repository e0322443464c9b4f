//! Collaborators that see and draw on the screen
//!
//! The layout engine and the erase loop never touch a real display. Whatever
//! drives the drawing application implements [`Screen`] (capturing regions,
//! loading saved screenshots and counting template matches) and
//! [`DrawingSoftware`] (application lifecycle, reporting the paper and brush,
//! performing strokes). [`Painter`] composes the two with the core.

pub mod painter;
pub mod simulated;

pub use painter::{Painter, SessionReport};
pub use simulated::{Capture, SimulatedDesktop, SimulatedScreen, SimulatedSoftware};

use std::path::Path;

use crate::core::error::Result;
use crate::core::types::{Point, Region, Size};

/// Screen capture and template matching
pub trait Screen {
    /// Opaque captured image
    type Image;

    fn capture(&mut self, region: Region) -> Self::Image;

    /// Reference image saved ahead of time, e.g. a screenshot of one square
    fn load_template(&mut self, path: &Path) -> Result<Self::Image>;

    /// Number of places on screen currently matching `template`
    fn count_matches(&mut self, template: &Self::Image) -> usize;
}

/// A drawing application with a freehand brush
pub trait DrawingSoftware {
    /// Launch the application and wait until it accepts input
    fn open(&mut self) -> Result<()> {
        Ok(())
    }

    /// Start an empty document whose paper is `size`
    fn start_new_drawing(&mut self, size: Size) -> Result<()>;

    /// Paper area of the open document, in screen coordinates
    fn drawing_boundaries(&mut self) -> Region;

    /// Current brush diameter
    fn brush_size(&self) -> u32;

    /// One freehand stroke; returns once the stroke is finished
    fn draw_line(&mut self, from: Point, to: Point);

    /// One continuous stroke through every point
    fn draw_polyline(&mut self, points: &[Point]) {
        for pair in points.windows(2) {
            self.draw_line(pair[0], pair[1]);
        }
    }

    /// Quit the application without saving
    fn close(&mut self) -> Result<()> {
        Ok(())
    }
}
