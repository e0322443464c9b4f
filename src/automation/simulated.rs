//! In-memory desktop for headless runs and tests
//!
//! Closed polylines become targets. A freehand line that crosses a target's
//! footprint (grown by the brush clearance) counts as one hit, and a target
//! stops matching after `strokes_to_obscure` hits. Template matching compares
//! footprint sizes, which is all the layout guarantees are about; a template
//! loaded from disk contributes only its pixel dimensions.

use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;

use geo::{coord, Intersects, Line, Rect};

use crate::automation::{DrawingSoftware, Screen};
use crate::core::config::SimulationConfig;
use crate::core::error::{Result, ScatterError};
use crate::core::types::{Point, Region, Size};

#[derive(Debug, Clone)]
struct Target {
    footprint: Region,
    hits: u32,
}

#[derive(Debug)]
struct CanvasState {
    running: bool,
    drawings_started: u32,
    paper: Region,
    brush_size: u32,
    strokes_to_obscure: u32,
    targets: Vec<Target>,
    lines_drawn: u64,
}

impl CanvasState {
    fn is_visible(&self, target: &Target) -> bool {
        target.hits < self.strokes_to_obscure
    }

    fn apply_line(&mut self, from: Point, to: Point) {
        self.lines_drawn += 1;
        let clearance = (self.brush_size / 2) as i32;
        let stroke = Line::new(
            coord! { x: from.x as f64, y: from.y as f64 },
            coord! { x: to.x as f64, y: to.y as f64 },
        );

        for target in &mut self.targets {
            let area = target.footprint;
            let reach = Rect::new(
                coord! { x: (area.left - clearance) as f64, y: (area.top - clearance) as f64 },
                coord! { x: (area.right() + clearance) as f64, y: (area.bottom() + clearance) as f64 },
            )
            .to_polygon();

            if reach.intersects(&stroke) {
                target.hits += 1;
            }
        }
    }
}

/// Captured screen area; matching only looks at its extent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capture {
    pub region: Region,
}

/// Shared handle to one simulated canvas
///
/// [`SimulatedScreen`] and [`SimulatedSoftware`] are views onto the same
/// canvas, the way a real screen and a real application share one display.
#[derive(Debug, Clone)]
pub struct SimulatedDesktop {
    state: Rc<RefCell<CanvasState>>,
}

impl SimulatedDesktop {
    pub fn new(config: &SimulationConfig) -> Self {
        Self {
            state: Rc::new(RefCell::new(CanvasState {
                running: false,
                drawings_started: 0,
                paper: Region::default(),
                brush_size: config.brush_size,
                strokes_to_obscure: config.strokes_to_obscure.max(1),
                targets: Vec::new(),
                lines_drawn: 0,
            })),
        }
    }

    pub fn screen(&self) -> SimulatedScreen {
        SimulatedScreen { state: Rc::clone(&self.state) }
    }

    pub fn software(&self) -> SimulatedSoftware {
        SimulatedSoftware { state: Rc::clone(&self.state) }
    }

    /// True between a successful `open` and `close`
    pub fn is_running(&self) -> bool {
        self.state.borrow().running
    }

    pub fn drawings_started(&self) -> u32 {
        self.state.borrow().drawings_started
    }

    /// Targets drawn so far, obscured or not
    pub fn target_count(&self) -> usize {
        self.state.borrow().targets.len()
    }

    /// Targets that would still match a template of their own size
    pub fn visible_targets(&self) -> usize {
        let state = self.state.borrow();
        state.targets.iter().filter(|t| state.is_visible(t)).count()
    }

    /// Freehand lines drawn, contours excluded
    pub fn lines_drawn(&self) -> u64 {
        self.state.borrow().lines_drawn
    }
}

#[derive(Debug, Clone)]
pub struct SimulatedScreen {
    state: Rc<RefCell<CanvasState>>,
}

impl Screen for SimulatedScreen {
    type Image = Capture;

    fn capture(&mut self, region: Region) -> Capture {
        Capture { region }
    }

    fn load_template(&mut self, path: &Path) -> Result<Capture> {
        let (width, height) = image::image_dimensions(path)?;
        let width = i32::try_from(width).unwrap_or(i32::MAX);
        let height = i32::try_from(height).unwrap_or(i32::MAX);
        Ok(Capture {
            region: Region::new(0, 0, width, height),
        })
    }

    fn count_matches(&mut self, template: &Capture) -> usize {
        let state = self.state.borrow();
        state
            .targets
            .iter()
            .filter(|t| state.is_visible(t))
            .filter(|t| {
                t.footprint.width == template.region.width && t.footprint.height == template.region.height
            })
            .count()
    }
}

#[derive(Debug, Clone)]
pub struct SimulatedSoftware {
    state: Rc<RefCell<CanvasState>>,
}

impl DrawingSoftware for SimulatedSoftware {
    fn open(&mut self) -> Result<()> {
        self.state.borrow_mut().running = true;
        Ok(())
    }

    /// Replaces the paper and wipes everything drawn on the previous one
    fn start_new_drawing(&mut self, size: Size) -> Result<()> {
        let mut state = self.state.borrow_mut();
        if !state.running {
            return Err(ScatterError::SoftwareError(
                "cannot start a drawing before the application is open".to_string(),
            ));
        }
        state.paper = Region::new(0, 0, size.width(), size.height());
        state.targets.clear();
        state.lines_drawn = 0;
        state.drawings_started += 1;
        Ok(())
    }

    fn drawing_boundaries(&mut self) -> Region {
        self.state.borrow().paper
    }

    fn brush_size(&self) -> u32 {
        self.state.borrow().brush_size
    }

    fn draw_line(&mut self, from: Point, to: Point) {
        self.state.borrow_mut().apply_line(from, to);
    }

    fn draw_polyline(&mut self, points: &[Point]) {
        let closed = points.len() >= 4 && points.first() == points.last();
        if !closed {
            for pair in points.windows(2) {
                self.draw_line(pair[0], pair[1]);
            }
            return;
        }

        let min_x = points.iter().map(|p| p.x).min().unwrap_or_default();
        let min_y = points.iter().map(|p| p.y).min().unwrap_or_default();
        let max_x = points.iter().map(|p| p.x).max().unwrap_or_default();
        let max_y = points.iter().map(|p| p.y).max().unwrap_or_default();

        self.state.borrow_mut().targets.push(Target {
            footprint: Region::from_edges(min_x, min_y, max_x, max_y),
            hits: 0,
        });
    }

    fn close(&mut self) -> Result<()> {
        let mut state = self.state.borrow_mut();
        if !state.running {
            return Err(ScatterError::SoftwareError("application is not running".to_string()));
        }
        state.running = false;
        Ok(())
    }
}
