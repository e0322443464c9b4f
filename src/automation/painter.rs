//! Drawing session orchestration
//!
//! A session opens the application, starts a fresh drawing, reads the paper
//! and brush once, scatters squares over the paper, draws them, checks they
//! can be found again, scribbles until none are, then closes the application.

use std::time::Duration;

use rand::Rng;
use serde::Serialize;

use crate::automation::{DrawingSoftware, Screen};
use crate::core::config::{LayoutConfig, ScatterConfig};
use crate::core::error::{Result, ScatterError};
use crate::core::types::{Region, Size};
use crate::erase::{erase_until_absent, ConvergenceReport};
use crate::layout::{choose_shape_count, painting_border_for_brush, place_non_overlapping};
use crate::shapes::{Shape, Square};

/// Everything a finished session observed
#[derive(Debug, Clone, Serialize)]
pub struct SessionReport {
    pub boundary: Region,
    pub brush_size: u32,
    pub shapes: Vec<Square>,
    /// Matches of the first drawn shape found right after drawing
    pub detected: usize,
    /// Matches of the saved preset template, when one was configured
    pub preset_detected: Option<usize>,
    pub erase: ConvergenceReport,
}

pub struct Painter<M, S> {
    machine: M,
    software: S,
}

impl<M: Screen, S: DrawingSoftware> Painter<M, S> {
    pub fn new(machine: M, software: S) -> Self {
        Self { machine, software }
    }

    pub fn machine(&self) -> &M {
        &self.machine
    }

    pub fn software(&self) -> &S {
        &self.software
    }

    pub fn open_used_software(&mut self) -> Result<()> {
        tracing::info!("Opening drawing software");
        self.software.open()
    }

    pub fn start_new_drawing(&mut self, paper: Size) -> Result<()> {
        tracing::info!("Starting new {} drawing", paper);
        self.software.start_new_drawing(paper)
    }

    pub fn close_used_software(&mut self) -> Result<()> {
        tracing::info!("Closing drawing software");
        self.software.close()
    }

    pub fn current_brush_size(&self) -> u32 {
        self.software.brush_size()
    }

    /// Paper area minus half of `brush_size`, so strokes on the near edges stay on the paper
    pub fn painting_borders(&mut self, brush_size: u32) -> Region {
        let paper = self.software.drawing_boundaries();
        painting_border_for_brush(&paper, brush_size)
    }

    /// Choose a shape count and place that many squares inside `boundary`
    pub fn plan_shapes<R: Rng + ?Sized>(
        &self,
        boundary: &Region,
        layout: &LayoutConfig,
        brush_size: u32,
        rng: &mut R,
    ) -> Result<Vec<Square>> {
        let size = layout.shape_size()?;
        if (size.width() as i64) < brush_size as i64 || (size.height() as i64) < brush_size as i64 {
            return Err(ScatterError::InvalidConfig(format!(
                "shape size {} is smaller than the current brush {}",
                size, brush_size
            )));
        }

        let count = choose_shape_count(layout.count_range(), rng);
        tracing::info!("Placing {} shapes of {} inside {}", count, size, boundary);
        place_non_overlapping(count, boundary, size, brush_size, layout.max_retries, rng)
    }

    /// Trace each shape's contour with one continuous stroke
    pub fn draw_shapes<T: Shape>(&mut self, shapes: &[T]) {
        for shape in shapes {
            self.software.draw_polyline(&shape.contour_points());
        }
    }

    /// Capture a drawn shape and count how often it appears on screen
    pub fn count_shape_matches(&mut self, shape: &dyn Shape) -> usize {
        let template = self.machine.capture(shape.capture_region());
        self.machine.count_matches(&template)
    }

    /// Scribble inside `boundary` until `template` is no longer found
    pub fn erase_matches<R: Rng + ?Sized>(
        &mut self,
        boundary: &Region,
        template: &M::Image,
        timeout: Duration,
        rng: &mut R,
    ) -> Result<ConvergenceReport> {
        erase_until_absent(
            boundary,
            || self.machine.count_matches(template),
            |from, to| self.software.draw_line(from, to),
            timeout,
            rng,
        )
    }

    /// Open, draw, verify, erase and close
    ///
    /// The application is closed even when a later step fails; the first
    /// error wins.
    pub fn run_session<R: Rng + ?Sized>(&mut self, config: &ScatterConfig, rng: &mut R) -> Result<SessionReport> {
        self.open_used_software()?;
        let outcome = self.draw_and_erase(config, rng);
        let closed = self.close_used_software();

        let report = outcome?;
        closed?;
        Ok(report)
    }

    fn draw_and_erase<R: Rng + ?Sized>(&mut self, config: &ScatterConfig, rng: &mut R) -> Result<SessionReport> {
        self.start_new_drawing(config.session.paper_size()?)?;

        let brush_size = self.current_brush_size();
        let boundary = self.painting_borders(brush_size);

        let preset = match config.session.preset_template(brush_size, config.layout.shape_size()?) {
            Some(path) => {
                tracing::debug!("Loading preset template {}", path.display());
                Some(self.machine.load_template(&path)?)
            }
            None => None,
        };

        let shapes = self.plan_shapes(&boundary, &config.layout, brush_size, rng)?;
        self.draw_shapes(&shapes);
        tracing::info!("Drew {} shapes", shapes.len());

        let preset_detected = preset.as_ref().map(|template| self.machine.count_matches(template));
        if let Some(found) = preset_detected {
            tracing::info!("Found {}/{} shapes drawn with the preset template", found, shapes.len());
        }

        let capture = shapes.first().map(|shape| self.machine.capture(shape.capture_region()));
        let detected = capture.as_ref().map_or(0, |template| self.machine.count_matches(template));
        tracing::info!("Found {}/{} shapes drawn with a fresh capture", detected, shapes.len());

        let erase = match preset.as_ref().or(capture.as_ref()) {
            Some(template) => self.erase_matches(&boundary, template, config.erase.timeout(), rng)?,
            None => ConvergenceReport::already_clear(),
        };

        Ok(SessionReport {
            boundary,
            brush_size,
            shapes,
            detected,
            preset_detected,
            erase,
        })
    }
}
