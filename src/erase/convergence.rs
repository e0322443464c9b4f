//! Scribble random strokes until a detector stops finding matches
//!
//! The number of strokes needed is unknowable in advance, so the loop is
//! bounded only by wall-clock time. The detector is the sole source of truth:
//! it is queried before every stroke, and a count that goes up, down or stalls
//! is recorded but never treated as an error.

use std::time::{Duration, Instant};

use rand::Rng;
use serde::Serialize;

use crate::core::error::{Result, ScatterError};
use crate::core::types::{Point, Region};
use crate::layout::sampling::random_point_within;

/// A change in the detected count, observed before stroke number `strokes + 1`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProgressEvent {
    pub strokes: u64,
    pub remaining: usize,
}

/// Outcome of a successful erase run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConvergenceReport {
    /// Count reported by the very first detector query
    pub initial_count: usize,
    pub strokes: u64,
    pub elapsed: Duration,
    /// Every observed count change, in order
    pub progress: Vec<ProgressEvent>,
}

impl ConvergenceReport {
    /// Report for a run that found nothing to erase
    pub fn already_clear() -> Self {
        Self {
            initial_count: 0,
            strokes: 0,
            elapsed: Duration::ZERO,
            progress: Vec::new(),
        }
    }

    /// True if any observed count was higher than the one before it
    pub fn had_increases(&self) -> bool {
        let mut last = self.initial_count;
        for event in &self.progress {
            if event.remaining > last {
                return true;
            }
            last = event.remaining;
        }
        false
    }
}

/// Draw random strokes inside `boundary` until `detect` returns zero
///
/// `detect` reports how many matches are still visible; `draw` performs one
/// stroke between two points and returns once it is done. Both endpoints are
/// sampled independently and uniformly, edges included.
///
/// Fails with [`ScatterError::ConvergenceTimeout`] once `timeout` has elapsed
/// with matches still present. A zero timeout therefore fails before the
/// first stroke unless the detector already reports zero.
pub fn erase_until_absent<D, W, R>(
    boundary: &Region,
    mut detect: D,
    mut draw: W,
    timeout: Duration,
    rng: &mut R,
) -> Result<ConvergenceReport>
where
    D: FnMut() -> usize,
    W: FnMut(Point, Point),
    R: Rng + ?Sized,
{
    let initial_count = detect();
    if initial_count == 0 {
        tracing::debug!("Nothing to erase");
        return Ok(ConvergenceReport::already_clear());
    }

    let start = Instant::now();
    let mut last_count = initial_count;
    let mut strokes: u64 = 0;
    let mut progress = Vec::new();

    loop {
        let count = detect();
        if count != last_count {
            tracing::info!(strokes, "Detected count changed from {} to {}", last_count, count);
            progress.push(ProgressEvent { strokes, remaining: count });
            last_count = count;
        }

        if count == 0 {
            break;
        }

        let elapsed = start.elapsed();
        if elapsed >= timeout {
            tracing::warn!(strokes, "Gave up with {} matches still present", count);
            return Err(ScatterError::ConvergenceTimeout {
                last_count: count,
                strokes,
                elapsed,
            });
        }

        let from = random_point_within(boundary, rng);
        let to = random_point_within(boundary, rng);
        draw(from, to);
        strokes += 1;
    }

    let elapsed = start.elapsed();
    tracing::info!(
        "No matches left. Took {} strokes and {:.2} seconds",
        strokes,
        elapsed.as_secs_f64()
    );

    Ok(ConvergenceReport {
        initial_count,
        strokes,
        elapsed,
        progress,
    })
}
