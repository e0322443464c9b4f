//! Convergence loop that obscures detected matches with random strokes

pub mod convergence;

pub use convergence::{erase_until_absent, ConvergenceReport, ProgressEvent};
