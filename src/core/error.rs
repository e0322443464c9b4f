use std::fmt;
use std::time::Duration;

use thiserror::Error;

use crate::core::types::{Region, Size};

/// Which side of a [`Size`] failed validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidDimension {
    Width,
    Height,
    Both,
}

impl InvalidDimension {
    /// Classify a raw width/height pair, `None` when both are positive
    pub fn classify(width: i32, height: i32) -> Option<Self> {
        match (width <= 0, height <= 0) {
            (true, true) => Some(Self::Both),
            (true, false) => Some(Self::Width),
            (false, true) => Some(Self::Height),
            (false, false) => None,
        }
    }
}

impl fmt::Display for InvalidDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Width => f.write_str("width must be positive"),
            Self::Height => f.write_str("height must be positive"),
            Self::Both => f.write_str("width and height must be positive"),
        }
    }
}

#[derive(Error, Debug)]
pub enum ScatterError {
    #[error("Invalid size {width}x{height}: {dimension}")]
    InvalidSize {
        width: i32,
        height: i32,
        dimension: InvalidDimension,
    },

    #[error("Shape {}x{} does not fit inside boundary {}x{}", .shape.width(), .shape.height(), .boundary.width, .boundary.height)]
    LayoutInfeasible { shape: Size, boundary: Region },

    #[error("Unable to place shape {slot} of {count} after {max_retries} consecutive collisions")]
    LayoutRetriesExhausted {
        slot: usize,
        count: usize,
        max_retries: u32,
    },

    #[error("{last_count} matches still present after {strokes} strokes in {elapsed:?}")]
    ConvergenceTimeout {
        last_count: usize,
        strokes: u64,
        elapsed: Duration,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Drawing software error: {0}")]
    SoftwareError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("Template image error: {0}")]
    ImageError(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, ScatterError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_dimensions() {
        assert_eq!(InvalidDimension::classify(0, 5), Some(InvalidDimension::Width));
        assert_eq!(InvalidDimension::classify(5, 0), Some(InvalidDimension::Height));
        assert_eq!(InvalidDimension::classify(-1, -1), Some(InvalidDimension::Both));
        assert_eq!(InvalidDimension::classify(1, 1), None);
    }

    #[test]
    fn test_messages_name_the_dimension() {
        let width = ScatterError::InvalidSize {
            width: 0,
            height: 5,
            dimension: InvalidDimension::Width,
        };
        assert_eq!(width.to_string(), "Invalid size 0x5: width must be positive");

        let both = ScatterError::InvalidSize {
            width: 0,
            height: 0,
            dimension: InvalidDimension::Both,
        };
        assert!(both.to_string().contains("width and height"));
    }
}
