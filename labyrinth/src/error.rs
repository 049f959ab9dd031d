use thiserror::Error;

use crate::geometry::{Coord, Rect};

pub type Result<T> = std::result::Result<T, MazeError>;

// ============================================================================
// Errors
// ============================================================================

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MazeError {
    #[error("coordinate {at} lies outside grid bounds {bounds}")]
    OutOfBounds { at: Coord, bounds: Rect },

    #[error("invalid configuration: {reason}")]
    Configuration { reason: String },

    #[error("cannot divide {region} between {from} and {to}: {reason}")]
    DivisionInfeasible {
        region: Rect,
        from: Coord,
        to: Coord,
        reason: &'static str,
    },

    #[error("{filler} filler cannot join {from} and {to} in {region}: {reason}")]
    FillerPrecondition {
        filler: &'static str,
        region: Rect,
        from: Coord,
        to: Coord,
        reason: &'static str,
    },

    #[error("unsupported layout: {reason}")]
    Unsupported { reason: String },

    #[error("grid has not been built")]
    NotBuilt,
}

impl MazeError {
    pub(crate) fn configuration(reason: impl Into<String>) -> Self {
        Self::Configuration { reason: reason.into() }
    }
}
