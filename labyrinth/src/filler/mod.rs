//! Region fillers.
//!
//! A filler turns every unassigned cell of a rectangle into passable or
//! impassable so that its two endpoints end up joined. A filler whose shape
//! cannot join the endpoints refuses with `FillerPrecondition` instead.

mod castellation;
mod path;
mod snake;
mod spiral;

pub use castellation::Comb;

#[cfg(feature = "json")]
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{MazeError, Result};
use crate::geometry::{Coord, Rect};
use crate::grid::Grid;
use crate::tile::Tile;

// ============================================================================
// Filler Variants
// ============================================================================

/// Terminal strategy for one rectangle of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
pub enum Filler {
    /// Opens the whole region
    Empty,
    /// Direct route, everything else walled
    Path,
    /// Concentric rings towards a centre target; `goal` opens a block around it
    Spiral { goal: bool },
    /// Boustrophedon comb between opposite corners
    Castellation(Comb),
    /// Direct route lengthened by the pattern engine
    Snake,
}

impl Filler {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Path => "path",
            Self::Spiral { .. } => "spiral",
            Self::Castellation(Comb::Columns) => "castellation-w",
            Self::Castellation(Comb::Rows) => "castellation-h",
            Self::Snake => "snake",
        }
    }

    /// Fills the unassigned cells of `region` so that `from` and `to` are joined.
    /// Fails with `FillerPrecondition` when the endpoints don't suit the shape.
    pub fn fill(&self, grid: &mut Grid, region: Rect, from: Coord, to: Coord) -> Result<()> {
        if !region.contains(from) || !region.contains(to) {
            return Err(self.precondition(region, from, to, "endpoint outside region"));
        }
        debug!("{} filler on {} from {} to {}", self.name(), region, from, to);

        match *self {
            Self::Empty => grid.fill_unassigned(region, Tile::Passable),
            Self::Path => path::fill(grid, region, from, to),
            Self::Spiral { goal } => spiral::fill(self, grid, region, from, to, goal),
            Self::Castellation(comb) => castellation::fill(self, grid, region, from, to, comb),
            Self::Snake => snake::fill(grid, region, from, to),
        }
    }

    pub(crate) const fn precondition(
        &self,
        region: Rect,
        from: Coord,
        to: Coord,
        reason: &'static str,
    ) -> MazeError {
        MazeError::FillerPrecondition {
            filler: self.name(),
            region,
            from,
            to,
            reason,
        }
    }
}

// Vertical leg first, then horizontal
pub(crate) fn direct_route(from: Coord, to: Coord) -> Vec<Coord> {
    let mut route = Vec::with_capacity(from.manhattan(to) as usize + 1);
    let mut at = from;
    route.push(at);
    while at.y != to.y {
        at = at.offset(0, (to.y - at.y).signum());
        route.push(at);
    }
    while at.x != to.x {
        at = at.offset((to.x - at.x).signum(), 0);
        route.push(at);
    }
    route
}
