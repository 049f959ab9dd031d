//! Recursive dividers: own the top-level control flow of a build.

mod imperfect;
mod perfect;

pub use imperfect::ImperfectDivider;
pub use perfect::{Hub, HubFill, Layout, Leg, PerfectDivider};

use crate::error::{MazeError, Result};
use crate::geometry::Coord;
use crate::grid::Grid;
use crate::tile::Tile;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Divider {
    Perfect(PerfectDivider),
    Imperfect(ImperfectDivider),
}

impl Divider {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Perfect(_) => "perfect",
            Self::Imperfect(_) => "imperfect",
        }
    }

    pub fn build(&self, grid: &mut Grid) -> Result<()> {
        match self {
            Self::Perfect(divider) => divider.build(grid),
            Self::Imperfect(divider) => divider.build(grid),
        }
    }
}

// Returns where `tile` already sits, or places it at `fallback`
pub(crate) fn locate_or_place(grid: &mut Grid, tile: Tile, fallback: Coord) -> Result<Coord> {
    if let Some(at) = grid.find_first(tile) {
        return Ok(at);
    }
    grid.place(fallback, tile, false)?;
    if grid.tile(fallback) == Some(tile) {
        Ok(fallback)
    } else {
        Err(MazeError::configuration(format!(
            "cannot place {tile:?} at {fallback}: cell already taken"
        )))
    }
}
