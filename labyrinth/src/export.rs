use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::geometry::Coord;
use crate::grid::Grid;
use crate::tile::Tile;

// ============================================================================
// Snapshot Export
// ============================================================================

/// Serializable picture of a grid; rows use the glyphs from [`Tile::glyph`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub width: i32,
    pub height: i32,
    pub entrance: Option<Coord>,
    pub exit: Option<Coord>,
    pub rows: Vec<String>,
}

impl Snapshot {
    #[must_use]
    pub fn capture(grid: &Grid) -> Self {
        Self {
            width: grid.width(),
            height: grid.height(),
            entrance: grid.find_first(Tile::Entrance),
            exit: grid.find_first(Tile::Exit),
            rows: grid.to_rows(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn to_grid(&self) -> Result<Grid> {
        Grid::from_rows(&self.rows)
    }
}
