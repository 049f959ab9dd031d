use crate::error::{MazeError, Result};
use crate::geometry::{Coord, Rect};
use crate::tile::Tile;

// ============================================================================
// Grid
// ============================================================================

/// Tile storage, column-major: `cells[x][y]`. Every component mutates the grid
/// through `place()`; only whole-map post-processing goes through `resolve()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    bounds: Rect,
    cells: Vec<Vec<Tile>>,
}

impl Grid {
    /// `width` and `height` are inclusive extents, so the grid holds
    /// (width + 1) x (height + 1) cells, all unassigned.
    pub fn new(width: i32, height: i32) -> Result<Self> {
        if width < 0 || height < 0 {
            return Err(MazeError::configuration(format!(
                "grid extents must be non-negative, got {width}x{height}"
            )));
        }
        let column = vec![Tile::Unassigned; (height + 1) as usize];
        Ok(Self {
            bounds: Rect::new(0, 0, width, height),
            cells: vec![column; (width + 1) as usize],
        })
    }

    /// Builds a grid from glyph rows (see [`Tile::glyph`]); handy for fixtures
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self> {
        let height = rows.len() as i32 - 1;
        let width = rows
            .first()
            .map_or(0, |r| r.as_ref().chars().count() as i32)
            - 1;
        let mut grid = Self::new(width, height)?;
        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.chars().count() as i32 != width + 1 {
                return Err(MazeError::configuration(format!("row {y} has a different length")));
            }
            for (x, glyph) in row.chars().enumerate() {
                let tile = Tile::from_glyph(glyph)
                    .ok_or_else(|| MazeError::configuration(format!("unknown glyph {glyph:?}")))?;
                grid.cells[x][y] = tile;
            }
        }
        Ok(grid)
    }

    #[must_use]
    pub const fn bounds(&self) -> Rect {
        self.bounds
    }

    #[must_use]
    pub const fn width(&self) -> i32 {
        self.bounds.width
    }

    #[must_use]
    pub const fn height(&self) -> i32 {
        self.bounds.height
    }

    #[must_use]
    pub fn tile(&self, at: Coord) -> Option<Tile> {
        if self.bounds.contains(at) {
            Some(self.cells[at.x as usize][at.y as usize])
        } else {
            None
        }
    }

    pub fn get(&self, at: Coord) -> Result<Tile> {
        self.tile(at).ok_or(MazeError::OutOfBounds {
            at,
            bounds: self.bounds,
        })
    }

    /// Unforced placement only fills unassigned cells. Forced placement may
    /// also replace passable or impassable, but never entrance, exit or join.
    /// Blocked writes are silently ignored.
    pub fn place(&mut self, at: Coord, tile: Tile, force: bool) -> Result<()> {
        let current = self.get(at)?;
        let allowed = if force {
            current.is_overwritable()
        } else {
            current == Tile::Unassigned
        };
        if allowed {
            self.cells[at.x as usize][at.y as usize] = tile;
        }
        Ok(())
    }

    // Unconditional write, reserved for whole-map post-processing
    pub(crate) fn resolve(&mut self, at: Coord, tile: Tile) -> Result<()> {
        self.get(at)?;
        self.cells[at.x as usize][at.y as usize] = tile;
        Ok(())
    }

    /// Column-major scan: x ascending, then y ascending within a column
    #[must_use]
    pub fn find_first(&self, tile: Tile) -> Option<Coord> {
        self.cells.iter().enumerate().find_map(|(x, column)| {
            column
                .iter()
                .position(|t| *t == tile)
                .map(|y| Coord::new(x as i32, y as i32))
        })
    }

    #[must_use]
    pub fn count(&self, tile: Tile) -> usize {
        self.cells.iter().flatten().filter(|t| **t == tile).count()
    }

    pub fn columns(&self) -> impl Iterator<Item = &[Tile]> {
        self.cells.iter().map(Vec::as_slice)
    }

    /// Row-major glyph rendering, one string per row
    #[must_use]
    pub fn to_rows(&self) -> Vec<String> {
        (0..=self.height() as usize)
            .map(|y| self.cells.iter().map(|column| column[y].glyph()).collect())
            .collect()
    }

    // Turns every leftover unassigned cell into impassable
    pub(crate) fn seal(&mut self) -> usize {
        let mut sealed = 0;
        for tile in self.cells.iter_mut().flatten() {
            if *tile == Tile::Unassigned {
                *tile = Tile::Impassable;
                sealed += 1;
            }
        }
        sealed
    }

    // Fills the unassigned cells of a region
    pub(crate) fn fill_unassigned(&mut self, region: Rect, tile: Tile) -> Result<()> {
        for at in region.cells() {
            self.place(at, tile, false)?;
        }
        Ok(())
    }
}
