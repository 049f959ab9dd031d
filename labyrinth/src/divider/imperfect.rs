use tracing::debug;

use super::locate_or_place;
use crate::constants::MIN_SPLIT_CLEARANCE;
use crate::error::{MazeError, Result};
use crate::filler::Filler;
use crate::geometry::{Coord, Rect};
use crate::grid::Grid;
use crate::tile::Tile;

// ============================================================================
// Split Planning
// ============================================================================

// One cut across a region: a wall line with a single door, and the two
// halves with their own endpoints (the door's flanking cells).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Split {
    line: Rect,
    door: Coord,
    near: (Rect, Coord, Coord),
    far: (Rect, Coord, Coord),
}

impl Split {
    // Plans a vertical cut (a wall column); None when the region is terminal
    fn vertical(region: Rect, from: Coord, to: Coord) -> Option<Self> {
        let (a, b) = if from.x <= to.x { (from, to) } else { (to, from) };
        let column = (a.x + b.x).div_euclid(2);

        if column - region.x < MIN_SPLIT_CLEARANCE || region.right() - column < MIN_SPLIT_CLEARANCE {
            return None;
        }
        // Endpoints may not touch the wall line
        if column - a.x < 2 || b.x - column < 2 {
            return None;
        }

        // Max-min distance to both projected endpoints, lowest row on ties
        let mut door_y = region.y;
        let mut best = -1;
        for y in region.y..=region.bottom() {
            let score = (y - a.y).abs().min((y - b.y).abs());
            if score > best {
                best = score;
                door_y = y;
            }
        }

        let left = Rect::new(region.x, region.y, column - 1 - region.x, region.height);
        let right = Rect::new(column + 1, region.y, region.right() - column - 1, region.height);
        let near = (left, a, Coord::new(column - 1, door_y));
        let far = (right, Coord::new(column + 1, door_y), b);
        // `near` always holds `from`
        let (near, far) = if a == from {
            (near, far)
        } else {
            ((far.0, far.2, far.1), (near.0, near.2, near.1))
        };

        Some(Self {
            line: Rect::new(column, region.y, 0, region.height),
            door: Coord::new(column, door_y),
            near,
            far,
        })
    }

    fn transposed(self) -> Self {
        let t = |(r, p, q): (Rect, Coord, Coord)| (r.transposed(), p.transposed(), q.transposed());
        Self {
            line: self.line.transposed(),
            door: self.door.transposed(),
            near: t(self.near),
            far: t(self.far),
        }
    }
}

// ============================================================================
// Imperfect Divider
// ============================================================================

/// Walls the grid into ever smaller regions, one door per wall, and hands
/// the smallest regions to a filler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImperfectDivider {
    filler: Filler,
}

impl ImperfectDivider {
    #[must_use]
    pub const fn new(filler: Filler) -> Self {
        Self { filler }
    }

    #[must_use]
    pub const fn filler(&self) -> Filler {
        self.filler
    }

    /// Entrance defaults to the top-left corner, exit to the grid centre
    pub fn build(&self, grid: &mut Grid) -> Result<()> {
        let bounds = grid.bounds();
        let entrance = locate_or_place(grid, Tile::Entrance, bounds.top_left())?;
        let exit = locate_or_place(grid, Tile::Exit, bounds.center())?;
        self.divide(grid, bounds, entrance, exit)?;

        let sealed = grid.seal();
        if sealed > 0 {
            debug!("sealed {} cells left open by the {} filler", sealed, self.filler.name());
        }
        Ok(())
    }

    /// Recursively bisects `region` between `from` and `to`, handing terminal
    /// regions to the filler.
    pub fn divide(&self, grid: &mut Grid, region: Rect, from: Coord, to: Coord) -> Result<()> {
        let infeasible = |reason| MazeError::DivisionInfeasible {
            region,
            from,
            to,
            reason,
        };
        if from == to {
            return Err(infeasible("entrance and exit coincide"));
        }
        if !region.contains(from) || !region.contains(to) {
            return Err(infeasible("endpoint outside region"));
        }

        let across = (from.x - to.x).abs() >= (from.y - to.y).abs();
        let split = if across {
            Split::vertical(region, from, to)
        } else {
            Split::vertical(region.transposed(), from.transposed(), to.transposed())
                .map(Split::transposed)
        };
        let Some(split) = split else {
            return self.filler.fill(grid, region, from, to);
        };
        debug!("split {} along {} with door at {}", region, split.line, split.door);

        for at in split.line.cells() {
            let tile = if at == split.door { Tile::Join } else { Tile::Impassable };
            grid.place(at, tile, false)?;
        }
        grid.place(split.near.2, Tile::Passable, false)?;
        grid.place(split.far.1, Tile::Passable, false)?;

        let (near, far) = (split.near, split.far);
        self.divide(grid, near.0, near.1, near.2)?;
        self.divide(grid, far.0, far.1, far.2)
    }
}
