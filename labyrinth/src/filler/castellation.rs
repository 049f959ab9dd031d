#[cfg(feature = "json")]
use serde::{Deserialize, Serialize};

use super::Filler;
use crate::error::Result;
use crate::geometry::{Coord, Rect};
use crate::grid::Grid;
use crate::tile::Tile;

// ============================================================================
// Comb Orientation
// ============================================================================

/// Orientation of a castellation comb.
///
/// `Columns` lays its open stripes as columns and advances across the width;
/// `Rows` is the transpose and advances down the height.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
pub enum Comb {
    Columns,
    Rows,
}

impl Comb {
    /// Corner at which a comb started from `start` finishes. With an odd
    /// stripe span the last column stays solid and the comb ends one short.
    #[must_use]
    pub const fn end(self, region: Rect, start: Coord) -> Coord {
        match self {
            Self::Columns => column_comb_end(region, start),
            Self::Rows => column_comb_end(region.transposed(), start.transposed()).transposed(),
        }
    }

    /// True when the stripes tile the comb axis exactly, i.e. an odd number
    /// of cells across it, so no trailing stripe is left solid.
    #[must_use]
    pub const fn spans(self, region: Rect) -> bool {
        let across = match self {
            Self::Columns => region.width,
            Self::Rows => region.height,
        };
        across >= 0 && across % 2 == 0
    }

    // Writes the comb from `start` and returns where it finished, wherever
    // that is; fill() is the checked entry point.
    pub(crate) fn paint(self, grid: &mut Grid, region: Rect, start: Coord) -> Result<Coord> {
        for (at, tile) in self.cells(region, start) {
            grid.place(at, tile, false)?;
        }
        Ok(self.end(region, start))
    }

    fn cells(self, region: Rect, start: Coord) -> Vec<(Coord, Tile)> {
        match self {
            Self::Columns => column_comb_cells(region, start),
            Self::Rows => column_comb_cells(region.transposed(), start.transposed())
                .into_iter()
                .map(|(at, tile)| (at.transposed(), tile))
                .collect(),
        }
    }
}

const fn column_comb_end(region: Rect, start: Coord) -> Coord {
    let far_x = if start.x == region.x { region.right() } else { region.x };
    let far_y = if start.y == region.y { region.bottom() } else { region.y };
    if region.width == 0 || region.height == 0 {
        return Coord::new(far_x, far_y);
    }
    let step = if start.x == region.x { 1 } else { -1 };
    let last = region.width - region.width % 2;
    let stripes = last / 2 + 1;
    let y = if stripes % 2 == 1 { far_y } else { start.y };
    Coord::new(start.x + step * last, y)
}

fn column_comb_cells(region: Rect, start: Coord) -> Vec<(Coord, Tile)> {
    if region.width == 0 || region.height == 0 {
        return region.cells().map(|at| (at, Tile::Passable)).collect();
    }
    let step = if start.x == region.x { 1 } else { -1 };
    let far_y = if start.y == region.y { region.bottom() } else { region.y };

    let mut cells = Vec::with_capacity(region.area());
    for k in 0..=region.width {
        let x = start.x + step * k;
        // Wall columns open where the previous stripe finished
        let gap = if k % 2 == 0 {
            None
        } else if k == region.width {
            Some(None)
        } else if (k / 2) % 2 == 0 {
            Some(Some(far_y))
        } else {
            Some(Some(start.y))
        };
        for y in region.y..=region.bottom() {
            let tile = match gap {
                None => Tile::Passable,
                Some(Some(gap_y)) if gap_y == y => Tile::Passable,
                Some(_) => Tile::Impassable,
            };
            cells.push((Coord::new(x, y), tile));
        }
    }
    cells
}

// ============================================================================
// Filling
// ============================================================================

pub(super) fn fill(
    filler: &Filler,
    grid: &mut Grid,
    region: Rect,
    from: Coord,
    to: Coord,
    comb: Comb,
) -> Result<()> {
    let start = if region.is_corner(from) {
        from
    } else if region.is_corner(to) {
        to
    } else {
        return Err(filler.precondition(region, from, to, "neither endpoint is a corner"));
    };
    let target = if start == from { to } else { from };
    if target != region.opposite(start) {
        return Err(filler.precondition(region, from, to, "endpoints are not opposite corners"));
    }
    if comb.end(region, start) != target {
        return Err(filler.precondition(
            region,
            from,
            to,
            "an even cell count across the comb leaves the far corner cut off",
        ));
    }

    comb.paint(grid, region, start)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MazeError;
    use crate::filler::tests::joined;
    use proptest::prelude::*;

    fn painted(width: i32, height: i32, start: Coord, comb: Comb) -> (Grid, Coord) {
        let mut grid = Grid::new(width, height).unwrap();
        let region = grid.bounds();
        let end = comb.paint(&mut grid, region, start).unwrap();
        (grid, end)
    }

    #[test]
    fn column_comb_weaves_across() {
        let (grid, end) = painted(6, 4, Coord::new(0, 0), Comb::Columns);
        assert_eq!(end, Coord::new(6, 0));
        assert_eq!(
            grid.to_rows(),
            vec![".#...#.", ".#.#.#.", ".#.#.#.", ".#.#.#.", "...#..."]
        );
        assert!(joined(&grid, Coord::new(0, 0), end));
    }

    #[test]
    fn row_comb_is_the_transpose() {
        let (grid, end) = painted(4, 6, Coord::new(0, 0), Comb::Rows);
        assert_eq!(end, Coord::new(0, 6));
        assert_eq!(
            grid.to_rows(),
            vec![".....", "####.", ".....", ".####", ".....", "####.", "....."]
        );
    }

    #[test]
    fn comb_can_start_from_any_corner() {
        let (grid, end) = painted(4, 2, Coord::new(4, 2), Comb::Columns);
        assert_eq!(end, Coord::new(0, 0));
        assert_eq!(grid.to_rows(), vec![".#...", ".#.#.", "...#."]);
        assert!(joined(&grid, Coord::new(4, 2), end));
    }

    #[test]
    fn single_line_is_fully_open() {
        let (grid, end) = painted(5, 0, Coord::new(5, 0), Comb::Rows);
        assert_eq!(end, Coord::new(0, 0));
        assert_eq!(grid.to_rows(), vec!["......"]);
    }

    #[test]
    fn odd_stripe_count_fills_to_the_opposite_corner() {
        let mut grid = Grid::new(8, 3).unwrap();
        let region = grid.bounds();
        Filler::Castellation(Comb::Columns)
            .fill(&mut grid, region, Coord::new(8, 3), Coord::new(0, 0))
            .unwrap();
        assert_eq!(grid.count(Tile::Unassigned), 0);
        assert!(joined(&grid, Coord::new(8, 3), Coord::new(0, 0)));
    }

    #[test]
    fn needs_a_corner_to_start_from() {
        let mut grid = Grid::new(6, 6).unwrap();
        let err = Filler::Castellation(Comb::Columns)
            .fill(&mut grid, Rect::new(0, 0, 6, 6), Coord::new(3, 0), Coord::new(3, 6))
            .unwrap_err();
        assert!(matches!(err, MazeError::FillerPrecondition { .. }));
    }

    #[test]
    fn target_off_the_opposite_corner_is_refused() {
        let mut grid = Grid::new(6, 4).unwrap();
        let err = Filler::Castellation(Comb::Columns)
            .fill(&mut grid, Rect::new(0, 0, 6, 4), Coord::new(0, 0), Coord::new(3, 2))
            .unwrap_err();
        assert!(matches!(
            err,
            MazeError::FillerPrecondition { filler: "castellation-w", .. }
        ));
        assert_eq!(grid.count(Tile::Unassigned), grid.bounds().area());
    }

    #[test]
    fn even_stripe_count_is_refused() {
        // Six columns: the last one stays solid and the comb stops at (4, 4)
        let mut grid = Grid::new(5, 4).unwrap();
        let err = Filler::Castellation(Comb::Columns)
            .fill(&mut grid, Rect::new(0, 0, 5, 4), Coord::new(0, 0), Coord::new(5, 4))
            .unwrap_err();
        assert!(matches!(err, MazeError::FillerPrecondition { .. }));
        assert!(!Comb::Columns.spans(Rect::new(0, 0, 5, 4)));
        assert!(Comb::Rows.spans(Rect::new(0, 0, 5, 4)));
    }

    fn corner(region: Rect, index: u8) -> Coord {
        let x = if index & 1 == 0 { region.x } else { region.right() };
        let y = if index & 2 == 0 { region.y } else { region.bottom() };
        Coord::new(x, y)
    }

    proptest! {
        // A comb either joins its two corners or refuses to draw anything
        #[test]
        fn fills_join_their_corners_or_fail(
            width in 0i32..10,
            height in 0i32..10,
            from in 0u8..4,
            to in 0u8..4,
            rows in any::<bool>(),
        ) {
            let region = Rect::new(0, 0, width, height);
            let mut grid = Grid::new(width, height).unwrap();
            let (from, to) = (corner(region, from), corner(region, to));
            let comb = if rows { Comb::Rows } else { Comb::Columns };

            match Filler::Castellation(comb).fill(&mut grid, region, from, to) {
                Ok(()) => {
                    prop_assert_eq!(to, region.opposite(from));
                    prop_assert_eq!(grid.count(Tile::Unassigned), 0);
                    prop_assert!(joined(&grid, from, to));
                }
                Err(err) => {
                    let refused = matches!(err, MazeError::FillerPrecondition { .. });
                    prop_assert!(refused);
                    prop_assert!(to != region.opposite(from) || comb.end(region, from) != to);
                    prop_assert_eq!(grid.count(Tile::Unassigned), region.area());
                }
            }
        }
    }
}
