use tracing::debug;

use crate::error::Result;
use crate::grid::Grid;
use crate::pattern::Snake;
use crate::tile::Tile;

// ============================================================================
// Whole-Grid Post-Processing
// ============================================================================

/// Turns every join marker into a plain passable cell; returns how many
pub fn strip_doors(grid: &mut Grid) -> Result<usize> {
    let mut stripped = 0;
    while let Some(at) = grid.find_first(Tile::Join) {
        grid.resolve(at, Tile::Passable)?;
        stripped += 1;
    }
    if stripped > 0 {
        debug!("stripped {} doors", stripped);
    }
    Ok(stripped)
}

/// Runs the pattern engine over the finished grid and copies back plain
/// passable/impassable results; fixed tiles are never touched.
pub fn snake_grid(grid: &mut Grid) -> Result<usize> {
    let mut snake = Snake::from_grid(grid, grid.bounds());
    let rewrites = snake.run();
    for (at, tile) in snake.tiles() {
        if matches!(tile, Tile::Passable | Tile::Impassable) {
            grid.place(at, tile, true)?;
        }
    }
    debug!("whole-grid snake applied {} rewrites", rewrites);
    Ok(rewrites)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{is_perfect, is_unicursal, monochrome_blocks, reachable_from};
    use crate::divider::PerfectDivider;
    use crate::geometry::Coord;

    #[test]
    fn stripping_doors_is_idempotent() {
        let mut grid = Grid::from_rows(&["E+#", "#+#", "#.X"]).unwrap();
        assert_eq!(strip_doors(&mut grid).unwrap(), 2);
        let once = grid.clone();
        assert_eq!(strip_doors(&mut grid).unwrap(), 0);
        assert_eq!(grid, once);
        assert_eq!(grid.to_rows(), vec!["E.#", "#.#", "#.X"]);
    }

    #[test]
    fn snaking_a_perfect_grid_keeps_it_perfect() {
        let mut grid = Grid::new(18, 11).unwrap();
        PerfectDivider.build(&mut grid).unwrap();
        strip_doors(&mut grid).unwrap();
        // Only the border can still match, since the overhang reads as wall
        assert!(snake_grid(&mut grid).unwrap() > 0);
        assert!(is_perfect(&grid));
        assert!(is_unicursal(&grid));
        assert_eq!(snake_grid(&mut grid).unwrap(), 0);
    }

    #[test]
    fn snaking_fills_solid_areas() {
        let mut grid = Grid::from_rows(&[
            "E.........",
            "##########",
            "##########",
            "##########",
            "#########X",
        ])
        .unwrap();
        // Hook the exit up to the corridor along the right edge
        for y in 1..4 {
            grid.place(Coord::new(9, y), Tile::Passable, true).unwrap();
        }
        let walls = monochrome_blocks(&grid).len();
        assert!(snake_grid(&mut grid).unwrap() > 0);
        assert!(monochrome_blocks(&grid).len() < walls);
        assert_eq!(grid.find_first(Tile::Entrance), Some(Coord::new(0, 0)));
        assert!(reachable_from(&grid, Coord::new(0, 0)).contains(&Coord::new(9, 4)));
    }
}
