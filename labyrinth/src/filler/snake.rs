use tracing::debug;

use super::direct_route;
use crate::error::Result;
use crate::geometry::{Coord, Rect};
use crate::grid::Grid;
use crate::pattern::Snake;
use crate::tile::Tile;

pub(super) fn fill(grid: &mut Grid, region: Rect, from: Coord, to: Coord) -> Result<()> {
    let mut snake = Snake::new(region);
    for at in direct_route(from, to) {
        snake.set(at, Tile::Passable);
    }
    let rewrites = snake.run();
    debug!("snake filler applied {} rewrites in {}", rewrites, snake.region());

    for (at, tile) in snake.tiles() {
        grid.place(at, tile, false)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::filler::Filler;
    use crate::filler::tests::joined;
    use crate::geometry::{Coord, Rect};
    use crate::grid::Grid;
    use crate::tile::Tile;

    #[test]
    fn snakes_a_longer_route_than_the_direct_one() {
        let mut grid = Grid::new(10, 8).unwrap();
        let (from, to) = (Coord::new(0, 4), Coord::new(10, 4));
        Filler::Snake
            .fill(&mut grid, Rect::new(0, 0, 10, 8), from, to)
            .unwrap();
        assert!(grid.count(Tile::Passable) > 11);
        assert_eq!(grid.count(Tile::Unassigned), 0);
        assert!(joined(&grid, from, to));
    }

    #[test]
    fn route_stays_a_single_corridor() {
        let mut grid = Grid::new(12, 9).unwrap();
        let (from, to) = (Coord::new(0, 0), Coord::new(12, 9));
        let region = grid.bounds();
        Filler::Snake.fill(&mut grid, region, from, to).unwrap();
        for at in grid.bounds().cells() {
            if grid.tile(at) != Some(Tile::Passable) {
                continue;
            }
            let degree = at
                .neighbors()
                .iter()
                .filter(|n| grid.tile(**n) == Some(Tile::Passable))
                .count();
            let expected = if at == from || at == to { 1 } else { 2 };
            assert_eq!(degree, expected, "branch at {at}");
        }
    }
}
