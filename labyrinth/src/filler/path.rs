use super::direct_route;
use crate::error::Result;
use crate::geometry::{Coord, Rect};
use crate::grid::Grid;
use crate::tile::Tile;

pub(super) fn fill(grid: &mut Grid, region: Rect, from: Coord, to: Coord) -> Result<()> {
    for at in direct_route(from, to) {
        grid.place(at, Tile::Passable, false)?;
    }
    grid.fill_unassigned(region, Tile::Impassable)
}
