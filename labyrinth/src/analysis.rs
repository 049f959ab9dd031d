use std::collections::{HashSet, VecDeque};

use crate::geometry::Coord;
use crate::grid::Grid;
use crate::tile::Tile;

// ============================================================================
// Reachability
// ============================================================================

/// Breadth-first flood over open tiles, starting at `start`
#[must_use]
pub fn reachable_from(grid: &Grid, start: Coord) -> HashSet<Coord> {
    let mut visited = HashSet::new();
    if !grid.tile(start).is_some_and(Tile::is_open) {
        return visited;
    }

    let mut queue = VecDeque::new();
    visited.insert(start);
    queue.push_back(start);

    while let Some(at) = queue.pop_front() {
        for next in at.neighbors() {
            if grid.tile(next).is_some_and(Tile::is_open) && visited.insert(next) {
                queue.push_back(next);
            }
        }
    }
    visited
}

fn open_degree(grid: &Grid, at: Coord) -> usize {
    at.neighbors()
        .iter()
        .filter(|n| grid.tile(**n).is_some_and(Tile::is_open))
        .count()
}

// ============================================================================
// Maze Properties
// ============================================================================

/// Top-left corners of every 2x2 block that is all passable or all impassable
#[must_use]
pub fn monochrome_blocks(grid: &Grid) -> Vec<Coord> {
    let mut blocks = Vec::new();
    for x in 0..grid.width() {
        for y in 0..grid.height() {
            let at = Coord::new(x, y);
            let block = [at, at.offset(1, 0), at.offset(0, 1), at.offset(1, 1)];
            for uniform in [Tile::Passable, Tile::Impassable] {
                if block.iter().all(|c| grid.tile(*c) == Some(uniform)) {
                    blocks.push(at);
                }
            }
        }
    }
    blocks
}

/// No 2x2 block is uniformly open or uniformly walled
#[must_use]
pub fn is_perfect(grid: &Grid) -> bool {
    monochrome_blocks(grid).is_empty()
}

/// Exactly one corridor from entrance to exit: both ends have one open
/// neighbour, every other open cell has two, and nothing is left over.
#[must_use]
pub fn is_unicursal(grid: &Grid) -> bool {
    let (Some(entrance), Some(exit)) = (grid.find_first(Tile::Entrance), grid.find_first(Tile::Exit))
    else {
        return false;
    };

    let mut open = 0;
    for at in grid.bounds().cells() {
        let Some(tile) = grid.tile(at) else { continue };
        if !tile.is_open() {
            continue;
        }
        open += 1;
        let expected = if at == entrance || at == exit { 1 } else { 2 };
        if open_degree(grid, at) != expected {
            return false;
        }
    }

    let reached = reachable_from(grid, entrance);
    reached.contains(&exit) && reached.len() == open
}
