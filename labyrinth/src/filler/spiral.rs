use tracing::debug;

use super::{Filler, direct_route, path};
use crate::constants::{GOAL_RADIUS, NEAR_CENTER_RADIUS};
use crate::error::Result;
use crate::geometry::{Coord, Rect};
use crate::grid::Grid;
use crate::tile::Tile;

// Even rings carry the corridor, odd rings are walls with a gap. Each lap
// runs round its ring in whichever direction gets further before it must
// stop clear of a corner, leaving a stopper behind it, then drops two rings
// inward. A gap that would land on a corner of the next ring takes a second
// cell. On the target's own ring the corridor goes the long way round.
pub(super) fn fill(
    filler: &Filler,
    grid: &mut Grid,
    region: Rect,
    from: Coord,
    to: Coord,
    goal: bool,
) -> Result<()> {
    let (outer, target) = if region.on_edge(from) {
        (from, to)
    } else if region.on_edge(to) {
        (to, from)
    } else {
        return Err(filler.precondition(region, from, to, "neither endpoint is on the region edge"));
    };

    let center = region.center();
    if (target.x - center.x).abs() > NEAR_CENTER_RADIUS
        || (target.y - center.y).abs() > NEAR_CENTER_RADIUS
    {
        debug!("spiral target {} is off-centre, using a direct path", target);
        return path::fill(grid, region, from, to);
    }

    if goal {
        for dx in -GOAL_RADIUS..=GOAL_RADIUS {
            for dy in -GOAL_RADIUS..=GOAL_RADIUS {
                let at = target.offset(dx, dy);
                if region.contains(at) {
                    grid.place(at, Tile::Passable, false)?;
                }
            }
        }
    }

    let target_ring = region.depth(target);
    let mut cursor = outer;
    let mut ring = 0;
    grid.place(cursor, Tile::Passable, false)?;

    while ring + 2 <= target_ring {
        let (Some(lap), Some(inner), Some(next)) =
            (region.inset(ring), region.inset(ring + 1), region.inset(ring + 2))
        else {
            break;
        };
        let cells = lap.perimeter();
        let Some(start) = cells.iter().position(|c| *c == cursor) else {
            break;
        };

        let (walk, last) = longest_lap(lap, &cells, start);
        for (step, at) in walk.iter().enumerate() {
            let tile = if step <= last { Tile::Passable } else { Tile::Impassable };
            grid.place(*at, tile, false)?;
        }

        let turn = walk[last];
        let inward = inward_step(lap, turn);
        let gap = turn.offset(inward.x, inward.y);
        grid.place(gap, Tile::Passable, false)?;
        let mut entry = gap.offset(inward.x, inward.y);
        if next.is_corner(entry) && last > 0 {
            let along = Coord::new(turn.x - walk[last - 1].x, turn.y - walk[last - 1].y);
            let side = gap.offset(along.x, along.y);
            let shifted = side.offset(inward.x, inward.y);
            if next.on_edge(shifted) && !next.is_corner(shifted) {
                grid.place(side, Tile::Passable, false)?;
                entry = shifted;
            }
        }
        for at in inner.perimeter() {
            grid.place(at, Tile::Impassable, false)?;
        }

        cursor = entry;
        grid.place(cursor, Tile::Passable, false)?;
        ring += 2;
    }

    if !(ring == target_ring && final_lap(grid, region, ring, cursor, target)?) {
        for at in direct_route(cursor, target) {
            grid.place(at, Tile::Passable, false)?;
        }
    }
    grid.fill_unassigned(region, Tile::Impassable)
}

// The lap from `start` in the direction that reaches furthest, with the index
// of its last open cell; forward wins a tie
fn longest_lap(lap: Rect, cells: &[Coord], start: usize) -> (Vec<Coord>, usize) {
    let len = cells.len();
    let heading = |step: usize| -> (Vec<Coord>, usize) {
        let walk: Vec<Coord> = (0..len).map(|k| cells[(start + k * step) % len]).collect();
        let mut last = len.saturating_sub(2);
        while last > 0 && !clear_of_corners(lap, walk[last]) {
            last -= 1;
        }
        (walk, last)
    };
    let forward = heading(1);
    let backward = heading(len - 1);
    if backward.1 > forward.1 { backward } else { forward }
}

// Opens the long arc of the target's ring from `cursor`, walling the short
// one. Declines when either end is off the ring or they are too close.
fn final_lap(grid: &mut Grid, region: Rect, ring: i32, cursor: Coord, target: Coord) -> Result<bool> {
    let Some(lap) = region.inset(ring).filter(|lap| lap.width >= 1 && lap.height >= 1) else {
        return Ok(false);
    };
    let cells = lap.perimeter();
    let (Some(from), Some(to)) = (
        cells.iter().position(|c| *c == cursor),
        cells.iter().position(|c| *c == target),
    ) else {
        return Ok(false);
    };

    let len = cells.len();
    let forward = (to + len - from) % len;
    let backward = (from + len - to) % len;
    if forward.min(backward) < 2 {
        return Ok(false);
    }
    let (step, steps) = if forward > backward { (1, forward) } else { (len - 1, backward) };
    for k in 0..=steps {
        grid.place(cells[(from + k * step) % len], Tile::Passable, false)?;
    }
    for at in cells {
        grid.place(at, Tile::Impassable, false)?;
    }
    Ok(true)
}

// At least two cells from either end of its edge
const fn clear_of_corners(lap: Rect, at: Coord) -> bool {
    if at.y == lap.y || at.y == lap.bottom() {
        at.x - lap.x >= 2 && lap.right() - at.x >= 2
    } else {
        at.y - lap.y >= 2 && lap.bottom() - at.y >= 2
    }
}

const fn inward_step(lap: Rect, at: Coord) -> Coord {
    if at.y == lap.y {
        Coord::new(0, 1)
    } else if at.y == lap.bottom() {
        Coord::new(0, -1)
    } else if at.x == lap.x {
        Coord::new(1, 0)
    } else {
        Coord::new(-1, 0)
    }
}
