use tracing::{debug, trace};

use crate::constants::{
    EXIT_BOTTOM_CLEARANCE, EXIT_TOP_CLEARANCE, HUB_EXTENT, MIN_PERFECT_HEIGHT, MIN_PERFECT_WIDTH,
    PERFECT_WIDTH_MODULUS, PERFECT_WIDTH_REMAINDER,
};
use crate::error::{MazeError, Result};
use crate::filler::{Comb, Filler};
use crate::geometry::{Coord, Rect};
use crate::grid::Grid;
use crate::tile::Tile;

// ============================================================================
// Layout
// ============================================================================
//
// The exit sits inside a 7x7 hub. Its ring of walls has one doorway, and
// the ring's sides run on to the grid edges, cutting the rest of the grid
// into a top band, a west side, an east side and a strip under the hub.
// Comb legs sweep them in one pass that finishes beside the doorway:
//
//   top band -> far side -> under the hub -> near side, bottom up -> hub
//
// The near side is the one facing the doorway. When the ring sits on the
// top wall row there is no band and the sweep opens down the west side.

/// One comb-filled rectangle of the sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Leg {
    pub region: Rect,
    pub comb: Comb,
    pub start: Coord,
}

impl Leg {
    // The comb over `region` that runs from corner `start` to `end`, if any
    fn fitting(region: Rect, start: Coord, end: Coord) -> Option<Self> {
        if !region.is_corner(start) {
            return None;
        }
        [Comb::Columns, Comb::Rows]
            .into_iter()
            .map(|comb| Self { region, comb, start })
            .find(|leg| leg.comb.spans(region) && leg.end() == end)
    }

    #[must_use]
    pub const fn end(&self) -> Coord {
        self.comb.end(self.region, self.start)
    }
}

/// How the inside of the hub is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HubFill {
    Spiral,
    /// Fixed rows read as glyphs, for an exit off the hub centre
    Fixed(&'static [&'static str]),
}

/// The walled square around the exit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hub {
    pub interior: Rect,
    /// First cell inside the ring doorway
    pub start: Coord,
    pub fill: HubFill,
}

impl Hub {
    fn draw(&self, grid: &mut Grid, exit: Coord) -> Result<()> {
        match self.fill {
            HubFill::Spiral => {
                Filler::Spiral { goal: false }.fill(grid, self.interior, self.start, exit)
            }
            HubFill::Fixed(rows) => {
                for (y, row) in (self.interior.y..).zip(rows) {
                    for (x, glyph) in (self.interior.x..).zip(row.chars()) {
                        if let Some(tile) = Tile::from_glyph(glyph) {
                            grid.place(Coord::new(x, y), tile, false)?;
                        }
                    }
                }
                Ok(())
            }
        }
    }
}

// Exit and doorway cell relative to the hub's top-left corner
struct Shape {
    exit: Coord,
    start: Coord,
    fill: HubFill,
}

// In order of preference; the fixed hubs serve exits the centred ones can't reach
const SHAPES: [Shape; 6] = [
    Shape { exit: Coord::new(3, 2), start: Coord::new(0, 4), fill: HubFill::Spiral },
    Shape { exit: Coord::new(3, 2), start: Coord::new(6, 4), fill: HubFill::Spiral },
    Shape { exit: Coord::new(3, 4), start: Coord::new(0, 2), fill: HubFill::Spiral },
    Shape { exit: Coord::new(3, 4), start: Coord::new(6, 2), fill: HubFill::Spiral },
    Shape {
        exit: Coord::new(1, 2),
        start: Coord::new(0, 0),
        fill: HubFill::Fixed(&[
            "...#...", "##...#.", ".X####.", ".#...#.", ".#.#.#.", ".#.#.#.", "...#...",
        ]),
    },
    Shape {
        exit: Coord::new(1, 4),
        start: Coord::new(0, 2),
        fill: HubFill::Fixed(&[
            "...#...", ".#.#.#.", ".#.#.#.", "##...#.", ".X####.", ".#...#.", "...#...",
        ]),
    },
];

/// Everything the perfect divider draws: the hub and the legs leading to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    pub entrance: Coord,
    pub exit: Coord,
    pub hub: Hub,
    pub legs: Vec<Leg>,
}

impl Layout {
    /// Single-cell doorways along the sweep: into the first leg unless it
    /// touches the entrance, between legs, and through the hub ring.
    #[must_use]
    pub fn doors(&self) -> Vec<Coord> {
        let mut doors = Vec::with_capacity(self.legs.len() + 1);
        let mut from = self.entrance;
        for leg in &self.legs {
            doors.extend(doorway(from, leg.start));
            from = leg.end();
        }
        doors.extend(doorway(from, self.hub.start));
        doors
    }
}

// Cell between two stretches; none when they already touch. A diagonal
// step turns on the row it leaves from.
const fn doorway(from: Coord, to: Coord) -> Option<Coord> {
    if from.manhattan(to) <= 1 {
        None
    } else if from.x == to.x || from.y == to.y {
        Some(Coord::new((from.x + to.x) / 2, (from.y + to.y) / 2))
    } else {
        Some(Coord::new(to.x, from.y))
    }
}

const fn span(x0: i32, y0: i32, x1: i32, y1: i32) -> Rect {
    Rect::new(x0, y0, x1 - x0, y1 - y0)
}

// ============================================================================
// Routing
// ============================================================================

// Covers `region` from corner `from` to corner `to` with one comb, or with
// two either side of a wall row or column
fn route(region: Rect, from: Coord, to: Coord) -> Option<Vec<Leg>> {
    if region.width < 0 || region.height < 0 {
        return None;
    }
    if let Some(leg) = Leg::fitting(region, from, to) {
        return Some(vec![leg]);
    }
    let (x0, y0, x1, y1) = (region.x, region.y, region.right(), region.bottom());

    for s in y0 + 1..y1 {
        let upper = span(x0, y0, x1, s - 1);
        let lower = span(x0, s + 1, x1, y1);
        for (first, second, down) in [(upper, lower, 1), (lower, upper, -1)] {
            for x in [x0, x1] {
                let (exit, entry) = (Coord::new(x, s - down), Coord::new(x, s + down));
                let legs = pair((first, from, exit), (second, entry, to));
                if legs.is_some() {
                    return legs;
                }
            }
        }
    }
    // Odd steps keep both halves an odd number of cells wide
    for s in (x0 + 1..x1).step_by(2) {
        let west = span(x0, y0, s - 1, y1);
        let east = span(s + 1, y0, x1, y1);
        for (first, second, across) in [(west, east, 1), (east, west, -1)] {
            for y in [y0, y1] {
                let (exit, entry) = (Coord::new(s - across, y), Coord::new(s + across, y));
                let legs = pair((first, from, exit), (second, entry, to));
                if legs.is_some() {
                    return legs;
                }
            }
        }
    }
    None
}

type Stretch = (Rect, Coord, Coord);

fn pair((first, from, exit): Stretch, (second, entry, to): Stretch) -> Option<Vec<Leg>> {
    Some(vec![Leg::fitting(first, from, exit)?, Leg::fitting(second, entry, to)?])
}

// A side of the hub with its columns next to the ring and next to the grid edge
#[derive(Clone, Copy)]
struct Side {
    region: Rect,
    inner: i32,
    outer: i32,
}

impl Side {
    // From the inner bottom corner up to the cell facing the doorway
    fn climb(self, hub: &Hub, bottom: i32) -> Option<Vec<Leg>> {
        let (top, door) = (hub.interior.y, hub.start.y);
        let (x0, x1) = (self.region.x, self.region.right());
        if door == top {
            let corner = Coord::new(self.inner, bottom);
            return route(self.region, corner, Coord::new(self.inner, door));
        }
        if door + 2 > bottom {
            return None;
        }
        let below = span(x0, door + 2, x1, bottom);
        let above = span(x0, top, x1, door);
        let (inner, outer) = (self.inner, self.outer);
        let mut legs = route(below, Coord::new(inner, bottom), Coord::new(outer, door + 2))?;
        legs.extend(route(above, Coord::new(outer, door), Coord::new(inner, door))?);
        Some(legs)
    }
}

// Every leg outside the hub, with the wall rows along the top and bottom
// edges optionally opened up to `top` and `bottom`
fn sweep(width: i32, hub: &Hub, top: i32, bottom: i32) -> Option<Vec<Leg>> {
    let ring = hub.interior;
    if ring.bottom() + 2 > bottom {
        return None;
    }
    let last = width - 1;
    let west = Side {
        region: span(1, ring.y, ring.x - 2, bottom),
        inner: ring.x - 2,
        outer: 1,
    };
    let east = Side {
        region: span(ring.right() + 2, ring.y, last, bottom),
        inner: ring.right() + 2,
        outer: last,
    };
    let under = span(ring.x, ring.bottom() + 2, ring.right(), bottom);
    let door_west = hub.start.x == ring.x;
    let (near, far) = if door_west { (west, east) } else { (east, west) };

    let mut legs = Vec::new();
    if ring.y == 1 && top == 1 && !door_west {
        legs.extend(route(west.region, Coord::new(1, 1), Coord::new(west.inner, bottom))?);
        let (x_from, x_to) = (under.x, under.right());
        legs.extend(route(under, Coord::new(x_from, bottom), Coord::new(x_to, bottom))?);
    } else if ring.y - 2 >= top {
        let band = span(1, top, last, ring.y - 2);
        legs.extend(route(band, Coord::new(1, top), Coord::new(far.outer, ring.y - 2))?);
        let (far_from, far_to) = (Coord::new(far.outer, ring.y), Coord::new(far.inner, bottom));
        legs.extend(route(far.region, far_from, far_to)?);
        let (x_from, x_to) = if door_west {
            (under.right(), under.x)
        } else {
            (under.x, under.right())
        };
        legs.extend(route(under, Coord::new(x_from, bottom), Coord::new(x_to, bottom))?);
    } else {
        return None;
    }
    legs.extend(near.climb(hub, bottom)?);
    Some(legs)
}

// ============================================================================
// Perfect Divider
// ============================================================================

/// Builds a perfect, unicursal maze from the entrance at the origin to an
/// exit in the centre column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PerfectDivider;

impl PerfectDivider {
    /// Validates the grid shape and exit, then lays out the hub and every leg.
    /// Without an exit the row nearest the middle that takes a spiral hub wins.
    pub fn plan(width: i32, height: i32, exit: Option<Coord>) -> Result<Layout> {
        if width < MIN_PERFECT_WIDTH || width % PERFECT_WIDTH_MODULUS != PERFECT_WIDTH_REMAINDER {
            return Err(MazeError::configuration(format!(
                "perfect width must be at least {MIN_PERFECT_WIDTH} and {PERFECT_WIDTH_REMAINDER} \
                 mod {PERFECT_WIDTH_MODULUS}, got {width}"
            )));
        }
        if height < MIN_PERFECT_HEIGHT {
            return Err(MazeError::configuration(format!(
                "perfect height must be at least {MIN_PERFECT_HEIGHT}, got {height}"
            )));
        }

        let column = (width - 2) / 2;
        let rows = EXIT_TOP_CLEARANCE..=height - EXIT_BOTTOM_CLEARANCE;
        let layout = match exit {
            Some(at) => {
                if at.x != column || !rows.contains(&at.y) {
                    return Err(MazeError::configuration(format!(
                        "exit {at} must sit in column {column} between rows {} and {}",
                        rows.start(),
                        rows.end()
                    )));
                }
                Self::arrange(width, height, at)
            }
            None => {
                let mut candidates: Vec<i32> = rows.collect();
                candidates.sort_by_key(|y| ((2 * y - height).abs(), *y));
                let arranged = |y: &i32| Self::arrange(width, height, Coord::new(column, *y));
                candidates
                    .iter()
                    .filter_map(&arranged)
                    .find(|layout| layout.hub.fill == HubFill::Spiral)
                    .or_else(|| candidates.iter().find_map(&arranged))
            }
        };
        let layout = layout.ok_or_else(|| MazeError::Unsupported {
            reason: format!("no sweep reaches the hub of a {width}x{height} perfect grid"),
        })?;

        debug!(
            "perfect layout {}x{}: exit {}, hub {}, {} legs",
            width,
            height,
            layout.exit,
            layout.hub.interior,
            layout.legs.len()
        );
        Ok(layout)
    }

    fn arrange(width: i32, height: i32, exit: Coord) -> Option<Layout> {
        SHAPES.iter().find_map(|shape| {
            let interior = Rect::new(
                exit.x - shape.exit.x,
                exit.y - shape.exit.y,
                HUB_EXTENT,
                HUB_EXTENT,
            );
            if interior.y < 1 || interior.bottom() >= height {
                return None;
            }
            let hub = Hub {
                interior,
                start: interior.top_left().offset(shape.start.x, shape.start.y),
                fill: shape.fill,
            };
            let legs = [(0, height), (0, height - 1), (1, height), (1, height - 1)]
                .into_iter()
                .find_map(|(top, bottom)| sweep(width, &hub, top, bottom));
            trace!("hub {} from {}: routed {}", interior, hub.start, legs.is_some());
            legs.map(|legs| Layout {
                entrance: Coord::new(0, 0),
                exit,
                hub,
                legs,
            })
        })
    }

    /// Entrance must be absent or at the origin; the exit, if placed, must
    /// pass [`PerfectDivider::plan`].
    pub fn build(&self, grid: &mut Grid) -> Result<()> {
        if let Some(at) = grid.find_first(Tile::Entrance)
            && at != Coord::new(0, 0)
        {
            return Err(MazeError::configuration(format!(
                "perfect entrance must be at (0, 0), found {at}"
            )));
        }
        let exit = grid.find_first(Tile::Exit);
        let layout = Self::plan(grid.width(), grid.height(), exit)?;

        grid.place(layout.entrance, Tile::Entrance, false)?;
        grid.place(layout.exit, Tile::Exit, false)?;
        for door in layout.doors() {
            grid.place(door, Tile::Join, false)?;
        }
        for leg in &layout.legs {
            leg.comb.paint(grid, leg.region, leg.start)?;
        }
        layout.hub.draw(grid, layout.exit)?;

        let sealed = grid.seal();
        debug!("perfect divider walled {} remaining cells", sealed);
        Ok(())
    }
}
