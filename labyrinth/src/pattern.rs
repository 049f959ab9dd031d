//! Local pattern rewriting over a scratch buffer.
//!
//! A [`Snake`] copies a region into a buffer and repeatedly replaces small
//! wall/path configurations with longer detours until no pattern matches.
//! Every rewrite turns strictly more walls into path than the reverse, so the
//! passable count rises on each one and a fixpoint is always reached.

use std::sync::LazyLock;

use tracing::trace;

use crate::constants::PATTERN_OVERHANG;
use crate::geometry::{Coord, Rect};
use crate::grid::Grid;
use crate::tile::Tile;

// ============================================================================
// Pattern Library
// ============================================================================

// '#' wall, '.' path, '?' matches anything / left untouched
struct Template {
    name: &'static str,
    before: &'static [&'static str],
    after: &'static [&'static str],
    transpose: bool,
}

const TEMPLATES: [Template; 4] = [
    Template {
        name: "wide bulge",
        before: &["?####?", "######", "?..###", "?#.###", "???##?"],
        after: &["??????", "?....?", "??#?.?", "???..?", "??????"],
        transpose: false,
    },
    Template {
        name: "bulge",
        before: &["?###?", "#####", "?..##", "?#.##", "???#?"],
        after: &["?????", "?...?", "??#.?", "???.?", "?????"],
        transpose: false,
    },
    Template {
        name: "horizontal push",
        before: &["?###?", "#####", "?...?", "??#??"],
        after: &["?????", "?...?", "??#??", "?????"],
        transpose: false,
    },
    Template {
        name: "vertical push",
        before: &["?###?", "#####", "?...?", "??#??"],
        after: &["?????", "?...?", "??#??", "?????"],
        transpose: true,
    },
];

/// Row reversal mirrors left/right, row-order reversal flips top/bottom
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Symmetry {
    Identity,
    ReverseRows,
    ReverseRowOrder,
    ReverseBoth,
}

impl Symmetry {
    pub const ALL: [Self; 4] = [
        Self::Identity,
        Self::ReverseRows,
        Self::ReverseRowOrder,
        Self::ReverseBoth,
    ];

    const fn mirrors_x(self) -> bool {
        matches!(self, Self::ReverseRows | Self::ReverseBoth)
    }

    const fn mirrors_y(self) -> bool {
        matches!(self, Self::ReverseRowOrder | Self::ReverseBoth)
    }
}

/// One oriented pattern; cells are row-major, `None` is a wildcard
#[derive(Debug, Clone)]
pub struct Pattern {
    name: &'static str,
    symmetry: Symmetry,
    width: i32,
    height: i32,
    before: Vec<Option<Tile>>,
    after: Vec<Option<Tile>>,
}

impl Pattern {
    fn oriented(template: &Template, symmetry: Symmetry) -> Self {
        let parse = |rows: &[&str]| -> Vec<Vec<Option<Tile>>> {
            rows.iter()
                .map(|row| {
                    row.chars()
                        .map(|c| if c == '?' { None } else { Tile::from_glyph(c) })
                        .collect()
                })
                .collect()
        };
        let mut before = parse(template.before);
        let mut after = parse(template.after);
        if template.transpose {
            before = transpose(&before);
            after = transpose(&after);
        }

        let height = before.len() as i32;
        let width = before.first().map_or(0, Vec::len) as i32;
        let orient = |cells: &[Vec<Option<Tile>>]| -> Vec<Option<Tile>> {
            let mut out = Vec::with_capacity((width * height) as usize);
            for y in 0..height {
                let sy = if symmetry.mirrors_y() { height - 1 - y } else { y };
                for x in 0..width {
                    let sx = if symmetry.mirrors_x() { width - 1 - x } else { x };
                    out.push(cells[sy as usize][sx as usize]);
                }
            }
            out
        };

        Self {
            name: template.name,
            symmetry,
            width,
            height,
            before: orient(&before),
            after: orient(&after),
        }
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Passable cells gained by one application
    #[must_use]
    pub fn gain(&self) -> i32 {
        self.before
            .iter()
            .zip(&self.after)
            .map(|pair| match pair {
                (Some(Tile::Impassable), Some(Tile::Passable)) => 1,
                (Some(Tile::Passable), Some(Tile::Impassable)) => -1,
                _ => 0,
            })
            .sum()
    }

    /// True when every rewritten cell is also constrained and lies off the
    /// pattern margin, so writes never leave the buffer.
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        (0..self.height).all(|y| {
            (0..self.width).all(|x| {
                let i = (y * self.width + x) as usize;
                let margin = x == 0 || y == 0 || x == self.width - 1 || y == self.height - 1;
                self.after[i].is_none() || (!margin && self.before[i].is_some())
            })
        })
    }
}

fn transpose(cells: &[Vec<Option<Tile>>]) -> Vec<Vec<Option<Tile>>> {
    let width = cells.first().map_or(0, Vec::len);
    (0..width)
        .map(|x| cells.iter().map(|row| row[x]).collect())
        .collect()
}

static LIBRARY: LazyLock<Vec<Pattern>> = LazyLock::new(|| {
    TEMPLATES
        .iter()
        .flat_map(|t| Symmetry::ALL.into_iter().map(move |s| Pattern::oriented(t, s)))
        .collect()
});

/// Every pattern in every orientation, larger patterns first
#[must_use]
pub fn library() -> &'static [Pattern] {
    &LIBRARY
}

// ============================================================================
// Rewrite Buffer
// ============================================================================

#[derive(Debug, Clone)]
pub struct Snake {
    region: Rect,
    cells: Vec<Tile>,
}

impl Snake {
    /// Buffer over `region` with every cell impassable
    #[must_use]
    pub fn new(region: Rect) -> Self {
        Self {
            region,
            cells: vec![Tile::Impassable; region.area()],
        }
    }

    /// Buffer seeded with the grid's current tiles
    #[must_use]
    pub fn from_grid(grid: &Grid, region: Rect) -> Self {
        let mut snake = Self::new(region);
        for at in region.cells() {
            if let Some(tile) = grid.tile(at) {
                snake.set(at, tile);
            }
        }
        snake
    }

    #[must_use]
    pub const fn region(&self) -> Rect {
        self.region
    }

    /// Cells outside the buffer read as walls
    #[must_use]
    pub fn tile(&self, at: Coord) -> Tile {
        self.index(at).map_or(Tile::Impassable, |i| self.cells[i])
    }

    pub fn set(&mut self, at: Coord, tile: Tile) {
        if let Some(i) = self.index(at) {
            self.cells[i] = tile;
        }
    }

    /// Absolute coordinates, column-major
    pub fn tiles(&self) -> impl Iterator<Item = (Coord, Tile)> + '_ {
        self.region.cells().map(|at| (at, self.tile(at)))
    }

    /// One sweep of the whole library; returns how many rewrites were applied
    pub fn pass(&mut self) -> usize {
        let mut rewrites = 0;
        for pattern in library() {
            let x_range = self.region.x - PATTERN_OVERHANG
                ..=self.region.right() + PATTERN_OVERHANG + 1 - pattern.width;
            let y_range = self.region.y - PATTERN_OVERHANG
                ..=self.region.bottom() + PATTERN_OVERHANG + 1 - pattern.height;
            for oy in y_range {
                for ox in x_range.clone() {
                    let origin = Coord::new(ox, oy);
                    if self.matches(pattern, origin) && self.apply(pattern, origin) {
                        trace!("{} ({:?}) rewrote at {}", pattern.name, pattern.symmetry, origin);
                        rewrites += 1;
                    }
                }
            }
        }
        rewrites
    }

    /// Repeats passes until nothing changes; returns the total rewrite count
    pub fn run(&mut self) -> usize {
        let mut total = 0;
        loop {
            let rewrites = self.pass();
            if rewrites == 0 {
                return total;
            }
            total += rewrites;
        }
    }

    fn matches(&self, pattern: &Pattern, origin: Coord) -> bool {
        pattern_cells(pattern, origin)
            .all(|(at, i)| pattern.before[i].is_none_or(|want| self.tile(at) == want))
    }

    fn apply(&mut self, pattern: &Pattern, origin: Coord) -> bool {
        let mut changed = false;
        for (at, i) in pattern_cells(pattern, origin) {
            if let Some(tile) = pattern.after[i]
                && self.index(at).is_some()
                && self.tile(at) != tile
            {
                self.set(at, tile);
                changed = true;
            }
        }
        changed
    }

    fn index(&self, at: Coord) -> Option<usize> {
        if self.region.contains(at) {
            let x = (at.x - self.region.x) as usize;
            let y = (at.y - self.region.y) as usize;
            Some(y * (self.region.width + 1) as usize + x)
        } else {
            None
        }
    }
}

fn pattern_cells(pattern: &Pattern, origin: Coord) -> impl Iterator<Item = (Coord, usize)> + '_ {
    (0..pattern.height).flat_map(move |y| {
        (0..pattern.width).map(move |x| (origin.offset(x, y), (y * pattern.width + x) as usize))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn count(snake: &Snake, tile: Tile) -> usize {
        snake.tiles().filter(|(_, t)| *t == tile).count()
    }

    #[test]
    fn library_is_curated() {
        assert_eq!(library().len(), 16);
        for pattern in library() {
            assert!(pattern.gain() >= 2, "{} gains too little", pattern.name());
            assert!(pattern.is_well_formed(), "{} writes into its margin", pattern.name());
        }
    }

    #[test]
    fn straight_corridor_grows_detours() {
        let region = Rect::new(0, 0, 8, 4);
        let mut snake = Snake::new(region);
        for x in 0..=8 {
            snake.set(Coord::new(x, 2), Tile::Passable);
        }
        let before = count(&snake, Tile::Passable);
        let rewrites = snake.run();
        assert!(rewrites > 0);
        assert!(count(&snake, Tile::Passable) >= before + 2 * rewrites);
        assert_eq!(snake.pass(), 0);
    }

    #[test]
    fn solid_walls_stay_solid() {
        let mut snake = Snake::new(Rect::new(0, 0, 6, 6));
        assert_eq!(snake.run(), 0);
        assert_eq!(count(&snake, Tile::Passable), 0);
    }

    #[test]
    fn fixed_tiles_only_match_wildcards() {
        let region = Rect::new(0, 0, 4, 3);
        let mut snake = Snake::new(region);
        snake.set(Coord::new(1, 2), Tile::Passable);
        snake.set(Coord::new(2, 2), Tile::Join);
        snake.set(Coord::new(3, 2), Tile::Passable);
        assert_eq!(snake.run(), 0);
    }

    #[test]
    fn seeded_buffer_mirrors_the_grid() {
        let grid = Grid::from_rows(&["E.#", "#.#", "#.X"]).unwrap();
        let region = Rect::new(1, 0, 1, 2);
        let snake = Snake::from_grid(&grid, region);
        assert_eq!(snake.region(), region);
        assert_eq!(snake.tile(Coord::new(1, 1)), Tile::Passable);
        assert_eq!(snake.tile(Coord::new(2, 2)), Tile::Exit);
        // Outside the buffer
        assert_eq!(snake.tile(Coord::new(0, 0)), Tile::Impassable);
    }

    fn arb_tile() -> impl Strategy<Value = Tile> {
        prop_oneof![
            4 => Just(Tile::Impassable),
            3 => Just(Tile::Passable),
            1 => Just(Tile::Unassigned),
        ]
    }

    proptest! {
        #[test]
        fn rewriting_reaches_a_fixpoint(
            width in 0i32..10,
            height in 0i32..10,
            seed in prop::collection::vec(arb_tile(), 100),
        ) {
            let region = Rect::new(0, 0, width, height);
            let mut snake = Snake::new(region);
            for (i, at) in region.cells().enumerate() {
                snake.set(at, seed[i]);
            }
            let before = count(&snake, Tile::Passable);
            let rewrites = snake.run();
            let after = count(&snake, Tile::Passable);

            prop_assert!(rewrites <= region.area() / 2);
            prop_assert!(after >= before + 2 * rewrites);
            prop_assert_eq!(snake.pass(), 0);
        }
    }
}
