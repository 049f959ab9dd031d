use std::fmt;
use std::str::FromStr;

#[cfg(feature = "json")]
use serde::{Deserialize, Serialize};

use crate::error::MazeError;

// ============================================================================
// Coordinates
// ============================================================================

/// Grid position; x grows to the right (columns), y grows downwards (rows)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    /// Returned by symbol lookups that find nothing
    pub const NOT_FOUND: Self = Self::new(-1, -1);

    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    #[must_use]
    pub const fn manhattan(self, other: Self) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }

    /// North, east, south, west
    #[must_use]
    pub const fn neighbors(self) -> [Self; 4] {
        [
            self.offset(0, -1),
            self.offset(1, 0),
            self.offset(0, 1),
            self.offset(-1, 0),
        ]
    }

    #[must_use]
    pub const fn transposed(self) -> Self {
        Self::new(self.y, self.x)
    }
}

impl From<(i32, i32)> for Coord {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

// Parses "x,y"
impl FromStr for Coord {
    type Err = MazeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || MazeError::configuration(format!("expected \"x,y\", got {s:?}"));
        let (x, y) = s.split_once(',').ok_or_else(bad)?;
        let x = x.trim().parse().map_err(|_| bad())?;
        let y = y.trim().parse().map_err(|_| bad())?;
        Ok(Self::new(x, y))
    }
}

// ============================================================================
// Rectangles
// ============================================================================

/// Axis-aligned rectangle. Width and height are inclusive extents: a rectangle
/// with width 0 is one column wide, and `right()` is the last column inside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    #[must_use]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    /// Smallest rectangle holding both corners, in any order
    #[must_use]
    pub const fn spanning(a: Coord, b: Coord) -> Self {
        let (x0, x1) = if a.x <= b.x { (a.x, b.x) } else { (b.x, a.x) };
        let (y0, y1) = if a.y <= b.y { (a.y, b.y) } else { (b.y, a.y) };
        Self::new(x0, y0, x1 - x0, y1 - y0)
    }

    #[must_use]
    pub const fn right(&self) -> i32 {
        self.x + self.width
    }

    #[must_use]
    pub const fn bottom(&self) -> i32 {
        self.y + self.height
    }

    #[must_use]
    pub const fn top_left(&self) -> Coord {
        Coord::new(self.x, self.y)
    }

    #[must_use]
    pub const fn bottom_right(&self) -> Coord {
        Coord::new(self.right(), self.bottom())
    }

    /// Inclusive on all four edges
    #[must_use]
    pub const fn contains(&self, at: Coord) -> bool {
        at.x >= self.x && at.x <= self.right() && at.y >= self.y && at.y <= self.bottom()
    }

    #[must_use]
    pub const fn on_edge(&self, at: Coord) -> bool {
        self.contains(at)
            && (at.x == self.x || at.x == self.right() || at.y == self.y || at.y == self.bottom())
    }

    #[must_use]
    pub const fn is_corner(&self, at: Coord) -> bool {
        self.contains(at)
            && (at.x == self.x || at.x == self.right())
            && (at.y == self.y || at.y == self.bottom())
    }

    /// Corner diagonally across from `at` (only meaningful for corners)
    #[must_use]
    pub const fn opposite(&self, at: Coord) -> Coord {
        Coord::new(self.x + self.right() - at.x, self.y + self.bottom() - at.y)
    }

    #[must_use]
    pub const fn center(&self) -> Coord {
        Coord::new(self.x + self.width / 2, self.y + self.height / 2)
    }

    /// Distance from `at` to the nearest edge; 0 on the edge itself
    #[must_use]
    pub const fn depth(&self, at: Coord) -> i32 {
        let dx = min(at.x - self.x, self.right() - at.x);
        let dy = min(at.y - self.y, self.bottom() - at.y);
        min(dx, dy)
    }

    #[must_use]
    pub const fn area(&self) -> usize {
        ((self.width + 1) * (self.height + 1)) as usize
    }

    #[must_use]
    pub const fn transposed(&self) -> Self {
        Self::new(self.y, self.x, self.height, self.width)
    }

    /// Column-major walk: top to bottom, then left to right
    pub fn cells(&self) -> impl Iterator<Item = Coord> + use<> {
        let (x0, x1, y0, y1) = (self.x, self.right(), self.y, self.bottom());
        (x0..=x1).flat_map(move |x| (y0..=y1).map(move |y| Coord::new(x, y)))
    }

    /// Boundary cells clockwise from the top-left corner, each listed once
    #[must_use]
    pub fn perimeter(&self) -> Vec<Coord> {
        let (x0, x1, y0, y1) = (self.x, self.right(), self.y, self.bottom());
        if x0 == x1 || y0 == y1 {
            return self.cells().collect();
        }
        let mut ring = Vec::with_capacity(2 * (self.width + self.height) as usize);
        ring.extend((x0..x1).map(|x| Coord::new(x, y0)));
        ring.extend((y0..y1).map(|y| Coord::new(x1, y)));
        ring.extend((x0 + 1..=x1).rev().map(|x| Coord::new(x, y1)));
        ring.extend((y0 + 1..=y1).rev().map(|y| Coord::new(x0, y)));
        ring
    }

    /// Rectangle shrunk by `n` cells on every side, if anything is left
    #[must_use]
    pub const fn inset(&self, n: i32) -> Option<Self> {
        let width = self.width - 2 * n;
        let height = self.height - 2 * n;
        if width < 0 || height < 0 {
            None
        } else {
            Some(Self::new(self.x + n, self.y + n, width, height))
        }
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}..={}, {}..={}]",
            self.x,
            self.right(),
            self.y,
            self.bottom()
        )
    }
}

const fn min(a: i32, b: i32) -> i32 {
    if a < b { a } else { b }
}
