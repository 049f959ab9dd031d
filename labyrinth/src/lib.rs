//! Grid labyrinth engine.
//!
//! A [`Labyrinth`] owns a fixed-size grid of tiles. `build()` hands the grid
//! to a divider: the perfect divider lays a single branch-free corridor from
//! the entrance to the exit, the imperfect divider bisects the grid with
//! walls and doors and leaves the smallest regions to a filler. Doors can be
//! stripped afterwards and the pattern engine can lengthen corridors over the
//! whole map.
//!
//! ```
//! use labyrinth::{BuildConfig, Labyrinth, Palette};
//!
//! let mut maze = Labyrinth::new(18, 11, Palette::ascii(), BuildConfig::default()).unwrap();
//! maze.build().unwrap();
//! for row in maze.rows().unwrap() {
//!     println!("{}", row.into_iter().collect::<String>());
//! }
//! ```

pub mod analysis;
pub mod config;
pub mod constants;
pub mod divider;
mod error;
#[cfg(feature = "json")]
pub mod export;
pub mod filler;
pub mod geometry;
pub mod grid;
mod labyrinth;
pub mod pattern;
pub mod post;
pub mod tile;

pub use config::{BuildConfig, DividerKind, FillerKind};
pub use divider::{Divider, ImperfectDivider, PerfectDivider};
pub use error::{MazeError, Result};
#[cfg(feature = "json")]
pub use export::Snapshot;
pub use filler::{Comb, Filler};
pub use geometry::{Coord, Rect};
pub use grid::Grid;
pub use labyrinth::{BuildReport, Labyrinth};
pub use tile::{Palette, Tile};
