use tracing::{info, warn};

use crate::config::BuildConfig;
use crate::error::{MazeError, Result};
use crate::geometry::Coord;
use crate::grid::Grid;
use crate::post::{snake_grid, strip_doors};
use crate::tile::{Palette, Tile};

// ============================================================================
// Labyrinth
// ============================================================================

/// Counts from the whole-grid passes of one build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BuildReport {
    pub doors_stripped: usize,
    /// Pattern rewrites applied by the snake pass
    pub rewrites: usize,
    pub sealed: usize,
}

/// Caller-facing grid speaking the caller's own symbols
#[derive(Debug, Clone)]
pub struct Labyrinth<T> {
    grid: Grid,
    palette: Palette<T>,
    config: BuildConfig,
    built: bool,
}

impl<T: Copy + PartialEq> Labyrinth<T> {
    /// Unbuilt labyrinth over an all-unassigned grid.
    pub fn new(width: i32, height: i32, palette: Palette<T>, config: BuildConfig) -> Result<Self> {
        Ok(Self {
            grid: Grid::new(width, height)?,
            palette,
            config,
            built: false,
        })
    }

    #[must_use]
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    #[must_use]
    pub const fn config(&self) -> &BuildConfig {
        &self.config
    }

    #[must_use]
    pub const fn is_built(&self) -> bool {
        self.built
    }

    pub fn place(&mut self, at: Coord, symbol: T, force: bool) -> Result<()> {
        let tile = self
            .palette
            .tile(symbol)
            .ok_or_else(|| MazeError::configuration("symbol is not in the palette"))?;
        self.grid.place(at, tile, force)
    }

    /// Column-major lookup; [`Coord::NOT_FOUND`] when absent
    #[must_use]
    pub fn find_first(&self, symbol: T) -> Coord {
        self.palette
            .tile(symbol)
            .and_then(|tile| self.grid.find_first(tile))
            .unwrap_or(Coord::NOT_FOUND)
    }

    /// Runs the configured divider, then the optional whole-grid passes. On
    /// failure the grid is left unusable for iteration.
    pub fn build(&mut self) -> Result<BuildReport> {
        self.built = false;
        let divider = self.config.divider();
        divider.build(&mut self.grid)?;

        let mut report = BuildReport::default();
        if self.config.strip_doors {
            report.doors_stripped = strip_doors(&mut self.grid)?;
        }
        if self.config.snake {
            report.rewrites = snake_grid(&mut self.grid)?;
        }
        report.sealed = self.grid.seal();
        if report.sealed > 0 {
            warn!("{} cells were still unassigned after the build", report.sealed);
        }

        self.built = true;
        info!(
            "built {}x{} {} labyrinth: {} doors stripped, {} rewrites",
            self.grid.width(),
            self.grid.height(),
            divider.name(),
            report.doors_stripped,
            report.rewrites
        );
        Ok(report)
    }

    /// One iterator per column, each yielding that column's symbols top-down
    pub fn columns(&self) -> Result<impl Iterator<Item = impl Iterator<Item = T> + '_> + '_> {
        if !self.built {
            return Err(MazeError::NotBuilt);
        }
        let palette = &self.palette;
        Ok(self
            .grid
            .columns()
            .map(move |column| column.iter().map(move |tile| palette.symbol(*tile))))
    }

    /// Row-major copy of the finished grid
    pub fn rows(&self) -> Result<Vec<Vec<T>>> {
        if !self.built {
            return Err(MazeError::NotBuilt);
        }
        Ok((0..=self.grid.height())
            .map(|y| {
                (0..=self.grid.width())
                    .map(|x| {
                        let tile = self.grid.tile(Coord::new(x, y)).unwrap_or(Tile::Impassable);
                        self.palette.symbol(tile)
                    })
                    .collect()
            })
            .collect())
    }
}
