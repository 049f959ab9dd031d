#[cfg(feature = "json")]
use serde::{Deserialize, Serialize};

use crate::error::{MazeError, Result};

// ============================================================================
// Tiles
// ============================================================================

/// What a single grid cell holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
pub enum Tile {
    Entrance,
    Exit,
    #[default]
    Unassigned,
    Impassable,
    Passable,
    /// Doorway left by a divider; becomes passable when doors are stripped
    Join,
}

impl Tile {
    pub const ALL: [Self; 6] = [
        Self::Entrance,
        Self::Exit,
        Self::Unassigned,
        Self::Impassable,
        Self::Passable,
        Self::Join,
    ];

    /// Tiles that may be replaced by a forced placement
    #[must_use]
    pub const fn is_overwritable(self) -> bool {
        matches!(self, Self::Unassigned | Self::Passable | Self::Impassable)
    }

    /// Anything a walker can stand on
    #[must_use]
    pub const fn is_open(self) -> bool {
        matches!(self, Self::Entrance | Self::Exit | Self::Passable | Self::Join)
    }

    #[must_use]
    pub const fn glyph(self) -> char {
        match self {
            Self::Entrance => 'E',
            Self::Exit => 'X',
            Self::Unassigned => '?',
            Self::Impassable => '#',
            Self::Passable => '.',
            Self::Join => '+',
        }
    }

    #[must_use]
    pub const fn from_glyph(glyph: char) -> Option<Self> {
        match glyph {
            'E' => Some(Self::Entrance),
            'X' => Some(Self::Exit),
            '?' => Some(Self::Unassigned),
            '#' => Some(Self::Impassable),
            '.' => Some(Self::Passable),
            '+' => Some(Self::Join),
            _ => None,
        }
    }
}

// ============================================================================
// Palette
// ============================================================================

/// Caller-chosen symbols for the six tile kinds
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette<T> {
    symbols: [T; 6],
}

impl<T: Copy + PartialEq> Palette<T> {
    pub fn new(entrance: T, exit: T, unassigned: T, impassable: T, passable: T, join: T) -> Result<Self> {
        let symbols = [entrance, exit, unassigned, impassable, passable, join];
        for (i, a) in symbols.iter().enumerate() {
            if symbols[i + 1..].contains(a) {
                return Err(MazeError::configuration(format!(
                    "palette symbol for {:?} is reused",
                    Tile::ALL[i]
                )));
            }
        }
        Ok(Self { symbols })
    }

    #[must_use]
    pub fn symbol(&self, tile: Tile) -> T {
        self.symbols[tile as usize]
    }

    #[must_use]
    pub fn tile(&self, symbol: T) -> Option<Tile> {
        self.symbols
            .iter()
            .position(|s| *s == symbol)
            .map(|i| Tile::ALL[i])
    }
}

impl Palette<char> {
    #[must_use]
    pub const fn ascii() -> Self {
        Self {
            symbols: [
                Tile::Entrance.glyph(),
                Tile::Exit.glyph(),
                Tile::Unassigned.glyph(),
                Tile::Impassable.glyph(),
                Tile::Passable.glyph(),
                Tile::Join.glyph(),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_maps_both_ways() {
        let palette = Palette::new(2u8, 3, 0, 1, 4, 5).unwrap();
        for tile in Tile::ALL {
            assert_eq!(palette.tile(palette.symbol(tile)), Some(tile));
        }
        assert_eq!(palette.symbol(Tile::Impassable), 1);
        assert_eq!(palette.tile(9), None);
    }

    #[test]
    fn duplicate_symbols_are_rejected() {
        let err = Palette::new('E', 'X', ' ', '#', '.', '#').unwrap_err();
        assert!(matches!(err, MazeError::Configuration { .. }));
    }

    #[test]
    fn ascii_palette_matches_glyphs() {
        let palette = Palette::ascii();
        for tile in Tile::ALL {
            assert_eq!(Tile::from_glyph(palette.symbol(tile)), Some(tile));
        }
    }
}
