#[cfg(feature = "json")]
use serde::{Deserialize, Serialize};

use crate::divider::{Divider, ImperfectDivider, PerfectDivider};
use crate::filler::{Comb, Filler};

// ============================================================================
// Build Configuration
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
pub enum DividerKind {
    #[default]
    Perfect,
    Imperfect,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
pub enum FillerKind {
    Empty,
    Path,
    Spiral,
    CastellationW,
    CastellationH,
    #[default]
    Snake,
}

impl FillerKind {
    pub const ALL: [Self; 6] = [
        Self::Empty,
        Self::Path,
        Self::Spiral,
        Self::CastellationW,
        Self::CastellationH,
        Self::Snake,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
pub struct BuildConfig {
    pub divider: DividerKind,
    /// Terminal filler for the imperfect divider; the perfect divider ignores it
    pub filler: FillerKind,
    /// Turn join markers into plain passable cells after building
    pub strip_doors: bool,
    /// Run the pattern engine over the finished grid
    pub snake: bool,
    /// Spiral filler opens a block around its target
    pub goal: bool,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            divider: DividerKind::Perfect,
            filler: FillerKind::Snake,
            strip_doors: true,
            snake: true,
            goal: false,
        }
    }
}

impl BuildConfig {
    #[must_use]
    pub const fn filler(&self) -> Filler {
        match self.filler {
            FillerKind::Empty => Filler::Empty,
            FillerKind::Path => Filler::Path,
            FillerKind::Spiral => Filler::Spiral { goal: self.goal },
            FillerKind::CastellationW => Filler::Castellation(Comb::Columns),
            FillerKind::CastellationH => Filler::Castellation(Comb::Rows),
            FillerKind::Snake => Filler::Snake,
        }
    }

    #[must_use]
    pub const fn divider(&self) -> Divider {
        match self.divider {
            DividerKind::Perfect => Divider::Perfect(PerfectDivider),
            DividerKind::Imperfect => Divider::Imperfect(ImperfectDivider::new(self.filler())),
        }
    }
}
