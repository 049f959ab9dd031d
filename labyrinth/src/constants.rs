// ============================================================================
// Perfect Layout
// ============================================================================

// Widths of the form 4k + 2 leave the exit column 2k an even step from both side walls
pub const PERFECT_WIDTH_MODULUS: i32 = 4;
pub const PERFECT_WIDTH_REMAINDER: i32 = 2;
pub const MIN_PERFECT_WIDTH: i32 = 18;
pub const MIN_PERFECT_HEIGHT: i32 = 11;

// Exit rows keep at least this many rows above and below them
pub const EXIT_TOP_CLEARANCE: i32 = 4;
pub const EXIT_BOTTOM_CLEARANCE: i32 = 5;

/// Inclusive extent of the square hub that holds the exit
pub const HUB_EXTENT: i32 = 6;

// ============================================================================
// Imperfect Division
// ============================================================================

/// Minimum distance (cells) between a split line and either edge of its region
pub const MIN_SPLIT_CLEARANCE: i32 = 3;

// ============================================================================
// Fillers
// ============================================================================

/// Spiral target must lie within this many cells of the region centre on both axes
pub const NEAR_CENTER_RADIUS: i32 = 2;

/// Half-size of the open block stamped around a spiral goal
pub const GOAL_RADIUS: i32 = 1;

// ============================================================================
// Pattern Engine
// ============================================================================

/// Patterns may hang this many cells over the buffer edge; overhang reads as wall
pub const PATTERN_OVERHANG: i32 = 1;
