#![warn(clippy::all, clippy::pedantic)]

// Playfield dimensions. The width never changes; the height is only a
// starting value, since single-row clears shrink the field and super-combos
// grow it back.
pub const GRID_WIDTH: usize = 10;
pub const START_HEIGHT: usize = 20;

// Gravity ticks per second (default; overridable through the config file)
pub const TICKS_PER_SEC: u32 = 2;

// Scoring table
pub const POINTS_DROP_STEP: f64 = 4.0; // Each row the active shape falls
pub const POINTS_LANDED: f64 = 44.0; // Shape stamped into the field
pub const POINTS_SINGLE_ROW: f64 = 888.0; // One complete row (row removed)
pub const POINTS_COMBO: f64 = 2222.0; // Exactly two complete rows
pub const POINTS_SUPER_COMBO: f64 = 4444.0; // Per row at three or more

// Every score award also adds this multiple of the current field height, so
// points are worth slightly more while the field is tall.
pub const HEIGHT_BONUS_FACTOR: f64 = 0.04;

// The weighted random draw rolls an index in 0..=RANDOM_INDEX_MAX; see
// ShapeType::from_index for the slot table.
pub const RANDOM_INDEX_MAX: usize = 12;
