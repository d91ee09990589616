// ============================================================================
// Runner Constants
// ============================================================================

pub const LOOP_FREQUENCY: u64 = 30; // ticks per second
pub const DEFAULT_LEVELS: u32 = 3;
pub const LOG_FILTER: &str = "info";

// Fraction of a cell around the exit center that counts as inside the exit zone
pub const EXIT_ZONE_RATIO: f32 = 0.5;
