// ============================================================================
// Maze Dimensions
// ============================================================================

pub const MAZE_WIDTH: i32 = 10; // Number of cells along X
pub const MAZE_HEIGHT: i32 = 10; // Number of cells along Z (grid y)
pub const CELL_SIZE: f32 = 4.0; // Each cell size in meters
pub const WALL_HEIGHT: f32 = 4.0; // meters

// ============================================================================
// Spawning
// ============================================================================

pub const ENEMY_COUNT: usize = 5;
pub const PLAYER_SPAWN_HEIGHT: f32 = 2.0; // meters above the floor
pub const ENEMY_SPAWN_HEIGHT: f32 = 1.0; // meters above the floor
pub const EXIT_MARKER_HEIGHT: f32 = 0.0;

// Cells within this Chebyshev distance of the entrance or exit stay free of enemies
pub const FORBIDDEN_ZONE_RADIUS: i32 = 1;

// ============================================================================
// Path Overlay
// ============================================================================

pub const PATH_LINE_Y_OFFSET: f32 = 0.1; // Guide line height above the floor

// ============================================================================
// Player
// ============================================================================

pub const SPEED_WALK: f32 = 9.0; // meters per second
