use bevy_ecs::prelude::*;
use bevy_math::Vec3;

// ============================================================================
// Bevy Messages
// ============================================================================

/// Fired once when the player enters the exit zone of `level`
#[derive(Message, Debug, Clone, Copy)]
pub struct LevelExitReached {
    pub level: u32,
}

/// Fired after the maze and path were rebuilt for `level`
#[derive(Message, Debug, Clone, Copy)]
pub struct MazeRebuilt {
    pub level: u32,
    pub origin: Vec3,
}
