use bevy_ecs::prelude::*;
use rand::rngs::StdRng;

use common::{MazeError, protocol::LevelSnapshot};

// ============================================================================
// Bevy Resources
// ============================================================================

// Level counter for the whole run. Owned by the world, never a global.
#[derive(Resource, Debug, Default)]
pub struct GameSession {
    pub level: u32,
    pub max_levels: u32,
    // First fatal maze error; the loop aborts once this is set
    pub fault: Option<MazeError>,
}

impl GameSession {
    #[must_use]
    pub const fn new(max_levels: u32) -> Self {
        Self {
            level: 0,
            max_levels,
            fault: None,
        }
    }

    #[must_use]
    pub const fn finished(&self) -> bool {
        self.level >= self.max_levels
    }
}

// One-shot guard so a player standing in the exit zone triggers a single level change
#[derive(Resource, Debug)]
pub struct ExitTrigger {
    pub armed: bool,
}

impl Default for ExitTrigger {
    fn default() -> Self {
        Self { armed: true }
    }
}

#[derive(Resource, Debug, Clone, Copy)]
pub struct WalkSettings {
    pub speed: f32,
}

// Random source for entity placement, separate from the maze builder's
#[derive(Resource)]
pub struct SpawnRng(pub StdRng);

// Snapshot of every level built during the run, in order
#[derive(Resource, Debug, Default)]
pub struct LevelLog(pub Vec<LevelSnapshot>);
