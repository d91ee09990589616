use bevy_ecs::prelude::*;
use bevy_math::Vec3;
use bevy_time::Time;

use crate::{components::PathFollower, resources::WalkSettings};
use common::{
    components::{Facing, Position},
    markers::PlayerMarker,
    path::PathSolver,
};

// ============================================================================
// Helper Functions
// ============================================================================

// Move `pos` along `path` from point `next` on, spending at most `budget` metres.
// Height is left alone, the path only steers on the ground plane.
fn walk_along(path: &[Vec3], pos: &mut Vec3, facing: &mut Vec3, next: &mut usize, mut budget: f32) {
    while budget > 0.0 {
        let Some(point) = path.get(*next) else {
            return;
        };

        let target = Vec3::new(point.x, pos.y, point.z);
        let to_target = target - *pos;
        let distance = to_target.length();

        if distance > f32::EPSILON {
            *facing = to_target / distance;
        }

        if distance <= budget {
            *pos = target;
            *next += 1;
            budget -= distance;
        } else {
            *pos += *facing * budget;
            budget = 0.0;
        }
    }
}

// ============================================================================
// Player Walk System
// ============================================================================

// Walks the player along the guide path towards the exit
pub fn player_walk_system(
    time: Res<Time>,
    settings: Res<WalkSettings>,
    solver: Res<PathSolver>,
    mut players: Query<(&mut Position, &mut Facing, &mut PathFollower), With<PlayerMarker>>,
) {
    let budget = settings.speed * time.delta_secs();
    if budget <= 0.0 {
        return;
    }

    for (mut pos, mut facing, mut follower) in &mut players {
        walk_along(solver.current_path(), &mut pos.0, &mut facing.0, &mut follower.next, budget);
    }
}
