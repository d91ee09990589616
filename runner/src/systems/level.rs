use bevy_ecs::prelude::*;
use bevy_math::Vec2;
use tracing::{debug, error, info};

use crate::{
    constants::EXIT_ZONE_RATIO,
    messages::{LevelExitReached, MazeRebuilt},
    resources::{ExitTrigger, GameSession},
};
use common::{
    components::Position,
    markers::{LevelEntity, PlayerMarker},
    maze::MazeBuilder,
    path::PathSolver,
};

// ============================================================================
// Exit Trigger System
// ============================================================================

// Fires LevelExitReached once when a player enters the exit zone
pub fn exit_trigger_system(
    builder: Res<MazeBuilder>,
    session: Res<GameSession>,
    mut trigger: ResMut<ExitTrigger>,
    players: Query<&Position, With<PlayerMarker>>,
    mut exits: MessageWriter<LevelExitReached>,
) {
    if !trigger.armed || session.finished() {
        return;
    }

    let exit = builder.exit_world_position();
    let radius = builder.cell_size() * EXIT_ZONE_RATIO;

    let reached = players
        .iter()
        .any(|pos| Vec2::new(pos.0.x - exit.x, pos.0.z - exit.z).length() <= radius);

    if reached {
        trigger.armed = false;
        info!("player reached the exit of level {}", session.level);
        exits.write(LevelExitReached { level: session.level });
    }
}

// ============================================================================
// Level Advance System
// ============================================================================

// Rebuilds the maze one step further along when the exit is reached.
// Only the first trigger of a tick counts; duplicates and stale levels are dropped.
pub fn level_advance_system(
    mut commands: Commands,
    mut exits: MessageReader<LevelExitReached>,
    mut builder: ResMut<MazeBuilder>,
    mut solver: ResMut<PathSolver>,
    mut session: ResMut<GameSession>,
    mut trigger: ResMut<ExitTrigger>,
    level_entities: Query<Entity, With<LevelEntity>>,
    mut rebuilt: MessageWriter<MazeRebuilt>,
) {
    let mut reached = exits.read();
    let Some(first) = reached.next().copied() else {
        return;
    };

    let duplicates = reached.count();
    if duplicates > 0 {
        debug!("ignoring {duplicates} duplicate exit triggers");
    }

    if session.fault.is_some() || session.finished() {
        return;
    }
    if first.level != session.level {
        debug!("ignoring stale exit trigger for level {} (current {})", first.level, session.level);
        return;
    }

    let rebuild = match builder.regenerate(solver.as_mut()) {
        Ok(rebuild) => rebuild,
        Err(err) => {
            error!("failed to rebuild maze after level {}: {err}", session.level);
            session.fault = Some(err);
            return;
        }
    };

    for entity in &level_entities {
        commands.entity(entity).despawn();
    }

    session.level += 1;
    trigger.armed = true;

    info!(
        "level {} built at {:?} ({} walls removed, path {} cells)",
        session.level,
        rebuild.origin,
        rebuild.removed_walls,
        solver.len()
    );

    rebuilt.write(MazeRebuilt {
        level: session.level,
        origin: rebuild.origin,
    });
}
