use bevy_ecs::prelude::*;
use tracing::debug;

use crate::{
    components::PathFollower,
    messages::MazeRebuilt,
    resources::{LevelLog, SpawnRng},
};
use common::{
    components::{Facing, OnCell, Position},
    markers::{EnemyMarker, ExitMarker, LevelEntity, PlayerMarker},
    maze::MazeBuilder,
    path::PathSolver,
    protocol::LevelSnapshot,
    spawning::{PLAYER_SPAWN_FACING, enemy_spawn_cells, enemy_spawn_position, exit_marker_position, player_spawn_position},
};

// ============================================================================
// Level Spawn System
// ============================================================================

// Populates a freshly built maze: exit marker, enemies, and the player back at the entrance
pub fn level_spawn_system(
    mut commands: Commands,
    mut rebuilt: MessageReader<MazeRebuilt>,
    builder: Res<MazeBuilder>,
    solver: Res<PathSolver>,
    mut rng: ResMut<SpawnRng>,
    mut log: ResMut<LevelLog>,
    mut players: Query<(&mut Position, &mut Facing, &mut PathFollower), With<PlayerMarker>>,
) {
    // At most one rebuild per tick, but only the latest instance is live anyway
    let Some(MazeRebuilt { level, origin }) = rebuilt.read().last().copied() else {
        return;
    };

    let cell_size = builder.cell_size();

    commands.spawn((
        ExitMarker,
        LevelEntity(level),
        Position(exit_marker_position(origin, builder.grid(), cell_size)),
    ));

    let cells = enemy_spawn_cells(builder.grid(), builder.config().enemy_count, &mut rng.0);
    for cell in &cells {
        commands.spawn((
            EnemyMarker,
            LevelEntity(level),
            OnCell(*cell),
            Position(enemy_spawn_position(origin, *cell, cell_size)),
        ));
    }

    for (mut pos, mut facing, mut follower) in &mut players {
        pos.0 = player_spawn_position(origin);
        facing.0 = PLAYER_SPAWN_FACING;
        follower.next = 0;
    }

    debug!("spawned {} enemies for level {level}", cells.len());
    log.0.push(LevelSnapshot::capture(level, &builder, &solver));
}
