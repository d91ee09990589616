pub mod components;
pub mod config;
pub mod constants;
pub mod messages;
pub mod resources;
pub mod systems;

use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use bevy_ecs::{
    message::Messages,
    prelude::*,
    schedule::{ExecutorKind, Schedule},
    system::RunSystemOnce,
};
use bevy_math::Vec3;
use bevy_time::Time;
use rand::{SeedableRng, rngs::StdRng};
use tracing::info;

use common::{
    components::{Facing, Position},
    markers::PlayerMarker,
    maze::MazeBuilder,
    path::PathSolver,
    protocol::LevelSnapshot,
    spawning::{PLAYER_SPAWN_FACING, player_spawn_position},
};
use components::PathFollower;
use config::RunnerConfig;
use messages::{LevelExitReached, MazeRebuilt};
use resources::{ExitTrigger, GameSession, LevelLog, SpawnRng, WalkSettings};
use systems::{
    level::{exit_trigger_system, level_advance_system},
    player::player_walk_system,
    spawning::level_spawn_system,
};

// ============================================================================
// World Setup
// ============================================================================

// Builds the world for level 0: maze, solved path, player at the entrance,
// enemies and exit marker already placed.
pub fn build_world(config: &RunnerConfig) -> Result<World> {
    config.validate()?;

    let builder = match config.seed {
        Some(seed) => MazeBuilder::with_seed(config.maze, seed),
        None => MazeBuilder::new(config.maze),
    }
    .context("Failed to build the first maze")?;

    let mut solver = PathSolver::new(builder.cell_size());
    solver
        .solve(builder.grid())
        .context("First maze has no path to its exit")?;

    let spawn_rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(1)),
        None => StdRng::from_os_rng(),
    };

    info!(
        "built {}x{} maze, path {} cells",
        builder.width(),
        builder.height(),
        solver.len()
    );

    let mut world = World::new();
    world.insert_resource(Time::<()>::default());
    world.insert_resource(builder);
    world.insert_resource(solver);
    world.insert_resource(GameSession::new(config.max_levels));
    world.insert_resource(ExitTrigger::default());
    world.insert_resource(WalkSettings {
        speed: config.walk_speed,
    });
    world.insert_resource(SpawnRng(spawn_rng));
    world.insert_resource(LevelLog::default());
    world.init_resource::<Messages<LevelExitReached>>();
    world.init_resource::<Messages<MazeRebuilt>>();

    world.spawn((
        PlayerMarker,
        Position(player_spawn_position(Vec3::ZERO)),
        Facing(PLAYER_SPAWN_FACING),
        PathFollower::default(),
    ));

    world.write_message(MazeRebuilt {
        level: 0,
        origin: Vec3::ZERO,
    });
    world
        .run_system_once(level_spawn_system)
        .map_err(|err| anyhow!("Failed to populate level 0: {err}"))?;
    // The schedule's own reader must not see level 0 again
    world.resource_mut::<Messages<MazeRebuilt>>().clear();

    Ok(world)
}

// Systems run strictly in order on one thread: walk, trigger, rebuild, populate
#[must_use]
pub fn build_schedule() -> Schedule {
    let mut schedule = Schedule::default();
    schedule.set_executor_kind(ExecutorKind::SingleThreaded);
    schedule.add_systems(
        (
            player_walk_system,
            exit_trigger_system,
            level_advance_system,
            level_spawn_system,
        )
            .chain(),
    );
    schedule
}

// ============================================================================
// Level Runner
// ============================================================================

pub struct LevelRunner {
    world: World,
    schedule: Schedule,
}

impl LevelRunner {
    pub fn new(config: &RunnerConfig) -> Result<Self> {
        Ok(Self {
            world: build_world(config)?,
            schedule: build_schedule(),
        })
    }

    // Advance the clock by `delta` and run one pass of the schedule
    pub fn tick(&mut self, delta: Duration) -> Result<()> {
        self.world.resource_mut::<Time>().advance_by(delta);
        self.schedule.run(&mut self.world);
        self.world.resource_mut::<Messages<LevelExitReached>>().update();
        self.world.resource_mut::<Messages<MazeRebuilt>>().update();

        let session = self.session();
        if let Some(err) = session.fault.clone() {
            let level = session.level;
            return Err(err).with_context(|| format!("Maze rebuild failed at level {level}"));
        }
        Ok(())
    }

    // Queue an exit trigger as if the player had walked into the exit zone
    pub fn trigger_exit(&mut self, level: u32) {
        self.world.write_message(LevelExitReached { level });
    }

    #[must_use]
    pub fn finished(&self) -> bool {
        self.session().finished()
    }

    #[must_use]
    pub fn session(&self) -> &GameSession {
        self.world.resource::<GameSession>()
    }

    #[must_use]
    pub fn builder(&self) -> &MazeBuilder {
        self.world.resource::<MazeBuilder>()
    }

    #[must_use]
    pub fn solver(&self) -> &PathSolver {
        self.world.resource::<PathSolver>()
    }

    #[must_use]
    pub fn snapshots(&self) -> &[LevelSnapshot] {
        &self.world.resource::<LevelLog>().0
    }

    pub const fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }
}
