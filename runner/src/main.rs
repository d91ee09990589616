use anyhow::Result;
use clap::Parser;
use tokio::time::{self, Duration, Instant, MissedTickBehavior};
use tracing::{info, warn};

use common::{config::MazeConfig, constants::*};
use runner::{
    LevelRunner,
    config::{RunnerConfig, init_tracing},
    constants::{DEFAULT_LEVELS, LOG_FILTER, LOOP_FREQUENCY},
};

// ============================================================================
// CLI Argument Parsing
// ============================================================================

#[derive(Parser)]
#[command(author, version, about = "Endless maze runner", long_about = None)]
struct Args {
    /// Maze width in cells
    #[arg(long, default_value_t = MAZE_WIDTH)]
    width: i32,

    /// Maze height in cells
    #[arg(long, default_value_t = MAZE_HEIGHT)]
    height: i32,

    /// Cell edge length in metres
    #[arg(long, default_value_t = CELL_SIZE)]
    cell_size: f32,

    /// Enemies spawned per level
    #[arg(long, default_value_t = ENEMY_COUNT)]
    enemies: usize,

    /// Number of level changes before exiting
    #[arg(long, default_value_t = DEFAULT_LEVELS)]
    levels: u32,

    /// Seed for reproducible mazes
    #[arg(long)]
    seed: Option<u64>,

    /// Simulation ticks per second
    #[arg(long, default_value_t = LOOP_FREQUENCY)]
    tick_hz: u64,

    /// Player walking speed in metres per second
    #[arg(long, default_value_t = SPEED_WALK)]
    walk_speed: f32,

    /// Run ticks back to back instead of in real time
    #[arg(long, default_value_t = false)]
    turbo: bool,

    /// Print every level snapshot as JSON on stdout
    #[cfg(feature = "json")]
    #[arg(long, default_value_t = false)]
    json: bool,
}

// ============================================================================
// Main
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing(LOG_FILTER);
    let args = Args::parse();

    if args.tick_hz == 0 {
        anyhow::bail!("Tick rate must be at least 1 Hz");
    }

    let config = RunnerConfig {
        maze: MazeConfig {
            width: args.width,
            height: args.height,
            cell_size: args.cell_size,
            enemy_count: args.enemies,
            ..MazeConfig::default()
        },
        seed: args.seed,
        max_levels: args.levels,
        walk_speed: args.walk_speed,
    };

    let mut runner = LevelRunner::new(&config)?;

    info!("starting level loop...");

    // Run the world in a loop manually at tick_hz
    let tick_duration = Duration::from_nanos(1_000_000_000 / args.tick_hz);
    let mut interval = time::interval(tick_duration);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let mut frame: u64 = 0;
    loop {
        if !args.turbo {
            interval.tick().await;
        }

        let update_start = Instant::now();
        runner.tick(tick_duration)?;
        let update_elapsed = update_start.elapsed();

        if update_elapsed > tick_duration {
            warn!(
                "tick {} took {:.2}ms (exceeded {:.2}ms budget)",
                frame,
                update_elapsed.as_secs_f64() * 1000.0,
                tick_duration.as_secs_f64() * 1000.0
            );
        }

        frame += 1;
        if runner.finished() {
            break;
        }
    }

    info!(
        "finished {} levels in {} ticks, origin now {:?}",
        runner.session().level,
        frame,
        runner.builder().origin()
    );

    #[cfg(feature = "json")]
    if args.json {
        for snapshot in runner.snapshots() {
            println!("{}", snapshot.to_json()?);
        }
    }

    Ok(())
}
