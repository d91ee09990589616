use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use common::config::MazeConfig;

// ============================================================================
// Runner Configuration
// ============================================================================

#[derive(Debug, Clone, Copy)]
pub struct RunnerConfig {
    pub maze: MazeConfig,
    // Fixed seed for reproducible runs, OS entropy otherwise
    pub seed: Option<u64>,
    // Stop after this many regenerations
    pub max_levels: u32,
    pub walk_speed: f32,
}

impl RunnerConfig {
    pub fn validate(&self) -> Result<()> {
        self.maze.validate().context("Invalid maze configuration")?;
        if !self.walk_speed.is_finite() || self.walk_speed <= 0.0 {
            anyhow::bail!("Walk speed must be positive, got {}", self.walk_speed);
        }
        Ok(())
    }
}

// ============================================================================
// Logging
// ============================================================================

// RUST_LOG wins over the built-in filter
pub fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();
}
