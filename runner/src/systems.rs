pub mod level;
pub mod player;
pub mod spawning;
