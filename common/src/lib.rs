pub mod components;
pub mod config;
pub mod constants;
pub mod error;
pub mod grid;
pub mod markers;
pub mod maze;
pub mod path;
pub mod protocol;
pub mod spawning;

pub use error::{MazeError, Result};
