use bevy_ecs::prelude::*;

// Index of the next guide path point the player walks towards
#[derive(Component, Debug, Default, Clone, Copy)]
pub struct PathFollower {
    pub next: usize,
}
