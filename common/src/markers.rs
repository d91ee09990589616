use bevy_ecs::prelude::*;

// Marker components to disambiguate entity archetypes in the level world.
#[derive(Component, Debug, Default)]
pub struct PlayerMarker;

#[derive(Component, Debug, Default)]
pub struct EnemyMarker;

#[derive(Component, Debug, Default)]
pub struct ExitMarker;

// Tags every entity owned by one maze instance so it can be despawned when the maze moves on
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelEntity(pub u32);
