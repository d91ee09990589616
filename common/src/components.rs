#[allow(clippy::wildcard_imports)]
use bevy_ecs::prelude::*;
use bevy_math::Vec3;

use crate::grid::CellPos;

// ============================================================================
// Shared Components
// ============================================================================

// World-space position in meters
#[derive(Component, Debug, Clone, Copy, PartialEq, Default)]
pub struct Position(pub Vec3);

// Unit vector the entity is looking along
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Facing(pub Vec3);

// Maze cell an entity was placed on
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct OnCell(pub CellPos);
