//! World-space position component.
//!
//! For the player this is the center of the character body; for static
//! geometry it is the center of the collider box.

use bevy_ecs::prelude::Component;
use raylib::prelude::Vector3;

#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct WorldPosition {
    pub pos: Vector3,
}

impl WorldPosition {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self {
            pos: Vector3::new(x, y, z),
        }
    }
}

impl From<Vector3> for WorldPosition {
    fn from(pos: Vector3) -> Self {
        Self { pos }
    }
}
