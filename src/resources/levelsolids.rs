//! Static colliders of the loaded level.
//!
//! Wall colliders never move, so they are collected once when the level is
//! spawned and handed to every kinematic move as a plain slice.

use bevy_ecs::prelude::Resource;
use raylib::prelude::Vector3;

use crate::components::boxcollider::BoxCollider;

#[derive(Resource, Debug, Clone, Default)]
pub struct LevelSolids {
    /// Collider position and shape.
    pub solids: Vec<(Vector3, BoxCollider)>,
    /// Level extent along X and Z.
    pub size: (f32, f32),
}

impl LevelSolids {
    pub fn push(&mut self, position: Vector3, collider: BoxCollider) {
        self.solids.push((position, collider));
    }

    pub fn as_slice(&self) -> &[(Vector3, BoxCollider)] {
        &self.solids
    }

    pub fn len(&self) -> usize {
        self.solids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.solids.is_empty()
    }
}
