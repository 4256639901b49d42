//! Debug toggle resource.
//!
//! The mere presence of this resource enables the walker HUD (state, target,
//! stride, contact flags). Remove it to hide the overlay.

use bevy_ecs::prelude::Resource;

/// Marker resource: when present, the render system draws the debug overlay.
#[derive(Resource, Clone, Copy)]
pub struct DebugMode {}
