//! Time update system.
//!
//! Updates the shared [`WorldTime`](crate::resources::worldtime::WorldTime)
//! resource once per frame and reports how many fixed physics ticks the frame
//! owes.
use bevy_ecs::prelude::*;

use crate::resources::worldtime::{FixedTimestep, WorldTime};

/// Update elapsed and delta seconds on the `WorldTime` resource.
///
/// `dt` is expected to be the frame delta in seconds. Returns the
/// number of physics ticks due this frame (0 when no [`FixedTimestep`] is
/// present).
pub fn update_world_time(world: &mut World, dt: f32) -> u32 {
    {
        let mut wt = world.resource_mut::<WorldTime>();
        wt.elapsed += dt;
        wt.delta = dt;
    }
    world
        .get_resource_mut::<FixedTimestep>()
        .map(|mut ts| ts.accumulate(dt))
        .unwrap_or(0)
}
