//! Controller contact events and the observer that feeds them to the walker.
//!
//! The physics system drains the contacts recorded by each
//! [`KinematicBody`](crate::components::kinematicbody::KinematicBody) move and
//! triggers one [`ControllerColliderHit`] per contact. The
//! [`observe_controller_collider_hit`] observer routes it to the owning
//! [`GridWalker`], which decides whether the contact blocks the current step.
use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::trace;

use crate::capabilities::ControllerHit;
use crate::components::gridwalker::GridWalker;

/// Event fired for every contact the walker's body reports during a move.
#[derive(Event, Debug, Clone, Copy)]
pub struct ControllerColliderHit {
    pub walker: Entity,
    pub hit: ControllerHit,
}

/// Global observer forwarding contacts to the walker's collision callback.
pub fn observe_controller_collider_hit(
    trigger: On<ControllerColliderHit>,
    mut walkers: Query<&mut GridWalker>,
) {
    let event = trigger.event();
    let Ok(mut walker) = walkers.get_mut(event.walker) else {
        return;
    };
    trace!(
        "controller hit on {:?}: flags={:#05b} normal=({:.2}, {:.2}, {:.2})",
        event.walker,
        event.hit.flags.bits(),
        event.hit.normal.x,
        event.hit.normal.y,
        event.hit.normal.z
    );
    walker.on_controller_collider_hit(&event.hit);
}
