//! Grid walker systems.
//!
//! - [`gridwalk_physics_system`] runs once per fixed physics tick: it wraps
//!   each walker's body in a [`BodyMover`], advances the walker, and triggers
//!   a [`ControllerColliderHit`] for every contact the move produced.
//! - [`mouse_look_system`] runs once per rendered frame and applies
//!   [`MouseLook`] to the character yaw and camera pitch.
//!
//! Both systems go through the walker's capability traits, so they only glue
//! ECS data to the controller.
use bevy_ecs::prelude::*;

use crate::components::gridwalker::GridWalker;
use crate::components::kinematicbody::{BodyMover, KinematicBody};
use crate::components::mouselook::MouseLook;
use crate::components::rotation::Rotation;
use crate::components::worldposition::WorldPosition;
use crate::events::audio::AudioCmd;
use crate::events::collision::ControllerColliderHit;
use crate::resources::footsteprng::FootstepRng;
use crate::resources::input::InputState;
use crate::resources::levelsolids::LevelSolids;
use crate::resources::worldtime::{FixedTimestep, WorldTime};

/// Advance every walker by one physics tick.
pub fn gridwalk_physics_system(
    mut commands: Commands,
    timestep: Res<FixedTimestep>,
    input: Res<InputState>,
    solids: Res<LevelSolids>,
    mut rng: ResMut<FootstepRng>,
    mut audio: MessageWriter<AudioCmd>,
    mut walkers: Query<(
        Entity,
        &mut GridWalker,
        &mut KinematicBody,
        &mut WorldPosition,
        &mut Rotation,
    )>,
) {
    let dt = timestep.step;
    for (entity, mut walker, mut body, mut position, mut rotation) in walkers.iter_mut() {
        let mut mover = BodyMover {
            body: &mut *body,
            position: &mut *position,
            rotation: &mut *rotation,
            solids: solids.as_slice(),
        };
        walker.on_physics_tick(dt, &mut mover, &*input, &mut audio, &mut *rng);

        for hit in body.drain_hits() {
            commands.trigger(ControllerColliderHit {
                walker: entity,
                hit,
            });
        }
    }
}

/// Per-frame mouse look.
pub fn mouse_look_system(
    time: Res<WorldTime>,
    solids: Res<LevelSolids>,
    mut walkers: Query<(
        &mut GridWalker,
        &mut MouseLook,
        &mut KinematicBody,
        &mut WorldPosition,
        &mut Rotation,
    )>,
) {
    for (mut walker, mut look, mut body, mut position, mut rotation) in walkers.iter_mut() {
        let mut mover = BodyMover {
            body: &mut *body,
            position: &mut *position,
            rotation: &mut *rotation,
            solids: solids.as_slice(),
        };
        walker.on_render_tick(&mut *look, &mut mover, time.delta);
    }
}
