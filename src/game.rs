//! World assembly and the two ways of driving it.
//!
//! [`build_world`] inserts every resource the walker systems need, registers
//! the observers and queues the level for spawning. The host then runs:
//! - [`physics_schedule`] once per fixed tick (at `tick_rate`)
//! - [`frame_schedule`] / [`present_schedule`] once per rendered frame
//!   (windowed only)
//!
//! [`run_headless`] drives the same physics without a window or audio
//! device, pressing one scripted direction per grid step.

use bevy_ecs::observer::Observer;
use bevy_ecs::prelude::*;
use log::{debug, info, warn};
use raylib::prelude::Vector3;

use crate::components::gridwalker::GridWalker;
use crate::components::levellayout::LevelLayout;
use crate::components::worldposition::WorldPosition;
use crate::events::collision::observe_controller_collider_hit;
use crate::events::switchdebug::switch_debug_observer;
use crate::resources::footsteprng::FootstepRng;
use crate::resources::gameconfig::GameConfig;
use crate::resources::input::InputState;
use crate::resources::levelsolids::LevelSolids;
use crate::resources::worldtime::{FixedTimestep, WorldTime};
use crate::systems::audio::{
    forward_audio_cmds, log_audio_messages, poll_audio_messages, update_bevy_audio_cmds,
    update_bevy_audio_messages,
};
use crate::systems::gridwalk::{gridwalk_physics_system, mouse_look_system};
use crate::systems::input::{apply_cursor_lock, update_input_state};
use crate::systems::levellayout::levellayout_spawn_system;
use crate::systems::render::render_system;

/// Create the world with every resource except the Raylib handles and the
/// audio bridge, which only the windowed host provides.
pub fn build_world(config: GameConfig, level_path: &str, seed: Option<u64>) -> World {
    let mut world = World::new();
    world.insert_resource(WorldTime::default());
    world.insert_resource(FixedTimestep::from_rate(config.tick_rate));
    world.insert_resource(InputState::default());
    world.insert_resource(LevelSolids::default());
    world.insert_resource(FootstepRng::new(seed));
    world.insert_resource(config);
    crate::resources::audio::init_audio_messages(&mut world);

    world.spawn(Observer::new(observe_controller_collider_hit));
    world.spawn(Observer::new(switch_debug_observer));
    // Ensure the observers are registered before any system triggers events.
    world.flush();

    world.spawn(LevelLayout::new(level_path));
    world
}

/// Systems run on every fixed physics tick.
pub fn physics_schedule() -> Schedule {
    let mut schedule = Schedule::default();
    schedule.add_systems(gridwalk_physics_system);
    schedule
}

/// Systems run at the start of every rendered frame, before physics.
pub fn frame_schedule() -> Schedule {
    let mut schedule = Schedule::default();
    schedule.add_systems(levellayout_spawn_system);
    schedule.add_systems((update_input_state, apply_cursor_lock, mouse_look_system).chain());
    schedule
}

/// Systems run at the end of every rendered frame, after physics.
pub fn present_schedule() -> Schedule {
    let mut schedule = Schedule::default();
    schedule.add_systems(
        // audio systems must be together
        (
            update_bevy_audio_cmds,
            forward_audio_cmds,
            poll_audio_messages,
            update_bevy_audio_messages,
            log_audio_messages,
        )
            .chain(),
    );
    schedule.add_systems(render_system.after(log_audio_messages));
    schedule
}

/// Spawn whatever level the world has queued.
pub fn spawn_pending_level(world: &mut World) {
    let mut schedule = Schedule::default();
    schedule.add_systems(levellayout_spawn_system);
    schedule.run(world);
}

/// One direction held for one grid step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScriptedMove {
    pub horizontal: f32,
    pub vertical: f32,
}

/// Parse `R,U,L,D` style move lists (case-insensitive, `F`/`B` accepted for
/// forward/back).
pub fn parse_moves(text: &str) -> Result<Vec<ScriptedMove>, String> {
    text.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|token| {
            let (horizontal, vertical) = match token.to_ascii_uppercase().as_str() {
                "R" | "RIGHT" => (1.0, 0.0),
                "L" | "LEFT" => (-1.0, 0.0),
                "U" | "UP" | "F" | "FORWARD" => (0.0, 1.0),
                "D" | "DOWN" | "B" | "BACK" => (0.0, -1.0),
                other => return Err(format!("unknown move '{}'", other)),
            };
            Ok(ScriptedMove {
                horizontal,
                vertical,
            })
        })
        .collect()
}

/// Outcome of a headless run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeadlessReport {
    pub position: Vector3,
    pub ticks: u64,
    pub steps_completed: u32,
    pub footsteps: u32,
}

fn walker_snapshot(world: &mut World) -> Option<(bool, Vector3, u32, u32)> {
    let mut q = world.query::<(&GridWalker, &WorldPosition)>();
    q.iter(world).next().map(|(walker, position)| {
        (
            walker.is_walking(),
            position.pos,
            walker.sessions_completed(),
            walker.footsteps_played(),
        )
    })
}

fn headless_tick(world: &mut World, physics: &mut Schedule) {
    physics.run(world);
    world.resource_mut::<FixedTimestep>().ticks += 1;
    // Nobody forwards audio in headless mode; let the commands expire.
    world
        .resource_mut::<Messages<crate::events::audio::AudioCmd>>()
        .update();
    world.clear_trackers();
}

/// Run scripted moves for at most `max_ticks` physics ticks. Each move is
/// held until a walk session starts and then released until it finishes.
pub fn run_headless(world: &mut World, moves: &[ScriptedMove], max_ticks: u64) -> Option<HeadlessReport> {
    spawn_pending_level(world);
    let mut physics = physics_schedule();
    let mut ticks = 0u64;

    'moves: for (i, mv) in moves.iter().enumerate() {
        world
            .resource_mut::<InputState>()
            .set_direction(mv.horizontal, mv.vertical);
        loop {
            if ticks >= max_ticks {
                warn!("tick budget exhausted during move {}", i + 1);
                break 'moves;
            }
            headless_tick(world, &mut physics);
            ticks += 1;
            let (walking, ..) = walker_snapshot(world)?;
            if walking {
                break;
            }
        }
        world.resource_mut::<InputState>().set_direction(0.0, 0.0);
        loop {
            let (walking, position, ..) = walker_snapshot(world)?;
            if !walking {
                debug!(
                    "move {} done at ({:.2}, {:.2}, {:.2})",
                    i + 1,
                    position.x,
                    position.y,
                    position.z
                );
                break;
            }
            if ticks >= max_ticks {
                warn!("tick budget exhausted during move {}", i + 1);
                break 'moves;
            }
            headless_tick(world, &mut physics);
            ticks += 1;
        }
    }

    let (_, position, steps_completed, footsteps) = walker_snapshot(world)?;
    let report = HeadlessReport {
        position,
        ticks,
        steps_completed,
        footsteps,
    };
    info!(
        "headless run finished after {} ticks: position ({:.2}, {:.2}, {:.2}), {} step(s), {} footstep(s)",
        report.ticks,
        position.x,
        position.y,
        position.z,
        report.steps_completed,
        report.footsteps
    );
    Some(report)
}
