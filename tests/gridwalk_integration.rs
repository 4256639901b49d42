//! Grid walker integration tests: level spawning, physics ticks, wall
//! bounces, observers and the headless driver.

use bevy_ecs::prelude::*;
use raylib::prelude::Vector3;

use gridwalker::capabilities::{CollisionFlags, ControllerHit};
use gridwalker::components::gridwalker::GridWalker;
use gridwalker::components::group::Group;
use gridwalker::components::kinematicbody::KinematicBody;
use gridwalker::components::worldposition::WorldPosition;
use gridwalker::events::collision::ControllerColliderHit;
use gridwalker::events::switchdebug::SwitchDebugEvent;
use gridwalker::game::{self, ScriptedMove, build_world, parse_moves, run_headless};
use gridwalker::resources::debugmode::DebugMode;
use gridwalker::resources::gameconfig::GameConfig;
use gridwalker::resources::input::InputState;
use gridwalker::resources::levelsolids::LevelSolids;
use gridwalker::resources::worldtime::{FixedTimestep, WorldTime};
use gridwalker::systems::time::update_world_time;

const EPSILON: f32 = 1e-4;

fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

// Corridor three cells long, spawn on the left end, facing -Z (the top row).
const CORRIDOR: &str = r##"{
    "cell_size": 6.0,
    "wall_height": 3.0,
    "grid": [
        "#####",
        "#S..#",
        "#####"
    ],
    "legend": { "#": "wall", "S": "spawn", ".": null }
}"##;

fn write_level(name: &str, json: &str) -> String {
    let path = std::env::temp_dir().join(format!(
        "gridwalker_{}_{}.json",
        name,
        std::process::id()
    ));
    std::fs::write(&path, json).unwrap();
    path.to_string_lossy().into_owned()
}

fn make_world(name: &str, seed: u64) -> World {
    let level = write_level(name, CORRIDOR);
    let mut world = build_world(GameConfig::new(), &level, Some(seed));
    game::spawn_pending_level(&mut world);
    let _ = std::fs::remove_file(level);
    world
}

fn player(world: &mut World) -> Entity {
    let mut q = world.query_filtered::<Entity, With<GridWalker>>();
    q.single(world).unwrap()
}

fn position(world: &mut World) -> Vector3 {
    let e = player(world);
    world.get::<WorldPosition>(e).unwrap().pos
}

fn tick(world: &mut World, physics: &mut Schedule) {
    physics.run(world);
    world.clear_trackers();
}

fn r() -> ScriptedMove {
    ScriptedMove {
        horizontal: 1.0,
        vertical: 0.0,
    }
}

fn u() -> ScriptedMove {
    ScriptedMove {
        horizontal: 0.0,
        vertical: 1.0,
    }
}

#[test]
fn level_spawns_walls_and_player_on_the_floor() {
    let mut world = make_world("spawn", 1);

    assert_eq!(world.resource::<LevelSolids>().len(), 12);
    assert_eq!(world.resource::<LevelSolids>().size, (30.0, 18.0));

    let mut groups = world.query::<&Group>();
    let walls = groups
        .iter(&world)
        .filter(|g| g.name() == "walls")
        .count();
    assert_eq!(walls, 12);

    let pos = position(&mut world);
    assert_eq!((pos.x, pos.y, pos.z), (6.0, 1.0, 6.0));
}

#[test]
fn one_right_step_lands_exactly_one_cell_over() {
    let mut world = make_world("right", 1);
    let report = run_headless(&mut world, &[r()], 1000).unwrap();

    assert_eq!(report.position, Vector3::new(12.0, 1.0, 6.0));
    assert_eq!(report.steps_completed, 1);
    // ~60 ticks at 0.2 stride each: footsteps at the start, 5.2 and 10.4.
    assert_eq!(report.footsteps, 3);
}

#[test]
fn consecutive_steps_stay_on_the_grid() {
    let mut world = make_world("two_right", 1);
    let report = run_headless(&mut world, &[r(), r()], 1000).unwrap();
    assert_eq!(report.position, Vector3::new(18.0, 1.0, 6.0));
    assert_eq!(report.steps_completed, 2);
}

#[test]
fn walking_into_a_wall_bounces_back_to_the_start_cell() {
    let mut world = make_world("wall", 1);
    let report = run_headless(&mut world, &[u()], 1000).unwrap();

    assert_eq!(report.position, Vector3::new(6.0, 1.0, 6.0));
    assert_eq!(report.steps_completed, 1);

    let e = player(&mut world);
    assert!(!world.get::<GridWalker>(e).unwrap().is_walking());
}

#[test]
fn far_wall_bounce_keeps_previous_cell() {
    let mut world = make_world("far_wall", 1);
    let moves = parse_moves("R,R,R").unwrap();
    let report = run_headless(&mut world, &moves, 2000).unwrap();
    assert_eq!(report.position, Vector3::new(18.0, 1.0, 6.0));
    assert_eq!(report.steps_completed, 3);
}

#[test]
fn session_starts_and_moves_on_the_first_tick() {
    let mut world = make_world("first_tick", 1);
    let mut physics = game::physics_schedule();

    world.resource_mut::<InputState>().set_direction(1.0, 0.0);
    tick(&mut world, &mut physics);
    world.resource_mut::<InputState>().set_direction(0.0, 0.0);

    let e = player(&mut world);
    let walker = world.get::<GridWalker>(e).unwrap();
    let session = *walker.session().unwrap();
    assert_eq!(session.target, Vector3::new(12.0, 1.0, 6.0));
    assert!(approx_eq(position(&mut world).x, 6.1));

    let body = world.get::<KinematicBody>(e).unwrap();
    assert!(body.grounded);
    assert!(approx_eq(body.velocity.x, 5.0));
}

#[test]
fn held_input_does_not_change_the_active_target() {
    let mut world = make_world("held", 1);
    let mut physics = game::physics_schedule();

    world.resource_mut::<InputState>().set_direction(1.0, 0.0);
    tick(&mut world, &mut physics);
    world.resource_mut::<InputState>().set_direction(0.0, -1.0);
    for _ in 0..20 {
        tick(&mut world, &mut physics);
    }

    let e = player(&mut world);
    let session = *world.get::<GridWalker>(e).unwrap().session().unwrap();
    assert_eq!(session.target, Vector3::new(12.0, 1.0, 6.0));
}

#[test]
fn side_hit_observer_arms_the_bounce() {
    let mut world = make_world("observer", 1);
    let mut physics = game::physics_schedule();
    world.resource_mut::<InputState>().set_direction(1.0, 0.0);
    tick(&mut world, &mut physics);

    let e = player(&mut world);
    world.trigger(ControllerColliderHit {
        walker: e,
        hit: ControllerHit {
            flags: CollisionFlags::BELOW,
            normal: Vector3::new(0.0, 1.0, 0.0),
            point: Vector3::new(6.1, 0.0, 6.0),
        },
    });
    assert!(!world.get::<GridWalker>(e).unwrap().collided_while_walking());

    world.trigger(ControllerColliderHit {
        walker: e,
        hit: ControllerHit {
            flags: CollisionFlags::SIDES | CollisionFlags::BELOW,
            normal: Vector3::new(-1.0, 0.0, 0.0),
            point: Vector3::new(6.6, 1.0, 6.0),
        },
    });
    assert!(world.get::<GridWalker>(e).unwrap().collided_while_walking());

    tick(&mut world, &mut physics);
    let session = *world.get::<GridWalker>(e).unwrap().session().unwrap();
    assert!(session.reversed);
    assert_eq!(session.target, Vector3::new(6.0, 1.0, 6.0));
}

#[test]
fn same_seed_picks_the_same_footsteps() {
    let run = |name: &str| {
        let mut world = make_world(name, 42);
        run_headless(&mut world, &[r(), r()], 1000).unwrap();
        let e = player(&mut world);
        world
            .get::<GridWalker>(e)
            .unwrap()
            .footsteps()
            .clips()
            .to_vec()
    };
    assert_eq!(run("seed_a"), run("seed_b"));
}

#[test]
fn tick_budget_stops_mid_step() {
    let mut world = make_world("budget", 1);
    let report = run_headless(&mut world, &[r()], 10).unwrap();
    assert_eq!(report.ticks, 10);
    assert_eq!(report.steps_completed, 0);
    assert!(report.position.x > 6.0 && report.position.x < 12.0);
}

#[test]
fn debug_switch_toggles_resource() {
    let mut world = make_world("debug", 1);
    world.trigger(SwitchDebugEvent {});
    world.flush();
    assert!(world.contains_resource::<DebugMode>());
    world.trigger(SwitchDebugEvent {});
    world.flush();
    assert!(!world.contains_resource::<DebugMode>());
}

#[test]
fn frame_time_feeds_the_physics_accumulator() {
    let mut world = make_world("time", 1);
    assert_eq!(update_world_time(&mut world, 0.05), 2);
    assert_eq!(world.resource::<FixedTimestep>().ticks, 2);
    assert_eq!(update_world_time(&mut world, 0.015), 1);

    let time = *world.resource::<WorldTime>();
    assert!(approx_eq(time.elapsed, 0.065));
    assert!(approx_eq(time.delta, 0.015));
}
