use bevy_ecs::prelude::*;
use raylib::prelude::*;

use crate::capabilities::CollisionFlags;
use crate::components::boxcollider::BoxCollider;
use crate::components::gridwalker::{GridWalker, WalkState};
use crate::components::group::Group;
use crate::components::kinematicbody::KinematicBody;
use crate::components::rotation::Rotation;
use crate::components::worldposition::WorldPosition;
use crate::resources::debugmode::DebugMode;
use crate::resources::levelsolids::LevelSolids;
use crate::resources::worldtime::{FixedTimestep, WorldTime};

const FIELD_OF_VIEW: f32 = 70.0;

/// View direction for a yaw/pitch pair in degrees.
pub fn look_direction(yaw: f32, pitch: f32) -> Vector3 {
    let (y, p) = (yaw.to_radians(), pitch.to_radians());
    Vector3::new(-y.sin() * p.cos(), p.sin(), -y.cos() * p.cos())
}

/// Camera for the first walker found: body position plus the rig offset
/// (head bob) expressed in the body's yaw frame.
pub fn walker_camera(world: &mut World) -> Option<Camera3D> {
    let mut q = world.query::<(&GridWalker, &WorldPosition, &Rotation)>();
    let (walker, position, rotation) = q.iter(world).next()?;

    let rig = walker.camera();
    let yaw = rotation.yaw.to_radians();
    let right = Vector3::new(yaw.cos(), 0.0, -yaw.sin());
    let back = Vector3::new(yaw.sin(), 0.0, yaw.cos());
    let eye = position.pos
        + right * rig.local_position.x
        + Vector3::new(0.0, rig.local_position.y, 0.0)
        + back * rig.local_position.z;
    let target = eye + look_direction(rotation.yaw, rig.pitch);

    Some(Camera3D::perspective(
        eye,
        target,
        Vector3::new(0.0, 1.0, 0.0),
        FIELD_OF_VIEW,
    ))
}

/// Draw the floor, tile lines and walls in 3D camera space.
pub fn render_pass(world: &mut World, d3: &mut RaylibMode3D<RaylibDrawHandle>) {
    let (width, depth) = world.resource::<LevelSolids>().size;
    let cell = world
        .query::<&GridWalker>()
        .iter(world)
        .next()
        .map(|w| w.settings.grid_spacing)
        .unwrap_or(1.0);

    // Cells are centered on multiples of the cell size.
    let (min_x, min_z) = (-cell * 0.5, -cell * 0.5);
    let (max_x, max_z) = (width - cell * 0.5, depth - cell * 0.5);
    d3.draw_plane(
        Vector3::new((min_x + max_x) * 0.5, 0.0, (min_z + max_z) * 0.5),
        Vector2::new(width, depth),
        Color::DARKGRAY,
    );
    let mut x = min_x;
    while x <= max_x + 1e-3 {
        d3.draw_line3D(
            Vector3::new(x, 0.01, min_z),
            Vector3::new(x, 0.01, max_z),
            Color::GRAY,
        );
        x += cell;
    }
    let mut z = min_z;
    while z <= max_z + 1e-3 {
        d3.draw_line3D(
            Vector3::new(min_x, 0.01, z),
            Vector3::new(max_x, 0.01, z),
            Color::GRAY,
        );
        z += cell;
    }

    let mut walls = world.query::<(&BoxCollider, &WorldPosition, &Group)>();
    for (collider, position, group) in walls.iter(world) {
        if group.name() != "walls" {
            continue;
        }
        let center = position.pos + collider.offset;
        d3.draw_cube(center, collider.size.x, collider.size.y, collider.size.z, Color::BEIGE);
        d3.draw_cube_wires(center, collider.size.x, collider.size.y, collider.size.z, Color::BROWN);
    }

    if world.contains_resource::<DebugMode>() {
        let mut walkers = world.query::<(&GridWalker, &KinematicBody, &WorldPosition)>();
        for (walker, body, position) in walkers.iter(world) {
            let size = body.collider().size;
            d3.draw_cube_wires(position.pos, size.x, size.y, size.z, Color::GREEN);
            if let Some(session) = walker.session() {
                d3.draw_sphere(session.target, 0.2, Color::RED);
                d3.draw_line3D(position.pos, session.target, Color::RED);
            }
        }
    }
}

fn flags_text(flags: CollisionFlags) -> String {
    let mut parts = Vec::new();
    if flags.contains(CollisionFlags::SIDES) {
        parts.push("sides");
    }
    if flags.contains(CollisionFlags::ABOVE) {
        parts.push("above");
    }
    if flags.contains(CollisionFlags::BELOW) {
        parts.push("below");
    }
    if parts.is_empty() {
        "none".to_string()
    } else {
        parts.join("|")
    }
}

pub fn render_debug_ui(world: &mut World, d: &mut RaylibDrawHandle) {
    if !world.contains_resource::<DebugMode>() {
        return;
    }
    let fps = d.get_fps();
    let (ticks, alpha) = world
        .get_resource::<FixedTimestep>()
        .map(|ts| (ts.ticks, ts.alpha()))
        .unwrap_or((0, 0.0));
    let elapsed = world
        .get_resource::<WorldTime>()
        .map(|t| t.elapsed)
        .unwrap_or(0.0);
    d.draw_text(
        &format!(
            "DEBUG MODE (press F1 to toggle) | FPS: {} | {:.1}s | tick {} (+{:.2})",
            fps, elapsed, ticks, alpha
        ),
        10,
        10,
        10,
        Color::WHITE,
    );

    let mut walkers = world.query::<(&GridWalker, &WorldPosition, &Rotation)>();
    for (walker, position, rotation) in walkers.iter(world) {
        let state = match walker.state() {
            WalkState::Idle => "idle".to_string(),
            WalkState::Walking(s) => format!(
                "walking -> ({:.2}, {:.2}, {:.2}){}",
                s.target.x,
                s.target.y,
                s.target.z,
                if s.reversed { " [returning]" } else { "" }
            ),
        };
        let (cycle, next) = walker.stride();
        let lines = [
            format!(
                "pos ({:.2}, {:.2}, {:.2}) yaw {:.1} pitch {:.1}",
                position.pos.x,
                position.pos.y,
                position.pos.z,
                rotation.normalized_yaw(),
                walker.camera().pitch
            ),
            format!("state: {}", state),
            format!("stride {:.2} / next {:.2}", cycle, next),
            format!("contacts: {}", flags_text(walker.collision_flags())),
            format!(
                "steps completed {} | footsteps {}",
                walker.sessions_completed(),
                walker.footsteps_played()
            ),
        ];
        for (i, line) in lines.iter().enumerate() {
            d.draw_text(line, 10, 30 + i as i32 * 14, 10, Color::WHITE);
        }
    }
}

/// Draw one frame. The Raylib handle and thread are taken out of the world
/// for the duration of the draw so the passes can query it freely.
pub fn render_system(world: &mut World) {
    let Some(mut rl) = world.remove_non_send_resource::<RaylibHandle>() else {
        return;
    };
    let Some(thread) = world.remove_non_send_resource::<RaylibThread>() else {
        world.insert_non_send_resource(rl);
        return;
    };

    let camera = walker_camera(world);
    {
        let mut d = rl.begin_drawing(&thread);
        d.clear_background(Color::SKYBLUE);
        if let Some(camera) = camera {
            let mut d3 = d.begin_mode3D(camera);
            render_pass(world, &mut d3);
        }
        render_debug_ui(world, &mut d);
    }

    world.insert_non_send_resource(thread);
    world.insert_non_send_resource(rl);
}
