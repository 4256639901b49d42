//! Level layout spawning system.
//!
//! The [`levellayout_spawn_system`] processes newly added [`LevelLayout`]
//! components, loads their JSON data and spawns:
//! - one wall entity per wall cell ([`WorldPosition`], [`BoxCollider`],
//!   [`Group`] `"walls"`), also recorded in [`LevelSolids`]
//! - the player at the spawn cell, standing on the floor, with its
//!   [`GridWalker`], [`KinematicBody`] and [`MouseLook`]
//!
//! Footstep clips are requested from the audio thread at the same time.
//!
//! # Related
//!
//! - [`crate::components::levellayout::LevelLayout`] – the trigger component
//! - [`crate::components::levellayout::LevelLayoutData`] – the parsed JSON structure

use bevy_ecs::prelude::*;
use log::{error, info, warn};
use raylib::prelude::Vector3;

use crate::components::boxcollider::BoxCollider;
use crate::components::gridwalker::GridWalker;
use crate::components::group::Group;
use crate::components::kinematicbody::KinematicBody;
use crate::components::levellayout::{LevelLayout, LevelLayoutData};
use crate::components::rotation::Rotation;
use crate::components::worldposition::WorldPosition;
use crate::events::audio::AudioCmd;
use crate::resources::gameconfig::GameConfig;
use crate::resources::levelsolids::LevelSolids;

/// Spawn the walls and the player described by `data`.
pub fn spawn_level(
    commands: &mut Commands,
    data: &LevelLayoutData,
    config: &GameConfig,
    solids: &mut LevelSolids,
) -> Entity {
    if (data.cell_size - config.walker.grid_spacing).abs() > f32::EPSILON {
        warn!(
            "level cell_size {} differs from grid_spacing {}; steps will not line up with tiles",
            data.cell_size, config.walker.grid_spacing
        );
    }

    solids.solids.clear();
    solids.size = data.size();
    for cell in data.walls() {
        let center = Vector3::new(cell.x, data.wall_height * 0.5, cell.z);
        let collider = BoxCollider::new(data.cell_size, data.wall_height, data.cell_size);
        solids.push(center, collider);
        commands.spawn((Group("walls"), WorldPosition::from(center), collider));
    }

    let spawn = data.spawn_point().unwrap_or_else(|| {
        warn!("level has no spawn cell, starting at the origin");
        Vector3::zero()
    });
    let body = KinematicBody::default();
    let position = WorldPosition::new(spawn.x, body.standing_height(), spawn.z);
    let walker = GridWalker::new(
        config.walker_settings(),
        config.footstep_pool(),
        config.head_bob,
    );

    commands
        .spawn((
            Group("player"),
            position,
            Rotation::default(),
            body,
            walker,
            config.look,
        ))
        .id()
}

/// System that processes LevelLayout components and spawns the level accordingly.
pub fn levellayout_spawn_system(
    mut commands: Commands,
    mut query: Query<&mut LevelLayout, Added<LevelLayout>>,
    config: Res<GameConfig>,
    mut solids: ResMut<LevelSolids>,
    mut audio: MessageWriter<AudioCmd>,
) {
    for mut layout in query.iter_mut() {
        if layout.spawned {
            continue;
        }
        layout.spawned = true;

        let data = match LevelLayoutData::load_from_file(&layout.path) {
            Ok(data) => data,
            Err(err) => {
                error!("Failed to load level layout from {}: {}", layout.path, err);
                continue;
            }
        };

        spawn_level(&mut commands, &data, &config, &mut solids);

        for clip in &config.footsteps {
            audio.write(AudioCmd::LoadFx {
                id: clip.clone(),
                path: clip.clone(),
            });
        }

        info!(
            "Spawned level from {} ({} walls, {:.0}x{:.0} units)",
            layout.path,
            solids.len(),
            solids.size.0,
            solids.size.1
        );
    }
}
