//! Level layout component for data-driven level spawning.
//!
//! The [`LevelLayout`] component references a JSON file describing the level
//! as a grid of characters seen from above. Rows run along +Z and columns
//! along +X; each cell is `cell_size` wide so one grid step of the walker
//! moves exactly one cell. When the component is added, the
//! [`levellayout_spawn_system`](crate::systems::levellayout::levellayout_spawn_system)
//! reads the file and spawns a wall collider for each wall cell and the
//! player at the spawn cell.
//!
//! ```json
//! {
//!   "cell_size": 6.0,
//!   "wall_height": 3.0,
//!   "grid": ["#####", "#S..#", "#####"],
//!   "legend": { "#": "wall", "S": "spawn", ".": null }
//! }
//! ```

use bevy_ecs::prelude::*;
use raylib::prelude::Vector3;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Trigger component: spawns the level found at `path` once.
#[derive(Component, Debug, Clone)]
pub struct LevelLayout {
    pub path: String,
    pub spawned: bool,
}

impl LevelLayout {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            spawned: false,
        }
    }
}

/// What a legend character stands for.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CellKind {
    Wall,
    Spawn,
}

fn default_wall_height() -> f32 {
    3.0
}

/// Level data loaded from JSON.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct LevelLayoutData {
    pub cell_size: f32,
    #[serde(default = "default_wall_height")]
    pub wall_height: f32,
    pub grid: Vec<String>,
    pub legend: FxHashMap<char, Option<CellKind>>,
}

impl LevelLayoutData {
    pub fn load_from_file(path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let file_content = std::fs::read_to_string(path)?;
        Self::from_json(&file_content)
    }

    pub fn from_json(json: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let layout_data: LevelLayoutData = serde_json::from_str(json)?;
        if layout_data.cell_size <= 0.0 {
            return Err(format!("cell_size must be positive, got {}", layout_data.cell_size).into());
        }
        Ok(layout_data)
    }

    /// Iterate over all defined cells with the world-space center of their
    /// floor (y = 0).
    pub fn iter_cells(&self) -> impl Iterator<Item = (Vector3, CellKind)> + '_ {
        self.grid.iter().enumerate().flat_map(move |(row, line)| {
            line.chars().enumerate().filter_map(move |(col, ch)| {
                if let Some(Some(kind)) = self.legend.get(&ch) {
                    let x = col as f32 * self.cell_size;
                    let z = row as f32 * self.cell_size;
                    Some((Vector3::new(x, 0.0, z), *kind))
                } else {
                    None
                }
            })
        })
    }

    pub fn walls(&self) -> impl Iterator<Item = Vector3> + '_ {
        self.iter_cells()
            .filter(|(_, kind)| *kind == CellKind::Wall)
            .map(|(pos, _)| pos)
    }

    /// First spawn cell in reading order.
    pub fn spawn_point(&self) -> Option<Vector3> {
        self.iter_cells()
            .find(|(_, kind)| *kind == CellKind::Spawn)
            .map(|(pos, _)| pos)
    }

    /// Level extent along X and Z.
    pub fn size(&self) -> (f32, f32) {
        let cols = self.grid.iter().map(|l| l.chars().count()).max().unwrap_or(0);
        (
            cols as f32 * self.cell_size,
            self.grid.len() as f32 * self.cell_size,
        )
    }
}
