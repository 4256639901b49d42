//! Systems.
//!
//! Submodules overview
//! - [`audio`] – audio thread and the systems bridging it with the ECS
//! - [`gridwalk`] – physics tick and mouse look for grid walkers
//! - [`input`] – read hardware input into [`crate::resources::input::InputState`]
//! - [`levellayout`] – spawn walls and the player from a JSON level
//! - [`render`] – 3D view and debug overlay using Raylib
//! - [`time`] – update frame time and the physics accumulator

pub mod audio;
pub mod gridwalk;
pub mod input;
pub mod levellayout;
pub mod render;
pub mod time;
