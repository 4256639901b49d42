//! Gridwalker library.
//!
//! A first-person controller that moves in discrete grid steps, plus the ECS
//! components, resources, systems and events that host it in a raylib
//! window. Exposed as a library for integration tests.

pub mod capabilities;
pub mod components;
pub mod events;
pub mod game;
pub mod resources;
pub mod systems;
