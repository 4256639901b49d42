//! ECS components for entities.
//!
//! Submodules overview:
//! - [`boxcollider`] – axis-aligned 3D box collider for walls and bodies
//! - [`footsteps`] – footstep clip pool that never repeats a clip twice in a row
//! - [`gridwalker`] – the grid-snapping walk state machine
//! - [`group`] – tag component for grouping entities by name
//! - [`headbob`] – curve-driven camera bob while walking
//! - [`kinematicbody`] – collide-and-stop character body and its mover adapter
//! - [`levellayout`] – JSON level grid and the component that spawns it
//! - [`mouselook`] – mouse-driven yaw/pitch with clamping and smoothing
//! - [`rotation`] – yaw angle in degrees
//! - [`worldposition`] – world-space position of an entity

pub mod boxcollider;
pub mod footsteps;
pub mod gridwalker;
pub mod group;
pub mod headbob;
pub mod kinematicbody;
pub mod levellayout;
pub mod mouselook;
pub mod rotation;
pub mod worldposition;
