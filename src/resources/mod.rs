//! ECS resources made available to systems.
//!
//! Overview
//! - `audio` – bridge and channels for the background audio thread
//! - `debugmode` – presence toggles the debug overlay
//! - `footsteprng` – seeded random source for footstep selection
//! - `gameconfig` – INI-backed window, physics and controller settings
//! - `input` – per-frame keyboard and mouse state, exposed as input axes
//! - `levelsolids` – static wall colliders of the loaded level
//! - `worldtime` – frame time and the fixed physics step accumulator
pub mod audio;
pub mod debugmode;
pub mod footsteprng;
pub mod gameconfig;
pub mod input;
pub mod levelsolids;
pub mod worldtime;
