//! Event types and observers.
//!
//! Submodules:
//! - [`audio`] – commands and messages for the background audio thread
//! - [`collision`] – controller contacts routed to the walker's collision callback
//! - [`switchdebug`] – toggle the debug overlay on/off
pub mod audio;
pub mod collision;
pub mod switchdebug;
