//! Narrow contracts the grid walker depends on.
//!
//! The [`GridWalker`](crate::components::gridwalker::GridWalker) never talks
//! to raylib or the ECS world directly. Everything it needs from the outside
//! is expressed here:
//! - [`Mover`] – the physics body that owns position, facing and contacts
//! - [`AxisSource`] – two analog input axes in `[-1, 1]`
//! - [`LookProvider`] – turns accumulated look input into a new rotation
//! - [`AudioSink`] – fire-and-forget one-shot clip playback
//! - [`IndexSource`] – uniform index draws for footstep selection
//!
//! Production implementations live next to the resources/components they
//! wrap (kinematic body, input state, mouse look, audio messages, `fastrand`);
//! tests supply deterministic fakes.

use std::ops::{BitAnd, BitOr, BitOrAssign, Range};

use raylib::prelude::Vector3;

/// Contact summary reported by a [`Mover::move_by`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct CollisionFlags(u8);

impl CollisionFlags {
    pub const NONE: Self = Self(0);
    /// Blocked horizontally (walls).
    pub const SIDES: Self = Self(1);
    /// Blocked while moving up (ceilings).
    pub const ABOVE: Self = Self(1 << 1);
    /// Resting on or landing on something underfoot.
    pub const BELOW: Self = Self(1 << 2);

    pub fn bits(self) -> u8 {
        self.0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// True when every bit in `other` is set.
    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// True when at least one bit in `other` is set.
    pub fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }
}

impl BitOr for CollisionFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for CollisionFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for CollisionFlags {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

/// A single contact produced while resolving a move.
///
/// `flags` are the flags of the whole move the contact belongs to, so a wall
/// hit taken while grounded reports `SIDES | BELOW`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControllerHit {
    pub flags: CollisionFlags,
    /// Surface normal pointing away from the obstacle.
    pub normal: Vector3,
    /// World-space contact point on the body surface.
    pub point: Vector3,
}

/// Physics body driven by the grid walker.
///
/// Rotation is a yaw angle in degrees around the world up axis; `forward`
/// and `right` are derived from it and always horizontal and unit length.
pub trait Mover {
    fn position(&self) -> Vector3;

    fn yaw(&self) -> f32;

    fn set_yaw(&mut self, degrees: f32);

    fn forward(&self) -> Vector3 {
        let r = self.yaw().to_radians();
        Vector3::new(-r.sin(), 0.0, -r.cos())
    }

    fn right(&self) -> Vector3 {
        let r = self.yaw().to_radians();
        Vector3::new(r.cos(), 0.0, -r.sin())
    }

    /// Velocity measured from the last move (actual displacement / dt).
    fn velocity(&self) -> Vector3;

    fn is_grounded(&self) -> bool;

    /// Move by `motion`, resolving collisions. `dt` is the step the motion
    /// was scaled by and is only used to measure velocity.
    fn move_by(&mut self, motion: Vector3, dt: f32) -> CollisionFlags;

    /// Teleport without collision resolution.
    fn set_position_and_rotation(&mut self, position: Vector3, yaw: f32);
}

/// Named analog input axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputAxis {
    Horizontal,
    Vertical,
}

/// Source of analog axis values in `[-1, 1]`.
pub trait AxisSource {
    fn axis(&self, axis: InputAxis) -> f32;
}

/// Character yaw and camera pitch, both in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LookRotation {
    pub yaw: f32,
    pub pitch: f32,
}

/// Produces the view rotation for the current frame.
pub trait LookProvider {
    fn look_rotation(&mut self, current: LookRotation, dt: f32) -> LookRotation;
}

/// One-shot clip playback. Clips are identified by their id (file path).
pub trait AudioSink {
    fn play_one_shot(&mut self, clip: &str);
}

/// Uniform index draws over a half-open range.
pub trait IndexSource {
    fn index_in(&mut self, range: Range<usize>) -> usize;
}

impl IndexSource for fastrand::Rng {
    fn index_in(&mut self, range: Range<usize>) -> usize {
        self.usize(range)
    }
}
