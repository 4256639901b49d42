//! Kinematic character body and its [`Mover`] adapter.
//!
//! [`KinematicBody`] is a box-shaped character (width `2 * radius`, height
//! `height`) that rests on a flat floor at `floor_y` and is blocked by static
//! [`BoxCollider`]s. Moves are resolved one axis at a time (x, z, then y):
//! - blocked horizontal motion stops at the obstacle face and raises `SIDES`
//! - downward motion stopping on the floor or a box top raises `BELOW`
//! - upward motion stopping under a box raises `ABOVE`
//!
//! Every contact is recorded as a [`ControllerHit`]; the physics system
//! drains them after each tick and forwards them to the walker's collision
//! callback.
//!
//! [`BodyMover`] borrows the body together with the entity's position,
//! rotation and the level's static solids, and implements [`Mover`] for the
//! grid walker.

use bevy_ecs::prelude::Component;
use raylib::prelude::Vector3;
use smallvec::SmallVec;

use crate::capabilities::{CollisionFlags, ControllerHit, Mover};
use crate::components::boxcollider::BoxCollider;
use crate::components::rotation::Rotation;
use crate::components::worldposition::WorldPosition;

/// Gap kept between the body and the faces it stops against.
pub const CONTACT_SKIN: f32 = 1e-3;

/// Contacts collected during the last move.
pub type HitBuffer = SmallVec<[ControllerHit; 4]>;

#[derive(Component, Debug, Clone)]
pub struct KinematicBody {
    pub radius: f32,
    pub height: f32,
    pub floor_y: f32,
    /// Velocity measured from the last move.
    pub velocity: Vector3,
    pub grounded: bool,
    /// Flags reported by the last move.
    pub collision_flags: CollisionFlags,
    hits: HitBuffer,
}

impl Default for KinematicBody {
    fn default() -> Self {
        Self::new(0.5, 2.0)
    }
}

impl KinematicBody {
    pub fn new(radius: f32, height: f32) -> Self {
        Self {
            radius,
            height,
            floor_y: 0.0,
            velocity: Vector3::zero(),
            grounded: false,
            collision_flags: CollisionFlags::NONE,
            hits: HitBuffer::new(),
        }
    }

    pub fn half_extents(&self) -> Vector3 {
        Vector3::new(self.radius, self.height * 0.5, self.radius)
    }

    /// The body's own collider, centered on its position.
    pub fn collider(&self) -> BoxCollider {
        BoxCollider::new(self.radius * 2.0, self.height, self.radius * 2.0)
    }

    /// Center height for a body standing on the floor.
    pub fn standing_height(&self) -> f32 {
        self.floor_y + self.height * 0.5
    }

    pub fn hits(&self) -> &[ControllerHit] {
        &self.hits
    }

    /// Take the contacts recorded by the last move.
    pub fn drain_hits(&mut self) -> HitBuffer {
        std::mem::take(&mut self.hits)
    }

    fn first_blocker<'s>(
        &self,
        position: Vector3,
        solids: &'s [(Vector3, BoxCollider)],
    ) -> Option<&'s (Vector3, BoxCollider)> {
        let own = self.collider();
        solids
            .iter()
            .find(|(solid_pos, solid)| own.overlaps(position, solid, *solid_pos))
    }

    /// Move `position` by `motion`, stopping at solids and the floor.
    pub fn move_and_collide(
        &mut self,
        position: &mut Vector3,
        motion: Vector3,
        dt: f32,
        solids: &[(Vector3, BoxCollider)],
    ) -> CollisionFlags {
        let start = *position;
        let half = self.half_extents();
        let mut flags = CollisionFlags::NONE;
        let mut contacts: HitBuffer = HitBuffer::new();

        // Horizontal axes first, each resolved on its own.
        if motion.x != 0.0 {
            position.x += motion.x;
            if let Some((solid_pos, solid)) = self.first_blocker(*position, solids) {
                let (min, max) = solid.aabb(*solid_pos);
                let sign = motion.x.signum();
                position.x = if sign > 0.0 {
                    min.x - half.x - CONTACT_SKIN
                } else {
                    max.x + half.x + CONTACT_SKIN
                };
                flags |= CollisionFlags::SIDES;
                contacts.push(ControllerHit {
                    flags: CollisionFlags::SIDES,
                    normal: Vector3::new(-sign, 0.0, 0.0),
                    point: Vector3::new(position.x + sign * half.x, position.y, position.z),
                });
            }
        }

        if motion.z != 0.0 {
            position.z += motion.z;
            if let Some((solid_pos, solid)) = self.first_blocker(*position, solids) {
                let (min, max) = solid.aabb(*solid_pos);
                let sign = motion.z.signum();
                position.z = if sign > 0.0 {
                    min.z - half.z - CONTACT_SKIN
                } else {
                    max.z + half.z + CONTACT_SKIN
                };
                flags |= CollisionFlags::SIDES;
                contacts.push(ControllerHit {
                    flags: CollisionFlags::SIDES,
                    normal: Vector3::new(0.0, 0.0, -sign),
                    point: Vector3::new(position.x, position.y, position.z + sign * half.z),
                });
            }
        }

        position.y += motion.y;
        if let Some((solid_pos, solid)) = self.first_blocker(*position, solids) {
            let (min, max) = solid.aabb(*solid_pos);
            if motion.y <= 0.0 {
                position.y = max.y + half.y;
                flags |= CollisionFlags::BELOW;
                contacts.push(ControllerHit {
                    flags: CollisionFlags::BELOW,
                    normal: Vector3::new(0.0, 1.0, 0.0),
                    point: Vector3::new(position.x, max.y, position.z),
                });
            } else {
                position.y = min.y - half.y - CONTACT_SKIN;
                flags |= CollisionFlags::ABOVE;
                contacts.push(ControllerHit {
                    flags: CollisionFlags::ABOVE,
                    normal: Vector3::new(0.0, -1.0, 0.0),
                    point: Vector3::new(position.x, min.y, position.z),
                });
            }
        }
        if motion.y <= 0.0 && position.y - half.y <= self.floor_y {
            position.y = self.floor_y + half.y;
            flags |= CollisionFlags::BELOW;
            contacts.push(ControllerHit {
                flags: CollisionFlags::BELOW,
                normal: Vector3::new(0.0, 1.0, 0.0),
                point: Vector3::new(position.x, self.floor_y, position.z),
            });
        }

        // Hits carry the flags of the whole move.
        for hit in contacts.iter_mut() {
            hit.flags = flags;
        }

        self.grounded = flags.contains(CollisionFlags::BELOW);
        self.collision_flags = flags;
        self.velocity = if dt > 0.0 {
            (*position - start) * (1.0 / dt)
        } else {
            Vector3::zero()
        };
        self.hits.extend(contacts);
        flags
    }
}

/// [`Mover`] view over a body, its transform and the level solids.
pub struct BodyMover<'a> {
    pub body: &'a mut KinematicBody,
    pub position: &'a mut WorldPosition,
    pub rotation: &'a mut Rotation,
    pub solids: &'a [(Vector3, BoxCollider)],
}

impl Mover for BodyMover<'_> {
    fn position(&self) -> Vector3 {
        self.position.pos
    }

    fn yaw(&self) -> f32 {
        self.rotation.yaw
    }

    fn set_yaw(&mut self, degrees: f32) {
        self.rotation.yaw = degrees;
    }

    fn velocity(&self) -> Vector3 {
        self.body.velocity
    }

    fn is_grounded(&self) -> bool {
        self.body.grounded
    }

    fn move_by(&mut self, motion: Vector3, dt: f32) -> CollisionFlags {
        self.body
            .move_and_collide(&mut self.position.pos, motion, dt, self.solids)
    }

    fn set_position_and_rotation(&mut self, position: Vector3, yaw: f32) {
        self.position.pos = position;
        self.rotation.yaw = yaw;
    }
}
