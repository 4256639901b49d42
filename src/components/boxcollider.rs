use bevy_ecs::prelude::Component;
use raylib::prelude::Vector3;

/// Axis-aligned box collider centered on the entity position plus `offset`.
#[derive(Debug, Clone, Copy, PartialEq, Component)]
pub struct BoxCollider {
    pub size: Vector3,
    pub offset: Vector3,
}

impl BoxCollider {
    /// Create a BoxCollider with given size
    pub fn new(width: f32, height: f32, depth: f32) -> Self {
        Self {
            size: Vector3::new(width, height, depth),
            offset: Vector3::zero(),
        }
    }

    /// Returns (min, max) of the collider AABB for a given entity position.
    /// Handles negative size by normalizing to proper min/max.
    pub fn aabb(&self, position: Vector3) -> (Vector3, Vector3) {
        let center = position + self.offset;
        let half = Vector3::new(
            self.size.x.abs() * 0.5,
            self.size.y.abs() * 0.5,
            self.size.z.abs() * 0.5,
        );
        (center - half, center + half)
    }

    /// AABB vs AABB overlap test against another BoxCollider at a different entity position.
    /// Touching faces do not count as overlap.
    pub fn overlaps(&self, position: Vector3, other: &Self, other_position: Vector3) -> bool {
        let (min_a, max_a) = self.aabb(position);
        let (min_b, max_b) = other.aabb(other_position);
        min_a.x < max_b.x
            && max_a.x > min_b.x
            && min_a.y < max_b.y
            && max_a.y > min_b.y
            && min_a.z < max_b.z
            && max_a.z > min_b.z
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aabb_is_centered_on_position() {
        let c = BoxCollider::new(2.0, 4.0, 6.0);
        let (min, max) = c.aabb(Vector3::new(1.0, 2.0, 3.0));
        assert_eq!((min.x, min.y, min.z), (0.0, 0.0, 0.0));
        assert_eq!((max.x, max.y, max.z), (2.0, 4.0, 6.0));
    }

    #[test]
    fn offset_shifts_box() {
        let c = BoxCollider {
            offset: Vector3::new(0.0, 1.0, 0.0),
            ..BoxCollider::new(2.0, 2.0, 2.0)
        };
        let (min, max) = c.aabb(Vector3::zero());
        assert_eq!((min.y, max.y), (0.0, 2.0));
    }

    #[test]
    fn touching_faces_do_not_overlap() {
        let a = BoxCollider::new(1.0, 1.0, 1.0);
        let b = BoxCollider::new(1.0, 1.0, 1.0);
        assert!(!a.overlaps(Vector3::zero(), &b, Vector3::new(1.0, 0.0, 0.0)));
        assert!(a.overlaps(Vector3::zero(), &b, Vector3::new(0.9, 0.0, 0.0)));
    }
}
