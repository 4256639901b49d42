use bevy_ecs::prelude::Component;

/// Facing of an entity as a yaw angle around the world up axis.
///
/// Degrees, counter-clockwise seen from above; `0` faces `-Z`.
#[derive(Component, Clone, Debug, Copy, Default, PartialEq)]
pub struct Rotation {
    pub yaw: f32,
}

impl Rotation {
    pub fn from_yaw(yaw: f32) -> Self {
        Self { yaw }
    }

    /// Yaw wrapped to `(-180, 180]`.
    pub fn normalized_yaw(&self) -> f32 {
        let wrapped = (self.yaw + 180.0).rem_euclid(360.0) - 180.0;
        if wrapped == -180.0 { 180.0 } else { wrapped }
    }
}
