use bevy_ecs::prelude::Component;

/// Tag naming what an entity is part of (`"player"`, `"walls"`).
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Group(pub &'static str);

impl Group {
    pub fn name(&self) -> &'static str {
        self.0
    }
}
