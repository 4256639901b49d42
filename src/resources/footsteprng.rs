use bevy_ecs::prelude::Resource;

use crate::capabilities::IndexSource;

/// Random source for footstep clip selection. Seeded for reproducible runs.
#[derive(Resource, Debug, Clone)]
pub struct FootstepRng(pub fastrand::Rng);

impl FootstepRng {
    pub fn new(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self(fastrand::Rng::with_seed(seed)),
            None => Self(fastrand::Rng::new()),
        }
    }
}

impl Default for FootstepRng {
    fn default() -> Self {
        Self::new(None)
    }
}

impl IndexSource for FootstepRng {
    fn index_in(&mut self, range: std::ops::Range<usize>) -> usize {
        self.0.index_in(range)
    }
}
