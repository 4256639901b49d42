use bevy_ecs::prelude::Resource;

/// Frame clock shared by all systems.
#[derive(Resource, Clone, Copy, Default)]
pub struct WorldTime {
    /// Seconds since startup.
    pub elapsed: f32,
    /// Last frame delta in seconds.
    pub delta: f32,
}

/// Accumulator that turns variable frame deltas into fixed physics ticks.
#[derive(Resource, Debug, Clone, Copy)]
pub struct FixedTimestep {
    /// Seconds per physics tick.
    pub step: f32,
    accumulator: f32,
    /// Ticks run since startup.
    pub ticks: u64,
}

/// Upper bound on ticks drained per frame, so a long stall does not freeze
/// the window catching up.
pub const MAX_TICKS_PER_FRAME: u32 = 8;

impl FixedTimestep {
    pub fn from_rate(tick_rate: u32) -> Self {
        Self {
            step: 1.0 / tick_rate.max(1) as f32,
            accumulator: 0.0,
            ticks: 0,
        }
    }

    /// Add a frame delta and return how many ticks are due.
    pub fn accumulate(&mut self, dt: f32) -> u32 {
        self.accumulator += dt.max(0.0);
        let mut due = 0;
        while self.accumulator >= self.step && due < MAX_TICKS_PER_FRAME {
            self.accumulator -= self.step;
            due += 1;
        }
        if due == MAX_TICKS_PER_FRAME {
            self.accumulator = self.accumulator.min(self.step);
        }
        self.ticks += due as u64;
        due
    }

    /// Fraction of a tick left in the accumulator.
    pub fn alpha(&self) -> f32 {
        self.accumulator / self.step
    }
}
