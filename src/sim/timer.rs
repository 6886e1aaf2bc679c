//! Tick countdowns
//!
//! Every timed effect (invincibility, speed boost, fire cooldown) counts down
//! in whole ticks and saturates at zero.

use serde::{Deserialize, Serialize};

/// A countdown measured in simulation ticks
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickTimer(u32);

impl TickTimer {
    pub const fn idle() -> Self {
        Self(0)
    }

    /// Restart the countdown at `ticks`
    pub fn set(&mut self, ticks: u32) {
        self.0 = ticks;
    }

    /// Advance one tick, clamped at zero
    pub fn tick(&mut self) {
        self.0 = self.0.saturating_sub(1);
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.0 > 0
    }

    #[inline]
    pub fn remaining(&self) -> u32 {
        self.0
    }
}
