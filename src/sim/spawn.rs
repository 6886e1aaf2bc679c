//! Spawn scheduling and category tables
//!
//! A spawn draws one uniform roll and walks a table of cumulative thresholds;
//! the first threshold above the roll picks the category.

use serde::{Deserialize, Serialize};

use super::rng::RandomSource;

/// Cumulative-probability category table
#[derive(Debug, Clone)]
pub struct SpawnTable<K> {
    /// (exclusive upper bound, kind), ascending by bound
    buckets: Vec<(f32, K)>,
    fallback: K,
}

impl<K: Copy> SpawnTable<K> {
    pub fn new(buckets: impl Into<Vec<(f32, K)>>, fallback: K) -> Self {
        let buckets = buckets.into();
        debug_assert!(
            buckets.windows(2).all(|w| w[0].0 <= w[1].0),
            "spawn thresholds must be ascending"
        );
        Self { buckets, fallback }
    }

    /// Category for a roll in `[0, 1)`
    pub fn pick(&self, roll: f32) -> K {
        self.buckets
            .iter()
            .find(|(bound, _)| roll < *bound)
            .map(|(_, kind)| *kind)
            .unwrap_or(self.fallback)
    }

    pub fn roll(&self, rng: &mut impl RandomSource) -> K {
        self.pick(rng.unit())
    }
}

/// Tick counter that fires once per interval
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SpawnClock {
    elapsed: u32,
}

impl SpawnClock {
    /// Count one tick; true (and reset) once `interval` ticks have passed
    pub fn advance(&mut self, interval: u32) -> bool {
        self.elapsed += 1;
        if self.elapsed >= interval.max(1) {
            self.elapsed = 0;
            true
        } else {
            false
        }
    }

    pub fn reset(&mut self) {
        self.elapsed = 0;
    }
}

/// Spawn interval that shrinks by `step` per difficulty step, never below `floor`
pub fn shrinking_interval(base: u32, step: u32, steps: u32, floor: u32) -> u32 {
    base.saturating_sub(step.saturating_mul(steps)).max(floor)
}

/// Field edge a hostile enters from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Edge {
    Top,
    Bottom,
    Left,
    Right,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::Top, Edge::Bottom, Edge::Left, Edge::Right];

    pub fn random(rng: &mut impl RandomSource) -> Self {
        Self::ALL[rng.index(Self::ALL.len())]
    }
}
