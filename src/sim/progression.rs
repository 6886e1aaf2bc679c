//! Level progression
//!
//! Levels only ever go up. Time-driven progression also honors levels granted
//! early by pickups: the effective level is the larger of the two.

use serde::{Deserialize, Serialize};

/// How the level is derived
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LevelPolicy {
    /// `score / threshold + 1`
    Score { threshold: u32 },
    /// `1 + elapsed_ticks / ticks_per_level`
    Time { ticks_per_level: u32 },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Progression {
    policy: LevelPolicy,
    level: u32,
    granted: u32,
}

impl Progression {
    pub fn new(policy: LevelPolicy) -> Self {
        Self {
            policy,
            level: 1,
            granted: 1,
        }
    }

    #[inline]
    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn reset(&mut self) {
        self.level = 1;
        self.granted = 1;
    }

    /// Jump one level ahead of the current one (instant level-up pickup)
    pub fn grant_next(&mut self) -> u32 {
        self.granted = self.level + 1;
        self.level = self.granted;
        self.level
    }

    /// Level the policy alone would give
    pub fn derived(&self, score: u32, elapsed_ticks: u64) -> u32 {
        match self.policy {
            LevelPolicy::Score { threshold } => score / threshold.max(1) + 1,
            LevelPolicy::Time { ticks_per_level } => {
                let steps = elapsed_ticks / u64::from(ticks_per_level.max(1));
                1 + u32::try_from(steps).unwrap_or(u32::MAX - 1)
            }
        }
    }

    /// Recompute the level; returns true if it went up
    pub fn recompute(&mut self, score: u32, elapsed_ticks: u64) -> bool {
        let next = self
            .derived(score, elapsed_ticks)
            .max(self.granted)
            .max(self.level);
        let raised = next > self.level;
        self.level = next;
        raised
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_threshold() {
        let mut p = Progression::new(LevelPolicy::Score { threshold: 500 });
        assert!(!p.recompute(499, 0));
        assert_eq!(p.level(), 1);
        assert!(p.recompute(500, 0));
        assert_eq!(p.level(), 2);
        assert!(p.recompute(1700, 0));
        assert_eq!(p.level(), 4);
    }

    #[test]
    fn test_grant_is_not_undone_by_time() {
        let mut p = Progression::new(LevelPolicy::Time { ticks_per_level: 100 });
        p.recompute(0, 10);
        assert_eq!(p.grant_next(), 2);
        assert_eq!(p.grant_next(), 3);

        // time says level 2, grant says 3
        assert!(!p.recompute(0, 150));
        assert_eq!(p.level(), 3);

        // time catches up and passes
        assert!(p.recompute(0, 300));
        assert_eq!(p.level(), 4);
    }

    #[test]
    fn test_reset() {
        let mut p = Progression::new(LevelPolicy::Time { ticks_per_level: 10 });
        p.recompute(0, 95);
        p.reset();
        assert_eq!(p.level(), 1);
        assert_eq!(p.derived(0, 0), 1);
    }
}
