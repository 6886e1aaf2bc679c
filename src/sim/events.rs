//! Outbound notifications: observer callbacks and audio cues
//!
//! Callbacks are optional and cloneable so the application context can hand
//! the same HUD wiring to whichever game is active.

use std::cell::RefCell;
use std::rc::Rc;

/// Named sound cues the simulations emit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    Coin,
    Hit,
    LevelUp,
    Heal,
    AreaClear,
    GameOver,
}

/// Fire-and-forget audio output
pub trait AudioSink {
    fn play(&self, cue: Cue);
}

/// Discards every cue
#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

impl AudioSink for Silent {
    fn play(&self, _cue: Cue) {}
}

/// Records cues in order (handy for tests and headless runs)
#[derive(Debug, Default)]
pub struct CueLog {
    cues: RefCell<Vec<Cue>>,
}

impl CueLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cues(&self) -> Vec<Cue> {
        self.cues.borrow().clone()
    }

    pub fn count(&self, cue: Cue) -> usize {
        self.cues.borrow().iter().filter(|c| **c == cue).count()
    }
}

impl AudioSink for CueLog {
    fn play(&self, cue: Cue) {
        self.cues.borrow_mut().push(cue);
    }
}

/// Why a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    /// HP reached zero
    Defeated { level: u32 },
    /// The host stopped the session
    Stopped { level: u32 },
}

impl EndReason {
    pub fn level(&self) -> u32 {
        match *self {
            EndReason::Defeated { level } | EndReason::Stopped { level } => level,
        }
    }
}

pub type ScoreCallback = Rc<dyn Fn(u32, u32)>;
pub type HpCallback = Rc<dyn Fn(u32)>;
pub type EndCallback = Rc<dyn Fn(u32, EndReason)>;

/// Optional change callbacks
#[derive(Clone, Default)]
pub struct Observers {
    pub on_score: Option<ScoreCallback>,
    pub on_hp: Option<HpCallback>,
    pub on_end: Option<EndCallback>,
}

impl std::fmt::Debug for Observers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Observers")
            .field("on_score", &self.on_score.is_some())
            .field("on_hp", &self.on_hp.is_some())
            .field("on_end", &self.on_end.is_some())
            .finish()
    }
}

impl Observers {
    pub fn score_changed(&self, score: u32, level: u32) {
        if let Some(cb) = &self.on_score {
            cb(score, level);
        }
    }

    pub fn hp_changed(&self, hp: u32) {
        if let Some(cb) = &self.on_hp {
            cb(hp);
        }
    }

    pub fn ended(&self, score: u32, reason: EndReason) {
        if let Some(cb) = &self.on_end {
            cb(score, reason);
        }
    }
}

/// Score, level and HP as last reported to observers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scoreboard {
    pub score: u32,
    pub level: u32,
    pub hp: u32,
}

/// Tracks what observers have seen so each change is reported once per tick
#[derive(Debug, Clone, Copy, Default)]
pub struct ChangeTracker {
    last: Option<Scoreboard>,
}

impl ChangeTracker {
    /// Report everything unconditionally (session start)
    pub fn announce(&mut self, now: Scoreboard, observers: &Observers) {
        observers.score_changed(now.score, now.level);
        observers.hp_changed(now.hp);
        self.last = Some(now);
    }

    /// Report only the parts that differ from the last report
    pub fn flush(&mut self, now: Scoreboard, observers: &Observers) {
        let Some(last) = self.last else {
            self.announce(now, observers);
            return;
        };
        if (last.score, last.level) != (now.score, now.level) {
            observers.score_changed(now.score, now.level);
        }
        if last.hp != now.hp {
            observers.hp_changed(now.hp);
        }
        self.last = Some(now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_flush_reports_only_changes() {
        let score_calls = Rc::new(Cell::new(0));
        let hp_calls = Rc::new(Cell::new(0));
        let observers = Observers {
            on_score: Some({
                let c = score_calls.clone();
                Rc::new(move |_, _| c.set(c.get() + 1))
            }),
            on_hp: Some({
                let c = hp_calls.clone();
                Rc::new(move |_| c.set(c.get() + 1))
            }),
            on_end: None,
        };

        let mut tracker = ChangeTracker::default();
        let board = Scoreboard { score: 0, level: 1, hp: 3 };
        tracker.announce(board, &observers);
        tracker.flush(board, &observers);
        assert_eq!((score_calls.get(), hp_calls.get()), (1, 1));

        tracker.flush(Scoreboard { hp: 2, ..board }, &observers);
        assert_eq!((score_calls.get(), hp_calls.get()), (1, 2));

        tracker.flush(Scoreboard { score: 10, hp: 2, ..board }, &observers);
        assert_eq!((score_calls.get(), hp_calls.get()), (2, 2));
    }

    #[test]
    fn test_unset_callbacks_are_noops() {
        let observers = Observers::default();
        observers.score_changed(1, 1);
        observers.hp_changed(1);
        observers.ended(1, EndReason::Stopped { level: 1 });
    }
}
