//! Body Dodge: three lanes, falling objects, one runner
//!
//! Lane logic runs in a 600-unit-tall reference space with a fixed catch zone
//! near the bottom; the renderer scales it to whatever the canvas is.

use std::rc::Rc;

use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::{Contact, Grace, resolve_hostile_contact, spans_overlap};
use super::events::{AudioSink, ChangeTracker, Cue, EndReason, Observers, Scoreboard, Silent};
use super::input::{KeyCode, LaneCall, Signal};
use super::progression::{LevelPolicy, Progression};
use super::rng::{self, RandomSource};
use super::spawn::{SpawnClock, SpawnTable, shrinking_interval};
use super::timer::TickTimer;
use super::SessionPhase;
use crate::consts::*;
use crate::tuning::LaneTuning;

/// Kind of falling object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LaneItem {
    Hazard,
    Coin,
}

/// An object falling down one lane
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Faller {
    pub lane: usize,
    /// Top edge, in reference units
    pub y: f32,
    pub size: f32,
    pub kind: LaneItem,
    pub alive: bool,
}

impl Faller {
    fn new(lane: usize, kind: LaneItem, size: f32) -> Self {
        Self {
            lane,
            y: LANE_SPAWN_Y,
            size,
            kind,
            alive: true,
        }
    }

    /// True when this object is in the runner's lane and inside the catch zone
    pub fn caught_by(&self, runner_lane: usize) -> bool {
        self.lane == runner_lane
            && spans_overlap(self.y, self.size, LANE_CATCH_Y, LANE_CATCH_HEIGHT)
    }
}

/// Body Dodge simulation
pub struct LaneDodge<R: RandomSource = Pcg32> {
    tuning: LaneTuning,
    rng: R,
    kinds: SpawnTable<LaneItem>,
    phase: SessionPhase,
    score: u32,
    hp: u32,
    lane: usize,
    invincible: TickTimer,
    progression: Progression,
    spawn_clock: SpawnClock,
    hazards: Vec<Faller>,
    pickups: Vec<Faller>,
    elapsed_ticks: u64,
    tracker: ChangeTracker,
    observers: Observers,
    audio: Rc<dyn AudioSink>,
}

impl LaneDodge<Pcg32> {
    pub fn seeded(tuning: LaneTuning, seed: u64) -> Self {
        Self::new(tuning, rng::seeded(seed))
    }
}

impl<R: RandomSource> LaneDodge<R> {
    pub fn new(tuning: LaneTuning, rng: R) -> Self {
        let kinds = SpawnTable::new(vec![(1.0 - tuning.coin_chance, LaneItem::Hazard)], LaneItem::Coin);
        let progression = Progression::new(LevelPolicy::Score {
            threshold: tuning.score_per_level,
        });
        Self {
            hp: tuning.start_hp,
            tuning,
            rng,
            kinds,
            phase: SessionPhase::Idle,
            score: 0,
            lane: 1,
            invincible: TickTimer::idle(),
            progression,
            spawn_clock: SpawnClock::default(),
            hazards: Vec::new(),
            pickups: Vec::new(),
            elapsed_ticks: 0,
            tracker: ChangeTracker::default(),
            observers: Observers::default(),
            audio: Rc::new(Silent),
        }
    }

    pub fn set_observers(&mut self, observers: Observers) {
        self.observers = observers;
    }

    pub fn set_audio(&mut self, audio: Rc<dyn AudioSink>) {
        self.audio = audio;
    }

    /// Begin a fresh session
    pub fn start(&mut self) {
        self.phase = SessionPhase::Playing;
        self.score = 0;
        self.hp = self.tuning.start_hp;
        self.lane = 1;
        self.invincible = TickTimer::idle();
        self.progression.reset();
        self.spawn_clock.reset();
        self.hazards.clear();
        self.pickups.clear();
        self.elapsed_ticks = 0;
        self.tracker.announce(self.scoreboard(), &self.observers);
        log::info!("Body Dodge started (hp {})", self.hp);
    }

    /// End a running session early
    pub fn stop(&mut self) {
        if self.phase == SessionPhase::Playing {
            self.finish(EndReason::Stopped {
                level: self.level(),
            });
        }
    }

    /// Move the runner to `lane`; out-of-range lanes are ignored
    pub fn set_player_lane(&mut self, lane: usize) {
        if lane < LANE_COUNT {
            self.lane = lane;
        }
    }

    pub fn on_signal(&mut self, signal: &Signal) {
        if self.phase != SessionPhase::Playing {
            return;
        }
        match signal {
            Signal::Pose(label) => {
                if let Some(call) = LaneCall::from_label(label) {
                    self.set_player_lane(call.lane_index());
                }
            }
            Signal::Key {
                code: KeyCode::ArrowLeft,
                pressed: true,
            } => self.set_player_lane(self.lane.saturating_sub(1)),
            Signal::Key {
                code: KeyCode::ArrowRight,
                pressed: true,
            } => self.set_player_lane(self.lane + 1),
            Signal::Key { .. } => {}
        }
    }

    /// Advance exactly one tick
    pub fn update(&mut self) {
        if self.phase != SessionPhase::Playing {
            return;
        }

        // Timers
        self.invincible.tick();
        self.elapsed_ticks += 1;

        // Spawning
        let level = self.level();
        let interval = shrinking_interval(
            self.tuning.spawn_interval,
            self.tuning.interval_step,
            level,
            self.tuning.min_interval,
        );
        if self.spawn_clock.advance(interval) {
            self.spawn();
        }

        let speed = self.fall_speed();
        let mut defeated = false;

        // Hazards
        for i in 0..self.hazards.len() {
            if !self.hazards[i].alive {
                continue;
            }
            self.hazards[i].y += speed;

            if !defeated && self.hazards[i].caught_by(self.lane) {
                let contact = resolve_hostile_contact(
                    &mut self.hp,
                    &mut self.invincible,
                    None,
                    Grace::uniform(self.tuning.hit_grace_ticks),
                );
                log::debug!("Lane hazard contact in lane {}: {:?}", self.lane, contact);
                match contact {
                    Contact::Smashed => {
                        self.score += self.tuning.smash_reward;
                        self.hazards[i].alive = false;
                    }
                    Contact::AbilityLost => {}
                    Contact::Wounded { .. } => self.hazards[i].alive = false,
                    Contact::Defeated => {
                        self.hazards[i].alive = false;
                        defeated = true;
                    }
                }
                self.audio.play(Cue::Hit);
                continue;
            }

            if self.hazards[i].y > LANE_DESPAWN_Y {
                self.hazards[i].alive = false;
            }
        }

        // Coins, no longer collected once the runner is down
        for coin in self.pickups.iter_mut().filter(|c| c.alive) {
            coin.y += speed;
            if !defeated && coin.caught_by(self.lane) {
                coin.alive = false;
                self.score += self.tuning.coin_reward;
                self.audio.play(Cue::Coin);
            } else if coin.y > LANE_DESPAWN_Y {
                coin.alive = false;
            }
        }

        // Compact
        self.hazards.retain(|h| h.alive);
        self.pickups.retain(|c| c.alive);

        // Level + observers
        if self.progression.recompute(self.score, self.elapsed_ticks) {
            log::info!("Body Dodge level {}", self.level());
            self.audio.play(Cue::LevelUp);
        }
        self.tracker.flush(self.scoreboard(), &self.observers);

        if defeated || self.hp == 0 {
            self.finish(EndReason::Defeated {
                level: self.level(),
            });
        }
    }

    fn spawn(&mut self) {
        let lane = self.rng.index(LANE_COUNT);
        let kind = self.kinds.roll(&mut self.rng);
        let faller = Faller::new(lane, kind, self.tuning.object_size);
        log::debug!("Spawn {:?} in lane {}", kind, lane);
        match kind {
            LaneItem::Hazard => self.hazards.push(faller),
            LaneItem::Coin => {
                if self.tuning.replace_pickups {
                    self.pickups.clear();
                }
                self.pickups.push(faller);
            }
        }
    }

    fn finish(&mut self, reason: EndReason) {
        self.phase = SessionPhase::GameOver;
        self.audio.play(Cue::GameOver);
        log::info!("Body Dodge over: score {} ({:?})", self.score, reason);
        self.observers.ended(self.score, reason);
    }

    /// Fall speed at the current level
    pub fn fall_speed(&self) -> f32 {
        self.tuning.base_speed + self.tuning.speed_per_level * self.level() as f32
    }

    pub fn scoreboard(&self) -> Scoreboard {
        Scoreboard {
            score: self.score,
            level: self.level(),
            hp: self.hp,
        }
    }

    #[inline]
    pub fn is_playing(&self) -> bool {
        self.phase == SessionPhase::Playing
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn hp(&self) -> u32 {
        self.hp
    }

    pub fn level(&self) -> u32 {
        self.progression.level()
    }

    pub fn lane(&self) -> usize {
        self.lane
    }

    pub fn is_invincible(&self) -> bool {
        self.invincible.is_active()
    }

    pub fn elapsed_ticks(&self) -> u64 {
        self.elapsed_ticks
    }

    pub fn hazards(&self) -> &[Faller] {
        &self.hazards
    }

    pub fn pickups(&self) -> &[Faller] {
        &self.pickups
    }
}

#[cfg(test)]
impl<R: RandomSource> LaneDodge<R> {
    pub(crate) fn test_push_hazard(&mut self, lane: usize, y: f32) {
        let mut hazard = Faller::new(lane, LaneItem::Hazard, self.tuning.object_size);
        hazard.y = y;
        self.hazards.push(hazard);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::events::CueLog;
    use crate::sim::rng::ScriptedRolls;
    use proptest::prelude::*;
    use std::cell::{Cell, RefCell};

    fn pinned(roll: f32) -> LaneDodge<ScriptedRolls> {
        LaneDodge::new(LaneTuning::default(), ScriptedRolls::constant(roll))
    }

    #[test]
    fn test_update_is_noop_before_start() {
        let mut game = pinned(0.5);
        for _ in 0..100 {
            game.update();
        }
        assert_eq!(game.elapsed_ticks(), 0);
        assert!(game.hazards().is_empty());
    }

    #[test]
    fn test_pose_labels_pick_lane() {
        let mut game = pinned(0.5);
        game.on_signal(&Signal::pose("Left"));
        assert_eq!(game.lane(), 1, "ignored while not playing");

        game.start();
        game.on_signal(&Signal::pose("Left"));
        assert_eq!(game.lane(), 0);
        game.on_signal(&Signal::pose("right"));
        assert_eq!(game.lane(), 2);
        game.on_signal(&Signal::pose("Wave"));
        assert_eq!(game.lane(), 2);
        game.on_signal(&Signal::pose("Center"));
        assert_eq!(game.lane(), 1);
    }

    #[test]
    fn test_arrow_keys_shift_lane() {
        let mut game = pinned(0.5);
        game.start();
        game.on_signal(&Signal::key_down(KeyCode::ArrowRight));
        game.on_signal(&Signal::key_down(KeyCode::ArrowRight));
        assert_eq!(game.lane(), 2);
        game.on_signal(&Signal::key_up(KeyCode::ArrowLeft));
        assert_eq!(game.lane(), 2);
        for _ in 0..4 {
            game.on_signal(&Signal::key_down(KeyCode::ArrowLeft));
        }
        assert_eq!(game.lane(), 0);
        game.set_player_lane(7);
        assert_eq!(game.lane(), 0);
    }

    #[test]
    fn test_spawn_cadence() {
        let mut game = pinned(0.5);
        game.start();
        for _ in 0..57 {
            game.update();
        }
        assert!(game.hazards().is_empty());
        game.update();
        assert_eq!(game.hazards().len(), 1);
        assert_eq!(game.hazards()[0].lane, 1);
    }

    #[test]
    fn test_coin_scores_when_caught() {
        let mut game = pinned(0.9);
        let audio = Rc::new(CueLog::new());
        game.set_audio(audio.clone());
        game.start();
        game.pickups.push(Faller {
            lane: 2,
            y: 449.0,
            size: 50.0,
            kind: LaneItem::Coin,
            alive: true,
        });
        game.set_player_lane(2);
        game.update();
        assert_eq!(game.score(), 100);
        assert!(game.pickups().is_empty());
        assert_eq!(audio.count(Cue::Coin), 1);
    }

    #[test]
    fn test_other_lane_passes_by() {
        let mut game = pinned(0.5);
        game.start();
        game.hazards.push(Faller::new(0, LaneItem::Hazard, 50.0));
        for _ in 0..400 {
            game.update();
            game.hazards.retain(|h| h.lane == 0);
        }
        assert_eq!(game.hp(), 3);
        assert!(game.hazards().is_empty(), "dropped past the bottom");
    }

    #[test]
    fn test_new_coin_replaces_old() {
        let mut game = pinned(0.9);
        game.start();
        game.pickups.push(Faller::new(0, LaneItem::Coin, 50.0));
        game.spawn();
        assert_eq!(game.pickups().len(), 1);
        assert_eq!(game.pickups()[0].lane, 2);
        assert_eq!(game.pickups()[0].y, LANE_SPAWN_Y);
    }

    #[test]
    fn test_score_drives_level() {
        let mut game = pinned(0.5);
        let levels = Rc::new(RefCell::new(Vec::new()));
        game.set_observers(Observers {
            on_score: Some({
                let levels = levels.clone();
                Rc::new(move |_, level| levels.borrow_mut().push(level))
            }),
            ..Default::default()
        });
        game.start();
        game.score = 1000;
        game.update();
        assert_eq!(game.level(), 3);
        assert_eq!(*levels.borrow(), vec![1, 3]);
        assert_eq!(game.fall_speed(), 4.5);
    }

    #[test]
    fn test_three_hits_end_the_session() {
        let mut game = pinned(0.5);
        let ends = Rc::new(RefCell::new(Vec::new()));
        let hp_reports = Rc::new(RefCell::new(Vec::new()));
        game.set_observers(Observers {
            on_hp: Some({
                let hp_reports = hp_reports.clone();
                Rc::new(move |hp| hp_reports.borrow_mut().push(hp))
            }),
            on_end: Some({
                let ends = ends.clone();
                Rc::new(move |score, reason| ends.borrow_mut().push((score, reason)))
            }),
            ..Default::default()
        });
        game.start();
        game.score = 200;

        let mut ticks = 0;
        while game.is_playing() && ticks < 2000 {
            game.update();
            ticks += 1;
        }

        assert!(!game.is_playing());
        assert_eq!(game.hp(), 0);
        assert_eq!(*hp_reports.borrow(), vec![3, 2, 1, 0]);
        assert_eq!(*ends.borrow(), vec![(200, EndReason::Defeated { level: 1 })]);

        let before = game.scoreboard();
        game.update();
        game.stop();
        assert_eq!(game.scoreboard(), before);
        assert_eq!(ends.borrow().len(), 1);
    }

    #[test]
    fn test_stop_reports_once() {
        let mut game = pinned(0.5);
        let ends = Rc::new(Cell::new(0));
        game.set_observers(Observers {
            on_end: Some({
                let ends = ends.clone();
                Rc::new(move |_, reason| {
                    assert_eq!(reason, EndReason::Stopped { level: 1 });
                    ends.set(ends.get() + 1);
                })
            }),
            ..Default::default()
        });
        game.stop();
        assert_eq!(ends.get(), 0, "nothing to stop before start");
        game.start();
        game.stop();
        game.stop();
        assert_eq!(ends.get(), 1);
        assert_eq!(game.phase(), SessionPhase::GameOver);
    }

    #[test]
    fn test_grace_blocks_back_to_back_hits() {
        let tuning = LaneTuning {
            hit_grace_ticks: 30,
            ..Default::default()
        };
        let mut game = LaneDodge::new(tuning, ScriptedRolls::constant(0.5));
        game.start();
        for _ in 0..2 {
            let mut h = Faller::new(1, LaneItem::Hazard, 50.0);
            h.y = 480.0;
            game.hazards.push(h);
        }
        let audio = Rc::new(CueLog::new());
        game.set_audio(audio.clone());
        game.update();
        assert_eq!(game.hp(), 2);
        assert_eq!(game.score(), 50, "second hazard smashed during grace");
        assert!(game.hazards().is_empty());
        assert_eq!(audio.count(Cue::Hit), 2, "smash sounds like a hit");
    }

    #[test]
    fn test_coin_ignored_on_fatal_tick() {
        let tuning = LaneTuning {
            start_hp: 1,
            ..Default::default()
        };
        let mut game = LaneDodge::new(tuning, ScriptedRolls::constant(0.5));
        let ends = Rc::new(RefCell::new(Vec::new()));
        game.set_observers(Observers {
            on_end: Some({
                let ends = ends.clone();
                Rc::new(move |score, reason| ends.borrow_mut().push((score, reason)))
            }),
            ..Default::default()
        });
        game.start();
        for kind in [LaneItem::Hazard, LaneItem::Coin] {
            let mut f = Faller::new(1, kind, 50.0);
            f.y = 480.0;
            match kind {
                LaneItem::Hazard => game.hazards.push(f),
                LaneItem::Coin => game.pickups.push(f),
            }
        }
        game.update();

        assert_eq!(game.hp(), 0);
        assert_eq!(game.score(), 0);
        assert_eq!(*ends.borrow(), vec![(0, EndReason::Defeated { level: 1 })]);
    }

    fn label_strategy() -> impl Strategy<Value = String> {
        prop_oneof![
            Just("Left".to_string()),
            Just("Center".to_string()),
            Just("Right".to_string()),
            Just("Jump".to_string()),
            "[a-z]{0,8}",
        ]
    }

    proptest! {
        #[test]
        fn prop_lane_keeps_only_live_fallers(
            seed in any::<u64>(),
            inputs in prop::collection::vec((label_strategy(), 1usize..60), 1..30),
        ) {
            let tuning = LaneTuning {
                start_hp: 1_000,
                ..Default::default()
            };
            let mut game = LaneDodge::seeded(tuning, seed);
            game.start();
            for (label, ticks) in inputs {
                game.on_signal(&Signal::pose(&label));
                for _ in 0..ticks {
                    game.update();
                    prop_assert!(game.hazards().iter().all(|h| h.alive));
                    prop_assert!(game.pickups().iter().all(|c| c.alive));
                    prop_assert!(game.pickups().len() <= 1);
                    prop_assert!(game.lane() < LANE_COUNT);
                }
            }
        }
    }
}
