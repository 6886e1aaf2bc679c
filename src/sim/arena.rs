//! Avoid & Collect: free movement in a square arena
//!
//! Hostiles stream in from the edges, items appear one at a time, and the
//! fire flower lets the avatar throw bouncing fireballs. Levels advance with
//! elapsed ticks and can be pushed ahead by the crown pickup.

use std::rc::Rc;

use glam::Vec2;
use rand_pcg::Pcg32;

use super::collision::{Contact, Grace, resolve_hostile_contact};
use super::entity::Hostile;
use super::events::{AudioSink, ChangeTracker, Cue, EndReason, Observers, Scoreboard, Silent};
use super::input::{KeyCode, KeyState, Signal};
use super::pickup::{Pickup, PickupKind};
use super::progression::{LevelPolicy, Progression};
use super::projectile::Projectile;
use super::rng::{self, RandomSource};
use super::spawn::{Edge, SpawnClock, SpawnTable, shrinking_interval};
use super::timer::TickTimer;
use super::SessionPhase;
use crate::consts::*;
use crate::tuning::ArenaTuning;
use crate::{circles_overlap, clamp_to_field};

/// The player's character
#[derive(Debug, Clone)]
pub struct Avatar {
    pub pos: Vec2,
    pub size: f32,
    pub speed: f32,
    pub has_fire_power: bool,
    pub invincible: TickTimer,
    pub speed_boost: TickTimer,
    pub fire_cooldown: TickTimer,
}

impl Avatar {
    fn new(tuning: &ArenaTuning) -> Self {
        Self {
            pos: Vec2::splat(ARENA_SIZE / 2.0),
            size: tuning.actor_size,
            speed: tuning.actor_speed,
            has_fire_power: false,
            invincible: TickTimer::idle(),
            speed_boost: TickTimer::idle(),
            fire_cooldown: TickTimer::idle(),
        }
    }
}

/// Hostile spawn categories
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HostileKind {
    Bullet,
    Wall,
    Chaser,
}

/// Avoid & Collect simulation
pub struct ArenaSurvival<R: RandomSource = Pcg32> {
    tuning: ArenaTuning,
    rng: R,
    hostile_kinds: SpawnTable<HostileKind>,
    item_kinds: SpawnTable<PickupKind>,
    phase: SessionPhase,
    score: u32,
    hp: u32,
    avatar: Avatar,
    keys: KeyState,
    fire_requested: bool,
    progression: Progression,
    enemy_clock: SpawnClock,
    item_clock: SpawnClock,
    hostiles: Vec<Hostile>,
    pickups: Vec<Pickup>,
    projectiles: Vec<Projectile>,
    elapsed_ticks: u64,
    tracker: ChangeTracker,
    observers: Observers,
    audio: Rc<dyn AudioSink>,
}

impl ArenaSurvival<Pcg32> {
    pub fn seeded(tuning: ArenaTuning, seed: u64) -> Self {
        Self::new(tuning, rng::seeded(seed))
    }
}

impl<R: RandomSource> ArenaSurvival<R> {
    pub fn new(tuning: ArenaTuning, rng: R) -> Self {
        let hostile_kinds = SpawnTable::new(
            vec![
                (tuning.bullet_chance, HostileKind::Bullet),
                (tuning.bullet_chance + tuning.wall_chance, HostileKind::Wall),
            ],
            HostileKind::Chaser,
        );
        let progression = Progression::new(LevelPolicy::Time {
            ticks_per_level: tuning.ticks_per_level,
        });
        Self {
            hp: tuning.start_hp,
            avatar: Avatar::new(&tuning),
            tuning,
            rng,
            hostile_kinds,
            item_kinds: PickupKind::table(),
            phase: SessionPhase::Idle,
            score: 0,
            keys: KeyState::default(),
            fire_requested: false,
            progression,
            enemy_clock: SpawnClock::default(),
            item_clock: SpawnClock::default(),
            hostiles: Vec::new(),
            pickups: Vec::new(),
            projectiles: Vec::new(),
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
        self.avatar = Avatar::new(&self.tuning);
        self.keys = KeyState::default();
        self.fire_requested = false;
        self.progression.reset();
        self.enemy_clock.reset();
        self.item_clock.reset();
        self.hostiles.clear();
        self.pickups.clear();
        self.projectiles.clear();
        self.elapsed_ticks = 0;
        self.tracker.announce(self.scoreboard(), &self.observers);
        log::info!("Avoid & Collect started (hp {})", self.hp);
    }

    /// End a running session early
    pub fn stop(&mut self) {
        if self.phase == SessionPhase::Playing {
            self.finish(EndReason::Stopped {
                level: self.level(),
            });
        }
    }

    /// Buffer a key transition; pose labels are not used by this game
    pub fn on_signal(&mut self, signal: &Signal) {
        if self.phase != SessionPhase::Playing {
            return;
        }
        match *signal {
            Signal::Key {
                code: KeyCode::Space,
                pressed,
            } => {
                if pressed {
                    self.fire_requested = true;
                }
            }
            Signal::Key { code, pressed } => {
                self.keys.apply(code, pressed);
            }
            Signal::Pose(_) => {}
        }
    }

    /// Advance exactly one tick
    pub fn update(&mut self) {
        if self.phase != SessionPhase::Playing {
            return;
        }

        // 1. Timers
        self.avatar.invincible.tick();
        self.avatar.speed_boost.tick();
        self.avatar.fire_cooldown.tick();
        self.elapsed_ticks += 1;

        // 2. Avatar movement
        let speed = if self.avatar.speed_boost.is_active() {
            self.avatar.speed * self.tuning.boost_multiplier
        } else {
            self.avatar.speed
        };
        self.avatar.pos += self.keys.direction() * speed;
        self.avatar.pos = clamp_to_field(self.avatar.pos, self.avatar.size, ARENA_SIZE);

        if std::mem::take(&mut self.fire_requested) {
            self.try_fire();
        }

        // 3. Spawning
        let interval = shrinking_interval(
            self.tuning.enemy_interval,
            self.tuning.enemy_interval_step,
            self.level() - 1,
            self.tuning.min_enemy_interval,
        );
        if self.enemy_clock.advance(interval) {
            self.spawn_hostile();
        }
        if self.item_clock.advance(self.tuning.item_interval) {
            self.spawn_item();
        }

        // 4. Fireballs
        self.step_projectiles();

        // 5. Hostiles
        let defeated = self.step_hostiles();

        // 6. Items, untouched once the avatar is down
        for i in 0..self.pickups.len() {
            let pickup = &self.pickups[i];
            if defeated
                || !pickup.alive
                || !circles_overlap(self.avatar.pos, self.avatar.size, pickup.pos, pickup.size)
            {
                continue;
            }
            let kind = pickup.kind;
            self.pickups[i].alive = false;
            self.collect(kind);
        }

        // 7. Compact
        self.projectiles.retain(|p| p.alive);
        self.hostiles.retain(|h| h.alive);
        self.pickups.retain(|p| p.alive);

        // 8. Level + observers
        if self.progression.recompute(self.score, self.elapsed_ticks) {
            log::info!("Avoid & Collect level {}", self.level());
            self.audio.play(Cue::LevelUp);
        }
        self.tracker.flush(self.scoreboard(), &self.observers);

        if defeated || self.hp == 0 {
            self.finish(EndReason::Defeated {
                level: self.level(),
            });
        }
    }

    fn try_fire(&mut self) {
        if !self.avatar.has_fire_power || self.avatar.fire_cooldown.is_active() {
            return;
        }
        let s = self.tuning.fireball_speed;
        let vx = if self.rng.coin_flip() { -s } else { s };
        let vy = if self.rng.coin_flip() { -s } else { s };
        self.projectiles.push(Projectile::new(
            self.avatar.pos,
            Vec2::new(vx, vy),
            self.tuning.fireball_size,
            self.tuning.fireball_life,
        ));
        self.avatar.fire_cooldown.set(self.tuning.fireball_cooldown);
        self.audio.play(Cue::Coin);
    }

    /// Each fireball kills at most one hostile per tick
    fn step_projectiles(&mut self) {
        for p in self.projectiles.iter_mut().filter(|p| p.alive) {
            p.step(ARENA_SIZE);
            if !p.alive {
                continue;
            }
            if let Some(h) = self
                .hostiles
                .iter_mut()
                .find(|h| h.alive && circles_overlap(p.pos, p.size, h.pos, h.size))
            {
                h.alive = false;
                p.alive = false;
                self.score += self.tuning.kill_reward;
                self.audio.play(Cue::Hit);
                log::debug!("Fireball hit at {:?}", h.pos);
            }
        }
    }

    /// Move hostiles, resolve friendly fire and avatar contact.
    /// Returns true if the avatar was defeated this tick.
    fn step_hostiles(&mut self) -> bool {
        let grace = Grace {
            hit: self.tuning.hit_grace_ticks,
            ability: self.tuning.ability_grace_ticks,
        };
        let mut defeated = false;

        for i in 0..self.hostiles.len() {
            if !self.hostiles[i].alive {
                continue;
            }
            self.hostiles[i].advance(self.avatar.pos, ARENA_SIZE, ARENA_ESCAPE_MARGIN);
            if !self.hostiles[i].alive {
                continue;
            }

            if self.hostiles[i].is_ballistic() {
                let (pos, size) = (self.hostiles[i].pos, self.hostiles[i].size);
                let victim = (0..self.hostiles.len()).find(|&j| {
                    j != i
                        && self.hostiles[j].alive
                        && circles_overlap(pos, size, self.hostiles[j].pos, self.hostiles[j].size)
                });
                if let Some(j) = victim {
                    self.hostiles[i].alive = false;
                    self.hostiles[j].alive = false;
                    self.audio.play(Cue::Hit);
                    continue;
                }
            }

            let hostile = &self.hostiles[i];
            if defeated
                || !circles_overlap(self.avatar.pos, self.avatar.size, hostile.pos, hostile.size)
            {
                continue;
            }

            let contact = resolve_hostile_contact(
                &mut self.hp,
                &mut self.avatar.invincible,
                Some(&mut self.avatar.has_fire_power),
                grace,
            );
            log::debug!("Avatar contact: {:?}", contact);
            match contact {
                Contact::Smashed => {
                    self.hostiles[i].alive = false;
                    self.score += self.tuning.kill_reward;
                }
                Contact::AbilityLost | Contact::Wounded { .. } => {}
                Contact::Defeated => defeated = true,
            }
            self.audio.play(Cue::Hit);
        }

        defeated
    }

    fn collect(&mut self, kind: PickupKind) {
        match kind {
            PickupKind::Coin => {}
            PickupKind::Star => self.avatar.invincible.set(self.tuning.star_ticks),
            PickupKind::FireFlower => self.avatar.has_fire_power = true,
            PickupKind::Mushroom => self.hp += 1,
            PickupKind::Balloon => self.avatar.speed_boost.set(self.tuning.boost_ticks),
            PickupKind::Bomb => {
                let mut cleared = 0;
                for h in self.hostiles.iter_mut().filter(|h| h.alive) {
                    h.alive = false;
                    cleared += 1;
                }
                log::debug!("Bomb cleared {} hostiles", cleared);
            }
            PickupKind::Crown => {
                let level = self.progression.grant_next();
                log::info!("Crown: jumped to level {}", level);
            }
        }
        self.score += kind.reward();
        self.audio.play(kind.cue());
    }

    fn spawn_hostile(&mut self) {
        let scale = self.speed_scale();
        let t = &self.tuning;
        let hostile = match self.hostile_kinds.roll(&mut self.rng) {
            HostileKind::Bullet => {
                let edge = Edge::random(&mut self.rng);
                let along = self.rng.range(0.0, ARENA_SIZE);
                Hostile::bullet(edge, along, t.bullet_size, t.bullet_speed * scale, ARENA_SIZE)
            }
            HostileKind::Wall => {
                let edge = Edge::random(&mut self.rng);
                let along = self.rng.range(0.0, ARENA_SIZE);
                Hostile::wall(
                    edge,
                    along,
                    t.wall_size,
                    t.wall_inset,
                    ARENA_SIZE,
                    t.wall_anim_step,
                    t.wall_resident_ticks,
                )
            }
            HostileKind::Chaser => {
                let pos = if self.rng.coin_flip() {
                    let x = if self.rng.coin_flip() { 0.0 } else { ARENA_SIZE };
                    Vec2::new(x, self.rng.range(0.0, ARENA_SIZE))
                } else {
                    let x = self.rng.range(0.0, ARENA_SIZE);
                    let y = if self.rng.coin_flip() { 0.0 } else { ARENA_SIZE };
                    Vec2::new(x, y)
                };
                let speed = self.rng.range(t.chaser_min_speed, t.chaser_min_speed + t.chaser_speed_spread);
                Hostile::chaser(pos, t.chaser_size, speed * scale)
            }
        };
        log::debug!("Spawned hostile {:?} at {:?}", hostile.behavior, hostile.pos);
        self.hostiles.push(hostile);
    }

    /// Replaces whatever item is on the field
    fn spawn_item(&mut self) {
        self.pickups.clear();
        let kind = self.item_kinds.roll(&mut self.rng);
        let inset = self.tuning.item_inset;
        let x = self.rng.range(inset, ARENA_SIZE - inset);
        let y = self.rng.range(inset, ARENA_SIZE - inset);
        self.pickups.push(Pickup::new(kind, Vec2::new(x, y)));
    }

    fn finish(&mut self, reason: EndReason) {
        self.phase = SessionPhase::GameOver;
        self.keys = KeyState::default();
        self.audio.play(Cue::GameOver);
        log::info!("Avoid & Collect over: score {} ({:?})", self.score, reason);
        self.observers.ended(self.score, reason);
    }

    /// Hostile speed multiplier at the current level
    pub fn speed_scale(&self) -> f32 {
        1.0 + self.tuning.speed_per_level * (self.level() - 1) as f32
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

    pub fn avatar(&self) -> &Avatar {
        &self.avatar
    }

    pub fn elapsed_ticks(&self) -> u64 {
        self.elapsed_ticks
    }

    pub fn hostiles(&self) -> &[Hostile] {
        &self.hostiles
    }

    pub fn pickups(&self) -> &[Pickup] {
        &self.pickups
    }

    pub fn projectiles(&self) -> &[Projectile] {
        &self.projectiles
    }
}

#[cfg(test)]
impl<R: RandomSource> ArenaSurvival<R> {
    pub(crate) fn test_push_hostile(&mut self, hostile: Hostile) {
        self.hostiles.push(hostile);
    }

    pub(crate) fn test_push_pickup(&mut self, pickup: Pickup) {
        self.pickups.push(pickup);
    }

    pub(crate) fn test_push_projectile(&mut self, projectile: Projectile) {
        self.projectiles.push(projectile);
    }

    pub(crate) fn test_avatar_mut(&mut self) -> &mut Avatar {
        &mut self.avatar
    }
}
