//! Application context
//!
//! [`AppContext`] owns everything a running page needs: the active game, the
//! audio sink, the HUD observers and the input binding. The host creates one
//! at init and tears it down through [`AppContext::stop`].

use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::render::{self, Surface};
use crate::sim::{
    ArenaSurvival, AudioSink, LaneDodge, Observers, RandomSource, Scoreboard, Signal,
};
use crate::tuning::Tuning;

/// Common surface of both games
pub trait Minigame {
    fn kind(&self) -> GameKind;
    fn start(&mut self);
    fn stop(&mut self);
    /// Advance one tick
    fn update(&mut self);
    fn draw(&self, surface: &mut dyn Surface, width: f32, height: f32);
    fn on_signal(&mut self, signal: &Signal);
    fn is_playing(&self) -> bool;
    fn scoreboard(&self) -> Scoreboard;
    fn set_observers(&mut self, observers: Observers);
    fn set_audio(&mut self, audio: Rc<dyn AudioSink>);
}

impl<R: RandomSource> Minigame for LaneDodge<R> {
    fn kind(&self) -> GameKind {
        GameKind::BodyDodge
    }

    fn start(&mut self) {
        LaneDodge::start(self)
    }

    fn stop(&mut self) {
        LaneDodge::stop(self)
    }

    fn update(&mut self) {
        LaneDodge::update(self)
    }

    fn draw(&self, surface: &mut dyn Surface, width: f32, height: f32) {
        render::lane::draw(self, surface, width, height)
    }

    fn on_signal(&mut self, signal: &Signal) {
        LaneDodge::on_signal(self, signal)
    }

    fn is_playing(&self) -> bool {
        LaneDodge::is_playing(self)
    }

    fn scoreboard(&self) -> Scoreboard {
        LaneDodge::scoreboard(self)
    }

    fn set_observers(&mut self, observers: Observers) {
        LaneDodge::set_observers(self, observers)
    }

    fn set_audio(&mut self, audio: Rc<dyn AudioSink>) {
        LaneDodge::set_audio(self, audio)
    }
}

impl<R: RandomSource> Minigame for ArenaSurvival<R> {
    fn kind(&self) -> GameKind {
        GameKind::AvoidCollect
    }

    fn start(&mut self) {
        ArenaSurvival::start(self)
    }

    fn stop(&mut self) {
        ArenaSurvival::stop(self)
    }

    fn update(&mut self) {
        ArenaSurvival::update(self)
    }

    fn draw(&self, surface: &mut dyn Surface, width: f32, height: f32) {
        render::arena::draw(self, surface, width, height)
    }

    fn on_signal(&mut self, signal: &Signal) {
        ArenaSurvival::on_signal(self, signal)
    }

    fn is_playing(&self) -> bool {
        ArenaSurvival::is_playing(self)
    }

    fn scoreboard(&self) -> Scoreboard {
        ArenaSurvival::scoreboard(self)
    }

    fn set_observers(&mut self, observers: Observers) {
        ArenaSurvival::set_observers(self, observers)
    }

    fn set_audio(&mut self, audio: Rc<dyn AudioSink>) {
        ArenaSurvival::set_audio(self, audio)
    }
}

/// Which minigame to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GameKind {
    /// Three-lane dodge driven by pose labels or arrow keys
    #[default]
    BodyDodge,
    /// Free-movement arena survival
    AvoidCollect,
}

impl GameKind {
    pub fn title(self) -> &'static str {
        match self {
            GameKind::BodyDodge => "Body Dodge",
            GameKind::AvoidCollect => "Avoid & Collect",
        }
    }

    /// Parse a host-side identifier such as `"body-dodge"` or `"arena"`
    pub fn from_id(id: &str) -> Option<Self> {
        match id.trim().to_ascii_lowercase().as_str() {
            "body-dodge" | "bodydodge" | "lane" | "game1" => Some(GameKind::BodyDodge),
            "avoid-collect" | "avoidcollect" | "arena" | "game2" => Some(GameKind::AvoidCollect),
            _ => None,
        }
    }

    /// Build a fresh, idle game
    pub fn build(self, tuning: &Tuning, seed: u64) -> Box<dyn Minigame> {
        match self {
            GameKind::BodyDodge => Box::new(LaneDodge::seeded(tuning.lane.clone(), seed)),
            GameKind::AvoidCollect => Box::new(ArenaSurvival::seeded(tuning.arena.clone(), seed)),
        }
    }
}

/// Host-side input source that can be unhooked
pub trait InputBinding {
    /// Remove any listeners; called once when the binding is replaced or the
    /// session is torn down
    fn detach(&mut self);
}

/// Owns the running game and its host handles
pub struct AppContext {
    game: Box<dyn Minigame>,
    tuning: Tuning,
    seed: u64,
    audio: Rc<dyn AudioSink>,
    observers: Observers,
    input: Option<Box<dyn InputBinding>>,
}

impl AppContext {
    pub fn new(
        kind: GameKind,
        tuning: Tuning,
        seed: u64,
        audio: Rc<dyn AudioSink>,
        observers: Observers,
    ) -> Self {
        let mut game = kind.build(&tuning, seed);
        game.set_audio(audio.clone());
        game.set_observers(observers.clone());
        log::info!("{} ready (seed {})", kind.title(), seed);
        Self {
            game,
            tuning,
            seed,
            audio,
            observers,
            input: None,
        }
    }

    pub fn kind(&self) -> GameKind {
        self.game.kind()
    }

    pub fn is_playing(&self) -> bool {
        self.game.is_playing()
    }

    pub fn scoreboard(&self) -> Scoreboard {
        self.game.scoreboard()
    }

    pub fn has_input(&self) -> bool {
        self.input.is_some()
    }

    /// Install an input binding, detaching the previous one
    pub fn attach_input(&mut self, binding: Box<dyn InputBinding>) {
        self.detach_input();
        self.input = Some(binding);
    }

    fn detach_input(&mut self) {
        if let Some(mut old) = self.input.take() {
            old.detach();
            log::debug!("Input binding detached");
        }
    }

    pub fn start(&mut self) {
        self.game.start();
    }

    /// Stop the running session and release input
    pub fn stop(&mut self) {
        self.game.stop();
        self.detach_input();
    }

    pub fn signal(&mut self, signal: &Signal) {
        self.game.on_signal(signal);
    }

    /// One display frame: tick the game, then draw it.
    /// Input is released when the session ends on its own.
    pub fn frame(&mut self, surface: &mut dyn Surface, width: f32, height: f32) {
        let was_playing = self.game.is_playing();
        self.game.update();
        self.game.draw(surface, width, height);
        if was_playing && !self.game.is_playing() {
            self.detach_input();
        }
    }

    /// Replace the active game with a fresh idle instance of `kind`
    pub fn switch_game(&mut self, kind: GameKind) {
        if kind == self.kind() {
            return;
        }
        self.game.stop();
        self.seed = self.seed.wrapping_add(1);
        let mut game = kind.build(&self.tuning, self.seed);
        game.set_audio(self.audio.clone());
        game.set_observers(self.observers.clone());
        self.game = game;
        log::info!("Switched to {}", kind.title());
    }
}

impl Drop for AppContext {
    fn drop(&mut self) {
        self.detach_input();
    }
}
