//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (one `update` per tick)
//! - Seeded RNG only
//! - Entities are marked dead during a tick and compacted at its end
//! - No rendering or platform dependencies

pub mod arena;
pub mod collision;
pub mod entity;
pub mod events;
pub mod input;
pub mod lane;
pub mod pickup;
pub mod progression;
pub mod projectile;
pub mod rng;
pub mod spawn;
pub mod timer;

use serde::{Deserialize, Serialize};

pub use arena::{ArenaSurvival, Avatar};
pub use collision::{Contact, Grace, resolve_hostile_contact};
pub use entity::{Behavior, Hostile, Phase, ScriptedMotion};
pub use events::{AudioSink, ChangeTracker, Cue, CueLog, EndReason, Observers, Scoreboard, Silent};
pub use input::{KeyCode, KeyState, LaneCall, Signal};
pub use lane::{Faller, LaneDodge, LaneItem};
pub use pickup::{Pickup, PickupKind};
pub use progression::{LevelPolicy, Progression};
pub use projectile::Projectile;
pub use rng::{RandomSource, ScriptedRolls};
pub use spawn::{Edge, SpawnClock, SpawnTable};
pub use timer::TickTimer;

/// Session lifecycle shared by both games
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Waiting for the first `start`
    #[default]
    Idle,
    Playing,
    GameOver,
}
