//! Collectible items in the arena

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::events::Cue;
use super::spawn::SpawnTable;

/// What a pickup does when collected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PickupKind {
    /// Plain currency
    Coin,
    /// Long invincibility (rare)
    Star,
    /// Grants the fireball ability
    FireFlower,
    /// +1 HP
    Mushroom,
    /// Temporary speed boost
    Balloon,
    /// Destroys every live hostile
    Bomb,
    /// Instant level-up
    Crown,
}

impl PickupKind {
    /// Spawn odds: 5% star, 10% each fire flower / mushroom / balloon,
    /// 5% each bomb / crown, the rest coins
    pub fn table() -> SpawnTable<PickupKind> {
        SpawnTable::new(
            vec![
                (0.05, PickupKind::Star),
                (0.15, PickupKind::FireFlower),
                (0.25, PickupKind::Mushroom),
                (0.35, PickupKind::Balloon),
                (0.40, PickupKind::Bomb),
                (0.45, PickupKind::Crown),
            ],
            PickupKind::Coin,
        )
    }

    pub fn size(self) -> f32 {
        match self {
            PickupKind::Coin => 15.0,
            _ => 20.0,
        }
    }

    /// Points awarded on collection
    pub fn reward(self) -> u32 {
        match self {
            PickupKind::Coin => 10,
            PickupKind::Star => 100,
            _ => 50,
        }
    }

    pub fn cue(self) -> Cue {
        match self {
            PickupKind::Coin | PickupKind::Balloon => Cue::Coin,
            PickupKind::Star | PickupKind::FireFlower | PickupKind::Crown => Cue::LevelUp,
            PickupKind::Mushroom => Cue::Heal,
            PickupKind::Bomb => Cue::AreaClear,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pickup {
    pub pos: Vec2,
    pub size: f32,
    pub kind: PickupKind,
    pub alive: bool,
}

impl Pickup {
    pub fn new(kind: PickupKind, pos: Vec2) -> Self {
        Self {
            pos,
            size: kind.size(),
            kind,
            alive: true,
        }
    }
}
