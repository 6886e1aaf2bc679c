//! Data-driven game balance
//!
//! Defaults reproduce the shipped games. A JSON override may set any subset
//! of fields; missing fields keep their defaults.

use serde::{Deserialize, Serialize};

/// Balance for both games
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub lane: LaneTuning,
    pub arena: ArenaTuning,
}

impl Tuning {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Parse an override, falling back to defaults on malformed input
    pub fn from_json_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::warn!("Ignoring malformed tuning override: {}", e);
                Self::default()
            }
        }
    }
}

/// Body Dodge balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LaneTuning {
    pub start_hp: u32,
    /// Ticks between spawns at level 0
    pub spawn_interval: u32,
    /// Interval reduction per level
    pub interval_step: u32,
    pub min_interval: u32,
    /// Fall speed is `base_speed + speed_per_level * level`
    pub base_speed: f32,
    pub speed_per_level: f32,
    /// Share of spawns that are coins
    pub coin_chance: f32,
    pub coin_reward: u32,
    /// Reward for smashing an obstacle while invincible
    pub smash_reward: u32,
    pub score_per_level: u32,
    /// Grace invincibility after a hit (0 = none)
    pub hit_grace_ticks: u32,
    /// Side length of falling objects, in reference units
    pub object_size: f32,
    /// A new coin clears any uncollected coin
    pub replace_pickups: bool,
}

impl Default for LaneTuning {
    fn default() -> Self {
        Self {
            start_hp: 3,
            spawn_interval: 60,
            interval_step: 2,
            min_interval: 20,
            base_speed: 3.0,
            speed_per_level: 0.5,
            coin_chance: 0.2,
            coin_reward: 100,
            smash_reward: 50,
            score_per_level: 500,
            hit_grace_ticks: 0,
            object_size: 50.0,
            replace_pickups: true,
        }
    }
}

/// Avoid & Collect balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaTuning {
    // === Actor ===
    pub start_hp: u32,
    pub actor_size: f32,
    pub actor_speed: f32,
    /// Grace invincibility after losing HP
    pub hit_grace_ticks: u32,
    /// Grace invincibility after losing the fire ability
    pub ability_grace_ticks: u32,
    pub star_ticks: u32,
    pub boost_ticks: u32,
    pub boost_multiplier: f32,

    // === Pacing ===
    pub enemy_interval: u32,
    pub enemy_interval_step: u32,
    pub min_enemy_interval: u32,
    pub item_interval: u32,
    pub ticks_per_level: u32,
    /// Hostile speed grows by this factor per level above 1
    pub speed_per_level: f32,

    // === Hostiles ===
    pub kill_reward: u32,
    pub bullet_chance: f32,
    pub wall_chance: f32,
    pub bullet_size: f32,
    pub bullet_speed: f32,
    pub wall_size: f32,
    pub wall_inset: f32,
    pub wall_resident_ticks: u32,
    pub wall_anim_step: f32,
    pub chaser_size: f32,
    pub chaser_min_speed: f32,
    pub chaser_speed_spread: f32,

    // === Fireball ===
    pub fireball_speed: f32,
    pub fireball_size: f32,
    pub fireball_life: u32,
    pub fireball_cooldown: u32,

    /// Pickups spawn at least this far from the edges
    pub item_inset: f32,
}

impl Default for ArenaTuning {
    fn default() -> Self {
        Self {
            start_hp: 3,
            actor_size: 60.0,
            actor_speed: 4.0,
            hit_grace_ticks: 60,
            ability_grace_ticks: 60,
            star_ticks: 600,
            boost_ticks: 600,
            boost_multiplier: 2.0,

            enemy_interval: 60,
            enemy_interval_step: 5,
            min_enemy_interval: 20,
            item_interval: 100,
            ticks_per_level: 1800,
            speed_per_level: 0.1,

            kill_reward: 50,
            bullet_chance: 0.2,
            wall_chance: 0.3,
            bullet_size: 40.0,
            bullet_speed: 4.0,
            wall_size: 30.0,
            wall_inset: 20.0,
            wall_resident_ticks: 300,
            wall_anim_step: 0.05,
            chaser_size: 20.0,
            chaser_min_speed: 1.5,
            chaser_speed_spread: 1.5,

            fireball_speed: 5.0,
            fireball_size: 20.0,
            fireball_life: 600,
            fireball_cooldown: 15,

            item_inset: 20.0,
        }
    }
}
