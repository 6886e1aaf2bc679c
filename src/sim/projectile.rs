//! Player fireballs

use glam::Vec2;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    /// Ticks left before it fizzles
    pub life: u32,
    pub alive: bool,
}

impl Projectile {
    pub fn new(pos: Vec2, vel: Vec2, size: f32, life: u32) -> Self {
        Self {
            pos,
            vel,
            size,
            life,
            alive: life > 0,
        }
    }

    /// Integrate, bounce off the field edges, and age by one tick
    pub fn step(&mut self, extent: f32) {
        self.pos += self.vel;
        if self.pos.x <= 0.0 || self.pos.x >= extent {
            self.vel.x = -self.vel.x;
        }
        if self.pos.y <= 0.0 || self.pos.y >= extent {
            self.vel.y = -self.vel.y;
        }
        self.life = self.life.saturating_sub(1);
        if self.life == 0 {
            self.alive = false;
        }
    }
}
