//! Hostile entities and their movement behaviors
//!
//! Behavior is a closed enum; the arena step and the renderer both match on
//! it exhaustively, so a new variant will not compile until both handle it.

use std::f32::consts::{FRAC_PI_2, PI};

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::spawn::Edge;

/// Lifecycle of a scripted-entry-exit hostile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Sliding in from the origin toward the target
    Entering,
    /// Parked at the target while the resident countdown runs
    Resident,
    /// Sliding back out from the target to the origin
    Exiting,
    /// Finished; the owner must drop the entity
    Removed,
}

/// Interpolated enter / stay / leave animation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScriptedMotion {
    origin: Vec2,
    target: Vec2,
    /// Ticks an enter or exit slide takes (`ceil(1 / step)`)
    frames: u32,
    elapsed: u32,
    resident_left: u32,
    phase: Phase,
}

impl ScriptedMotion {
    pub fn new(origin: Vec2, target: Vec2, anim_step: f32, resident_ticks: u32) -> Self {
        let frames = if anim_step > 0.0 {
            (1.0 / anim_step).ceil().max(1.0) as u32
        } else {
            1
        };
        Self {
            origin,
            target,
            frames,
            elapsed: 0,
            resident_left: resident_ticks,
            phase: Phase::Entering,
        }
    }

    #[inline]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn origin(&self) -> Vec2 {
        self.origin
    }

    pub fn target(&self) -> Vec2 {
        self.target
    }

    /// Slide progress in `[0, 1]`
    pub fn progress(&self) -> f32 {
        (self.elapsed as f32 / self.frames as f32).min(1.0)
    }

    /// Where the entity sits right now
    pub fn position(&self) -> Vec2 {
        match self.phase {
            Phase::Entering => self.origin.lerp(self.target, self.progress()),
            Phase::Resident => self.target,
            // exit swaps the endpoints; progress still runs 0 -> 1
            Phase::Exiting => self.target.lerp(self.origin, self.progress()),
            Phase::Removed => self.origin,
        }
    }

    /// Advance one tick and return the new position
    pub fn step(&mut self) -> Vec2 {
        match self.phase {
            Phase::Entering => {
                self.elapsed += 1;
                if self.elapsed >= self.frames {
                    self.elapsed = self.frames;
                    self.phase = Phase::Resident;
                }
            }
            Phase::Resident => {
                self.resident_left = self.resident_left.saturating_sub(1);
                if self.resident_left == 0 {
                    self.phase = Phase::Exiting;
                    self.elapsed = 0;
                }
            }
            Phase::Exiting => {
                self.elapsed += 1;
                if self.elapsed >= self.frames {
                    self.phase = Phase::Removed;
                }
            }
            Phase::Removed => {}
        }
        self.position()
    }
}

/// How a hostile moves
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Behavior {
    /// Homes in on the actor at a fixed speed
    Chaser { speed: f32 },
    /// Flies in a straight line; destroys whatever it runs into
    Ballistic { vel: Vec2, rotation: f32 },
    /// Pops in from an edge, waits, then retreats
    Scripted { motion: ScriptedMotion, rotation: f32 },
}

/// A hostile in the arena
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hostile {
    pub pos: Vec2,
    pub size: f32,
    pub alive: bool,
    pub behavior: Behavior,
}

impl Hostile {
    pub fn chaser(pos: Vec2, size: f32, speed: f32) -> Self {
        Self {
            pos,
            size,
            alive: true,
            behavior: Behavior::Chaser { speed },
        }
    }

    /// Ballistic hostile entering from `edge` at offset `along` on that edge
    pub fn bullet(edge: Edge, along: f32, size: f32, speed: f32, extent: f32) -> Self {
        // sprite faces backwards, hence the extra half turn
        let (pos, vel, facing) = match edge {
            Edge::Top => (Vec2::new(along, -size), Vec2::new(0.0, speed), FRAC_PI_2),
            Edge::Bottom => (Vec2::new(along, extent + size), Vec2::new(0.0, -speed), -FRAC_PI_2),
            Edge::Left => (Vec2::new(-size, along), Vec2::new(speed, 0.0), 0.0),
            Edge::Right => (Vec2::new(extent + size, along), Vec2::new(-speed, 0.0), PI),
        };
        Self {
            pos,
            size,
            alive: true,
            behavior: Behavior::Ballistic {
                vel,
                rotation: facing + PI,
            },
        }
    }

    /// Scripted hostile hidden past `edge`, emerging `inset` into the field
    pub fn wall(
        edge: Edge,
        along: f32,
        size: f32,
        inset: f32,
        extent: f32,
        anim_step: f32,
        resident_ticks: u32,
    ) -> Self {
        let (origin, target, rotation) = match edge {
            Edge::Top => (Vec2::new(along, -size), Vec2::new(along, inset), PI),
            Edge::Bottom => (
                Vec2::new(along, extent + size),
                Vec2::new(along, extent - inset),
                0.0,
            ),
            Edge::Left => (Vec2::new(-size, along), Vec2::new(inset, along), FRAC_PI_2),
            Edge::Right => (
                Vec2::new(extent + size, along),
                Vec2::new(extent - inset, along),
                -FRAC_PI_2,
            ),
        };
        Self {
            pos: origin,
            size,
            alive: true,
            behavior: Behavior::Scripted {
                motion: ScriptedMotion::new(origin, target, anim_step, resident_ticks),
                rotation,
            },
        }
    }

    #[inline]
    pub fn is_ballistic(&self) -> bool {
        matches!(self.behavior, Behavior::Ballistic { .. })
    }

    /// Move one tick. Marks the hostile dead when a ballistic one escapes
    /// past `margin` or a scripted one finishes its exit.
    pub fn advance(&mut self, actor: Vec2, extent: f32, margin: f32) {
        match &mut self.behavior {
            Behavior::Chaser { speed } => {
                let to_actor = actor - self.pos;
                let dist = to_actor.length();
                if dist > 0.0 {
                    self.pos += to_actor / dist * *speed;
                }
            }
            Behavior::Ballistic { vel, .. } => {
                self.pos += *vel;
                let lo = -margin;
                let hi = extent + margin;
                if self.pos.x < lo || self.pos.x > hi || self.pos.y < lo || self.pos.y > hi {
                    self.alive = false;
                }
            }
            Behavior::Scripted { motion, .. } => {
                self.pos = motion.step();
                if motion.phase() == Phase::Removed {
                    self.alive = false;
                }
            }
        }
    }
}
