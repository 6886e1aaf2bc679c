//! Pose Arcade - two small browser minigames
//!
//! Core modules:
//! - `sim`: Deterministic tick-stepped simulation (spawning, collisions, scoring)
//! - `render`: Drawing surface abstraction and per-game draw routines
//! - `app`: Application context owning the active game, input and audio handles
//! - `tuning`: Data-driven game balance
//! - `settings`: Player preferences

pub mod app;
pub mod render;
pub mod settings;
pub mod sim;
pub mod tuning;

#[cfg(target_arch = "wasm32")]
pub mod audio;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use app::{AppContext, GameKind};
pub use settings::Settings;
pub use tuning::Tuning;

use glam::Vec2;

/// Logical field geometry
pub mod consts {
    /// Arena side length (the arena is square)
    pub const ARENA_SIZE: f32 = 400.0;
    /// Margin past the arena edge before a ballistic hostile is dropped
    pub const ARENA_ESCAPE_MARGIN: f32 = 100.0;

    /// Number of lanes in Body Dodge
    pub const LANE_COUNT: usize = 3;
    /// Height of the reference space the lane logic runs in
    pub const LANE_REFERENCE_HEIGHT: f32 = 600.0;
    /// Top of the collection zone, in reference units
    pub const LANE_CATCH_Y: f32 = 500.0;
    /// Height of the collection zone, in reference units
    pub const LANE_CATCH_HEIGHT: f32 = 60.0;
    /// Objects spawn this far above the top edge
    pub const LANE_SPAWN_Y: f32 = -100.0;
    /// Objects past this line are dropped
    pub const LANE_DESPAWN_Y: f32 = 1000.0;

    /// Nominal display refresh the tick counts are tuned for
    pub const TICKS_PER_SECOND: u32 = 60;
}

/// Clamp a point so a square of `size` centered on it stays inside `[0, extent]`
#[inline]
pub fn clamp_to_field(pos: Vec2, size: f32, extent: f32) -> Vec2 {
    let half = size / 2.0;
    pos.clamp(Vec2::splat(half), Vec2::splat(extent - half))
}

/// True when two circles (given by diameters) overlap strictly
#[inline]
pub fn circles_overlap(a: Vec2, a_size: f32, b: Vec2, b_size: f32) -> bool {
    a.distance(b) < a_size / 2.0 + b_size / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_keeps_box_inside() {
        let p = clamp_to_field(Vec2::new(-50.0, 900.0), 60.0, 400.0);
        assert_eq!(p, Vec2::new(30.0, 370.0));
    }

    #[test]
    fn test_touching_circles_do_not_overlap() {
        assert!(!circles_overlap(Vec2::ZERO, 20.0, Vec2::new(20.0, 0.0), 20.0));
        assert!(circles_overlap(Vec2::ZERO, 20.0, Vec2::new(19.9, 0.0), 20.0));
    }
}
