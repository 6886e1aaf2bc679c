//! Drawing for both minigames
//!
//! Games draw through the [`Surface`] trait so the same routines drive the
//! browser canvas and the headless [`Recorder`]. All coordinates handed to a
//! surface are in pixels; the per-game routines scale from logical units.

pub mod arena;
#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod lane;
pub mod recorder;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::sim::PickupKind;

pub use recorder::{DrawCmd, Recorder};

/// Linear RGBA in `[0, 1]`
pub type Rgba = [f32; 4];

/// Palette shared by the draw routines
pub mod colors {
    use super::Rgba;

    pub const ARENA_GRASS: Rgba = [0.298, 0.686, 0.314, 1.0];
    pub const LANE_DIVIDER: Rgba = [1.0, 1.0, 1.0, 0.3];
    pub const WHITE: Rgba = [1.0, 1.0, 1.0, 1.0];
    pub const BLACK: Rgba = [0.0, 0.0, 0.0, 1.0];
    pub const GOLD: Rgba = [1.0, 0.843, 0.0, 1.0];
    pub const YELLOW: Rgba = [1.0, 1.0, 0.0, 1.0];
    pub const ORANGE: Rgba = [1.0, 0.647, 0.0, 1.0];
    pub const ORANGE_RED: Rgba = [1.0, 0.271, 0.0, 1.0];
    pub const GREEN: Rgba = [0.0, 0.502, 0.0, 1.0];
    pub const LIME: Rgba = [0.0, 1.0, 0.0, 1.0];
    pub const RED: Rgba = [1.0, 0.0, 0.0, 1.0];
    pub const PINK: Rgba = [1.0, 0.753, 0.796, 1.0];
    pub const BROWN: Rgba = [0.647, 0.165, 0.165, 1.0];
    pub const CYAN: Rgba = [0.0, 1.0, 1.0, 1.0];
    pub const GREY: Rgba = [0.333, 0.333, 0.333, 1.0];
    pub const PURPLE: Rgba = [0.502, 0.0, 0.502, 1.0];
}

/// Image assets the arena can draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sprite {
    Player,
    Chaser,
    Wall,
    Bullet,
    Fireball,
    Star,
    FireFlower,
    Mushroom,
    Balloon,
}

impl Sprite {
    pub const ALL: [Sprite; 9] = [
        Sprite::Player,
        Sprite::Chaser,
        Sprite::Wall,
        Sprite::Bullet,
        Sprite::Fireball,
        Sprite::Star,
        Sprite::FireFlower,
        Sprite::Mushroom,
        Sprite::Balloon,
    ];

    /// Path relative to the page
    pub fn asset_path(self) -> &'static str {
        match self {
            Sprite::Player => "./assets/player_game2.png",
            Sprite::Chaser => "./assets/enemy_ground.png",
            Sprite::Wall => "./assets/enemy_wall.png",
            Sprite::Bullet => "./assets/enemy_bullet.png",
            Sprite::Fireball => "./assets/projectile_fireball.png",
            Sprite::Star => "./assets/star.png",
            Sprite::FireFlower => "./assets/item_fireflower.png",
            Sprite::Mushroom => "./assets/item_mushroom.png",
            Sprite::Balloon => "./assets/item_balloon.png",
        }
    }

    /// Pickups without artwork are drawn as colored discs
    pub fn for_pickup(kind: PickupKind) -> Option<Sprite> {
        match kind {
            PickupKind::Star => Some(Sprite::Star),
            PickupKind::FireFlower => Some(Sprite::FireFlower),
            PickupKind::Mushroom => Some(Sprite::Mushroom),
            PickupKind::Balloon => Some(Sprite::Balloon),
            PickupKind::Coin | PickupKind::Bomb | PickupKind::Crown => None,
        }
    }
}

/// Something the games can draw on
pub trait Surface {
    /// Axis-aligned filled box from its top-left corner
    fn fill_rect(&mut self, min: Vec2, size: Vec2, color: Rgba);
    fn stroke_rect(&mut self, min: Vec2, size: Vec2, color: Rgba, width: f32);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba);
    fn line(&mut self, from: Vec2, to: Vec2, color: Rgba, width: f32);
    /// Text centered on `at`
    fn text(&mut self, text: &str, at: Vec2, px: f32, color: Rgba);
    /// Global opacity applied to everything drawn until the next call
    fn set_alpha(&mut self, alpha: f32);

    /// Whether an image has finished loading
    fn sprite_ready(&self, sprite: Sprite) -> bool;
    /// Draw a square sprite centered on `center`, rotated by `rotation` radians
    fn draw_sprite(&mut self, sprite: Sprite, center: Vec2, size: f32, rotation: f32);
}

/// Ticks per half-period of the invincibility flicker (~100 ms at 60 Hz)
pub const FLICKER_TICKS: u64 = 6;

/// Opacity of a flickering sprite at `tick`
pub fn flicker_alpha(tick: u64) -> f32 {
    if (tick / FLICKER_TICKS) % 2 == 0 { 0.5 } else { 1.0 }
}

/// Fill a square of side `size` centered on `center`
pub fn fill_centered(surface: &mut dyn Surface, center: Vec2, size: f32, color: Rgba) {
    surface.fill_rect(center - Vec2::splat(size / 2.0), Vec2::splat(size), color);
}
