//! Avoid & Collect drawing

use glam::Vec2;

use super::{Rgba, Sprite, Surface, colors, fill_centered, flicker_alpha};
use crate::consts::ARENA_SIZE;
use crate::sim::{ArenaSurvival, Behavior, Hostile, PickupKind, RandomSource, SessionPhase};

/// Fireball spin per tick, in radians
const FIREBALL_SPIN: f32 = 1.0 / 6.0;
/// Gap between the avatar and its invincibility outline
const AURA_GAP: f32 = 5.0;

fn pickup_color(kind: PickupKind) -> Rgba {
    match kind {
        PickupKind::Coin => colors::GOLD,
        PickupKind::Star => colors::YELLOW,
        PickupKind::FireFlower => colors::ORANGE,
        PickupKind::Mushroom => colors::GREEN,
        PickupKind::Balloon => colors::PINK,
        PickupKind::Bomb => colors::BLACK,
        PickupKind::Crown => colors::PURPLE,
    }
}

/// Logical arena units to canvas pixels
struct View {
    scale: Vec2,
    unit: f32,
}

impl View {
    fn new(width: f32, height: f32) -> Self {
        let scale = Vec2::new(width, height) / ARENA_SIZE;
        Self {
            scale,
            unit: scale.min_element(),
        }
    }

    #[inline]
    fn pos(&self, p: Vec2) -> Vec2 {
        p * self.scale
    }

    #[inline]
    fn len(&self, l: f32) -> f32 {
        l * self.unit
    }
}

/// Draw one frame of the arena
pub fn draw<R: RandomSource>(
    game: &ArenaSurvival<R>,
    surface: &mut dyn Surface,
    width: f32,
    height: f32,
) {
    surface.fill_rect(Vec2::ZERO, Vec2::new(width, height), colors::ARENA_GRASS);

    if !game.is_playing() {
        draw_menu(game, surface, width, height);
        return;
    }

    let view = View::new(width, height);

    for item in game.pickups() {
        let center = view.pos(item.pos);
        let size = view.len(item.size);
        match Sprite::for_pickup(item.kind) {
            Some(sprite) if surface.sprite_ready(sprite) => {
                surface.draw_sprite(sprite, center, size, 0.0)
            }
            _ => surface.fill_circle(center, size / 2.0, pickup_color(item.kind)),
        }
    }

    let spin = game.elapsed_ticks() as f32 * FIREBALL_SPIN;
    for fb in game.projectiles() {
        let center = view.pos(fb.pos);
        let size = view.len(fb.size);
        if surface.sprite_ready(Sprite::Fireball) {
            surface.draw_sprite(Sprite::Fireball, center, size, spin);
        } else {
            surface.fill_circle(center, size / 2.0, colors::ORANGE);
        }
    }

    for hostile in game.hostiles() {
        draw_hostile(hostile, &view, surface);
    }

    let avatar = game.avatar();
    let center = view.pos(avatar.pos);
    let size = view.len(avatar.size);
    if avatar.invincible.is_active() {
        surface.set_alpha(flicker_alpha(game.elapsed_ticks()));
        let pad = view.len(AURA_GAP);
        surface.stroke_rect(
            center - Vec2::splat(size / 2.0 + pad),
            Vec2::splat(size + 2.0 * pad),
            colors::GOLD,
            3.0,
        );
    }
    if surface.sprite_ready(Sprite::Player) {
        surface.draw_sprite(Sprite::Player, center, size, 0.0);
    } else {
        let color = if avatar.has_fire_power {
            colors::ORANGE_RED
        } else {
            colors::CYAN
        };
        fill_centered(surface, center, size, color);
    }
    surface.set_alpha(1.0);
}

fn draw_hostile(hostile: &Hostile, view: &View, surface: &mut dyn Surface) {
    let center = view.pos(hostile.pos);
    let size = view.len(hostile.size);
    let (sprite, rotation, fallback) = match &hostile.behavior {
        Behavior::Ballistic { rotation, .. } => (Sprite::Bullet, *rotation, colors::BLACK),
        Behavior::Scripted { rotation, .. } => (Sprite::Wall, *rotation, colors::GREEN),
        Behavior::Chaser { .. } => (Sprite::Chaser, 0.0, colors::RED),
    };
    if surface.sprite_ready(sprite) {
        surface.draw_sprite(sprite, center, size, rotation);
    } else {
        fill_centered(surface, center, size, fallback);
    }
}

fn draw_menu<R: RandomSource>(
    game: &ArenaSurvival<R>,
    surface: &mut dyn Surface,
    width: f32,
    height: f32,
) {
    let mid = Vec2::new(width, height) / 2.0;
    match game.phase() {
        SessionPhase::GameOver => {
            surface.text("Game Over", mid - Vec2::new(0.0, 20.0), 30.0, colors::WHITE);
            surface.text(
                &format!("Score: {}", game.score()),
                mid + Vec2::new(0.0, 20.0),
                20.0,
                colors::WHITE,
            );
        }
        SessionPhase::Idle | SessionPhase::Playing => {
            surface.text("Avoid & Collect", mid, 30.0, colors::WHITE);
            surface.text(
                "Arrow Keys to Move",
                mid + Vec2::new(0.0, 30.0),
                16.0,
                colors::WHITE,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{DrawCmd, Recorder};
    use crate::sim::{Edge, Pickup, Projectile};
    use crate::tuning::ArenaTuning;

    fn quiet_game() -> ArenaSurvival {
        let tuning = ArenaTuning {
            enemy_interval: 1_000_000,
            item_interval: 1_000_000,
            ..Default::default()
        };
        let mut game = ArenaSurvival::seeded(tuning, 7);
        game.start();
        game
    }

    #[test]
    fn test_title_screen_before_start() {
        let game = ArenaSurvival::seeded(ArenaTuning::default(), 1);
        let mut rec = Recorder::new();
        draw(&game, &mut rec, 400.0, 400.0);
        assert_eq!(rec.texts().collect::<Vec<_>>(), ["Avoid & Collect", "Arrow Keys to Move"]);
    }

    #[test]
    fn test_game_over_screen_shows_score() {
        let mut game = quiet_game();
        game.stop();
        let mut rec = Recorder::new();
        draw(&game, &mut rec, 400.0, 400.0);
        assert_eq!(rec.texts().collect::<Vec<_>>(), ["Game Over", "Score: 0"]);
    }

    #[test]
    fn test_shapes_when_sprites_missing() {
        let mut game = quiet_game();
        game.test_push_hostile(Hostile::chaser(Vec2::new(20.0, 20.0), 20.0, 0.0));
        game.test_push_hostile(Hostile::bullet(Edge::Top, 300.0, 40.0, 4.0, ARENA_SIZE));
        game.test_push_pickup(Pickup::new(PickupKind::Star, Vec2::new(350.0, 50.0)));

        let mut rec = Recorder::new();
        draw(&game, &mut rec, 400.0, 400.0);
        assert_eq!(rec.sprites().count(), 0);
        let fills = rec.fills();
        assert_eq!(fills[0], colors::ARENA_GRASS);
        assert!(fills.contains(&colors::YELLOW));
        assert!(fills.contains(&colors::RED));
        assert!(fills.contains(&colors::BLACK));
        assert_eq!(*fills.last().unwrap(), colors::CYAN);
    }

    #[test]
    fn test_sprites_scale_with_canvas() {
        let mut game = quiet_game();
        game.test_push_projectile(Projectile::new(Vec2::new(100.0, 100.0), Vec2::ZERO, 20.0, 600));
        let mut rec = Recorder::with_all_sprites();
        draw(&game, &mut rec, 800.0, 800.0);
        let fireball = rec.commands.iter().find_map(|c| match c {
            DrawCmd::Sprite {
                sprite: Sprite::Fireball,
                center,
                size,
                ..
            } => Some((*center, *size)),
            _ => None,
        });
        assert_eq!(fireball, Some((Vec2::new(200.0, 200.0), 40.0)));
        assert!(rec.sprites().any(|s| s == Sprite::Player));
    }

    #[test]
    fn test_invincible_avatar_gets_aura_and_flicker() {
        let mut game = quiet_game();
        game.test_avatar_mut().invincible.set(100);
        let mut rec = Recorder::new();
        draw(&game, &mut rec, 400.0, 400.0);
        assert!(rec.commands.iter().any(|c| matches!(
            c,
            DrawCmd::StrokeRect { color, .. } if *color == colors::GOLD
        )));
        assert!(rec.commands.contains(&DrawCmd::Alpha(0.5)));
        assert_eq!(rec.commands.last(), Some(&DrawCmd::Alpha(1.0)));
    }

    #[test]
    fn test_fire_power_tints_fallback_avatar() {
        let mut game = quiet_game();
        game.test_avatar_mut().has_fire_power = true;
        let mut rec = Recorder::new();
        draw(&game, &mut rec, 400.0, 400.0);
        assert_eq!(*rec.fills().last().unwrap(), colors::ORANGE_RED);
    }
}
