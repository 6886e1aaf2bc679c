//! Body Dodge drawing
//!
//! The lane simulation runs in a fixed-height reference space; everything
//! vertical is scaled by `height / LANE_REFERENCE_HEIGHT`.

use glam::Vec2;

use super::{Surface, colors, fill_centered, flicker_alpha};
use crate::consts::{LANE_COUNT, LANE_REFERENCE_HEIGHT};
use crate::sim::{Faller, LaneDodge, LaneItem, RandomSource, SessionPhase};

/// Runner's vertical position as a share of the canvas height
const RUNNER_Y: f32 = 0.85;
const RUNNER_MAX_SIZE: f32 = 60.0;

/// Draw one frame of the lanes
pub fn draw<R: RandomSource>(
    game: &LaneDodge<R>,
    surface: &mut dyn Surface,
    width: f32,
    height: f32,
) {
    let lane_width = width / LANE_COUNT as f32;

    for i in 1..LANE_COUNT {
        let x = i as f32 * lane_width;
        surface.line(
            Vec2::new(x, 0.0),
            Vec2::new(x, height),
            colors::LANE_DIVIDER,
            2.0,
        );
    }

    let runner = Vec2::new(lane_center(game.lane(), lane_width), height * RUNNER_Y);
    let color = if game.phase() == SessionPhase::GameOver {
        colors::GREY
    } else if game.hp() > 1 {
        colors::LIME
    } else {
        colors::RED
    };
    let flickering = game.is_playing() && game.is_invincible();
    if flickering {
        surface.set_alpha(flicker_alpha(game.elapsed_ticks()));
    }
    fill_centered(
        surface,
        runner,
        (lane_width * 0.6).min(RUNNER_MAX_SIZE),
        color,
    );
    if flickering {
        surface.set_alpha(1.0);
    }

    let scale_y = height / LANE_REFERENCE_HEIGHT;
    for faller in game.hazards().iter().chain(game.pickups()) {
        draw_faller(faller, lane_width, scale_y, surface);
    }
}

fn lane_center(lane: usize, lane_width: f32) -> f32 {
    lane as f32 * lane_width + lane_width / 2.0
}

fn draw_faller(faller: &Faller, lane_width: f32, scale_y: f32, surface: &mut dyn Surface) {
    let size = faller.size * scale_y;
    let center = Vec2::new(
        lane_center(faller.lane, lane_width),
        (faller.y + faller.size / 2.0) * scale_y,
    );
    let (fill, glyph) = match faller.kind {
        LaneItem::Coin => (colors::GOLD, "$"),
        LaneItem::Hazard => (colors::BROWN, "!"),
    };
    surface.fill_circle(center, size / 2.0, fill);
    surface.text(glyph, center, size / 2.0, colors::WHITE);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{DrawCmd, Recorder};
    use crate::sim::{ScriptedRolls, Signal};
    use crate::tuning::LaneTuning;

    fn game_with(rolls: Vec<f32>) -> LaneDodge<ScriptedRolls> {
        let mut game = LaneDodge::new(LaneTuning::default(), ScriptedRolls::new(rolls));
        game.start();
        game
    }

    #[test]
    fn test_lane_dividers_and_runner() {
        let game = game_with(vec![0.0]);
        let mut rec = Recorder::new();
        draw(&game, &mut rec, 300.0, 600.0);

        let lines: Vec<_> = rec
            .commands
            .iter()
            .filter_map(|c| match c {
                DrawCmd::Line { from, .. } => Some(from.x),
                _ => None,
            })
            .collect();
        assert_eq!(lines, [100.0, 200.0]);
        assert_eq!(
            rec.commands[2],
            DrawCmd::FillRect {
                min: Vec2::new(120.0, 480.0),
                size: Vec2::splat(60.0),
                color: colors::LIME,
            }
        );
    }

    #[test]
    fn test_runner_follows_pose() {
        let mut game = game_with(vec![0.0]);
        game.on_signal(&Signal::pose("Right"));
        let mut rec = Recorder::new();
        draw(&game, &mut rec, 300.0, 600.0);
        assert!(matches!(
            rec.commands[2],
            DrawCmd::FillRect { min, .. } if min.x == 220.0
        ));
    }

    #[test]
    fn test_runner_flickers_during_grace() {
        let tuning = LaneTuning {
            hit_grace_ticks: 30,
            ..Default::default()
        };
        let mut game = LaneDodge::new(tuning, ScriptedRolls::constant(0.5));
        game.start();
        game.test_push_hazard(1, 480.0);
        game.update();
        assert!(game.is_invincible());

        let mut rec = Recorder::new();
        draw(&game, &mut rec, 300.0, 600.0);
        assert_eq!(rec.commands[2], DrawCmd::Alpha(0.5));
        assert!(matches!(
            rec.commands[3],
            DrawCmd::FillRect { color, .. } if color == colors::LIME
        ));
        assert_eq!(rec.commands[4], DrawCmd::Alpha(1.0));
    }

    #[test]
    fn test_runner_grey_after_game_over() {
        let mut game = game_with(vec![0.0]);
        game.stop();
        let mut rec = Recorder::new();
        draw(&game, &mut rec, 300.0, 600.0);
        assert_eq!(rec.fills(), [colors::GREY]);
    }

    #[test]
    fn test_fallers_scale_to_canvas() {
        // lane 2, then a coin
        let mut game = game_with(vec![0.9, 0.9]);
        while game.pickups().is_empty() {
            game.update();
        }
        let mut rec = Recorder::new();
        draw(&game, &mut rec, 300.0, 300.0);

        let coin = rec.commands.iter().find_map(|c| match c {
            DrawCmd::FillCircle { center, radius, color } if *color == colors::GOLD => {
                Some((*center, *radius))
            }
            _ => None,
        });
        let faller = &game.pickups()[0];
        let expected_y = (faller.y + faller.size / 2.0) * 0.5;
        assert_eq!(coin, Some((Vec2::new(250.0, expected_y), 12.5)));
        assert!(rec.texts().any(|t| t == "$"));
    }
}
