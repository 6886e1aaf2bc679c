//! Headless surface that records draw calls

use std::collections::HashSet;

use glam::Vec2;

use super::{Rgba, Sprite, Surface};

/// One recorded drawing call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    FillRect { min: Vec2, size: Vec2, color: Rgba },
    StrokeRect { min: Vec2, size: Vec2, color: Rgba, width: f32 },
    FillCircle { center: Vec2, radius: f32, color: Rgba },
    Line { from: Vec2, to: Vec2, color: Rgba, width: f32 },
    Text { text: String, at: Vec2, px: f32, color: Rgba },
    Alpha(f32),
    Sprite { sprite: Sprite, center: Vec2, size: f32, rotation: f32 },
}

/// Surface that keeps every call for inspection
#[derive(Debug, Default)]
pub struct Recorder {
    pub commands: Vec<DrawCmd>,
    ready: HashSet<Sprite>,
}

impl Recorder {
    /// No sprites loaded; everything falls back to shapes
    pub fn new() -> Self {
        Self::default()
    }

    /// Every sprite loaded
    pub fn with_all_sprites() -> Self {
        Self {
            commands: Vec::new(),
            ready: Sprite::ALL.into_iter().collect(),
        }
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn sprites(&self) -> impl Iterator<Item = Sprite> + '_ {
        self.commands.iter().filter_map(|c| match c {
            DrawCmd::Sprite { sprite, .. } => Some(*sprite),
            _ => None,
        })
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> + '_ {
        self.commands.iter().filter_map(|c| match c {
            DrawCmd::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    /// Fill colors of every rect and circle, in draw order
    pub fn fills(&self) -> Vec<Rgba> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCmd::FillRect { color, .. } | DrawCmd::FillCircle { color, .. } => {
                    Some(*color)
                }
                _ => None,
            })
            .collect()
    }
}

impl Surface for Recorder {
    fn fill_rect(&mut self, min: Vec2, size: Vec2, color: Rgba) {
        self.commands.push(DrawCmd::FillRect { min, size, color });
    }

    fn stroke_rect(&mut self, min: Vec2, size: Vec2, color: Rgba, width: f32) {
        self.commands.push(DrawCmd::StrokeRect {
            min,
            size,
            color,
            width,
        });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba) {
        self.commands.push(DrawCmd::FillCircle {
            center,
            radius,
            color,
        });
    }

    fn line(&mut self, from: Vec2, to: Vec2, color: Rgba, width: f32) {
        self.commands.push(DrawCmd::Line {
            from,
            to,
            color,
            width,
        });
    }

    fn text(&mut self, text: &str, at: Vec2, px: f32, color: Rgba) {
        self.commands.push(DrawCmd::Text {
            text: text.to_string(),
            at,
            px,
            color,
        });
    }

    fn set_alpha(&mut self, alpha: f32) {
        self.commands.push(DrawCmd::Alpha(alpha));
    }

    fn sprite_ready(&self, sprite: Sprite) -> bool {
        self.ready.contains(&sprite)
    }

    fn draw_sprite(&mut self, sprite: Sprite, center: Vec2, size: f32, rotation: f32) {
        self.commands.push(DrawCmd::Sprite {
            sprite,
            center,
            size,
            rotation,
        });
    }
}
