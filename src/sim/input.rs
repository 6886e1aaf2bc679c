//! Control signals delivered between ticks
//!
//! The host forwards two kinds of input: a debounced pose label from the
//! external classifier, or a raw key transition. Anything unrecognized is
//! dropped at parse time and never reaches a simulation.

/// One discrete control input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Signal {
    /// Class label from the pose classifier (e.g. "Left")
    Pose(String),
    /// A key went down (`pressed`) or up
    Key { code: KeyCode, pressed: bool },
}

impl Signal {
    pub fn pose(label: impl Into<String>) -> Self {
        Signal::Pose(label.into())
    }

    pub fn key_down(code: KeyCode) -> Self {
        Signal::Key { code, pressed: true }
    }

    pub fn key_up(code: KeyCode) -> Self {
        Signal::Key { code, pressed: false }
    }
}

/// Keys the games react to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    Space,
}

impl KeyCode {
    /// Parse a DOM `KeyboardEvent.code`
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "ArrowLeft" => Some(KeyCode::ArrowLeft),
            "ArrowRight" => Some(KeyCode::ArrowRight),
            "ArrowUp" => Some(KeyCode::ArrowUp),
            "ArrowDown" => Some(KeyCode::ArrowDown),
            "Space" => Some(KeyCode::Space),
            _ => None,
        }
    }
}

/// Held-key state for continuous movement
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyState {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

impl KeyState {
    /// Record a key transition; returns false for keys that are not directions
    pub fn apply(&mut self, code: KeyCode, pressed: bool) -> bool {
        match code {
            KeyCode::ArrowLeft => self.left = pressed,
            KeyCode::ArrowRight => self.right = pressed,
            KeyCode::ArrowUp => self.up = pressed,
            KeyCode::ArrowDown => self.down = pressed,
            KeyCode::Space => return false,
        }
        true
    }

    /// Unnormalized direction (-1, 0 or 1 per axis, +y is down)
    pub fn direction(&self) -> glam::Vec2 {
        let axis = |neg: bool, pos: bool| (pos as i8 - neg as i8) as f32;
        glam::Vec2::new(axis(self.left, self.right), axis(self.up, self.down))
    }
}

/// Lane requested by a pose label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaneCall {
    Left,
    Center,
    Right,
}

impl LaneCall {
    /// Classifier labels are matched case-insensitively
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "left" => Some(LaneCall::Left),
            "center" => Some(LaneCall::Center),
            "right" => Some(LaneCall::Right),
            _ => None,
        }
    }

    pub fn lane_index(self) -> usize {
        match self {
            LaneCall::Left => 0,
            LaneCall::Center => 1,
            LaneCall::Right => 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels() {
        assert_eq!(LaneCall::from_label("Left"), Some(LaneCall::Left));
        assert_eq!(LaneCall::from_label("right"), Some(LaneCall::Right));
        assert_eq!(LaneCall::from_label("CENTER"), Some(LaneCall::Center));
        assert_eq!(LaneCall::from_label("Jump"), None);
    }

    #[test]
    fn test_opposing_keys_cancel() {
        let mut keys = KeyState::default();
        keys.apply(KeyCode::ArrowLeft, true);
        keys.apply(KeyCode::ArrowRight, true);
        keys.apply(KeyCode::ArrowDown, true);
        assert_eq!(keys.direction(), glam::Vec2::new(0.0, 1.0));
        assert!(!keys.apply(KeyCode::Space, true));
    }
}
