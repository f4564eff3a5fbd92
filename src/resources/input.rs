//! Per-tick player input snapshot.
//!
//! The crate is headless: whatever drives it (the demo script, a test, or a
//! real front-end) presses and releases the buttons before the tick runs,
//! and [`crate::systems::input::clear_input_edges`] drops the edge flags at
//! the end of the tick.

use bevy_ecs::prelude::Resource;

/// Button state with edge detection for the current tick.
#[derive(Debug, Clone, Copy, Default)]
pub struct ButtonState {
    /// Held down right now.
    pub active: bool,
    /// Went down this tick.
    pub just_pressed: bool,
    /// Went up this tick.
    pub just_released: bool,
}

impl ButtonState {
    pub fn press(&mut self) {
        if !self.active {
            self.just_pressed = true;
        }
        self.active = true;
    }

    pub fn release(&mut self) {
        if self.active {
            self.just_released = true;
        }
        self.active = false;
    }

    pub fn clear_edges(&mut self) {
        self.just_pressed = false;
        self.just_released = false;
    }
}

/// The actions the game cares about.
#[derive(Resource, Debug, Clone, Default)]
pub struct InputState {
    pub move_left: ButtonState,
    pub move_right: ButtonState,
    pub jump: ButtonState,
    pub crouch: ButtonState,
    pub editor_toggle: ButtonState,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Signed horizontal axis in `[-1, 1]`.
    pub fn horizontal(&self) -> f32 {
        let mut axis = 0.0;
        if self.move_left.active {
            axis -= 1.0;
        }
        if self.move_right.active {
            axis += 1.0;
        }
        axis
    }

    pub fn clear_edges(&mut self) {
        self.move_left.clear_edges();
        self.move_right.clear_edges();
        self.jump.clear_edges();
        self.crouch.clear_edges();
        self.editor_toggle.clear_edges();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_sets_edge_once() {
        let mut button = ButtonState::default();
        button.press();
        assert!(button.active && button.just_pressed);
        button.clear_edges();
        button.press();
        // still held, no new edge
        assert!(button.active && !button.just_pressed);
    }

    #[test]
    fn test_horizontal_axis() {
        let mut input = InputState::new();
        assert_eq!(input.horizontal(), 0.0);
        input.move_left.press();
        assert_eq!(input.horizontal(), -1.0);
        input.move_right.press();
        assert_eq!(input.horizontal(), 0.0);
        input.move_left.release();
        assert_eq!(input.horizontal(), 1.0);
    }
}
