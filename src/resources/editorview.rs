//! Editor view model.
//!
//! The display surface a UI front-end would read: slot sprites, the filtered
//! inventory strip, the `correct/total` feedback string, and the preview
//! player that cycles over the placed frames while the editor is open.
//! Systems write this; nothing in the crate reads it back for game logic.

use bevy_ecs::prelude::Resource;

use crate::resources::animationstore::SpriteKey;

/// Small preview player looping over the occupied slots.
#[derive(Debug, Clone, Default)]
pub struct PreviewState {
    pub playing: bool,
    pub index: usize,
    pub elapsed: f32,
}

impl PreviewState {
    pub fn restart(&mut self) {
        self.playing = true;
        self.index = 0;
        self.elapsed = 0.0;
    }

    pub fn stop(&mut self) {
        self.playing = false;
        self.index = 0;
        self.elapsed = 0.0;
    }

    /// Advance over `frames` (the occupied slot sprites) at
    /// `seconds_per_frame`, wrapping around.
    pub fn advance(&mut self, dt: f32, seconds_per_frame: f32, frame_count: usize) {
        if !self.playing || frame_count == 0 {
            return;
        }
        self.elapsed += dt;
        if self.elapsed >= seconds_per_frame {
            self.elapsed = 0.0;
            self.index = (self.index + 1) % frame_count;
        }
        if self.index >= frame_count {
            self.index = 0;
        }
    }
}

/// What the editor panel currently shows.
#[derive(Resource, Debug, Clone, Default)]
pub struct EditorView {
    pub visible: bool,
    /// Placement feedback, e.g. `"3/6"`.
    pub feedback: String,
    /// One entry per timeline slot; `None` renders the empty-slot sprite.
    pub slot_sprites: Vec<Option<SpriteKey>>,
    /// Inventory strip, already filtered to the active kind when configured.
    pub inventory_sprites: Vec<SpriteKey>,
    /// Sprite the preview box shows right now.
    pub preview_sprite: Option<SpriteKey>,
    /// Preview backdrop toggle.
    pub preview_backdrop: bool,
    /// Preview character alpha, 0.0 or 1.0.
    pub preview_alpha: f32,
    /// Recording overlay shown while the editor captures input.
    pub recording: bool,
    pub preview: PreviewState,
}

impl EditorView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset everything to the closed-panel state.
    pub fn hide(&mut self) {
        self.visible = false;
        self.recording = false;
        self.preview_backdrop = false;
        self.preview_alpha = 0.0;
        self.preview_sprite = None;
        self.preview.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_wraps_over_frame_count() {
        let mut preview = PreviewState::default();
        preview.restart();
        preview.advance(0.25, 0.2, 3);
        assert_eq!(preview.index, 1);
        preview.advance(0.25, 0.2, 3);
        assert_eq!(preview.index, 2);
        preview.advance(0.25, 0.2, 3);
        assert_eq!(preview.index, 0);
    }

    #[test]
    fn test_preview_clamps_after_shrink() {
        let mut preview = PreviewState::default();
        preview.restart();
        preview.index = 4;
        preview.advance(0.0, 0.2, 2);
        assert!(preview.index < 2);
    }

    #[test]
    fn test_preview_ignores_empty_timeline() {
        let mut preview = PreviewState::default();
        preview.restart();
        preview.advance(1.0, 0.2, 0);
        assert_eq!(preview.index, 0);
    }
}
