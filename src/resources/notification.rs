//! Collection-complete notification panel.
//!
//! A banner that slides in from off-screen, holds, and slides back out when
//! the player has gathered every frame of an animation kind. The slide is a
//! timed state advanced once per tick with smoothstep easing; starting a new
//! notification mid-flight simply restarts the sequence from the current
//! offset.

use bevy_ecs::prelude::Resource;
use log::debug;

use crate::resources::animationstore::AnimationKind;

pub const DEFAULT_DISPLAY_DURATION: f32 = 2.0;
pub const DEFAULT_SLIDE_SPEED: f32 = 500.0;
pub const HIDDEN_OFFSET: f32 = 400.0;
pub const VISIBLE_OFFSET: f32 = -200.0;

/// Where the banner is in its slide cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PanelPhase {
    #[default]
    Hidden,
    SlidingIn,
    Holding,
    SlidingOut,
}

/// Singleton banner state.
#[derive(Resource, Debug, Clone)]
pub struct NotificationPanel {
    pub phase: PanelPhase,
    pub kind: Option<AnimationKind>,
    pub message: String,
    /// Current horizontal offset of the banner.
    pub offset: f32,
    pub display_duration: f32,
    pub slide_speed: f32,
    timer: f32,
    slide_from: f32,
}

impl Default for NotificationPanel {
    fn default() -> Self {
        Self::new(DEFAULT_DISPLAY_DURATION, DEFAULT_SLIDE_SPEED)
    }
}

fn smoothstep(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

fn capitalize(tag: &str) -> String {
    let mut chars = tag.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

impl NotificationPanel {
    pub fn new(display_duration: f32, slide_speed: f32) -> Self {
        Self {
            phase: PanelPhase::Hidden,
            kind: None,
            message: String::new(),
            offset: HIDDEN_OFFSET,
            display_duration,
            slide_speed: slide_speed.max(1.0),
            timer: 0.0,
            slide_from: HIDDEN_OFFSET,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.phase != PanelPhase::Hidden
    }

    /// Begin showing the banner for `kind`, cancelling any banner already in
    /// flight.
    pub fn show(&mut self, kind: AnimationKind) {
        debug!("notification: all {kind} frames collected");
        self.kind = Some(kind);
        self.message = format!(
            "All {} frames collected! Animation ready to be made.",
            capitalize(kind.tag())
        );
        self.phase = PanelPhase::SlidingIn;
        self.slide_from = self.offset;
        self.timer = 0.0;
    }

    fn slide_duration(&self, to: f32) -> f32 {
        ((self.slide_from - to).abs() / self.slide_speed).max(f32::EPSILON)
    }

    /// Advance the slide cycle by `dt` seconds.
    pub fn advance(&mut self, dt: f32) {
        match self.phase {
            PanelPhase::Hidden => {}
            PanelPhase::SlidingIn => {
                self.timer += dt;
                let duration = self.slide_duration(VISIBLE_OFFSET);
                let t = smoothstep(self.timer / duration);
                self.offset = self.slide_from + (VISIBLE_OFFSET - self.slide_from) * t;
                if self.timer >= duration {
                    self.offset = VISIBLE_OFFSET;
                    self.phase = PanelPhase::Holding;
                    self.timer = 0.0;
                }
            }
            PanelPhase::Holding => {
                self.timer += dt;
                if self.timer >= self.display_duration {
                    self.phase = PanelPhase::SlidingOut;
                    self.slide_from = self.offset;
                    self.timer = 0.0;
                }
            }
            PanelPhase::SlidingOut => {
                self.timer += dt;
                let duration = self.slide_duration(HIDDEN_OFFSET);
                let t = smoothstep(self.timer / duration);
                self.offset = self.slide_from + (HIDDEN_OFFSET - self.slide_from) * t;
                if self.timer >= duration {
                    self.offset = HIDDEN_OFFSET;
                    self.phase = PanelPhase::Hidden;
                    self.kind = None;
                }
            }
        }
    }
}
