//! Assembled-animation registry.
//!
//! Holds the animations the player has built in the timeline editor, keyed
//! by [`AnimationKind`]. Systems look up an animation here to drive playback
//! and to decide which movement abilities are currently backed by a complete
//! cycle. The store also remembers the placement quality each animation was
//! assembled at.

use std::fmt;
use std::sync::Arc;

use bevy_ecs::prelude::Resource;
use log::{debug, warn};
use rustc_hash::FxHashMap;

/// Handle into the (out-of-process) sprite atlas. Two frames are the same
/// frame exactly when their keys are equal.
pub type SpriteKey = Arc<str>;

/// The closed set of animation cycles the player can assemble.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimationKind {
    Idle,
    Walk,
    Jump,
    Prone,
    Crawl,
}

impl AnimationKind {
    pub const ALL: [AnimationKind; 5] = [
        AnimationKind::Idle,
        AnimationKind::Walk,
        AnimationKind::Jump,
        AnimationKind::Prone,
        AnimationKind::Crawl,
    ];

    /// Lowercase tag used in config files and log lines.
    pub fn tag(self) -> &'static str {
        match self {
            AnimationKind::Idle => "idle",
            AnimationKind::Walk => "walk",
            AnimationKind::Jump => "jump",
            AnimationKind::Prone => "prone",
            AnimationKind::Crawl => "crawl",
        }
    }

    /// Parse a config tag, case-insensitively.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.to_ascii_lowercase().as_str() {
            "idle" => Some(AnimationKind::Idle),
            "walk" => Some(AnimationKind::Walk),
            "jump" => Some(AnimationKind::Jump),
            "prone" => Some(AnimationKind::Prone),
            "crawl" => Some(AnimationKind::Crawl),
            _ => None,
        }
    }

    /// Fixed loop policy: jump and prone are one-shot, everything else cycles.
    pub fn loops(self) -> bool {
        !matches!(self, AnimationKind::Jump | AnimationKind::Prone)
    }
}

impl fmt::Display for AnimationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// One collected still of an animation cycle.
///
/// Carries two sprite handles: `ui_sprite` is what the inventory and the
/// timeline slots show, `render_sprite` is what playback writes onto the
/// player. A frame lives in exactly one container at a time (inventory or a
/// timeline slot); registering an animation clones the frame list, so the
/// store never shares ownership with the editor.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub kind: AnimationKind,
    pub ui_sprite: SpriteKey,
    pub render_sprite: SpriteKey,
}

impl Frame {
    pub fn new(
        kind: AnimationKind,
        ui_sprite: impl Into<SpriteKey>,
        render_sprite: impl Into<SpriteKey>,
    ) -> Self {
        Self {
            kind,
            ui_sprite: ui_sprite.into(),
            render_sprite: render_sprite.into(),
        }
    }
}

/// A player-assembled animation cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomAnimation {
    pub kind: AnimationKind,
    pub frames: Vec<Frame>,
    /// Seconds each frame stays on screen.
    pub seconds_per_frame: f32,
    pub looping: bool,
}

/// Registry of assembled animations and their placement qualities.
#[derive(Resource, Debug, Default)]
pub struct AnimationStore {
    animations: FxHashMap<AnimationKind, CustomAnimation>,
    qualities: FxHashMap<AnimationKind, f32>,
}

impl AnimationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace (or create) the animation for `kind`.
    ///
    /// Refuses empty frame lists so playback never has to index into an
    /// empty cycle. Returns the stored animation on success.
    pub fn upsert(
        &mut self,
        kind: AnimationKind,
        frames: Vec<Frame>,
        seconds_per_frame: f32,
        looping: bool,
        quality: f32,
    ) -> Option<&CustomAnimation> {
        if frames.is_empty() {
            warn!("refusing to register {kind} animation with no frames");
            return None;
        }
        debug!(
            "registering {kind} animation: {} frames, quality {quality:.2}",
            frames.len()
        );
        self.qualities.insert(kind, quality);
        self.animations.insert(
            kind,
            CustomAnimation {
                kind,
                frames,
                seconds_per_frame,
                looping,
            },
        );
        self.animations.get(&kind)
    }

    /// Drop the animation and its quality. Returns whether one existed.
    pub fn remove(&mut self, kind: AnimationKind) -> bool {
        self.qualities.remove(&kind);
        self.animations.remove(&kind).is_some()
    }

    pub fn get(&self, kind: AnimationKind) -> Option<&CustomAnimation> {
        self.animations.get(&kind)
    }

    pub fn has(&self, kind: AnimationKind) -> bool {
        self.animations.contains_key(&kind)
    }

    /// Quality the animation was assembled at, 1.0 when none is stored.
    pub fn quality(&self, kind: AnimationKind) -> f32 {
        self.qualities.get(&kind).copied().unwrap_or(1.0)
    }

    pub fn len(&self) -> usize {
        self.animations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.animations.is_empty()
    }
}
