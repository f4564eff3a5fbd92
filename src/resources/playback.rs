//! Player animation playback state.
//!
//! One animation plays on the player at a time, forward or in reverse,
//! looping or one-shot. The stand-up sequence (prone played in reverse) sets
//! a transition lock so nothing hijacks the sprite until the player is back
//! on their feet.
//!
//! [`Playback`] owns the timing math; the per-tick system in
//! [`crate::systems::playback`] feeds it the frame delta and copies the
//! staged sprite onto the player entity.

use bevy_ecs::prelude::Resource;
use log::{debug, warn};

use crate::resources::animationstore::{
    AnimationKind, AnimationStore, CustomAnimation, SpriteKey,
};

/// What a playback tick asked the rest of the game to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickOutcome {
    /// The reverse stand-up just finished; the standing animation should be
    /// re-evaluated this tick.
    pub reevaluate_pose: bool,
}

/// Singleton playback state for the player sprite.
#[derive(Resource, Debug, Default)]
pub struct Playback {
    active: Option<CustomAnimation>,
    frame_index: usize,
    elapsed: f32,
    playing: bool,
    reverse: bool,
    transition_lock: bool,
    staged_sprite: Option<SpriteKey>,
}

impl Playback {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active_kind(&self) -> Option<AnimationKind> {
        self.active.as_ref().map(|a| a.kind)
    }

    pub fn frame_index(&self) -> usize {
        self.frame_index
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn is_reverse(&self) -> bool {
        self.reverse
    }

    /// True while the reverse stand-up sequence must not be interrupted.
    pub fn is_transition_locked(&self) -> bool {
        self.transition_lock
    }

    /// Sprite the player should currently show.
    pub fn sprite(&self) -> Option<&SpriteKey> {
        self.staged_sprite.as_ref()
    }

    /// Start playing `kind` from the store.
    ///
    /// Refused while the transition lock is held (unless forced), when the
    /// kind has no assembled animation, or when the same animation is
    /// already running in the same direction (restart jitter guard).
    /// Returns whether playback actually changed.
    pub fn play(
        &mut self,
        store: &AnimationStore,
        kind: AnimationKind,
        force_restart: bool,
        reverse: bool,
    ) -> bool {
        if self.transition_lock && !force_restart {
            debug!("blocked {kind}: stand-up transition in progress");
            return false;
        }
        let Some(anim) = store.get(kind) else {
            warn!("no assembled animation for {kind}, play request ignored");
            return false;
        };
        let same = self.active_kind() == Some(kind);
        if same && !force_restart && self.reverse == reverse {
            return false;
        }

        self.reverse = reverse;
        self.transition_lock = kind == AnimationKind::Prone && reverse;
        self.frame_index = if reverse { anim.frames.len() - 1 } else { 0 };
        self.elapsed = 0.0;
        self.playing = true;
        self.active = Some(anim.clone());
        self.stage_sprite();
        debug!(
            "playing {kind} (reverse: {reverse}, from frame {})",
            self.frame_index
        );
        true
    }

    /// Halt playback entirely and release the lock.
    pub fn stop(&mut self) {
        self.playing = false;
        self.reverse = false;
        self.transition_lock = false;
        self.active = None;
        self.staged_sprite = None;
    }

    /// A re-registered animation replaces the playing copy in place: same
    /// kind keeps playing from its starting frame without a visual glitch.
    pub fn sync_upsert(&mut self, anim: &CustomAnimation) {
        if self.active_kind() != Some(anim.kind) {
            return;
        }
        self.frame_index = if self.reverse {
            anim.frames.len() - 1
        } else {
            0
        };
        self.elapsed = 0.0;
        self.active = Some(anim.clone());
        self.stage_sprite();
    }

    /// A removed animation stops playback if it was the one on screen.
    pub fn sync_remove(&mut self, kind: AnimationKind) {
        if self.active_kind() == Some(kind) {
            self.stop();
        }
    }

    /// Advance playback by `dt` seconds.
    pub fn advance(&mut self, dt: f32) -> TickOutcome {
        let mut outcome = TickOutcome::default();
        let Some(anim) = &self.active else {
            return outcome;
        };
        if !self.playing || anim.frames.is_empty() {
            return outcome;
        }

        self.elapsed += dt;
        if self.elapsed < anim.seconds_per_frame {
            return outcome;
        }
        self.elapsed = 0.0;

        let last = anim.frames.len() - 1;
        if self.reverse {
            if self.frame_index == 0 {
                if anim.looping {
                    self.frame_index = last;
                } else {
                    self.playing = false;
                    self.reverse = false;
                    if anim.kind == AnimationKind::Prone {
                        // player is upright again, let go of the sprite
                        self.transition_lock = false;
                        outcome.reevaluate_pose = true;
                    }
                }
            } else {
                self.frame_index -= 1;
            }
        } else {
            self.frame_index += 1;
            if self.frame_index > last {
                if anim.looping {
                    self.frame_index = 0;
                } else {
                    self.frame_index = last;
                    self.playing = false;
                }
            }
        }
        self.stage_sprite();
        outcome
    }

    fn stage_sprite(&mut self) {
        if let Some(anim) = &self.active {
            if let Some(frame) = anim.frames.get(self.frame_index) {
                self.staged_sprite = Some(frame.render_sprite.clone());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::animationstore::Frame;

    fn store_with(kind: AnimationKind, frames: usize, looping: bool) -> AnimationStore {
        let mut store = AnimationStore::new();
        let frames: Vec<Frame> = (0..frames)
            .map(|i| Frame::new(kind, format!("{kind}_{i}"), format!("{kind}_{i}_big")))
            .collect();
        store.upsert(kind, frames, 0.1, looping, 1.0);
        store
    }

    #[test]
    fn test_play_missing_animation_is_noop() {
        let store = AnimationStore::new();
        let mut pb = Playback::new();
        assert!(!pb.play(&store, AnimationKind::Walk, false, false));
        assert!(pb.active_kind().is_none());
        assert!(!pb.is_playing());
    }

    #[test]
    fn test_play_same_animation_same_direction_is_noop() {
        let store = store_with(AnimationKind::Walk, 4, true);
        let mut pb = Playback::new();
        assert!(pb.play(&store, AnimationKind::Walk, false, false));
        // advance a bit, then re-request: index must not reset
        pb.advance(0.1);
        assert_eq!(pb.frame_index(), 1);
        assert!(!pb.play(&store, AnimationKind::Walk, false, false));
        assert_eq!(pb.frame_index(), 1);
        // force restarts
        assert!(pb.play(&store, AnimationKind::Walk, true, false));
        assert_eq!(pb.frame_index(), 0);
    }

    #[test]
    fn test_first_sprite_staged_immediately() {
        let store = store_with(AnimationKind::Idle, 3, true);
        let mut pb = Playback::new();
        pb.play(&store, AnimationKind::Idle, false, false);
        assert_eq!(pb.sprite().map(|s| &**s), Some("idle_0_big"));
    }

    #[test]
    fn test_forward_oneshot_clamps_and_stops() {
        // jump at frame 2 of 4: next tick advances to 3, the one after
        // clamps at 3 and stops
        let store = store_with(AnimationKind::Jump, 4, false);
        let mut pb = Playback::new();
        pb.play(&store, AnimationKind::Jump, false, false);
        pb.advance(0.1);
        pb.advance(0.1);
        assert_eq!(pb.frame_index(), 2);
        pb.advance(0.1);
        assert_eq!(pb.frame_index(), 3);
        assert!(pb.is_playing());
        pb.advance(0.1);
        assert_eq!(pb.frame_index(), 3);
        assert!(!pb.is_playing());
    }

    #[test]
    fn test_forward_loop_wraps() {
        let store = store_with(AnimationKind::Walk, 2, true);
        let mut pb = Playback::new();
        pb.play(&store, AnimationKind::Walk, false, false);
        pb.advance(0.1);
        assert_eq!(pb.frame_index(), 1);
        pb.advance(0.1);
        assert_eq!(pb.frame_index(), 0);
        assert!(pb.is_playing());
    }

    #[test]
    fn test_reverse_prone_releases_lock_exactly_on_finish() {
        let store = store_with(AnimationKind::Prone, 2, false);
        let mut pb = Playback::new();
        pb.play(&store, AnimationKind::Prone, true, true);
        assert!(pb.is_transition_locked());
        assert_eq!(pb.frame_index(), 1);

        let out = pb.advance(0.1);
        assert_eq!(pb.frame_index(), 0);
        assert!(pb.is_transition_locked());
        assert!(!out.reevaluate_pose);

        let out = pb.advance(0.1);
        assert_eq!(pb.frame_index(), 0);
        assert!(!pb.is_playing());
        assert!(!pb.is_reverse());
        assert!(!pb.is_transition_locked());
        assert!(out.reevaluate_pose);
    }

    #[test]
    fn test_transition_lock_rejects_unforced_play() {
        let mut store = store_with(AnimationKind::Prone, 2, false);
        let walk_frames: Vec<Frame> = (0..3)
            .map(|i| Frame::new(AnimationKind::Walk, format!("w{i}"), format!("w{i}")))
            .collect();
        store.upsert(AnimationKind::Walk, walk_frames, 0.1, true, 1.0);

        let mut pb = Playback::new();
        pb.play(&store, AnimationKind::Prone, true, true);
        assert!(!pb.play(&store, AnimationKind::Walk, false, false));
        assert_eq!(pb.active_kind(), Some(AnimationKind::Prone));
        // forced requests still win
        assert!(pb.play(&store, AnimationKind::Walk, true, false));
        assert_eq!(pb.active_kind(), Some(AnimationKind::Walk));
        assert!(!pb.is_transition_locked());
    }

    #[test]
    fn test_index_stays_in_bounds_over_many_ticks() {
        let store = store_with(AnimationKind::Crawl, 3, true);
        let mut pb = Playback::new();
        pb.play(&store, AnimationKind::Crawl, false, false);
        for _ in 0..100 {
            pb.advance(0.07);
            assert!(pb.frame_index() < 3);
        }
    }

    #[test]
    fn test_sync_upsert_swaps_in_place() {
        let mut store = store_with(AnimationKind::Walk, 4, true);
        let mut pb = Playback::new();
        pb.play(&store, AnimationKind::Walk, false, false);
        pb.advance(0.1);
        pb.advance(0.1);
        assert_eq!(pb.frame_index(), 2);

        store.upsert(
            AnimationKind::Walk,
            vec![Frame::new(AnimationKind::Walk, "n0", "n0_big")],
            0.1,
            true,
            0.5,
        );
        pb.sync_upsert(store.get(AnimationKind::Walk).unwrap());
        assert_eq!(pb.frame_index(), 0);
        assert_eq!(pb.sprite().map(|s| &**s), Some("n0_big"));
        assert!(pb.is_playing());
    }

    #[test]
    fn test_sync_remove_stops_active_only() {
        let store = store_with(AnimationKind::Idle, 2, true);
        let mut pb = Playback::new();
        pb.play(&store, AnimationKind::Idle, false, false);
        pb.sync_remove(AnimationKind::Walk);
        assert!(pb.is_playing());
        pb.sync_remove(AnimationKind::Idle);
        assert!(!pb.is_playing());
        assert!(pb.active_kind().is_none());
    }
}
