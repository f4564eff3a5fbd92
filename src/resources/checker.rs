//! Frame-collection completion tracking.
//!
//! After each pickup we check whether the inventory now holds every sprite of
//! that kind's canonical pattern. The first time a kind becomes complete a
//! notification fires; repeats are suppressed for the rest of the session.

use bevy_ecs::prelude::Resource;
use log::debug;
use rustc_hash::FxHashSet;

use crate::resources::animationstore::AnimationKind;
use crate::resources::animrules::AnimationRules;
use crate::resources::inventory::FrameInventory;

/// Tracks which animation kinds have already triggered the "all frames
/// collected" notification.
#[derive(Resource, Debug, Default)]
pub struct CollectionChecker {
    notified: FxHashSet<AnimationKind>,
}

impl CollectionChecker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the set for `kind` is complete: every pattern sprite is
    /// covered by some inventory frame of that kind. Kinds without a pattern
    /// are never considered complete.
    pub fn is_complete(
        kind: AnimationKind,
        rules: &AnimationRules,
        inventory: &FrameInventory,
    ) -> bool {
        let Some(pattern) = rules.pattern(kind) else {
            debug!("no pattern configured for {kind}, completion check skipped");
            return false;
        };
        pattern
            .iter()
            .all(|sprite| inventory.has_sprite(kind, sprite))
    }

    /// Run the completion check and remember a positive result. Returns true
    /// exactly once per kind per session.
    pub fn mark_if_complete(
        &mut self,
        kind: AnimationKind,
        rules: &AnimationRules,
        inventory: &FrameInventory,
    ) -> bool {
        if self.notified.contains(&kind) {
            return false;
        }
        if Self::is_complete(kind, rules, inventory) {
            self.notified.insert(kind);
            return true;
        }
        false
    }

    /// Forget past notifications (used when the session restarts).
    pub fn reset(&mut self) {
        self.notified.clear();
    }
}
