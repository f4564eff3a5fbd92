//! Movement abilities gated by assembled animations.
//!
//! Finishing a timeline for walk/jump/prone/crawl unlocks the matching
//! ability at the assembly's quality; tearing the timeline down locks it
//! again. Movement systems read this resource every physics tick, so a
//! change made while editing takes effect on the next tick.

use std::fmt;

use bevy_ecs::prelude::Resource;
use log::info;

use crate::resources::animationstore::AnimationKind;
use crate::resources::animrules::DEFAULT_MIN_QUALITY;

/// Movement capabilities the player can earn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Ability {
    Walk,
    Jump,
    Prone,
    Crawl,
}

impl Ability {
    /// The ability an animation kind feeds, if any. `Idle` unlocks nothing;
    /// it only affects which animation plays while standing still.
    pub fn for_kind(kind: AnimationKind) -> Option<Ability> {
        match kind {
            AnimationKind::Walk => Some(Ability::Walk),
            AnimationKind::Jump => Some(Ability::Jump),
            AnimationKind::Prone => Some(Ability::Prone),
            AnimationKind::Crawl => Some(Ability::Crawl),
            AnimationKind::Idle => None,
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            Ability::Walk => "walk",
            Ability::Jump => "jump",
            Ability::Prone => "prone",
            Ability::Crawl => "crawl",
        }
    }
}

impl fmt::Display for Ability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Unlock flag plus the quality multiplier the ability performs at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AbilityState {
    pub unlocked: bool,
    /// In `[min_quality, 1.0]` while unlocked; reset to 1.0 when locked.
    pub quality: f32,
}

impl Default for AbilityState {
    fn default() -> Self {
        Self {
            unlocked: false,
            quality: 1.0,
        }
    }
}

/// Per-ability unlock state for the player.
#[derive(Resource, Debug, Clone)]
pub struct Abilities {
    walk: AbilityState,
    jump: AbilityState,
    prone: AbilityState,
    crawl: AbilityState,
    min_quality: f32,
}

impl Default for Abilities {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_QUALITY)
    }
}

impl Abilities {
    pub fn new(min_quality: f32) -> Self {
        Self {
            walk: AbilityState::default(),
            jump: AbilityState::default(),
            prone: AbilityState::default(),
            crawl: AbilityState::default(),
            min_quality,
        }
    }

    fn state_mut(&mut self, ability: Ability) -> &mut AbilityState {
        match ability {
            Ability::Walk => &mut self.walk,
            Ability::Jump => &mut self.jump,
            Ability::Prone => &mut self.prone,
            Ability::Crawl => &mut self.crawl,
        }
    }

    pub fn state(&self, ability: Ability) -> AbilityState {
        match ability {
            Ability::Walk => self.walk,
            Ability::Jump => self.jump,
            Ability::Prone => self.prone,
            Ability::Crawl => self.crawl,
        }
    }

    pub fn can(&self, ability: Ability) -> bool {
        self.state(ability).unlocked
    }

    pub fn quality(&self, ability: Ability) -> f32 {
        self.state(ability).quality
    }

    /// Unlock `ability` at `quality` (clamped into `[min_quality, 1.0]`).
    /// Returns the stored multiplier.
    pub fn unlock(&mut self, ability: Ability, quality: f32) -> f32 {
        let min = self.min_quality;
        let state = self.state_mut(ability);
        state.unlocked = true;
        state.quality = quality.clamp(min, 1.0);
        info!("{ability} unlocked at quality {:.2}", state.quality);
        state.quality
    }

    /// Lock `ability` and reset its multiplier.
    pub fn lock(&mut self, ability: Ability) {
        let state = self.state_mut(ability);
        state.unlocked = false;
        state.quality = 1.0;
        info!("{ability} locked");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-6;

    #[test]
    fn test_kind_to_ability_mapping() {
        assert_eq!(Ability::for_kind(AnimationKind::Walk), Some(Ability::Walk));
        assert_eq!(Ability::for_kind(AnimationKind::Jump), Some(Ability::Jump));
        assert_eq!(
            Ability::for_kind(AnimationKind::Prone),
            Some(Ability::Prone)
        );
        assert_eq!(
            Ability::for_kind(AnimationKind::Crawl),
            Some(Ability::Crawl)
        );
        assert_eq!(Ability::for_kind(AnimationKind::Idle), None);
    }

    #[test]
    fn test_unlock_clamps_quality() {
        let mut abilities = Abilities::new(0.3);
        let stored = abilities.unlock(Ability::Walk, 0.1);
        assert!((stored - 0.3).abs() < EPSILON);
        let stored = abilities.unlock(Ability::Walk, 1.7);
        assert!((stored - 1.0).abs() < EPSILON);
        assert!(abilities.can(Ability::Walk));
    }

    #[test]
    fn test_lock_resets_multiplier() {
        let mut abilities = Abilities::new(0.3);
        abilities.unlock(Ability::Jump, 0.5);
        abilities.lock(Ability::Jump);
        assert!(!abilities.can(Ability::Jump));
        assert!((abilities.quality(Ability::Jump) - 1.0).abs() < EPSILON);
    }
}
