//! Animation-set rules: slot counts, canonical frame order, scoring.
//!
//! Each [`AnimationKind`] has a fixed number of timeline slots and,
//! optionally, a canonical sprite order. Scoring compares a slot set against
//! that order position by position and maps the match count onto the
//! `[min_quality, 1.0]` range, so even a completely wrong assembly still
//! yields a usable (if sluggish) ability.
//!
//! Rules are loaded from a JSON file (see `assets/animations.json`); missing
//! or malformed entries degrade to defaults instead of failing startup.

use bevy_ecs::prelude::Resource;
use log::{info, warn};
use rustc_hash::FxHashMap;
use serde::Deserialize;

use crate::resources::animationstore::{AnimationKind, Frame, SpriteKey};

/// Quality floor for the worst possible assembly.
pub const DEFAULT_MIN_QUALITY: f32 = 0.3;

/// Slot count used for kinds the rules file doesn't mention.
pub const DEFAULT_MAX_SLOTS: usize = 6;

/// Per-kind slot configuration.
#[derive(Debug, Clone)]
pub struct SlotRules {
    pub max_slots: usize,
    /// Canonical sprite order, one entry per slot. `None` means "anything
    /// goes" and scoring returns the floor.
    pub correct_pattern: Option<Vec<SpriteKey>>,
}

/// Result of scoring a slot set against the canonical pattern.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PatternScore {
    /// Slots whose frame sits in its canonical position.
    pub correct: usize,
    /// Quality in `[min_quality, 1.0]`.
    pub quality: f32,
}

/// Raw JSON shape of one animation set.
#[derive(Debug, Clone, Deserialize)]
struct SetDef {
    kind: String,
    max_slots: usize,
    #[serde(default)]
    correct_pattern: Vec<String>,
}

/// Raw JSON shape of one starter frame.
#[derive(Debug, Clone, Deserialize)]
struct StarterDef {
    kind: String,
    ui_sprite: String,
    render_sprite: String,
}

/// Raw JSON shape of the rules file.
#[derive(Debug, Clone, Deserialize)]
struct RulesFile {
    #[serde(default = "default_min_quality")]
    min_quality: f32,
    sets: Vec<SetDef>,
    #[serde(default)]
    starting_frames: Vec<StarterDef>,
}

fn default_min_quality() -> f32 {
    DEFAULT_MIN_QUALITY
}

/// World-wide animation-set rules resource.
#[derive(Resource, Debug, Clone)]
pub struct AnimationRules {
    pub min_quality: f32,
    sets: FxHashMap<AnimationKind, SlotRules>,
    /// Frames granted to the inventory when play begins.
    pub starting_frames: Vec<Frame>,
}

impl Default for AnimationRules {
    fn default() -> Self {
        Self {
            min_quality: DEFAULT_MIN_QUALITY,
            sets: FxHashMap::default(),
            starting_frames: Vec::new(),
        }
    }
}

impl AnimationRules {
    /// Load rules from a JSON file.
    ///
    /// A pattern whose length doesn't match `max_slots` is dropped with a
    /// warning (the set then scores at the floor); unknown kind tags are
    /// skipped. The file itself being unreadable is an error the caller may
    /// ignore in favor of [`AnimationRules::default`].
    pub fn load_from_file(path: &str) -> Result<Self, String> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read animation rules {path}: {e}"))?;
        let file: RulesFile = serde_json::from_str(&text)
            .map_err(|e| format!("Failed to parse animation rules {path}: {e}"))?;

        let mut rules = AnimationRules {
            min_quality: file.min_quality.clamp(0.0, 1.0),
            ..Default::default()
        };

        for def in file.sets {
            let Some(kind) = AnimationKind::from_tag(&def.kind) else {
                warn!("animation rules: unknown kind tag '{}', skipped", def.kind);
                continue;
            };
            let pattern: Vec<SpriteKey> =
                def.correct_pattern.into_iter().map(SpriteKey::from).collect();
            let correct_pattern = if pattern.is_empty() {
                None
            } else if pattern.len() != def.max_slots {
                warn!(
                    "animation rules: {kind} pattern length {} != max_slots {}, pattern ignored",
                    pattern.len(),
                    def.max_slots
                );
                None
            } else {
                Some(pattern)
            };
            rules.sets.insert(
                kind,
                SlotRules {
                    max_slots: def.max_slots,
                    correct_pattern,
                },
            );
        }

        for starter in file.starting_frames {
            let Some(kind) = AnimationKind::from_tag(&starter.kind) else {
                warn!(
                    "animation rules: starter frame with unknown kind '{}', skipped",
                    starter.kind
                );
                continue;
            };
            rules
                .starting_frames
                .push(Frame::new(kind, starter.ui_sprite, starter.render_sprite));
        }

        info!(
            "Loaded animation rules: {} sets, {} starter frames, min quality {:.2}",
            rules.sets.len(),
            rules.starting_frames.len(),
            rules.min_quality
        );
        Ok(rules)
    }

    /// Register or replace the rules for one kind. Used by tests and by
    /// programmatic setup.
    pub fn set_rules(
        &mut self,
        kind: AnimationKind,
        max_slots: usize,
        correct_pattern: Option<Vec<SpriteKey>>,
    ) {
        if let Some(pattern) = &correct_pattern {
            if pattern.len() != max_slots {
                warn!(
                    "{kind} pattern length {} != max_slots {max_slots}, pattern ignored",
                    pattern.len()
                );
                self.sets.insert(
                    kind,
                    SlotRules {
                        max_slots,
                        correct_pattern: None,
                    },
                );
                return;
            }
        }
        self.sets.insert(
            kind,
            SlotRules {
                max_slots,
                correct_pattern,
            },
        );
    }

    pub fn max_slots(&self, kind: AnimationKind) -> usize {
        self.sets
            .get(&kind)
            .map(|s| s.max_slots)
            .unwrap_or(DEFAULT_MAX_SLOTS)
    }

    pub fn pattern(&self, kind: AnimationKind) -> Option<&[SpriteKey]> {
        self.sets
            .get(&kind)
            .and_then(|s| s.correct_pattern.as_deref())
    }

    /// Score a slot set against the canonical pattern for `kind`.
    ///
    /// A slot counts as correct only when it is occupied and its frame's
    /// identifying sprite equals the pattern entry at the same position.
    /// Without a pattern the score is the floor; a zero-slot set never
    /// divides by zero.
    pub fn score(&self, kind: AnimationKind, slots: &[Option<Frame>]) -> PatternScore {
        let floor = PatternScore {
            correct: 0,
            quality: self.min_quality,
        };
        let Some(pattern) = self.pattern(kind) else {
            return floor;
        };
        let total = self.max_slots(kind);
        if total == 0 {
            return floor;
        }
        let correct = pattern
            .iter()
            .zip(slots.iter())
            .filter(|(want, slot)| {
                slot.as_ref()
                    .is_some_and(|frame| frame.ui_sprite == **want)
            })
            .count();
        let quality = self.min_quality + (1.0 - self.min_quality) * (correct as f32 / total as f32);
        PatternScore { correct, quality }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-6;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    fn frame(kind: AnimationKind, key: &str) -> Option<Frame> {
        Some(Frame::new(kind, key, key))
    }

    fn prone_rules() -> AnimationRules {
        let mut rules = AnimationRules::default();
        rules.set_rules(
            AnimationKind::Prone,
            2,
            Some(vec![SpriteKey::from("sprite_a"), SpriteKey::from("sprite_b")]),
        );
        rules
    }

    #[test]
    fn test_score_without_pattern_is_floor() {
        let mut rules = AnimationRules::default();
        rules.set_rules(AnimationKind::Idle, 3, None);
        let slots = vec![
            frame(AnimationKind::Idle, "x"),
            frame(AnimationKind::Idle, "y"),
            frame(AnimationKind::Idle, "z"),
        ];
        let score = rules.score(AnimationKind::Idle, &slots);
        assert_eq!(score.correct, 0);
        assert!(approx_eq(score.quality, DEFAULT_MIN_QUALITY));
    }

    #[test]
    fn test_score_position_exact() {
        let rules = prone_rules();

        // reversed order matches nothing even though both sprites exist
        let reversed = vec![
            frame(AnimationKind::Prone, "sprite_b"),
            frame(AnimationKind::Prone, "sprite_a"),
        ];
        let score = rules.score(AnimationKind::Prone, &reversed);
        assert_eq!(score.correct, 0);
        assert!(approx_eq(score.quality, DEFAULT_MIN_QUALITY));

        // canonical order scores full quality
        let canonical = vec![
            frame(AnimationKind::Prone, "sprite_a"),
            frame(AnimationKind::Prone, "sprite_b"),
        ];
        let score = rules.score(AnimationKind::Prone, &canonical);
        assert_eq!(score.correct, 2);
        assert!(approx_eq(score.quality, 1.0));
    }

    #[test]
    fn test_score_is_monotonic_in_correct_count() {
        let mut rules = AnimationRules::default();
        rules.set_rules(
            AnimationKind::Walk,
            4,
            Some(vec![
                SpriteKey::from("w0"),
                SpriteKey::from("w1"),
                SpriteKey::from("w2"),
                SpriteKey::from("w3"),
            ]),
        );
        let mut last = -1.0f32;
        for k in 0..=4 {
            let slots: Vec<Option<Frame>> = (0..4)
                .map(|i| {
                    if i < k {
                        frame(AnimationKind::Walk, &format!("w{i}"))
                    } else {
                        frame(AnimationKind::Walk, "wrong")
                    }
                })
                .collect();
            let score = rules.score(AnimationKind::Walk, &slots);
            assert_eq!(score.correct, k);
            assert!(score.quality >= last);
            last = score.quality;
        }
        assert!(approx_eq(last, 1.0));
    }

    #[test]
    fn test_empty_slots_never_count() {
        let rules = prone_rules();
        let slots = vec![None, frame(AnimationKind::Prone, "sprite_b")];
        let score = rules.score(AnimationKind::Prone, &slots);
        assert_eq!(score.correct, 1);
    }

    #[test]
    fn test_zero_slots_scores_floor() {
        let mut rules = AnimationRules::default();
        rules.set_rules(AnimationKind::Jump, 0, Some(vec![]));
        let score = rules.score(AnimationKind::Jump, &[]);
        assert_eq!(score.correct, 0);
        assert!(approx_eq(score.quality, DEFAULT_MIN_QUALITY));
    }

    #[test]
    fn test_mismatched_pattern_is_dropped() {
        let mut rules = AnimationRules::default();
        rules.set_rules(
            AnimationKind::Crawl,
            3,
            Some(vec![SpriteKey::from("only_one")]),
        );
        assert!(rules.pattern(AnimationKind::Crawl).is_none());
        assert_eq!(rules.max_slots(AnimationKind::Crawl), 3);
    }

    #[test]
    fn test_unknown_kind_uses_default_slots() {
        let rules = AnimationRules::default();
        assert_eq!(rules.max_slots(AnimationKind::Walk), DEFAULT_MAX_SLOTS);
    }
}
