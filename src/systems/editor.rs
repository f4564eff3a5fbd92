//! Timeline editor systems.
//!
//! - [`editor_hotkeys`] turns the toggle key into an [`EditorCmd`].
//! - [`process_editor_cmds`] applies drag/drop/switch/toggle commands to the
//!   timeline, moves frame ownership between inventory and slots, and
//!   re-evaluates the assembled animation after every mutation.
//! - [`tick_editor_preview`] advances the panel's little preview player.
//! - [`apply_deferred_view_refresh`] rebuilds the slot view one tick after a
//!   slot-count change (discarded if the kind changed again in between).
//!
//! # Assembly Flow
//!
//! 1. Frames land in [`FrameInventory`](crate::resources::inventory::FrameInventory)
//! 2. Drops move them into [`TimelineEditor`](crate::resources::timeline::TimelineEditor) slots
//! 3. After every mutation [`refresh_assembly`] scores the row and updates
//!    [`AnimationStore`](crate::resources::animationstore::AnimationStore)
//! 4. Registration flips the mapped ability and swaps playback in place

use bevy_ecs::prelude::*;
use log::{debug, info, warn};

use crate::components::body::Body;
use crate::components::player::Player;
use crate::events::ability::{AbilityLocked, AbilityUnlocked};
use crate::events::editor::{DragSource, EditorCmd};
use crate::resources::abilities::{Abilities, Ability};
use crate::resources::animationstore::{AnimationKind, AnimationStore};
use crate::resources::animrules::AnimationRules;
use crate::resources::editorview::EditorView;
use crate::resources::gameconfig::GameConfig;
use crate::resources::input::InputState;
use crate::resources::inventory::FrameInventory;
use crate::resources::playback::Playback;
use crate::resources::timeline::TimelineEditor;
use crate::resources::clock::Clock;

/// Emit [`EditorCmd::Toggle`] when the editor key goes down.
pub fn editor_hotkeys(input: Res<InputState>, mut writer: MessageWriter<EditorCmd>) {
    if input.editor_toggle.just_pressed {
        writer.write(EditorCmd::Toggle);
    }
}

/// Advance the ECS message queue for [`EditorCmd`] so same-tick readers can
/// observe writes.
pub fn pump_editor_messages(mut msgs: ResMut<Messages<EditorCmd>>) {
    msgs.update();
}

/// Re-evaluate the assembled animation for `kind` from its current slot row.
///
/// The invariant this enforces: an animation is registered for a kind iff
/// every slot of that kind's row is occupied. Reaching full occupancy
/// (re)registers at the scored quality and unlocks the mapped ability;
/// dropping below removes the registration and locks it, even mid-edit.
pub fn refresh_assembly(
    kind: AnimationKind,
    timeline: &TimelineEditor,
    rules: &AnimationRules,
    config: &GameConfig,
    store: &mut AnimationStore,
    playback: &mut Playback,
    abilities: &mut Abilities,
    player_stationary: bool,
    commands: &mut Commands,
) {
    let max_slots = rules.max_slots(kind);
    let row = timeline.row_for(kind);
    let occupied = row
        .map(|row| row.iter().filter(|slot| slot.is_some()).count())
        .unwrap_or(0);

    if let Some(row) = row.filter(|_| max_slots > 0 && occupied == max_slots) {
        let score = rules.score(kind, row);
        let frames = row.iter().flatten().cloned().collect();
        let Some(anim) =
            store.upsert(kind, frames, config.frame_seconds, kind.loops(), score.quality)
        else {
            return;
        };
        let anim = anim.clone();
        info!(
            "{kind} assembled: {}/{} correct, quality {:.2}",
            score.correct, max_slots, score.quality
        );
        playback.sync_upsert(&anim);
        if let Some(ability) = Ability::for_kind(kind) {
            let multiplier = abilities.unlock(ability, score.quality);
            commands.trigger(AbilityUnlocked {
                ability,
                multiplier,
            });
        } else if player_stationary {
            // idle has no ability; it just starts playing on the spot
            playback.play(store, kind, false, false);
        }
    } else if store.has(kind) {
        info!("{kind} timeline incomplete ({occupied}/{max_slots}), unregistering");
        store.remove(kind);
        playback.sync_remove(kind);
        if let Some(ability) = Ability::for_kind(kind) {
            abilities.lock(ability);
            commands.trigger(AbilityLocked { ability });
        }
    }
}

/// Rebuild the whole editor view model from current state.
fn sync_view(
    view: &mut EditorView,
    timeline: &TimelineEditor,
    inventory: &FrameInventory,
    rules: &AnimationRules,
    config: &GameConfig,
) {
    let kind = timeline.current();
    view.visible = timeline.is_open();
    view.recording = timeline.is_open();
    view.preview_backdrop = timeline.is_open();

    let score = rules.score(kind, timeline.slots());
    view.feedback = format!("{}/{}", score.correct, rules.max_slots(kind));

    view.slot_sprites = timeline
        .slots()
        .iter()
        .map(|slot| slot.as_ref().map(|f| f.ui_sprite.clone()))
        .collect();

    view.inventory_sprites = if config.filter_inventory {
        inventory
            .of_kind(kind)
            .map(|f| f.ui_sprite.clone())
            .collect()
    } else {
        inventory
            .frames()
            .iter()
            .map(|f| f.ui_sprite.clone())
            .collect()
    };

    if timeline.is_open() && timeline.has_frames() {
        view.preview_alpha = 1.0;
        view.preview.restart();
    } else {
        view.preview_alpha = 0.0;
        view.preview.stop();
        view.preview_sprite = None;
    }
}

/// Apply queued editor commands.
///
/// Contract
/// - Frame ownership moves are explicit: a displaced occupant swaps back to
///   the drag's origin slot, or returns to the inventory when the drag came
///   from there. No frame is destroyed or duplicated.
/// - Every mutation ends with [`refresh_assembly`] for the affected kind(s)
///   and a view rebuild (deferred one tick when the slot count changed).
#[allow(clippy::too_many_arguments)]
pub fn process_editor_cmds(
    mut reader: MessageReader<EditorCmd>,
    mut timeline: ResMut<TimelineEditor>,
    mut inventory: ResMut<FrameInventory>,
    rules: Res<AnimationRules>,
    config: Res<GameConfig>,
    mut store: ResMut<AnimationStore>,
    mut playback: ResMut<Playback>,
    mut abilities: ResMut<Abilities>,
    mut view: ResMut<EditorView>,
    player: Query<&Body, With<Player>>,
    mut commands: Commands,
) {
    let stationary = player
        .iter()
        .next()
        .map(|body| body.velocity.length() < 0.1)
        .unwrap_or(false);

    for cmd in reader.read() {
        match *cmd {
            EditorCmd::Toggle => {
                if timeline.is_open() {
                    // closing: save, and force one last evaluation in case a
                    // mutation slipped past the editor
                    timeline.save_current();
                    if timeline.has_frames() {
                        refresh_assembly(
                            timeline.current(),
                            &timeline,
                            &rules,
                            &config,
                            &mut store,
                            &mut playback,
                            &mut abilities,
                            stationary,
                            &mut commands,
                        );
                    }
                    timeline.set_open(false);
                    view.hide();
                    debug!("editor closed");
                } else {
                    timeline.set_open(true);
                    let kind = timeline.current();
                    timeline.load_for(kind, rules.max_slots(kind));
                    sync_view(&mut view, &timeline, &inventory, &rules, &config);
                    debug!("editor opened on {kind}");
                }
            }
            EditorCmd::SelectKind(kind) => {
                if kind == timeline.current() {
                    continue;
                }
                let new_slots = rules.max_slots(kind);
                let resized = new_slots != timeline.slots().len();
                let left = timeline.switch_to(kind, new_slots);
                info!("switched timeline from {left} to {kind}");
                for affected in [left, kind] {
                    refresh_assembly(
                        affected,
                        &timeline,
                        &rules,
                        &config,
                        &mut store,
                        &mut playback,
                        &mut abilities,
                        stationary,
                        &mut commands,
                    );
                }
                if !resized {
                    // same row shape, no need to wait for the rebuild tick
                    sync_view(&mut view, &timeline, &inventory, &rules, &config);
                }
            }
            EditorCmd::DropOnSlot { source, slot } => {
                match source {
                    DragSource::Inventory(index) => {
                        let Some(frame) = inventory.take(index) else {
                            continue;
                        };
                        if let Some(displaced) = timeline.place(frame, slot) {
                            inventory.add(displaced);
                        }
                    }
                    DragSource::Slot(origin) => {
                        if origin == slot {
                            continue;
                        }
                        let Some(frame) = timeline.take(origin) else {
                            warn!("drag from empty slot {origin} ignored");
                            continue;
                        };
                        if let Some(displaced) = timeline.place(frame, slot) {
                            // swap the displaced occupant back to the origin
                            timeline.place(displaced, origin);
                        }
                    }
                }
                refresh_assembly(
                    timeline.current(),
                    &timeline,
                    &rules,
                    &config,
                    &mut store,
                    &mut playback,
                    &mut abilities,
                    stationary,
                    &mut commands,
                );
                sync_view(&mut view, &timeline, &inventory, &rules, &config);
            }
            EditorCmd::DropOnInventory { source } => {
                match source {
                    DragSource::Slot(origin) => {
                        if let Some(frame) = timeline.take(origin) {
                            inventory.add(frame);
                        }
                    }
                    // inventory frames dropped back on the inventory never
                    // left it; just repaint
                    DragSource::Inventory(_) => {}
                }
                refresh_assembly(
                    timeline.current(),
                    &timeline,
                    &rules,
                    &config,
                    &mut store,
                    &mut playback,
                    &mut abilities,
                    stationary,
                    &mut commands,
                );
                sync_view(&mut view, &timeline, &inventory, &rules, &config);
            }
            EditorCmd::RemoveFromSlot { slot } => {
                if let Some(frame) = timeline.take(slot) {
                    inventory.add(frame);
                }
                refresh_assembly(
                    timeline.current(),
                    &timeline,
                    &rules,
                    &config,
                    &mut store,
                    &mut playback,
                    &mut abilities,
                    stationary,
                    &mut commands,
                );
                sync_view(&mut view, &timeline, &inventory, &rules, &config);
            }
        }
    }
}

/// One tick after a slot-count change, rebuild the view for the new row.
/// A switch that happened in between supersedes the refresh.
pub fn apply_deferred_view_refresh(
    mut timeline: ResMut<TimelineEditor>,
    inventory: Res<FrameInventory>,
    rules: Res<AnimationRules>,
    config: Res<GameConfig>,
    mut view: ResMut<EditorView>,
) {
    if timeline.take_pending_refresh().is_some() {
        sync_view(&mut view, &timeline, &inventory, &rules, &config);
    }
}

/// Cycle the editor preview over the occupied slots while the panel is open.
pub fn tick_editor_preview(
    clock: Res<Clock>,
    config: Res<GameConfig>,
    timeline: Res<TimelineEditor>,
    mut view: ResMut<EditorView>,
) {
    if !timeline.is_open() {
        return;
    }
    let frames = timeline.frames_in_order();
    view.preview
        .advance(clock.delta, config.frame_seconds, frames.len());
    view.preview_sprite = frames
        .get(view.preview.index)
        .map(|f| f.ui_sprite.clone());
}
