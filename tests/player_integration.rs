//! Integration tests for movement gating, quality multipliers, and the
//! reverse stand-up transition.
//!
//! The harness mirrors the demo schedule; animations are assembled through
//! the editor commands so the whole unlock path is exercised, not just the
//! resources.

use bevy_ecs::observer::Observer;
use bevy_ecs::prelude::*;

use flipbook::components::body::Body;
use flipbook::components::collider::ColliderShape;
use flipbook::components::mapposition::MapPosition;
use flipbook::components::player::{Player, PlayerPose};
use flipbook::components::sprite::Sprite;
use flipbook::events::ability::{observe_ability_locked, observe_ability_unlocked};
use flipbook::events::editor::{DragSource, EditorCmd};
use flipbook::events::notify::observe_set_completed;
use flipbook::events::pickup::FrameCollected;
use flipbook::resources::abilities::{Abilities, Ability};
use flipbook::resources::animationstore::{AnimationKind, AnimationStore, Frame, SpriteKey};
use flipbook::resources::animrules::AnimationRules;
use flipbook::resources::checker::CollectionChecker;
use flipbook::resources::clock::Clock;
use flipbook::resources::editorview::EditorView;
use flipbook::resources::gameconfig::GameConfig;
use flipbook::resources::gamestate::{GameState, GameStates, NextGameState};
use flipbook::resources::input::InputState;
use flipbook::resources::inventory::FrameInventory;
use flipbook::resources::notification::NotificationPanel;
use flipbook::resources::playback::Playback;
use flipbook::resources::timeline::TimelineEditor;
use flipbook::systems::editor::{
    apply_deferred_view_refresh, editor_hotkeys, process_editor_cmds, pump_editor_messages,
    tick_editor_preview,
};
use flipbook::systems::gamestate::state_is_playing;
use flipbook::systems::input::clear_input_edges;
use flipbook::systems::movement::{apply_player_movement, integrate_positions, probe_floor};
use flipbook::systems::notification::advance_notification;
use flipbook::systems::pickup::{collect_frames, pump_pickup_messages};
use flipbook::systems::playback::advance_playback;
use flipbook::systems::playeranim::select_player_animation;
use flipbook::systems::playerstate::update_player_state;
use flipbook::systems::time::update_clock;

const DT: f32 = 0.1;
const EPSILON: f32 = 1e-3;

fn test_rules() -> AnimationRules {
    let mut rules = AnimationRules::default();
    rules.set_rules(AnimationKind::Idle, 2, None);
    rules.set_rules(
        AnimationKind::Walk,
        3,
        Some(vec![
            SpriteKey::from("w0"),
            SpriteKey::from("w1"),
            SpriteKey::from("w2"),
        ]),
    );
    rules.set_rules(
        AnimationKind::Prone,
        2,
        Some(vec![SpriteKey::from("p0"), SpriteKey::from("p1")]),
    );
    rules.set_rules(
        AnimationKind::Jump,
        2,
        Some(vec![SpriteKey::from("j0"), SpriteKey::from("j1")]),
    );
    rules.set_rules(AnimationKind::Crawl, 2, None);
    rules
}

struct Harness {
    world: World,
    schedule: Schedule,
}

impl Harness {
    fn new() -> Self {
        let rules = test_rules();
        let config = GameConfig::new();

        let mut world = World::new();
        world.insert_resource(Clock::default());
        world.insert_resource(InputState::default());
        world.insert_resource(FrameInventory::new());
        world.insert_resource(AnimationStore::new());
        world.insert_resource(Playback::new());
        world.insert_resource(Abilities::new(rules.min_quality));
        world.insert_resource(CollectionChecker::new());
        world.insert_resource(EditorView::new());
        world.insert_resource(NotificationPanel::new(0.2, 10_000.0));
        world.insert_resource(TimelineEditor::new(
            AnimationKind::Idle,
            rules.max_slots(AnimationKind::Idle),
        ));
        world.insert_resource(rules);
        world.insert_resource(config);
        world.insert_resource(NextGameState::new());
        world.insert_resource(Messages::<EditorCmd>::default());
        world.insert_resource(Messages::<FrameCollected>::default());

        let mut state = GameState::new();
        state.set(GameStates::Playing);
        world.insert_resource(state);

        let mut pose = PlayerPose::new();
        pose.grounded = true;
        pose.was_grounded = true;
        world.spawn((
            Player,
            pose,
            Body::new(),
            MapPosition::new(0.0, 0.0),
            ColliderShape::standing(),
            Sprite::new(),
        ));

        world.spawn(Observer::new(observe_ability_unlocked));
        world.spawn(Observer::new(observe_ability_locked));
        world.spawn(Observer::new(observe_set_completed));
        world.flush();

        let mut schedule = Schedule::default();
        schedule.add_systems((pump_pickup_messages, collect_frames).chain());
        schedule.add_systems(
            update_player_state
                .run_if(state_is_playing)
                .after(collect_frames),
        );
        schedule.add_systems(
            apply_player_movement
                .run_if(state_is_playing)
                .after(update_player_state),
        );
        schedule.add_systems(integrate_positions.after(apply_player_movement));
        schedule.add_systems(probe_floor.after(integrate_positions));
        schedule.add_systems(
            (
                editor_hotkeys,
                pump_editor_messages,
                apply_deferred_view_refresh,
                process_editor_cmds,
            )
                .chain()
                .after(probe_floor),
        );
        schedule.add_systems(
            select_player_animation
                .run_if(state_is_playing)
                .after(process_editor_cmds),
        );
        schedule.add_systems(advance_playback.after(select_player_animation));
        schedule.add_systems(tick_editor_preview.after(process_editor_cmds));
        schedule.add_systems(advance_notification);
        schedule.add_systems(
            clear_input_edges
                .after(apply_player_movement)
                .after(editor_hotkeys)
                .after(update_player_state),
        );
        schedule
            .initialize(&mut world)
            .expect("schedule initializes");

        Harness { world, schedule }
    }

    fn tick(&mut self) {
        update_clock(&mut self.world, DT);
        self.schedule.run(&mut self.world);
        self.world.clear_trackers();
    }

    fn collect(&mut self, kind: AnimationKind, key: &str) {
        self.world
            .resource_mut::<Messages<FrameCollected>>()
            .write(FrameCollected {
                frame: Frame::new(kind, key, format!("{key}_big")),
            });
    }

    fn cmd(&mut self, cmd: EditorCmd) {
        self.world.resource_mut::<Messages<EditorCmd>>().write(cmd);
    }

    /// Assemble `kind` through the editor by placing the given inventory
    /// keys in order. Frames are collected first, so the inventory indices
    /// are stable during placement.
    fn assemble(&mut self, kind: AnimationKind, keys: &[&str]) {
        for key in keys {
            self.collect(kind, key);
        }
        self.cmd(EditorCmd::Toggle);
        self.cmd(EditorCmd::SelectKind(kind));
        self.tick();
        let base = self.world.resource::<FrameInventory>().len() - keys.len();
        for slot in 0..keys.len() {
            self.cmd(EditorCmd::DropOnSlot {
                source: DragSource::Inventory(base),
                slot,
            });
        }
        self.cmd(EditorCmd::Toggle);
        self.tick();
    }

    fn input(&mut self) -> Mut<'_, InputState> {
        self.world.resource_mut::<InputState>()
    }

    fn body(&mut self) -> Body {
        let mut query = self.world.query_filtered::<&Body, With<Player>>();
        *query.iter(&self.world).next().expect("player body")
    }

    fn pose(&mut self) -> PlayerPose {
        let mut query = self.world.query_filtered::<&PlayerPose, With<Player>>();
        *query.iter(&self.world).next().expect("player pose")
    }

    fn set_pose(&mut self, f: impl Fn(&mut PlayerPose)) {
        let mut query = self.world.query_filtered::<&mut PlayerPose, With<Player>>();
        for mut pose in query.iter_mut(&mut self.world) {
            f(&mut pose);
        }
    }

    fn collider(&mut self) -> ColliderShape {
        let mut query = self
            .world
            .query_filtered::<&ColliderShape, With<Player>>();
        *query.iter(&self.world).next().expect("player collider")
    }

    fn playback(&self) -> &Playback {
        self.world.resource::<Playback>()
    }

    fn abilities(&self) -> &Abilities {
        self.world.resource::<Abilities>()
    }
}

/// Without the walk ability, horizontal input does nothing; with it, speed
/// scales with the assembly quality.
#[test]
fn test_walk_speed_scales_with_quality() {
    let mut h = Harness::new();
    h.input().move_right.press();
    h.tick();
    assert!(h.body().velocity.x.abs() < EPSILON);

    // one of three frames in its canonical spot: quality 0.3 + 0.7/3
    h.assemble(AnimationKind::Walk, &["w0", "w2", "w1"]);
    let expected_quality = 0.3 + 0.7 / 3.0;
    assert!((h.abilities().quality(Ability::Walk) - expected_quality).abs() < EPSILON);

    h.tick();
    let expected = 5.0 * expected_quality;
    assert!((h.body().velocity.x - expected).abs() < EPSILON);
}

/// Jump velocity reaches the quality-scaled apex height, and the pose goes
/// airborne until the floor probe lands it again.
#[test]
fn test_jump_impulse_uses_quality_multiplier() {
    let mut h = Harness::new();
    h.assemble(AnimationKind::Jump, &["j0", "j1"]);
    assert!((h.abilities().quality(Ability::Jump) - 1.0).abs() < EPSILON);

    h.input().jump.press();
    h.tick();
    let pose = h.pose();
    assert!(pose.jumping);
    // vy right after the impulse: sqrt(2*g*h) minus one tick of gravity
    let expected = (2.0f32 * 25.0 * 3.0).sqrt() - 25.0 * DT;
    assert!((h.body().velocity.y - expected).abs() < 0.1);

    // jump animation is one-shot and gets forced on takeoff
    assert_eq!(h.playback().active_kind(), Some(AnimationKind::Jump));

    // ride the arc down; the probe lands and clears the jump state
    for _ in 0..40 {
        h.tick();
    }
    let pose = h.pose();
    assert!(pose.grounded);
    assert!(!pose.jumping);
}

/// Prone without crawl pins the player in place; unlocking crawl allows
/// movement at crawl speed, and the collider follows the crawl quality.
#[test]
fn test_crawl_gates_prone_movement() {
    let mut h = Harness::new();
    h.assemble(AnimationKind::Prone, &["p0", "p1"]);

    h.input().crouch.press();
    h.tick();
    assert!(h.pose().prone);
    assert_eq!(h.collider(), ColliderShape::crouched(1.0));

    h.input().move_right.press();
    h.tick();
    h.tick();
    assert!(
        h.body().velocity.x.abs() < EPSILON,
        "prone without crawl must not move"
    );
    assert!(!h.pose().crawling);

    // crawl has no pattern: floor quality, but movement unlocks
    h.assemble(AnimationKind::Crawl, &["c0", "c1"]);
    h.tick();
    h.tick();
    let pose = h.pose();
    assert!(pose.prone && pose.crawling);
    assert!((h.body().velocity.x - 2.0).abs() < EPSILON);
    assert_eq!(h.collider(), ColliderShape::crouched(0.3));
    assert_eq!(h.playback().active_kind(), Some(AnimationKind::Crawl));
}

/// Releasing crouch plays the prone cycle in reverse under the transition
/// lock: other play requests are rejected until the lock releases exactly
/// when the sequence reaches frame zero, and walking is suppressed
/// throughout.
#[test]
fn test_stand_up_transition_lock() {
    let mut h = Harness::new();
    h.assemble(AnimationKind::Prone, &["p0", "p1"]);
    h.assemble(AnimationKind::Walk, &["w0", "w1", "w2"]);
    h.assemble(AnimationKind::Idle, &["i0", "i1"]);

    h.input().crouch.press();
    h.tick();
    assert!(h.pose().prone);
    assert_eq!(h.playback().active_kind(), Some(AnimationKind::Prone));

    // stand up while holding right: the lock must keep both the walk
    // animation and walk movement out until the get-up finishes
    h.input().crouch.release();
    h.input().move_right.press();
    h.tick();
    {
        let playback = h.playback();
        assert!(playback.is_transition_locked());
        assert!(playback.is_reverse());
        assert_eq!(playback.active_kind(), Some(AnimationKind::Prone));
        assert_eq!(playback.frame_index(), 1);
    }
    assert!(!h.pose().prone, "pose stands up immediately");
    assert!(h.body().velocity.x.abs() < EPSILON, "no walking under lock");

    // frame step every 0.2s at DT=0.1: index 1 -> 0, then finish
    h.tick();
    h.tick();
    assert!(h.playback().is_transition_locked());
    assert_eq!(h.playback().frame_index(), 0);
    assert!(h.body().velocity.x.abs() < EPSILON);

    h.tick();
    h.tick();
    assert!(
        !h.playback().is_transition_locked(),
        "lock releases exactly when the reverse run reaches frame zero"
    );
    assert!(!h.playback().is_playing() || h.playback().active_kind() != Some(AnimationKind::Prone));

    // the very next tick the selector takes over and movement resumes
    h.tick();
    assert_eq!(h.playback().active_kind(), Some(AnimationKind::Walk));
    assert!((h.body().velocity.x - 5.0).abs() < EPSILON);
}

/// Tearing down the prone timeline while crouched forces a stand-up unless
/// something overhead blocks it.
#[test]
fn test_prone_lock_forces_stand_up() {
    let mut h = Harness::new();
    h.assemble(AnimationKind::Prone, &["p0", "p1"]);
    h.input().crouch.press();
    h.tick();
    assert!(h.pose().prone);

    // keep holding crouch; breaking the timeline revokes the ability
    h.cmd(EditorCmd::Toggle);
    h.cmd(EditorCmd::SelectKind(AnimationKind::Prone));
    h.tick();
    h.cmd(EditorCmd::RemoveFromSlot { slot: 0 });
    h.tick();

    assert!(!h.abilities().can(Ability::Prone));
    assert!(!h.pose().prone, "losing prone stands the player up");
    assert_eq!(h.collider(), ColliderShape::standing());
}

/// The forced stand-up is refused while obstructed from above.
#[test]
fn test_prone_lock_respects_obstruction() {
    let mut h = Harness::new();
    h.assemble(AnimationKind::Prone, &["p0", "p1"]);
    h.input().crouch.press();
    h.tick();
    h.set_pose(|pose| pose.obstructed_above = true);

    h.cmd(EditorCmd::Toggle);
    h.cmd(EditorCmd::SelectKind(AnimationKind::Prone));
    h.tick();
    h.cmd(EditorCmd::RemoveFromSlot { slot: 0 });
    h.tick();

    assert!(!h.abilities().can(Ability::Prone));
    assert!(h.pose().prone, "stuck under a ledge, the player stays down");

    // clearing the obstruction lets the release path stand them up
    h.set_pose(|pose| pose.obstructed_above = false);
    h.input().crouch.release();
    h.tick();
    assert!(!h.pose().prone);
}

/// Assembling idle while standing still starts the idle cycle on the spot
/// and writes its first sprite; the playback index stays in bounds forever
/// after.
#[test]
fn test_idle_assembly_plays_when_stationary() {
    let mut h = Harness::new();
    h.assemble(AnimationKind::Idle, &["i0", "i1"]);
    assert_eq!(h.playback().active_kind(), Some(AnimationKind::Idle));

    h.tick();
    {
        let mut query = h.world.query_filtered::<&Sprite, With<Player>>();
        let sprite = query.iter(&h.world).next().unwrap();
        assert!(sprite.key.is_some(), "idle sprite written to the surface");
    }

    for _ in 0..50 {
        h.tick();
        let playback = h.playback();
        if let Some(anim) = h
            .world
            .resource::<AnimationStore>()
            .get(AnimationKind::Idle)
        {
            assert!(playback.frame_index() < anim.frames.len());
        }
    }
}

/// Re-assembling the playing animation swaps it in place: same kind keeps
/// playing, index re-clamped, ability re-unlocked at the new quality.
#[test]
fn test_reassembly_swaps_playing_animation() {
    let mut h = Harness::new();
    h.assemble(AnimationKind::Idle, &["i0", "i1"]);
    assert_eq!(h.playback().active_kind(), Some(AnimationKind::Idle));
    for _ in 0..3 {
        h.tick();
    }

    // rebuild the idle timeline with one slot changed
    h.collect(AnimationKind::Idle, "i9");
    h.cmd(EditorCmd::Toggle);
    h.tick();
    h.cmd(EditorCmd::DropOnSlot {
        source: DragSource::Inventory(0),
        slot: 1,
    });
    h.tick();

    let playback = h.playback();
    assert_eq!(playback.active_kind(), Some(AnimationKind::Idle));
    assert_eq!(playback.frame_index(), 0, "swap re-clamps to the start");
    assert!(playback.is_playing());

    let anim = h
        .world
        .resource::<AnimationStore>()
        .get(AnimationKind::Idle)
        .unwrap();
    assert_eq!(&*anim.frames[1].ui_sprite, "i9");
}
