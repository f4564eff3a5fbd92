//! Flipbook headless demo entry point.
//!
//! A 2D platformer core written in Rust using:
//! - **bevy_ecs** for entity-component-system architecture
//! - **configparser** / **serde_json** for tuning and animation-set rules
//!
//! The game mechanic: animation frames are scattered through the level; the
//! player collects them, assembles them into cycles (idle/walk/jump/prone/
//! crawl) in a timeline editor, and each completed cycle unlocks the
//! matching movement ability at the assembly's quality.
//!
//! This executable runs the full pipeline headless on a scripted input
//! sequence: collect frames, open the editor, build a perfect walk cycle
//! and a sloppy jump cycle, then move and jump with the unlocked abilities.
//! A renderer/front-end would consume the same systems and resources and
//! replace the script with real input.
//!
//! # Running
//!
//! ```sh
//! RUST_LOG=info cargo run --release
//! ```

mod components;
mod events;
mod game;
mod resources;
mod systems;

use bevy_ecs::observer::Observer;
use bevy_ecs::prelude::*;
use clap::Parser;
use std::path::PathBuf;

use crate::components::mapposition::MapPosition;
use crate::components::player::Player;
use crate::components::sprite::Sprite;
use crate::events::ability::{observe_ability_locked, observe_ability_unlocked};
use crate::events::editor::{DragSource, EditorCmd};
use crate::events::gamestate::{GameStateChangedEvent, observe_gamestate_change_event};
use crate::events::notify::observe_set_completed;
use crate::events::pickup::FrameCollected;
use crate::resources::abilities::{Abilities, Ability};
use crate::resources::animationstore::{AnimationKind, AnimationStore, Frame};
use crate::resources::animrules::AnimationRules;
use crate::resources::checker::CollectionChecker;
use crate::resources::clock::Clock;
use crate::resources::editorview::EditorView;
use crate::resources::gameconfig::GameConfig;
use crate::resources::gamestate::{GameState, GameStates, NextGameState, SceneHooks};
use crate::resources::input::InputState;
use crate::resources::inventory::FrameInventory;
use crate::resources::notification::NotificationPanel;
use crate::resources::playback::Playback;
use crate::resources::timeline::TimelineEditor;
use crate::systems::editor::{
    apply_deferred_view_refresh, editor_hotkeys, process_editor_cmds, pump_editor_messages,
    tick_editor_preview,
};
use crate::systems::gamestate::{check_pending_state, state_is_playing};
use crate::systems::input::clear_input_edges;
use crate::systems::movement::{apply_player_movement, integrate_positions, probe_floor};
use crate::systems::notification::advance_notification;
use crate::systems::pickup::{collect_frames, pump_pickup_messages};
use crate::systems::playback::advance_playback;
use crate::systems::playeranim::select_player_animation;
use crate::systems::playerstate::update_player_state;
use crate::systems::time::update_clock;

/// Flipbook, an animation-collection platformer (headless core)
#[derive(Parser)]
#[command(version, about = "Flipbook: assemble animations, unlock movement")]
struct Cli {
    /// Path to the tuning INI file.
    #[arg(long, value_name = "PATH", default_value = "./config.ini")]
    config: PathBuf,

    /// Override the animation rules JSON path from the config.
    #[arg(long, value_name = "PATH")]
    rules: Option<String>,

    /// Number of simulation ticks to run.
    #[arg(long, default_value_t = 260)]
    ticks: u64,

    /// Fixed timestep in seconds.
    #[arg(long, default_value_t = 1.0 / 60.0)]
    timestep: f32,

    /// Print the loaded animation rules and exit.
    #[arg(long)]
    list_rules: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = GameConfig::with_path(cli.config);
    config.load_from_file().ok(); // ignore errors, use defaults
    if let Some(rules_path) = cli.rules {
        config.rules_path = rules_path;
    }

    let rules = match AnimationRules::load_from_file(&config.rules_path) {
        Ok(rules) => rules,
        Err(e) => {
            log::warn!("{e}; continuing with built-in defaults");
            let mut rules = AnimationRules::default();
            rules.min_quality = config.min_quality;
            rules
        }
    };

    if cli.list_rules {
        for kind in AnimationKind::ALL {
            let pattern = rules
                .pattern(kind)
                .map(|p| p.iter().map(|s| s.to_string()).collect::<Vec<_>>().join(", "))
                .unwrap_or_else(|| "(free order)".to_string());
            println!(
                "{kind}: {} slots, loops: {}, pattern: {pattern}",
                rules.max_slots(kind),
                kind.loops(),
            );
        }
        return;
    }

    log::info!("Flipbook core starting");

    // --------------- ECS world + resources ---------------
    let mut world = World::new();
    world.insert_resource(Clock::default().with_time_scale(1.0));
    world.insert_resource(InputState::default());
    world.insert_resource(FrameInventory::new());
    world.insert_resource(AnimationStore::new());
    world.insert_resource(Playback::new());
    world.insert_resource(Abilities::new(rules.min_quality));
    world.insert_resource(CollectionChecker::new());
    world.insert_resource(EditorView::new());
    world.insert_resource(NotificationPanel::new(
        config.notification_duration,
        config.notification_slide_speed,
    ));
    world.insert_resource(TimelineEditor::new(
        AnimationKind::Idle,
        rules.max_slots(AnimationKind::Idle),
    ));
    world.insert_resource(rules);
    world.insert_resource(config);
    world.insert_resource(GameState::new());
    world.insert_resource(NextGameState::new());
    world.insert_resource(Messages::<EditorCmd>::default());
    world.insert_resource(Messages::<FrameCollected>::default());

    // Scene hooks run by the game state observer.
    let setup_id = world.register_system(game::setup);
    let enter_play_id = world.register_system(game::enter_play);
    world.insert_resource(SceneHooks {
        setup: setup_id,
        enter_play: enter_play_id,
    });

    world.spawn(Observer::new(observe_gamestate_change_event));
    world.spawn(Observer::new(observe_ability_unlocked));
    world.spawn(Observer::new(observe_ability_locked));
    world.spawn(Observer::new(observe_set_completed));
    world.flush();

    // Enter Setup immediately; the observer runs the setup hook.
    {
        let mut next_state = world.resource_mut::<NextGameState>();
        next_state.set(GameStates::Setup);
    }
    world.trigger(GameStateChangedEvent {});
    world.flush();

    // --------------- Schedule ---------------
    let mut update = Schedule::default();
    update.add_systems(check_pending_state);
    update.add_systems((pump_pickup_messages, collect_frames).chain());
    update.add_systems(
        update_player_state
            .run_if(state_is_playing)
            .after(collect_frames),
    );
    update.add_systems(
        apply_player_movement
            .run_if(state_is_playing)
            .after(update_player_state),
    );
    update.add_systems(integrate_positions.after(apply_player_movement));
    update.add_systems(probe_floor.after(integrate_positions));
    update.add_systems(
        // editor systems must stay together: hotkeys write, the pump makes
        // writes visible, the deferred refresh runs before new commands
        (
            editor_hotkeys,
            pump_editor_messages,
            apply_deferred_view_refresh,
            process_editor_cmds,
        )
            .chain()
            .after(probe_floor),
    );
    update.add_systems(
        select_player_animation
            .run_if(state_is_playing)
            .after(process_editor_cmds),
    );
    update.add_systems(advance_playback.after(select_player_animation));
    update.add_systems(tick_editor_preview.after(process_editor_cmds));
    update.add_systems(advance_notification);
    update.add_systems(
        clear_input_edges
            .after(apply_player_movement)
            .after(editor_hotkeys)
            .after(update_player_state),
    );

    update
        .initialize(&mut world)
        .expect("Failed to initialize schedule");

    // --------------- Scripted demo loop ---------------
    let dt = cli.timestep;
    for tick in 1..=cli.ticks {
        demo_script(tick, &mut world);
        update_clock(&mut world, dt);
        update.run(&mut world);
        world.clear_trackers();

        if tick % 60 == 0 {
            report(tick, &mut world);
        }
    }
    report(cli.ticks, &mut world);
    log::info!("demo finished");
}

fn collect(world: &mut World, kind: AnimationKind, ui: &str, render: &str) {
    world
        .resource_mut::<Messages<FrameCollected>>()
        .write(FrameCollected {
            frame: Frame::new(kind, ui, render),
        });
}

fn editor_cmd(world: &mut World, cmd: EditorCmd) {
    world.resource_mut::<Messages<EditorCmd>>().write(cmd);
}

/// Scripted input: what a player session looks like without a front-end.
fn demo_script(tick: u64, world: &mut World) {
    match tick {
        // pick up the full walk set, then a sloppy pile of jump frames
        5 => {
            for i in 0..6 {
                collect(
                    world,
                    AnimationKind::Walk,
                    &format!("walk_{i}"),
                    &format!("walk_{i}_big"),
                );
            }
        }
        7 => {
            for key in ["jump_rise", "jump_crouch", "jump_apex", "jump_fall"] {
                collect(world, AnimationKind::Jump, key, &format!("{key}_big"));
            }
        }
        // open the editor and build a perfect walk cycle
        10 => world.resource_mut::<InputState>().editor_toggle.press(),
        11 => world.resource_mut::<InputState>().editor_toggle.release(),
        12 => editor_cmd(world, EditorCmd::SelectKind(AnimationKind::Walk)),
        14..=19 => {
            // the two starter idle frames sit at the front of the inventory,
            // so the next walk frame is always at index 2
            let slot = (tick - 14) as usize;
            editor_cmd(
                world,
                EditorCmd::DropOnSlot {
                    source: DragSource::Inventory(2),
                    slot,
                },
            );
        }
        // build the jump cycle as collected: two frames end up misplaced
        21 => editor_cmd(world, EditorCmd::SelectKind(AnimationKind::Jump)),
        23..=26 => {
            let slot = (tick - 23) as usize;
            editor_cmd(
                world,
                EditorCmd::DropOnSlot {
                    source: DragSource::Inventory(2),
                    slot,
                },
            );
        }
        28 => world.resource_mut::<InputState>().editor_toggle.press(),
        29 => world.resource_mut::<InputState>().editor_toggle.release(),
        // walk right, jump mid-stride, stop
        40 => world.resource_mut::<InputState>().move_right.press(),
        90 => world.resource_mut::<InputState>().jump.press(),
        92 => world.resource_mut::<InputState>().jump.release(),
        180 => world.resource_mut::<InputState>().move_right.release(),
        _ => {}
    }
}

fn report(tick: u64, world: &mut World) {
    let mut query = world.query_filtered::<(&MapPosition, &Sprite), With<Player>>();
    let snapshot: Vec<(f32, f32, Option<String>)> = query
        .iter(world)
        .map(|(position, sprite)| {
            (
                position.pos.x,
                position.pos.y,
                sprite.key.as_deref().map(str::to_string),
            )
        })
        .collect();

    let abilities = world.resource::<Abilities>();
    let playback = world.resource::<Playback>();
    for (x, y, sprite) in snapshot {
        log::info!(
            "tick {tick}: pos ({x:.2}, {y:.2}), sprite {sprite:?}, anim {:?}, walk x{:.2} jump x{:.2}",
            playback.active_kind(),
            abilities.quality(Ability::Walk),
            abilities.quality(Ability::Jump),
        );
    }
}
