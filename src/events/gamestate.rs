//! Game state transition event and observer.
//!
//! Systems request a change to the high-level [`GameStates`] by updating
//! [`NextGameState`]. Emitting a [`GameStateChangedEvent`] then triggers the
//! observer in this module, which applies the transition to [`GameState`]
//! and runs the matching scene hook from [`SceneHooks`]. This decouples the
//! intent to change state from the mechanics of running setup systems and
//! avoids borrowing conflicts.

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::{debug, info, warn};

use crate::resources::gamestate::NextGameStates::{Pending, Unchanged};
use crate::resources::gamestate::{GameState, GameStates, NextGameState, SceneHooks};

/// Signals that a pending game state transition should be applied now.
#[derive(Event, Debug, Clone, Copy)]
pub struct GameStateChangedEvent {}

/// Observer that applies a pending game state transition.
///
/// Contract
/// - Reads the intention from [`NextGameState`].
/// - If pending, copies the new value into [`GameState`], clears the
///   request, and runs the enter hook for the new state.
/// - If any required resource is missing, logs a diagnostic and returns.
pub fn observe_gamestate_change_event(
    _trigger: On<GameStateChangedEvent>,
    mut commands: Commands,
    mut next_game_state: Option<ResMut<NextGameState>>,
    mut game_state: Option<ResMut<GameState>>,
    hooks: Res<SceneHooks>,
) {
    debug!("GameStateChangedEvent triggered");

    let (Some(next_game_state), Some(game_state)) =
        (next_game_state.as_deref_mut(), game_state.as_deref_mut())
    else {
        warn!("game state resources missing in observe_gamestate_change_event");
        return;
    };

    match next_game_state.get().clone() {
        Pending(new_state) => {
            info!(
                "Transitioning from {:?} to {:?}",
                game_state.get(),
                new_state
            );
            game_state.set(new_state.clone());
            next_game_state.reset();
            match new_state {
                GameStates::None => debug!("entered None state"),
                GameStates::Setup => commands.run_system(hooks.setup),
                GameStates::Playing => commands.run_system(hooks.enter_play),
                GameStates::Quitting => debug!("entered Quitting state"),
            }
        }
        Unchanged => {
            debug!("No state change pending.");
        }
    }
}
