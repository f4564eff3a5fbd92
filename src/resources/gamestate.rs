//! High-level game state resources.
//!
//! These resources track the authoritative current state of the game and any
//! pending transition requested by systems. See
//! `crate::events::gamestate::observe_gamestate_change_event` for how a
//! transition is applied and scene hooks are invoked.

use bevy_ecs::prelude::Resource;
use bevy_ecs::system::SystemId;

/// Discrete high-level states the game can be in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum GameStates {
    #[default]
    None,
    Setup,
    Playing,
    Quitting,
}

/// Representation of a requested next state.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum NextGameStates {
    #[default]
    Unchanged,
    Pending(GameStates),
}

/// Authoritative current game state.
#[derive(Resource, Debug, Clone, PartialEq, Eq, Hash)]
pub struct GameState {
    current: GameStates,
}

impl GameState {
    pub fn new() -> Self {
        GameState {
            current: GameStates::None,
        }
    }

    pub fn get(&self) -> &GameStates {
        &self.current
    }

    /// Update the current state immediately. Prefer requesting transitions
    /// via [`NextGameState`] so enter hooks run.
    pub fn set(&mut self, state: GameStates) {
        self.current = state;
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

/// Intent to change to a new game state.
#[derive(Resource, Debug, Clone, PartialEq, Eq, Hash)]
pub struct NextGameState {
    next: NextGameStates,
}

impl NextGameState {
    pub fn new() -> Self {
        NextGameState {
            next: NextGameStates::Unchanged,
        }
    }

    pub fn get(&self) -> &NextGameStates {
        &self.next
    }

    /// Request a transition; the observer applies it and clears the request.
    pub fn set(&mut self, next: GameStates) {
        self.next = NextGameStates::Pending(next);
    }

    pub fn reset(&mut self) {
        self.next = NextGameStates::Unchanged;
    }
}

impl Default for NextGameState {
    fn default() -> Self {
        Self::new()
    }
}

/// One-shot systems the state observer runs when a state is entered.
///
/// Registered once at startup; keeping them as fields (rather than a string
/// map) means a missing hook is a compile error, not a runtime lookup miss.
#[derive(Resource, Debug, Clone, Copy)]
pub struct SceneHooks {
    /// Runs when entering [`GameStates::Setup`]: spawns the player and the
    /// editor services.
    pub setup: SystemId,
    /// Runs when entering [`GameStates::Playing`]: grants starting frames.
    pub enter_play: SystemId,
}
