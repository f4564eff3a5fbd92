//! Flipbook game-logic library.
//!
//! A 2D platformer core built around animation collection: the player
//! gathers sprite frames in the level, assembles them into animation cycles
//! in a drag-and-drop timeline editor, and each completed cycle unlocks the
//! matching movement ability at a quality derived from how correctly the
//! frames were placed.
//!
//! The crate is headless: rendering, audio, and collision resolution are
//! external collaborators behind narrow component/resource surfaces. This
//! module exposes the ECS components, resources, systems, and events for
//! the binary and for integration tests.

pub mod components;
pub mod events;
pub mod game;
pub mod resources;
pub mod systems;
