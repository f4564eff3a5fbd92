//! ECS components for entities.
//!
//! Submodules overview:
//! - [`body`] – kinematic body storing velocity and gravity scale
//! - [`collider`] – collider shape published for the physics collaborator
//! - [`mapposition`] – world-space position of an entity
//! - [`player`] – player marker and per-tick pose flags
//! - [`sprite`] – sprite key surface read by the renderer

pub mod body;
pub mod collider;
pub mod mapposition;
pub mod player;
pub mod sprite;
