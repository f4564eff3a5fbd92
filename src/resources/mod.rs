//! ECS resources made available to systems.
//!
//! This module groups the long-lived services injected into the ECS world at
//! startup. Nothing here is ambient or static; every resource is constructed
//! explicitly and wired into the `World` by `main`/`game`.
//!
//! Overview
//! - `abilities` – per-ability unlock state and quality multipliers
//! - `animationstore` – registry of player-assembled animations
//! - `animrules` – slot counts, canonical patterns, and scoring
//! - `checker` – one-shot "all frames collected" tracking
//! - `clock` – simulation time and delta
//! - `editorview` – display surface for the timeline editor panel
//! - `gameconfig` – movement/quality/editor tuning from `config.ini`
//! - `gamestate` – authoritative and pending high-level game state
//! - `input` – per-tick button snapshot fed by the driver
//! - `inventory` – collected frames not yet placed on a timeline
//! - `notification` – sliding collection-complete banner
//! - `playback` – the one animation playing on the player sprite
//! - `timeline` – the slot row being edited, per-kind saved rows
pub mod abilities;
pub mod animationstore;
pub mod animrules;
pub mod checker;
pub mod clock;
pub mod editorview;
pub mod gameconfig;
pub mod gamestate;
pub mod input;
pub mod inventory;
pub mod notification;
pub mod playback;
pub mod timeline;
