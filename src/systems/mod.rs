//! Game systems.
//!
//! This module groups the ECS systems that advance the simulation once per
//! tick. The schedule wires them in the order: pickups → pose transitions →
//! movement → editor commands → animation selection → playback → timed UI.
//!
//! Submodules overview
//! - [`editor`] – timeline editor commands, assembly evaluation, preview
//! - [`gamestate`] – pending state transitions and run conditions
//! - [`input`] – input edge maintenance
//! - [`movement`] – player velocity, integration, and the demo floor probe
//! - [`notification`] – sliding collection-complete banner
//! - [`pickup`] – frame pickup intake and completion checks
//! - [`playback`] – animation advance and sprite write
//! - [`playeranim`] – which assembled animation plays on the player
//! - [`playerstate`] – prone/crawl pose transitions
//! - [`time`] – simulation clock update

pub mod editor;
pub mod gamestate;
pub mod input;
pub mod movement;
pub mod notification;
pub mod pickup;
pub mod playback;
pub mod playeranim;
pub mod playerstate;
pub mod time;
