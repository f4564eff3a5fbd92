//! Event types and observers used by the game.
//!
//! Buffered [`Message`](bevy_ecs::message::Message) streams carry the
//! command-like traffic (editor actions, pickups); observer
//! [`Event`](bevy_ecs::event::Event)s carry the one-off notifications
//! (ability flips, collection complete, state transitions).
//!
//! Submodules:
//! - [`ability`] – unlock/lock notifications and pose-correcting observers
//! - [`editor`] – drag-and-drop commands from the editor UI
//! - [`gamestate`] – state transition event and scene-hook observer
//! - [`notify`] – collection-complete banner trigger
//! - [`pickup`] – frame pickup intake
pub mod ability;
pub mod editor;
pub mod gamestate;
pub mod notify;
pub mod pickup;
