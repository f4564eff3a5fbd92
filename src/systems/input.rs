//! Input edge maintenance.
//!
//! The driver (demo script, test, or front-end) presses and releases
//! buttons on [`InputState`](crate::resources::input::InputState) before the
//! tick; this system drops the `just_*` edges afterwards so each press is
//! seen exactly once.

use bevy_ecs::prelude::*;

use crate::resources::input::InputState;

pub fn clear_input_edges(mut input: ResMut<InputState>) {
    input.clear_edges();
}
