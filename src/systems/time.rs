//! Clock update.
//!
//! Updates the shared [`Clock`](crate::resources::clock::Clock) resource
//! once per tick, applying `time_scale` to the provided delta.
use bevy_ecs::prelude::*;

use crate::resources::clock::Clock;

/// Advance elapsed time and store this tick's scaled delta.
///
/// `dt` is the unscaled tick delta in seconds.
pub fn update_clock(world: &mut World, dt: f32) {
    let mut clock = world.resource_mut::<Clock>();
    let scaled_dt = dt * clock.time_scale;
    clock.elapsed += scaled_dt;
    clock.delta = scaled_dt;
}
