//! Simulation clock resource.

use bevy_ecs::prelude::Resource;

/// Elapsed and per-tick time, with a global scale for slow-motion effects.
#[derive(Resource, Clone, Copy, Debug)]
pub struct Clock {
    pub elapsed: f32,
    pub delta: f32,
    pub time_scale: f32,
}

impl Default for Clock {
    fn default() -> Self {
        Clock {
            elapsed: 0.0,
            delta: 0.0,
            time_scale: 1.0,
        }
    }
}

impl Clock {
    pub fn with_time_scale(mut self, scale: f32) -> Self {
        self.time_scale = scale;
        self
    }
}
