//! Scene setup hooks.
//!
//! These run as registered one-shot systems when the matching
//! [`GameStates`](crate::resources::gamestate::GameStates) is entered; see
//! `crate::events::gamestate`.

use bevy_ecs::prelude::*;
use log::info;

use crate::components::body::Body;
use crate::components::collider::ColliderShape;
use crate::components::mapposition::MapPosition;
use crate::components::player::{Player, PlayerPose};
use crate::components::sprite::Sprite;
use crate::events::pickup::FrameCollected;
use crate::resources::gameconfig::GameConfig;
use crate::resources::gamestate::{GameStates, NextGameState};
use crate::resources::animrules::AnimationRules;

/// Entering `Setup`: spawn the player on the floor and hand off to
/// `Playing`.
pub fn setup(
    mut commands: Commands,
    config: Res<GameConfig>,
    mut next_state: ResMut<NextGameState>,
) {
    let mut pose = PlayerPose::new();
    pose.grounded = true;
    pose.was_grounded = true;

    commands.spawn((
        Player,
        pose,
        Body::new(),
        MapPosition::new(0.0, config.floor_y),
        ColliderShape::standing(),
        Sprite::new(),
    ));

    next_state.set(GameStates::Playing);
    info!("setup done, player spawned at floor height {}", config.floor_y);
}

/// Entering `Playing`: grant the configured starting frames.
///
/// The grants go through the regular pickup stream, so they arrive in the
/// inventory (and run the completion check) on the tick after setup.
pub fn enter_play(rules: Res<AnimationRules>, mut writer: MessageWriter<FrameCollected>) {
    for frame in &rules.starting_frames {
        writer.write(FrameCollected {
            frame: frame.clone(),
        });
    }
    if !rules.starting_frames.is_empty() {
        info!("granted {} starting frames", rules.starting_frames.len());
    }
}
