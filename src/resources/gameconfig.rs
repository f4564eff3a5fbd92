//! Game tuning resource.
//!
//! Movement, quality, editor, and notification tuning loaded from an INI
//! file. Missing values keep their defaults so the game always starts.
//!
//! # Configuration File Format
//!
//! ```ini
//! [movement]
//! walk_speed = 5.0
//! crawl_speed = 2.0
//! jump_height = 3.0
//! gravity = 25.0
//!
//! [quality]
//! min_multiplier = 0.3
//!
//! [editor]
//! frame_seconds = 0.2
//! filter_inventory = true
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::info;
use std::path::PathBuf;

use crate::resources::animrules::DEFAULT_MIN_QUALITY;
use crate::resources::notification::{DEFAULT_DISPLAY_DURATION, DEFAULT_SLIDE_SPEED};

const DEFAULT_WALK_SPEED: f32 = 5.0;
const DEFAULT_CRAWL_SPEED: f32 = 2.0;
const DEFAULT_JUMP_HEIGHT: f32 = 3.0;
const DEFAULT_GRAVITY: f32 = 25.0;
const DEFAULT_FLOOR_Y: f32 = 0.0;
const DEFAULT_FRAME_SECONDS: f32 = 0.2;
const DEFAULT_CONFIG_PATH: &str = "./config.ini";
const DEFAULT_RULES_PATH: &str = "./assets/animations.json";

/// Game tuning resource.
#[derive(Resource, Debug, Clone)]
pub struct GameConfig {
    /// Horizontal speed at full walk quality, units per second.
    pub walk_speed: f32,
    /// Horizontal speed while crawling (quality affects the collider, not
    /// the speed).
    pub crawl_speed: f32,
    /// Apex height of a full-quality jump, in world units.
    pub jump_height: f32,
    /// Downward acceleration, units per second squared.
    pub gravity: f32,
    /// Height of the demo floor plane.
    pub floor_y: f32,
    /// Quality floor for assembled animations and unlocked abilities.
    pub min_quality: f32,
    /// Seconds per frame for assembled animations and the editor preview.
    pub frame_seconds: f32,
    /// Show only the active kind's frames in the editor inventory strip.
    pub filter_inventory: bool,
    /// Seconds the collection banner stays fully visible.
    pub notification_duration: f32,
    /// Banner slide speed in UI units per second.
    pub notification_slide_speed: f32,
    /// Path to the animation rules JSON.
    pub rules_path: String,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl GameConfig {
    /// Create a configuration with safe default values.
    pub fn new() -> Self {
        Self {
            walk_speed: DEFAULT_WALK_SPEED,
            crawl_speed: DEFAULT_CRAWL_SPEED,
            jump_height: DEFAULT_JUMP_HEIGHT,
            gravity: DEFAULT_GRAVITY,
            floor_y: DEFAULT_FLOOR_Y,
            min_quality: DEFAULT_MIN_QUALITY,
            frame_seconds: DEFAULT_FRAME_SECONDS,
            filter_inventory: true,
            notification_duration: DEFAULT_DISPLAY_DURATION,
            notification_slide_speed: DEFAULT_SLIDE_SPEED,
            rules_path: DEFAULT_RULES_PATH.to_string(),
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current (default) values. Returns an
    /// error if the file cannot be read or parsed.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;

        if let Some(v) = config.getfloat("movement", "walk_speed").ok().flatten() {
            self.walk_speed = v as f32;
        }
        if let Some(v) = config.getfloat("movement", "crawl_speed").ok().flatten() {
            self.crawl_speed = v as f32;
        }
        if let Some(v) = config.getfloat("movement", "jump_height").ok().flatten() {
            self.jump_height = v as f32;
        }
        if let Some(v) = config.getfloat("movement", "gravity").ok().flatten() {
            self.gravity = v as f32;
        }

        if let Some(v) = config.getfloat("world", "floor_y").ok().flatten() {
            self.floor_y = v as f32;
        }

        if let Some(v) = config.getfloat("quality", "min_multiplier").ok().flatten() {
            self.min_quality = (v as f32).clamp(0.0, 1.0);
        }

        if let Some(v) = config.getfloat("editor", "frame_seconds").ok().flatten() {
            self.frame_seconds = (v as f32).max(0.01);
        }
        if let Some(v) = config.getbool("editor", "filter_inventory").ok().flatten() {
            self.filter_inventory = v;
        }

        if let Some(v) = config
            .getfloat("notification", "display_duration")
            .ok()
            .flatten()
        {
            self.notification_duration = v as f32;
        }
        if let Some(v) = config
            .getfloat("notification", "slide_speed")
            .ok()
            .flatten()
        {
            self.notification_slide_speed = v as f32;
        }

        if let Some(v) = config.get("assets", "animation_rules") {
            self.rules_path = v;
        }

        info!(
            "Loaded config: walk {} crawl {} jump {} gravity {}, min quality {:.2}, frame {}s",
            self.walk_speed,
            self.crawl_speed,
            self.jump_height,
            self.gravity,
            self.min_quality,
            self.frame_seconds
        );

        Ok(())
    }
}
