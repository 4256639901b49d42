//! Game configuration resource.
//!
//! Manages window, physics and controller settings loaded from an INI
//! configuration file. Provides defaults for safe startup and methods to
//! load/save/validate the configuration.
//!
//! # Configuration File Format
//!
//! ```ini
//! [window]
//! width = 1280
//! height = 720
//! fullscreen = false
//! target_fps = 120
//!
//! [physics]
//! tick_rate = 50
//!
//! [walker]
//! walk_speed = 5.0
//! grid_spacing = 6.0
//! movement_margin = 0.1
//! gravity_multiplier = 2.0
//! stick_to_ground_force = 10.0
//! step_interval = 5.0
//! use_head_bob = true
//! lock_to_whole_units = false
//! footsteps = assets/audio/footstep01.ogg, assets/audio/footstep02.ogg
//!
//! [headbob]
//! horizontal_range = 0.1
//! vertical_range = 0.1
//! vertical_to_horizontal_ratio = 2.0
//!
//! [look]
//! x_sensitivity = 0.15
//! y_sensitivity = 0.15
//! clamp_vertical = true
//! min_pitch = -90.0
//! max_pitch = 90.0
//! smooth = false
//! smooth_time = 5.0
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::{info, warn};
use std::path::PathBuf;

use crate::components::footsteps::FootstepPool;
use crate::components::gridwalker::WalkerSettings;
use crate::components::headbob::CurveControlledBob;
use crate::components::mouselook::MouseLook;

/// Default safe values for startup
const DEFAULT_WINDOW_WIDTH: u32 = 1280;
const DEFAULT_WINDOW_HEIGHT: u32 = 720;
const DEFAULT_TARGET_FPS: u32 = 120;
const DEFAULT_FULLSCREEN: bool = false;
const DEFAULT_TICK_RATE: u32 = 50;
const DEFAULT_FOOTSTEPS: [&str; 2] = [
    "assets/audio/footstep01.ogg",
    "assets/audio/footstep02.ogg",
];
const DEFAULT_CONFIG_PATH: &str = "./config.ini";

/// Game configuration resource.
#[derive(Resource, Debug, Clone)]
pub struct GameConfig {
    /// Window width in pixels.
    pub window_width: u32,
    /// Window height in pixels.
    pub window_height: u32,
    /// Target frames per second.
    pub target_fps: u32,
    /// Start in fullscreen mode.
    pub fullscreen: bool,
    /// Physics ticks per second.
    pub tick_rate: u32,
    pub walker: WalkerSettings,
    /// Footstep clip paths, also used as clip ids.
    pub footsteps: Vec<String>,
    pub head_bob: CurveControlledBob,
    pub look: MouseLook,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl GameConfig {
    /// Create a new configuration with safe default values.
    pub fn new() -> Self {
        Self {
            window_width: DEFAULT_WINDOW_WIDTH,
            window_height: DEFAULT_WINDOW_HEIGHT,
            target_fps: DEFAULT_TARGET_FPS,
            fullscreen: DEFAULT_FULLSCREEN,
            tick_rate: DEFAULT_TICK_RATE,
            walker: WalkerSettings::default(),
            footsteps: DEFAULT_FOOTSTEPS.iter().map(|s| s.to_string()).collect(),
            head_bob: CurveControlledBob::default(),
            look: MouseLook::default(),
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Fixed physics step in seconds.
    pub fn physics_dt(&self) -> f32 {
        1.0 / self.tick_rate.max(1) as f32
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current (default) values.
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;
        self.apply(&config);
        Ok(())
    }

    /// Load configuration from INI text.
    pub fn load_from_str(&mut self, text: &str) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .read(text.to_string())
            .map_err(|e| format!("Failed to parse config: {}", e))?;
        self.apply(&config);
        Ok(())
    }

    fn apply(&mut self, config: &Ini) {
        let float = |section: &str, key: &str| {
            config
                .getfloat(section, key)
                .ok()
                .flatten()
                .map(|v| v as f32)
        };
        let boolean = |section: &str, key: &str| config.getbool(section, key).ok().flatten();

        // [window] section
        if let Some(width) = config.getuint("window", "width").ok().flatten() {
            self.window_width = width as u32;
        }
        if let Some(height) = config.getuint("window", "height").ok().flatten() {
            self.window_height = height as u32;
        }
        if let Some(fps) = config.getuint("window", "target_fps").ok().flatten() {
            self.target_fps = fps as u32;
        }
        if let Some(fullscreen) = boolean("window", "fullscreen") {
            self.fullscreen = fullscreen;
        }

        // [physics] section
        if let Some(rate) = config.getuint("physics", "tick_rate").ok().flatten() {
            self.tick_rate = rate as u32;
        }

        // [walker] section
        let w = &mut self.walker;
        if let Some(v) = float("walker", "walk_speed") {
            w.walk_speed = v;
        }
        if let Some(v) = float("walker", "grid_spacing") {
            w.grid_spacing = v;
        }
        if let Some(v) = float("walker", "movement_margin") {
            w.movement_margin = v;
        }
        if let Some(v) = float("walker", "gravity_multiplier") {
            w.gravity_multiplier = v;
        }
        if let Some(v) = float("walker", "stick_to_ground_force") {
            w.stick_to_ground_force = v;
        }
        if let Some(v) = float("walker", "step_interval") {
            w.step_interval = v;
        }
        if let Some(v) = boolean("walker", "use_head_bob") {
            w.use_head_bob = v;
        }
        if let Some(v) = boolean("walker", "lock_to_whole_units") {
            w.lock_to_whole_units = v;
        }
        if let Some(list) = config.get("walker", "footsteps") {
            self.footsteps = list
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect();
        }

        // [headbob] section
        if let Some(v) = float("headbob", "horizontal_range") {
            self.head_bob.horizontal_range = v;
        }
        if let Some(v) = float("headbob", "vertical_range") {
            self.head_bob.vertical_range = v;
        }
        if let Some(v) = float("headbob", "vertical_to_horizontal_ratio") {
            self.head_bob.vertical_to_horizontal_ratio = v;
        }

        // [look] section
        let look = &mut self.look;
        if let Some(v) = float("look", "x_sensitivity") {
            look.x_sensitivity = v;
        }
        if let Some(v) = float("look", "y_sensitivity") {
            look.y_sensitivity = v;
        }
        if let Some(v) = boolean("look", "clamp_vertical") {
            look.clamp_vertical = v;
        }
        if let Some(v) = float("look", "min_pitch") {
            look.min_pitch = v;
        }
        if let Some(v) = float("look", "max_pitch") {
            look.max_pitch = v;
        }
        if let Some(v) = boolean("look", "smooth") {
            look.smooth = v;
        }
        if let Some(v) = float("look", "smooth_time") {
            look.smooth_time = v;
        }

        info!(
            "Loaded config: {}x{} window, fps={}, fullscreen={}, tick_rate={}, grid_spacing={}, walk_speed={}, {} footstep clip(s)",
            self.window_width,
            self.window_height,
            self.target_fps,
            self.fullscreen,
            self.tick_rate,
            self.walker.grid_spacing,
            self.walker.walk_speed,
            self.footsteps.len()
        );
    }

    /// Save configuration to the INI file.
    ///
    /// Creates the file if it doesn't exist.
    pub fn save_to_file(&self) -> Result<(), String> {
        self.to_ini()
            .write(&self.config_path)
            .map_err(|e| format!("Failed to save config file: {}", e))?;

        info!("Saved config to {:?}", self.config_path);

        Ok(())
    }

    fn to_ini(&self) -> Ini {
        let mut config = Ini::new();
        let mut set = |section: &str, key: &str, value: String| {
            config.set(section, key, Some(value));
        };

        // [window] section
        set("window", "width", self.window_width.to_string());
        set("window", "height", self.window_height.to_string());
        set("window", "fullscreen", self.fullscreen.to_string());
        set("window", "target_fps", self.target_fps.to_string());

        // [physics] section
        set("physics", "tick_rate", self.tick_rate.to_string());

        // [walker] section
        let w = &self.walker;
        set("walker", "walk_speed", w.walk_speed.to_string());
        set("walker", "grid_spacing", w.grid_spacing.to_string());
        set("walker", "movement_margin", w.movement_margin.to_string());
        set("walker", "gravity_multiplier", w.gravity_multiplier.to_string());
        set("walker", "stick_to_ground_force", w.stick_to_ground_force.to_string());
        set("walker", "step_interval", w.step_interval.to_string());
        set("walker", "use_head_bob", w.use_head_bob.to_string());
        set("walker", "lock_to_whole_units", w.lock_to_whole_units.to_string());
        set("walker", "footsteps", self.footsteps.join(", "));

        // [headbob] section
        let hb = &self.head_bob;
        set("headbob", "horizontal_range", hb.horizontal_range.to_string());
        set("headbob", "vertical_range", hb.vertical_range.to_string());
        set(
            "headbob",
            "vertical_to_horizontal_ratio",
            hb.vertical_to_horizontal_ratio.to_string(),
        );

        // [look] section
        let l = &self.look;
        set("look", "x_sensitivity", l.x_sensitivity.to_string());
        set("look", "y_sensitivity", l.y_sensitivity.to_string());
        set("look", "clamp_vertical", l.clamp_vertical.to_string());
        set("look", "min_pitch", l.min_pitch.to_string());
        set("look", "max_pitch", l.max_pitch.to_string());
        set("look", "smooth", l.smooth.to_string());
        set("look", "smooth_time", l.smooth_time.to_string());

        config
    }

    /// Reject settings the walker cannot run with; log the risky ones.
    pub fn validate(&self) -> Result<(), String> {
        let w = &self.walker;
        if w.grid_spacing <= 0.0 {
            return Err(format!("grid_spacing must be positive, got {}", w.grid_spacing));
        }
        if w.movement_margin < 0.0 {
            return Err(format!(
                "movement_margin must not be negative, got {}",
                w.movement_margin
            ));
        }
        if w.step_interval <= 0.0 {
            return Err(format!("step_interval must be positive, got {}", w.step_interval));
        }
        if self.tick_rate == 0 {
            return Err("tick_rate must be positive".to_string());
        }
        for warning in self.warnings() {
            warn!("{}", warning);
        }
        Ok(())
    }

    /// Settings that are accepted but likely to misbehave.
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        let step = self.walker.walk_speed * self.physics_dt();
        if step > 2.0 * self.walker.movement_margin {
            warnings.push(format!(
                "one physics step covers {:.3} units but movement_margin is {}; the walker may overshoot its target and never arrive",
                step, self.walker.movement_margin
            ));
        }
        if self.footsteps.len() < 2 {
            warnings.push(format!(
                "footstep pool has {} clip(s); footsteps need at least two and will stay silent",
                self.footsteps.len()
            ));
        }
        warnings
    }

    pub fn walker_settings(&self) -> WalkerSettings {
        self.walker.clone()
    }

    pub fn footstep_pool(&self) -> FootstepPool {
        FootstepPool::new(self.footsteps.iter().cloned())
    }

    /// Get the window size.
    pub fn window_size(&self) -> (u32, u32) {
        (self.window_width, self.window_height)
    }
}
