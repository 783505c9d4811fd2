//! Effects configuration resource.
//!
//! Settings loaded from an INI file. Defaults are safe to start with; keys
//! missing from the file keep their current values.
//!
//! # Configuration File Format
//!
//! ```ini
//! [window]
//! width = 800
//! height = 600
//! target_fps = 60
//!
//! [sim]
//! frames = 600
//! frame_ms = 16
//! seed = 42
//!
//! [projectile]
//! fire_ms = 50
//! travel_ms = 300
//! fade_ms = 100
//! splash_ms = 100
//! speed = 1.0
//! pool_size = 16
//! slot_policy = skip_active
//! hit_chance = 0.02
//!
//! [muzzle]
//! spread = 0.0314
//! speed_min = 0.05
//! speed_max = 0.3
//! duration = 1000
//! color = 255,85,24
//!
//! [sparks]
//! max_per_frame = 3
//! duration = 500
//!
//! [shooter]
//! shots_per_second = 10
//! muzzle_offset = 20
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::{info, warn};
use std::f32::consts::PI;
use std::path::PathBuf;

use crate::components::color::Rgba;
use crate::components::projectile::{
    DEFAULT_FADE_MS, DEFAULT_FIRE_MS, DEFAULT_SPLASH_MS, DEFAULT_TRAVEL_MS, ProjectileDurations,
};
use crate::components::shooter::DEFAULT_MUZZLE_OFFSET;
use crate::resources::animationpool::SlotPolicy;

const DEFAULT_WINDOW_WIDTH: u32 = 800;
const DEFAULT_WINDOW_HEIGHT: u32 = 600;
const DEFAULT_TARGET_FPS: u32 = 60;
const DEFAULT_FRAMES: u32 = 600;
const DEFAULT_FRAME_MS: u32 = 16;
const DEFAULT_PROJECTILE_SPEED: f32 = 1.0;
const DEFAULT_POOL_SIZE: usize = 16;
const DEFAULT_HIT_CHANCE: f32 = 0.02;
const DEFAULT_MUZZLE_SPREAD: f32 = PI * 0.01;
const DEFAULT_MUZZLE_SPEED_MIN: f32 = 0.05;
const DEFAULT_MUZZLE_SPEED_MAX: f32 = 0.3;
const DEFAULT_MUZZLE_DURATION: u32 = 1000;
const DEFAULT_SPARKS_PER_FRAME: u32 = 3;
const DEFAULT_SPARKS_DURATION: u32 = 500;
const DEFAULT_SHOTS_PER_SECOND: f32 = 10.0;
const DEFAULT_CONFIG_PATH: &str = "./config.ini";

/// Particle batch parameters for the flash at a weapon's muzzle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MuzzleConfig {
    /// Cone width in radians.
    pub spread: f32,
    pub speed_min: f32,
    pub speed_max: f32,
    pub duration_ms: u32,
    pub color: Rgba,
}

impl Default for MuzzleConfig {
    fn default() -> Self {
        Self {
            spread: DEFAULT_MUZZLE_SPREAD,
            speed_min: DEFAULT_MUZZLE_SPEED_MIN,
            speed_max: DEFAULT_MUZZLE_SPEED_MAX,
            duration_ms: DEFAULT_MUZZLE_DURATION,
            color: Rgba::MUZZLE_ORANGE,
        }
    }
}

/// Effects configuration resource.
#[derive(Resource, Debug, Clone)]
pub struct GameConfig {
    pub window_width: u32,
    pub window_height: u32,
    pub target_fps: u32,
    /// Frames run by the headless driver.
    pub frames: u32,
    /// Simulated milliseconds per frame.
    pub frame_ms: u32,
    /// Seed for effect randomness; `None` seeds from the system.
    pub seed: Option<u64>,
    pub durations: ProjectileDurations,
    /// Projectile speed in units per millisecond.
    pub projectile_speed: f32,
    pub pool_size: usize,
    pub slot_policy: SlotPolicy,
    /// Per-frame probability that a hittable projectile gets hit.
    pub hit_chance: f32,
    pub muzzle: MuzzleConfig,
    /// Upper bound of ambient spark batches spawned per frame.
    pub sparks_per_frame: u32,
    pub sparks_duration_ms: u32,
    pub shots_per_second: f32,
    /// Distance from a shooter to its weapon tip.
    pub muzzle_offset: f32,
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
            frames: DEFAULT_FRAMES,
            frame_ms: DEFAULT_FRAME_MS,
            seed: None,
            durations: ProjectileDurations {
                fire_ms: DEFAULT_FIRE_MS,
                travel_ms: DEFAULT_TRAVEL_MS,
                fade_ms: DEFAULT_FADE_MS,
                splash_ms: DEFAULT_SPLASH_MS,
            },
            projectile_speed: DEFAULT_PROJECTILE_SPEED,
            pool_size: DEFAULT_POOL_SIZE,
            slot_policy: SlotPolicy::default(),
            hit_chance: DEFAULT_HIT_CHANCE,
            muzzle: MuzzleConfig::default(),
            sparks_per_frame: DEFAULT_SPARKS_PER_FRAME,
            sparks_duration_ms: DEFAULT_SPARKS_DURATION,
            shots_per_second: DEFAULT_SHOTS_PER_SECOND,
            muzzle_offset: DEFAULT_MUZZLE_OFFSET,
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

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current values.
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;
        self.apply_ini(&config);
        Ok(())
    }

    /// Load configuration from INI text.
    pub fn load_from_str(&mut self, text: &str) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .read(text.to_string())
            .map_err(|e| format!("Failed to parse config: {}", e))?;
        self.apply_ini(&config);
        Ok(())
    }

    fn apply_ini(&mut self, config: &Ini) {
        let uint = |section: &str, key: &str| config.getuint(section, key).ok().flatten();
        let float = |section: &str, key: &str| {
            config
                .getfloat(section, key)
                .ok()
                .flatten()
                .map(|v| v as f32)
        };

        // [window] section
        if let Some(width) = uint("window", "width") {
            self.window_width = width as u32;
        }
        if let Some(height) = uint("window", "height") {
            self.window_height = height as u32;
        }
        if let Some(fps) = uint("window", "target_fps") {
            self.target_fps = fps as u32;
        }

        // [sim] section
        if let Some(frames) = uint("sim", "frames") {
            self.frames = frames as u32;
        }
        if let Some(frame_ms) = uint("sim", "frame_ms") {
            self.frame_ms = frame_ms as u32;
        }
        if let Some(seed) = uint("sim", "seed") {
            self.seed = Some(seed);
        }

        // [projectile] section
        if let Some(ms) = uint("projectile", "fire_ms") {
            self.durations.fire_ms = ms as u32;
        }
        if let Some(ms) = uint("projectile", "travel_ms") {
            self.durations.travel_ms = ms as u32;
        }
        if let Some(ms) = uint("projectile", "fade_ms") {
            self.durations.fade_ms = ms as u32;
        }
        if let Some(ms) = uint("projectile", "splash_ms") {
            self.durations.splash_ms = ms as u32;
        }
        if let Some(speed) = float("projectile", "speed") {
            self.projectile_speed = speed;
        }
        if let Some(size) = uint("projectile", "pool_size") {
            self.pool_size = size as usize;
        }
        if let Some(policy) = config.get("projectile", "slot_policy") {
            match policy.parse() {
                Ok(policy) => self.slot_policy = policy,
                Err(e) => warn!("{}, keeping {}", e, self.slot_policy),
            }
        }
        if let Some(chance) = float("projectile", "hit_chance") {
            self.hit_chance = chance.clamp(0.0, 1.0);
        }

        // [muzzle] section
        if let Some(spread) = float("muzzle", "spread") {
            self.muzzle.spread = spread;
        }
        if let Some(speed) = float("muzzle", "speed_min") {
            self.muzzle.speed_min = speed;
        }
        if let Some(speed) = float("muzzle", "speed_max") {
            self.muzzle.speed_max = speed;
        }
        if let Some(duration) = uint("muzzle", "duration") {
            self.muzzle.duration_ms = duration as u32;
        }
        if let Some(color) = config.get("muzzle", "color") {
            match Rgba::parse(&color) {
                Ok(color) => self.muzzle.color = color,
                Err(e) => warn!("Bad muzzle color: {}", e),
            }
        }

        // [sparks] section
        if let Some(count) = uint("sparks", "max_per_frame") {
            self.sparks_per_frame = count as u32;
        }
        if let Some(duration) = uint("sparks", "duration") {
            self.sparks_duration_ms = duration as u32;
        }

        // [shooter] section
        if let Some(rate) = float("shooter", "shots_per_second") {
            self.shots_per_second = rate;
        }
        if let Some(offset) = float("shooter", "muzzle_offset") {
            self.muzzle_offset = offset;
        }

        self.sanitize();

        info!(
            "Loaded config: {}x{} window, fps={}, {} frames of {} ms, pool={} ({})",
            self.window_width,
            self.window_height,
            self.target_fps,
            self.frames,
            self.frame_ms,
            self.pool_size,
            self.slot_policy
        );
    }

    /// Fix values that would break particle sampling.
    fn sanitize(&mut self) {
        if self.muzzle.speed_min > self.muzzle.speed_max {
            warn!(
                "muzzle speed_min {} > speed_max {}, swapping",
                self.muzzle.speed_min, self.muzzle.speed_max
            );
            std::mem::swap(&mut self.muzzle.speed_min, &mut self.muzzle.speed_max);
        }
        if self.muzzle.duration_ms == 0 {
            warn!("muzzle duration must be positive, using 1 ms");
            self.muzzle.duration_ms = 1;
        }
        if self.sparks_duration_ms == 0 {
            warn!("sparks duration must be positive, using 1 ms");
            self.sparks_duration_ms = 1;
        }
        if self.pool_size == 0 {
            warn!("projectile pool_size must be positive, using 1");
            self.pool_size = 1;
        }
    }

    /// Save configuration to the INI file.
    ///
    /// Creates the file if it doesn't exist.
    pub fn save_to_file(&self) -> Result<(), String> {
        let mut config = Ini::new();
        let mut set = |section: &str, key: &str, value: String| {
            config.set(section, key, Some(value));
        };

        set("window", "width", self.window_width.to_string());
        set("window", "height", self.window_height.to_string());
        set("window", "target_fps", self.target_fps.to_string());

        set("sim", "frames", self.frames.to_string());
        set("sim", "frame_ms", self.frame_ms.to_string());
        if let Some(seed) = self.seed {
            set("sim", "seed", seed.to_string());
        }

        set("projectile", "fire_ms", self.durations.fire_ms.to_string());
        set("projectile", "travel_ms", self.durations.travel_ms.to_string());
        set("projectile", "fade_ms", self.durations.fade_ms.to_string());
        set("projectile", "splash_ms", self.durations.splash_ms.to_string());
        set("projectile", "speed", self.projectile_speed.to_string());
        set("projectile", "pool_size", self.pool_size.to_string());
        set("projectile", "slot_policy", self.slot_policy.to_string());
        set("projectile", "hit_chance", self.hit_chance.to_string());

        set("muzzle", "spread", self.muzzle.spread.to_string());
        set("muzzle", "speed_min", self.muzzle.speed_min.to_string());
        set("muzzle", "speed_max", self.muzzle.speed_max.to_string());
        set("muzzle", "duration", self.muzzle.duration_ms.to_string());
        set("muzzle", "color", self.muzzle.color.to_string());

        set("sparks", "max_per_frame", self.sparks_per_frame.to_string());
        set("sparks", "duration", self.sparks_duration_ms.to_string());

        set("shooter", "shots_per_second", self.shots_per_second.to_string());
        set("shooter", "muzzle_offset", self.muzzle_offset.to_string());

        config
            .write(&self.config_path)
            .map_err(|e| format!("Failed to save config file: {}", e))?;

        info!("Saved config to {:?}", self.config_path);

        Ok(())
    }

    /// Get the window size.
    pub fn window_size(&self) -> (u32, u32) {
        (self.window_width, self.window_height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GameConfig::new();
        assert_eq!(config.durations, ProjectileDurations::default());
        assert_eq!(config.slot_policy, SlotPolicy::SkipActive);
        assert_eq!(config.muzzle.color, Rgba::MUZZLE_ORANGE);
        assert_eq!(config.muzzle.duration_ms, 1000);
        assert_eq!(config.window_size(), (800, 600));
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_load_from_str_overrides_present_keys_only() {
        let mut config = GameConfig::new();
        config
            .load_from_str(
                "[projectile]\ntravel_ms = 500\nslot_policy = overwrite\n\
                 [muzzle]\ncolor = 10,20,30\n[sim]\nseed = 7\n",
            )
            .unwrap();
        assert_eq!(config.durations.travel_ms, 500);
        assert_eq!(config.durations.fire_ms, DEFAULT_FIRE_MS);
        assert_eq!(config.slot_policy, SlotPolicy::Overwrite);
        assert_eq!(config.muzzle.color, Rgba::new(10, 20, 30, 255));
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.window_width, DEFAULT_WINDOW_WIDTH);
    }

    #[test]
    fn test_bad_values_keep_defaults() {
        let mut config = GameConfig::new();
        config
            .load_from_str("[projectile]\nslot_policy = sometimes\n[muzzle]\ncolor = red\n")
            .unwrap();
        assert_eq!(config.slot_policy, SlotPolicy::SkipActive);
        assert_eq!(config.muzzle.color, Rgba::MUZZLE_ORANGE);
    }

    #[test]
    fn test_sanitize_fixes_sampling_inputs() {
        let mut config = GameConfig::new();
        config
            .load_from_str(
                "[muzzle]\nspeed_min = 0.5\nspeed_max = 0.1\nduration = 0\n\
                 [projectile]\npool_size = 0\nhit_chance = 4\n",
            )
            .unwrap();
        assert!(config.muzzle.speed_min <= config.muzzle.speed_max);
        assert_eq!(config.muzzle.duration_ms, 1);
        assert_eq!(config.pool_size, 1);
        assert_eq!(config.hit_chance, 1.0);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let mut config = GameConfig::with_path("/nonexistent/plasmafx/config.ini");
        assert!(config.load_from_file().is_err());
        assert_eq!(config.durations, ProjectileDurations::default());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let path = std::env::temp_dir().join(format!("plasmafx_config_{}.ini", std::process::id()));
        let mut saved = GameConfig::with_path(&path);
        saved.durations.splash_ms = 250;
        saved.slot_policy = SlotPolicy::Overwrite;
        saved.seed = Some(99);
        saved.muzzle.color = Rgba::new(1, 2, 3, 4);
        saved.muzzle_offset = 35.0;
        saved.save_to_file().unwrap();

        let mut loaded = GameConfig::with_path(&path);
        loaded.load_from_file().unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(loaded.durations.splash_ms, 250);
        assert_eq!(loaded.slot_policy, SlotPolicy::Overwrite);
        assert_eq!(loaded.seed, Some(99));
        assert_eq!(loaded.muzzle.color, Rgba::new(1, 2, 3, 4));
        assert_eq!(loaded.muzzle_offset, 35.0);
    }
}
