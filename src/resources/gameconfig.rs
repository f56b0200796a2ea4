//! Game configuration resource.
//!
//! Manages controller tuning loaded from an INI configuration file. Provides
//! defaults for safe startup and methods to load/save configuration.
//!
//! # Configuration File Format
//!
//! ```ini
//! [drive]
//! wheel_force = 200
//! turn_force = 5
//! max_speed = 5
//! max_turn_speed = 2
//! milestone_every = 6
//! scroll_threshold = 0.01
//!
//! [camera]
//! sensitivity = 10
//! min_pitch = -30
//! max_pitch = 30
//! max_yaw = 60
//! follow_smooth = 5
//! offset_x = 0
//! offset_y = 1.5
//! offset_z = 0
//!
//! [probe]
//! range = 3
//! highlight_material = 1000
//! prompt = Interact (E)
//!
//! [physics]
//! fixed_step = 0.02
//! linear_damping = 1.5
//! angular_damping = 2
//! mass = 1
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use glam::Vec3;
use log::{info, warn};
use std::path::PathBuf;

use crate::components::camerarig::CameraRig;
use crate::components::drivebody::DriveBody;
use crate::components::interactionprobe::InteractionProbe;
use crate::components::rendersurface::MaterialId;
use crate::components::wheelchair::WheelchairDrive;

/// Default safe values for startup
const DEFAULT_WHEEL_FORCE: f32 = 200.0;
const DEFAULT_TURN_FORCE: f32 = 5.0;
const DEFAULT_MAX_SPEED: f32 = 5.0;
const DEFAULT_MAX_TURN_SPEED: f32 = 2.0;
const DEFAULT_MILESTONE_EVERY: u32 = 6;
const DEFAULT_SCROLL_THRESHOLD: f32 = 0.01;
const DEFAULT_SENSITIVITY: f32 = 10.0;
const DEFAULT_MIN_PITCH: f32 = -30.0;
const DEFAULT_MAX_PITCH: f32 = 30.0;
const DEFAULT_MAX_YAW: f32 = 60.0;
const DEFAULT_FOLLOW_SMOOTH: f32 = 5.0;
const DEFAULT_CAMERA_OFFSET: Vec3 = Vec3::new(0.0, 1.5, 0.0);
const DEFAULT_PROBE_RANGE: f32 = 3.0;
const DEFAULT_HIGHLIGHT_MATERIAL: u32 = 1000;
const DEFAULT_PROMPT: &str = "Interact\n   (E)";
const DEFAULT_FIXED_STEP: f32 = 0.02;
const DEFAULT_LINEAR_DAMPING: f32 = 1.5;
const DEFAULT_ANGULAR_DAMPING: f32 = 2.0;
const DEFAULT_MASS: f32 = 1.0;
const DEFAULT_CONFIG_PATH: &str = "./config.ini";

/// Game configuration resource.
///
/// Stores every tunable of the drive controller, camera rig, probe and
/// physics step. Use the `*_component` helpers to build components that
/// reflect the current values.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct GameConfig {
    pub wheel_force: f32,
    pub turn_force: f32,
    pub max_speed: f32,
    pub max_turn_speed: f32,
    /// Counted impulses between motion milestones.
    pub milestone_every: u32,
    pub scroll_threshold: f32,
    pub sensitivity: f32,
    pub min_pitch: f32,
    pub max_pitch: f32,
    pub max_yaw: f32,
    pub follow_smooth: f32,
    pub camera_offset: Vec3,
    pub probe_range: f32,
    pub highlight_material: u32,
    /// Text shown when an interactable gains focus.
    pub prompt: String,
    pub fixed_step: f32,
    pub linear_damping: f32,
    pub angular_damping: f32,
    pub mass: f32,
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
            wheel_force: DEFAULT_WHEEL_FORCE,
            turn_force: DEFAULT_TURN_FORCE,
            max_speed: DEFAULT_MAX_SPEED,
            max_turn_speed: DEFAULT_MAX_TURN_SPEED,
            milestone_every: DEFAULT_MILESTONE_EVERY,
            scroll_threshold: DEFAULT_SCROLL_THRESHOLD,
            sensitivity: DEFAULT_SENSITIVITY,
            min_pitch: DEFAULT_MIN_PITCH,
            max_pitch: DEFAULT_MAX_PITCH,
            max_yaw: DEFAULT_MAX_YAW,
            follow_smooth: DEFAULT_FOLLOW_SMOOTH,
            camera_offset: DEFAULT_CAMERA_OFFSET,
            probe_range: DEFAULT_PROBE_RANGE,
            highlight_material: DEFAULT_HIGHLIGHT_MATERIAL,
            prompt: DEFAULT_PROMPT.to_string(),
            fixed_step: DEFAULT_FIXED_STEP,
            linear_damping: DEFAULT_LINEAR_DAMPING,
            angular_damping: DEFAULT_ANGULAR_DAMPING,
            mass: DEFAULT_MASS,
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
    /// Missing values retain their current (default) values.
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;
        self.apply_ini(&config);

        info!(
            "Loaded config: force={} turn={} max_speed={} max_turn={} milestone={} range={} step={}",
            self.wheel_force,
            self.turn_force,
            self.max_speed,
            self.max_turn_speed,
            self.milestone_every,
            self.probe_range,
            self.fixed_step
        );

        Ok(())
    }

    /// Load configuration from INI text instead of a file.
    pub fn load_from_str(&mut self, contents: &str) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .read(contents.to_string())
            .map_err(|e| format!("Failed to parse config: {}", e))?;
        self.apply_ini(&config);
        Ok(())
    }

    fn apply_ini(&mut self, config: &Ini) {
        let float = |section: &str, key: &str, target: &mut f32| {
            match config.getfloat(section, key) {
                Ok(Some(v)) if v.is_finite() => *target = v as f32,
                Ok(Some(_)) | Err(_) => warn!("Ignoring invalid [{}] {}", section, key),
                Ok(None) => {}
            }
        };

        // [drive] section
        float("drive", "wheel_force", &mut self.wheel_force);
        float("drive", "turn_force", &mut self.turn_force);
        float("drive", "max_speed", &mut self.max_speed);
        float("drive", "max_turn_speed", &mut self.max_turn_speed);
        float("drive", "scroll_threshold", &mut self.scroll_threshold);
        if let Some(every) = config.getuint("drive", "milestone_every").ok().flatten() {
            self.milestone_every = (every as u32).max(1);
        }

        // [camera] section
        float("camera", "sensitivity", &mut self.sensitivity);
        float("camera", "min_pitch", &mut self.min_pitch);
        float("camera", "max_pitch", &mut self.max_pitch);
        float("camera", "max_yaw", &mut self.max_yaw);
        float("camera", "follow_smooth", &mut self.follow_smooth);
        float("camera", "offset_x", &mut self.camera_offset.x);
        float("camera", "offset_y", &mut self.camera_offset.y);
        float("camera", "offset_z", &mut self.camera_offset.z);

        // [probe] section
        float("probe", "range", &mut self.probe_range);
        if let Some(id) = config.getuint("probe", "highlight_material").ok().flatten() {
            self.highlight_material = id as u32;
        }
        if let Some(prompt) = config.get("probe", "prompt") {
            self.prompt = prompt.replace("\\n", "\n");
        }

        // [physics] section
        float("physics", "fixed_step", &mut self.fixed_step);
        float("physics", "linear_damping", &mut self.linear_damping);
        float("physics", "angular_damping", &mut self.angular_damping);
        float("physics", "mass", &mut self.mass);
    }

    /// Save configuration to the INI file.
    ///
    /// Creates the file if it doesn't exist.
    pub fn save_to_file(&self) -> Result<(), String> {
        let mut config = Ini::new();
        let mut set = |section: &str, key: &str, value: String| {
            config.set(section, key, Some(value));
        };

        // [drive] section
        set("drive", "wheel_force", self.wheel_force.to_string());
        set("drive", "turn_force", self.turn_force.to_string());
        set("drive", "max_speed", self.max_speed.to_string());
        set("drive", "max_turn_speed", self.max_turn_speed.to_string());
        set("drive", "milestone_every", self.milestone_every.to_string());
        set("drive", "scroll_threshold", self.scroll_threshold.to_string());

        // [camera] section
        set("camera", "sensitivity", self.sensitivity.to_string());
        set("camera", "min_pitch", self.min_pitch.to_string());
        set("camera", "max_pitch", self.max_pitch.to_string());
        set("camera", "max_yaw", self.max_yaw.to_string());
        set("camera", "follow_smooth", self.follow_smooth.to_string());
        set("camera", "offset_x", self.camera_offset.x.to_string());
        set("camera", "offset_y", self.camera_offset.y.to_string());
        set("camera", "offset_z", self.camera_offset.z.to_string());

        // [probe] section
        set("probe", "range", self.probe_range.to_string());
        set(
            "probe",
            "highlight_material",
            self.highlight_material.to_string(),
        );
        set("probe", "prompt", self.prompt.replace('\n', "\\n"));

        // [physics] section
        set("physics", "fixed_step", self.fixed_step.to_string());
        set("physics", "linear_damping", self.linear_damping.to_string());
        set("physics", "angular_damping", self.angular_damping.to_string());
        set("physics", "mass", self.mass.to_string());

        config
            .write(&self.config_path)
            .map_err(|e| format!("Failed to save config file: {}", e))?;

        info!("Saved config to {:?}", self.config_path);

        Ok(())
    }

    /// Drive controller tuned from this configuration.
    pub fn drive_component(&self) -> WheelchairDrive {
        WheelchairDrive::new(
            self.wheel_force,
            self.turn_force,
            self.max_speed,
            self.max_turn_speed,
        )
        .with_milestone_every(self.milestone_every)
        .with_scroll_threshold(self.scroll_threshold)
    }

    /// Physics body tuned from this configuration.
    pub fn body_component(&self) -> DriveBody {
        DriveBody::with_damping(self.linear_damping, self.angular_damping).with_mass(self.mass)
    }

    /// Camera rig following `avatar`, tuned from this configuration.
    pub fn camera_component(&self, avatar: Entity) -> CameraRig {
        CameraRig {
            follow: Some(avatar),
            sensitivity: self.sensitivity,
            min_pitch: self.min_pitch,
            max_pitch: self.max_pitch,
            max_yaw: self.max_yaw,
            follow_smooth: self.follow_smooth,
            offset: self.camera_offset,
            ..CameraRig::default()
        }
    }

    /// Probe ignoring `avatar`, tuned from this configuration.
    pub fn probe_component(&self, avatar: Entity) -> InteractionProbe {
        InteractionProbe::new(self.probe_range, MaterialId(self.highlight_material)).ignoring(avatar)
    }
}
