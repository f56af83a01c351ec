use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::f32::consts::FRAC_PI_2;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

const CONFIG_FILE: &str = "settings.toml";

/// Environment variable that points at an explicit settings file.
pub const CONFIG_PATH_ENV: &str = "WALKBOT_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("No configuration directory available on this platform")]
    NoConfigDir,

    #[error("Failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

// =============================================================================
// Locomotion
// =============================================================================

/// How the per-frame walking step is measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SpeedMode {
    /// `speed` world units every frame, whatever the frame rate.
    #[default]
    PerFrame,
    /// `speed` units per frame at `reference_fps`, scaled by the real frame delta.
    TimeScaled,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocomotionSettings {
    pub speed: f32,
    pub speed_mode: SpeedMode,
    pub reference_fps: f32,
    pub arrival_threshold: f32,
    pub clamp_overshoot: bool,
    pub turn_smoothing: f32,
    pub gait_frequency: f32,
    pub leg_amplitude: f32,
    pub arm_amplitude: f32,
    pub rest_damping: f32,
    /// Height every clicked target is latched to.
    pub target_height: f32,
    pub start_position: [f32; 3],
}

impl Default for LocomotionSettings {
    fn default() -> Self {
        Self {
            speed: 0.05,
            speed_mode: SpeedMode::PerFrame,
            reference_fps: 60.0,
            arrival_threshold: 0.1,
            clamp_overshoot: true,
            turn_smoothing: 0.1,
            gait_frequency: 5.0,
            leg_amplitude: 0.5,
            arm_amplitude: 0.3,
            rest_damping: 0.1,
            target_height: -1.0,
            start_position: [0.0, -1.0, 0.0],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeadTrackingSettings {
    pub yaw_gain: f32,
    pub pitch_gain: f32,
    pub smoothing: f32,
}

impl Default for HeadTrackingSettings {
    fn default() -> Self {
        Self {
            yaw_gain: 0.5,
            pitch_gain: 0.3,
            smoothing: 0.1,
        }
    }
}

// =============================================================================
// View
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub position: [f32; 3],
    pub min_distance: f32,
    pub max_distance: f32,
    pub max_polar_angle: f32,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            fov_degrees: 75.0,
            near: 0.1,
            far: 1000.0,
            position: [0.0, 1.0, 6.0],
            min_distance: 3.0,
            max_distance: 10.0,
            max_polar_angle: FRAC_PI_2,
            rotate_speed: 0.008,
            zoom_speed: 0.001,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneSettings {
    pub ground_height: f32,
    pub ground_size: f32,
    pub grid_divisions: u32,
    pub show_grid: bool,
    pub show_target_marker: bool,
    /// Flat shadows of the robot cast onto the floor by the key light.
    pub shadows: bool,
    pub sphere_segments: u32,
    pub vsync: bool,
}

impl Default for SceneSettings {
    fn default() -> Self {
        Self {
            ground_height: -2.0,
            ground_size: 20.0,
            grid_divisions: 20,
            show_grid: true,
            show_target_marker: true,
            shadows: true,
            sphere_segments: 16,
            vsync: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WalkbotSettings {
    pub locomotion: LocomotionSettings,
    pub head: HeadTrackingSettings,
    pub camera: CameraSettings,
    pub scene: SceneSettings,
}

// =============================================================================
// Persistence
// =============================================================================

/// Settings file location: `$WALKBOT_CONFIG`, else the platform config dir.
pub fn settings_path() -> ConfigResult<PathBuf> {
    if let Some(path) = std::env::var_os(CONFIG_PATH_ENV) {
        return Ok(PathBuf::from(path));
    }
    ProjectDirs::from("com", "walkbot", "walkbot")
        .map(|proj| proj.config_dir().join(CONFIG_FILE))
        .ok_or(ConfigError::NoConfigDir)
}

/// Returns `Ok(None)` when the file does not exist.
pub fn load_settings_from(path: &Path) -> ConfigResult<Option<WalkbotSettings>> {
    let data = match fs::read_to_string(path) {
        Ok(data) => data,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(source) => return Err(ConfigError::Io { path: path.to_path_buf(), source }),
    };
    toml::from_str::<WalkbotSettings>(&data)
        .map(Some)
        .map_err(|source| ConfigError::Parse { path: path.to_path_buf(), source })
}

pub fn save_settings_to(path: &Path, settings: &WalkbotSettings) -> ConfigResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|source| ConfigError::Io { path: parent.to_path_buf(), source })?;
    }
    let toml = toml::to_string_pretty(settings)?;
    fs::write(path, toml).map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })
}

pub fn load_settings() -> ConfigResult<Option<WalkbotSettings>> {
    load_settings_from(&settings_path()?)
}

pub fn save_settings(settings: &WalkbotSettings) -> ConfigResult<()> {
    save_settings_to(&settings_path()?, settings)
}

/// Load the settings file, falling back to defaults on any failure.
pub fn load_or_default() -> WalkbotSettings {
    match load_settings() {
        Ok(Some(settings)) => {
            tracing::info!("Loaded settings from {:?}", settings_path().ok());
            settings
        }
        Ok(None) => {
            tracing::debug!("No settings file found, using defaults");
            WalkbotSettings::default()
        }
        Err(e) => {
            tracing::warn!("Ignoring settings file: {}", e);
            WalkbotSettings::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_locomotion_constants() {
        let loco = LocomotionSettings::default();
        assert_eq!(loco.speed, 0.05);
        assert_eq!(loco.arrival_threshold, 0.1);
        assert_eq!(loco.turn_smoothing, 0.1);
        assert_eq!(loco.gait_frequency, 5.0);
        assert_eq!(loco.leg_amplitude, 0.5);
        assert_eq!(loco.arm_amplitude, 0.3);
        assert_eq!(loco.target_height, -1.0);
        assert_eq!(loco.speed_mode, SpeedMode::PerFrame);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let settings: WalkbotSettings = toml::from_str(
            r#"
            [locomotion]
            speed = 0.1
            speed_mode = "TimeScaled"

            [camera]
            max_distance = 12.0
            "#,
        )
        .unwrap();

        assert_eq!(settings.locomotion.speed, 0.1);
        assert_eq!(settings.locomotion.speed_mode, SpeedMode::TimeScaled);
        assert_eq!(settings.locomotion.arrival_threshold, 0.1);
        assert_eq!(settings.camera.max_distance, 12.0);
        assert_eq!(settings.camera.min_distance, 3.0);
        assert_eq!(settings.head, HeadTrackingSettings::default());
        assert_eq!(settings.scene, SceneSettings::default());
    }

    #[test]
    fn test_empty_file_is_default() {
        let settings: WalkbotSettings = toml::from_str("").unwrap();
        assert_eq!(settings, WalkbotSettings::default());
    }

    #[test]
    fn test_missing_file_is_none() {
        let path = std::env::temp_dir().join("walkbot-does-not-exist/settings.toml");
        assert!(load_settings_from(&path).unwrap().is_none());
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let path = std::env::temp_dir().join(format!("walkbot-bad-{}.toml", std::process::id()));
        fs::write(&path, "locomotion = [").unwrap();
        let err = load_settings_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        let _ = fs::remove_file(&path);
    }
}
