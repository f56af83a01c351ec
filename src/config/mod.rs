pub mod settings;

// Re-export commonly used types
pub use settings::{
    CameraSettings, ConfigError, ConfigResult, HeadTrackingSettings, LocomotionSettings,
    SceneSettings, SpeedMode, WalkbotSettings,
    load_or_default, load_settings, load_settings_from, save_settings, save_settings_to,
    settings_path,
};
