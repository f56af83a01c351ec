use std::fs;

use walkbot::config::{
    load_settings_from, save_settings_to, ConfigError, SpeedMode, WalkbotSettings,
};

fn scratch_dir(name: &str) -> std::path::PathBuf {
    let dir = std::env::temp_dir().join(format!("walkbot-{}-{}", name, std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    dir
}

#[test]
fn test_settings_round_trip() {
    let dir = scratch_dir("round-trip");
    let path = dir.join("nested").join("settings.toml");

    let mut settings = WalkbotSettings::default();
    settings.locomotion.speed_mode = SpeedMode::TimeScaled;
    settings.locomotion.speed = 0.08;
    settings.head.yaw_gain = 0.7;
    settings.camera.max_distance = 14.0;
    settings.scene.show_grid = false;

    save_settings_to(&path, &settings).expect("save should create parent directories");
    let loaded = load_settings_from(&path)
        .expect("load should succeed")
        .expect("file should exist");
    assert_eq!(loaded, settings);

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_saved_file_is_readable_toml() {
    let dir = scratch_dir("readable");
    let path = dir.join("settings.toml");
    save_settings_to(&path, &WalkbotSettings::default()).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    assert!(text.contains("[locomotion]"));
    assert!(text.contains("speed_mode = \"PerFrame\""));
    assert!(text.contains("[head]"));

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_unknown_enum_value_is_rejected() {
    let dir = scratch_dir("bad-enum");
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join("settings.toml");
    fs::write(&path, "[locomotion]\nspeed_mode = \"Warp\"\n").unwrap();

    match load_settings_from(&path) {
        Err(ConfigError::Parse { path: reported, .. }) => assert_eq!(reported, path),
        other => panic!("expected a parse error, got {:?}", other),
    }

    let _ = fs::remove_dir_all(&dir);
}
