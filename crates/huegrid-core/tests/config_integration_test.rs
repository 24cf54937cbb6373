use huegrid_core::{ConfigManager, ErrorPolicy, Settings};
use serial_test::serial;
use std::fs;
use tempfile::TempDir;

#[test]
#[serial]
fn empty_directory_yields_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let manager = ConfigManager::new(Some(temp_dir.path().to_path_buf()), Some("test".into()))
        .unwrap();

    assert_eq!(manager.settings(), &Settings::default());
    assert_eq!(manager.env(), "test");
    assert_eq!(manager.config_dir(), temp_dir.path());
}

#[test]
#[serial]
fn later_files_override_earlier_ones() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join("default.toml"),
        r#"
        [api]
        base_url = "http://127.0.0.1:9000"
        timeout_secs = 3

        [debounce]
        delay_ms = 250
        "#,
    )
    .unwrap();
    fs::write(
        temp_dir.path().join("staging.toml"),
        r#"
        [debounce]
        delay_ms = 750
        "#,
    )
    .unwrap();
    fs::write(
        temp_dir.path().join("local.toml"),
        r#"
        [view]
        on_error = "preserve"
        "#,
    )
    .unwrap();

    let settings = ConfigManager::load_from_sources(temp_dir.path(), "staging").unwrap();
    assert_eq!(settings.api.base_url, "http://127.0.0.1:9000");
    assert_eq!(settings.api.timeout_secs, 3);
    assert_eq!(settings.debounce.delay_ms, 750);
    assert_eq!(settings.view.on_error, ErrorPolicy::Preserve);
    assert_eq!(settings.defaults.saturation, 100);
}

#[test]
#[serial]
fn environment_variables_win() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join("default.toml"),
        "[defaults]\nlightness = 20\n",
    )
    .unwrap();

    std::env::set_var("HUEGRID__DEFAULTS__LIGHTNESS", "65");
    let result = ConfigManager::load_from_sources(temp_dir.path(), "development");
    std::env::remove_var("HUEGRID__DEFAULTS__LIGHTNESS");

    assert_eq!(result.unwrap().defaults.lightness, 65);
}

#[test]
#[serial]
fn invalid_values_are_rejected_on_construction() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join("default.toml"),
        "[defaults]\nsaturation = 140\n",
    )
    .unwrap();

    let err = ConfigManager::new(Some(temp_dir.path().to_path_buf()), None).unwrap_err();
    assert!(format!("{:#}", err).contains("defaults.saturation"));
}

#[test]
#[serial]
fn settings_render_as_toml() {
    let temp_dir = TempDir::new().unwrap();
    let manager = ConfigManager::new(Some(temp_dir.path().to_path_buf()), None).unwrap();
    let rendered = manager.to_toml().unwrap();

    let reparsed: Settings = toml::from_str(&rendered).unwrap();
    assert_eq!(&reparsed, manager.settings());
}
