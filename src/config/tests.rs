use super::builder::default_config_content;
use super::loading::parse_config;
use super::validation::validate_config;
use super::*;
use chrono::Duration;
use serial_test::serial;
use std::fs;
use tempfile::tempdir;

fn config_with(sunrise: &str, sunset: &str, transition_duration: Option<u64>) -> Config {
    Config {
        sunrise: Some(sunrise.to_string()),
        sunset: Some(sunset.to_string()),
        transition_duration,
        ..Config::default()
    }
}

#[test]
#[serial]
fn test_config_load_default_creation() {
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join("gammacycle").join("gammacycle.toml");

    // Save and restore XDG_CONFIG_HOME
    let original = std::env::var("XDG_CONFIG_HOME").ok();
    unsafe {
        std::env::set_var("XDG_CONFIG_HOME", temp_dir.path());
    }

    // First load should create default config
    let result = load();

    // Restore original
    unsafe {
        match original {
            Some(val) => std::env::set_var("XDG_CONFIG_HOME", val),
            None => std::env::remove_var("XDG_CONFIG_HOME"),
        }
    }

    if let Err(e) = &result {
        eprintln!("load() failed: {:?}", e);
    }
    assert!(result.is_ok());
    assert!(config_path.exists());
}

#[test]
fn test_default_config_content_round_trips_to_defaults() {
    let config = parse_config(&default_config_content()).unwrap();
    let settings = config.to_settings().unwrap();
    assert_eq!(settings, Settings::default());
}

#[test]
fn test_default_config_file_creation() {
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join("nested").join("gammacycle.toml");

    create_default_config(&config_path).unwrap();
    assert!(config_path.exists());

    let content = fs::read_to_string(&config_path).unwrap();
    assert!(content.contains("sunset"));
    assert!(content.contains("night_temperature"));
    assert!(content.contains("# latitude"));
}

#[test]
fn test_config_toml_parsing() {
    let config = parse_config(
        r#"
sunrise = "06:00"
sunset = "19:00:00"
night_temperature = 3300
day_brightness = 0.95
transition_duration = 45
transition_offset = -30
latitude = 40.7128
longitude = -74.0060
whitelist_enabled = true
whitelist = ["mpv"]
toggle_hotkey = "Super+F1"
"#,
    )
    .unwrap();

    let settings = config.to_settings().unwrap();
    assert_eq!(settings.manual_sunrise.to_string(), "06:00:00");
    assert_eq!(settings.night.temperature, 3300.0);
    assert_eq!(settings.day.brightness, 0.95);
    assert_eq!(settings.transition_duration, Duration::minutes(45));
    assert_eq!(settings.transition_offset, Duration::minutes(-30));
    assert_eq!(settings.location, Some(GeoLocation::new(40.7128, -74.0060)));
    assert_eq!(settings.whitelist, Some(vec!["mpv".to_string()]));
    assert_eq!(settings.hotkeys.toggle, "Super+F1");
    // Unset bindings keep their defaults
    assert_eq!(
        settings.hotkeys.reset_offset,
        crate::constants::DEFAULT_RESET_OFFSET_HOTKEY
    );
}

#[test]
fn test_config_malformed_toml() {
    assert!(parse_config("day_temperature = [").is_err());
}

#[test]
fn test_config_unknown_field_rejected() {
    assert!(parse_config("day_temp = 6500").is_err());
}

#[test]
fn test_config_validation_basic() {
    assert!(validate_config(&Config::default()).is_ok());
    assert!(validate_config(&config_with("06:00:00", "18:00:00", Some(60))).is_ok());
}

#[test]
fn test_config_validation_identical_times() {
    assert!(validate_config(&config_with("12:00:00", "12:00:00", None)).is_err());
}

#[test]
fn test_config_validation_time_format() {
    assert!(validate_config(&config_with("6am", "18:00:00", None)).is_err());
    assert!(validate_config(&config_with("25:00:00", "18:00:00", None)).is_err());
}

#[test]
fn test_config_validation_transition_limits() {
    let max = crate::constants::MAXIMUM_TRANSITION_DURATION;
    assert!(validate_config(&config_with("06:00:00", "18:00:00", Some(0))).is_ok());
    assert!(validate_config(&config_with("06:00:00", "18:00:00", Some(max))).is_ok());
    assert!(validate_config(&config_with("06:00:00", "18:00:00", Some(max + 1))).is_err());

    let offset = Config {
        transition_offset: Some(-(crate::constants::MAXIMUM_TRANSITION_OFFSET + 1)),
        ..Config::default()
    };
    assert!(validate_config(&offset).is_err());
}

#[test]
fn test_config_validation_color_ranges() {
    let too_cold = Config {
        night_temperature: Some(100.0),
        ..Config::default()
    };
    assert!(validate_config(&too_cold).is_err());

    let too_dim = Config {
        day_brightness: Some(0.05),
        ..Config::default()
    };
    assert!(validate_config(&too_dim).is_err());

    let limits = Config {
        day_temperature: Some(20_000.0),
        night_temperature: Some(500.0),
        night_brightness: Some(0.1),
        ..Config::default()
    };
    assert!(validate_config(&limits).is_ok());
}

#[test]
fn test_config_validation_coordinates() {
    let bad_lat = Config {
        latitude: Some(91.0),
        longitude: Some(0.0),
        ..Config::default()
    };
    assert!(validate_config(&bad_lat).is_err());

    let lone_lat = Config {
        latitude: Some(45.0),
        ..Config::default()
    };
    assert!(validate_config(&lone_lat).is_err());
}

#[test]
fn test_config_validation_empty_hotkey() {
    let config = Config {
        toggle_hotkey: Some("  ".to_string()),
        ..Config::default()
    };
    assert!(validate_config(&config).is_err());
}

#[test]
fn test_manual_mode_flag() {
    let config = Config {
        latitude: Some(10.0),
        longitude: Some(10.0),
        manual_sun_times: Some(true),
        ..Config::default()
    };
    let settings = config.to_settings().unwrap();
    assert!(settings.manual_mode);
    assert!(settings.location.is_some());
}

#[test]
fn test_hotkey_bindings_cover_every_action() {
    let bindings = HotkeyBindings::default();
    let pairs: Vec<_> = bindings.iter().collect();
    assert_eq!(pairs.len(), HotkeyAction::ALL.len());
    assert_eq!(pairs[0], (HotkeyAction::Toggle, DEFAULT_TOGGLE_HOTKEY));
}
