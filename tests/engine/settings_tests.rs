//! Tests for user settings persistence
//!
//! Tests cover:
//! - Default settings values
//! - Serialization/deserialization
//! - Settings roundtrip
//! - Lenient handling of missing and unknown fields

use rigview::downsample::DecimationInterval;
use rigview::series::TagLimits;
use rigview::settings::UserSettings;

// ============================================
// Default Settings Tests
// ============================================

#[test]
fn test_settings_default_version() {
    let settings = UserSettings::default();
    assert_eq!(settings.version, 1);
}

#[test]
fn test_settings_default_interval() {
    let settings = UserSettings::default();
    assert_eq!(settings.default_interval, DecimationInterval::OneMinute);
}

#[test]
fn test_settings_default_limits() {
    let settings = UserSettings::default();
    assert_eq!(settings.default_limits(), TagLimits::band(42.0, 18.0));
}

// ============================================
// Serialization Tests
// ============================================

#[test]
fn test_settings_serialize_default() {
    let settings = UserSettings::default();
    let json = serde_json::to_string(&settings).unwrap();

    assert!(json.contains("version"));
    assert!(json.contains("default_interval"));
    assert!(json.contains("1min"));
}

#[test]
fn test_settings_roundtrip() {
    let mut settings = UserSettings::default();
    settings.default_interval = DecimationInterval::ThirtyMinutes;
    settings.default_upper_limit = Some(55.5);
    settings.default_lower_limit = None;
    settings.api_base_url = "http://rig-gateway:8080".to_string();

    let json = serde_json::to_string_pretty(&settings).unwrap();
    let restored: UserSettings = serde_json::from_str(&json).unwrap();

    assert_eq!(restored.version, settings.version);
    assert_eq!(restored.default_interval, DecimationInterval::ThirtyMinutes);
    assert_eq!(restored.default_upper_limit, Some(55.5));
    assert_eq!(restored.default_lower_limit, None);
    assert_eq!(restored.api_base_url, "http://rig-gateway:8080");
}

#[test]
fn test_settings_deserialize_missing_fields_use_defaults() {
    let json = r#"{"version":1}"#;
    let settings: UserSettings = serde_json::from_str(json).unwrap();

    assert_eq!(settings.default_interval, DecimationInterval::OneMinute);
    assert_eq!(settings.default_upper_limit, Some(42.0));
    assert_eq!(settings.default_lower_limit, Some(18.0));
    assert!(!settings.api_base_url.is_empty());
}

#[test]
fn test_settings_deserialize_ignores_unknown_fields() {
    let json = r#"{"version":1,"default_interval":"5min","legacy_theme":"dark"}"#;
    let settings: UserSettings = serde_json::from_str(json).unwrap();

    assert_eq!(settings.default_interval, DecimationInterval::FiveMinutes);
}

#[test]
fn test_settings_path_lives_under_config_dir() {
    // Path resolution depends on the platform; when a config dir exists the
    // settings file must sit directly inside it.
    if let Some(dir) = UserSettings::get_config_dir() {
        let path = UserSettings::get_settings_path().unwrap();
        assert_eq!(path.parent().unwrap(), dir);
        assert_eq!(path.file_name().unwrap(), "settings.json");
    }
}
