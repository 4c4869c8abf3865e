use planning_core::config::DEFAULT_EXPIRY_MINUTES;
use planning_core::{load_config, ConfigError, PlanningConfig};
use std::path::PathBuf;

#[test]
fn missing_file_yields_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = load_config(&dir.path().join("planning.toml")).unwrap();

    assert_eq!(config, PlanningConfig::default());
    assert_eq!(config.expiry.minutes(), DEFAULT_EXPIRY_MINUTES);
}

#[test]
fn file_values_override_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("planning.toml");
    std::fs::write(
        &path,
        r#"
[expiry]
minutes = 90

[auth]
id_field = "username"

[logging]
level = "warn"
dir = "/var/log/planning"
"#,
    )
    .unwrap();

    let config = load_config(&path).unwrap();
    assert_eq!(config.expiry.minutes(), 90);
    assert_eq!(config.auth.id_field, "username");
    assert_eq!(config.logging.level.as_deref(), Some("warn"));
    assert_eq!(config.logging.dir, Some(PathBuf::from("/var/log/planning")));
}

#[test]
fn malformed_file_is_a_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("planning.toml");
    std::fs::write(&path, "[expiry]\nminutes = \"soon\"\n").unwrap();

    let err = load_config(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn zero_expiry_in_file_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("planning.toml");
    std::fs::write(&path, "[expiry]\nminutes = 0\n").unwrap();

    let err = load_config(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn unknown_log_level_is_invalid() {
    let err = PlanningConfig::from_toml_str("[logging]\nlevel = \"loud\"\n").unwrap_err();
    match err {
        ConfigError::Invalid(message) => assert!(message.contains("loud")),
        other => panic!("unexpected error: {other}"),
    }
}
