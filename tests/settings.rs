use mail_launcher::settings::{Settings, SETTINGS_FILE};
use tempfile::tempdir;

#[test]
fn missing_settings_use_defaults() {
    let dir = tempdir().unwrap();
    let settings = Settings::load(&dir.path().join(SETTINGS_FILE)).unwrap();
    assert_eq!(settings, Settings::default());
    assert!(!settings.debug_logging);
}

#[test]
fn relative_log_file_is_resolved_next_to_settings() {
    let dir = tempdir().unwrap();
    let path = dir.path().join(SETTINGS_FILE);
    std::fs::write(&path, r#"{"debug_logging": true, "log_file": "logs/mail.log"}"#).unwrap();
    let settings = Settings::load(&path).unwrap();
    assert!(settings.debug_logging);
    assert_eq!(settings.log_file, Some(dir.path().join("logs/mail.log")));
}

#[test]
fn malformed_settings_are_reported() {
    let dir = tempdir().unwrap();
    let path = dir.path().join(SETTINGS_FILE);
    std::fs::write(&path, r#"{"debug_logging": "yes"#).unwrap();
    assert!(Settings::load(&path).is_err());
}
