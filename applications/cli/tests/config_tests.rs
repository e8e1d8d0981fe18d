use puff_cli::config::PuffConfig;
use puff_cli::error::AppError;
use puff_core::QualityTier;
use std::collections::HashMap;
use std::time::Duration;

fn env(vars: &[(&str, &str)]) -> config::Environment {
    let map: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect();

    config::Environment::with_prefix("PUFF")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
        .source(Some(map))
}

#[test]
fn test_defaults() {
    let config = PuffConfig::default();

    assert_eq!(
        config.converter.audio_endpoint,
        "https://www.youtubemp3.ltd/convert"
    );
    assert_eq!(
        config.converter.video_endpoint,
        "https://www.youtubemp3.ltd/convert-video"
    );
    assert_eq!(config.download.default_quality, QualityTier::Hd);
    assert!(config.validate().is_ok());
}

#[test]
fn test_file_overrides_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("puff.toml");
    std::fs::write(
        &path,
        r#"
[storage]
download_dir = "/srv/music"

[download]
default_quality = "1080p"

[converter]
request_timeout_secs = 5
"#,
    )
    .unwrap();

    let config = PuffConfig::load_with_env(Some(&path), env(&[])).unwrap();

    assert_eq!(config.storage.download_dir.to_str(), Some("/srv/music"));
    assert_eq!(config.download.default_quality, QualityTier::FullHd);
    assert_eq!(
        config.converter_config().request_timeout,
        Duration::from_secs(5)
    );
    // Untouched keys keep their defaults
    assert_eq!(config.storage.database_url, "sqlite://./data/puff.db");
}

#[test]
fn test_environment_overrides_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("puff.toml");
    std::fs::write(&path, "[storage]\ndownload_dir = \"/from/file\"\n").unwrap();

    let config = PuffConfig::load_with_env(
        Some(&path),
        env(&[
            ("PUFF_STORAGE__DOWNLOAD_DIR", "/from/env"),
            ("PUFF_CONVERTER__CONNECT_TIMEOUT_SECS", "3"),
        ]),
    )
    .unwrap();

    assert_eq!(config.storage.download_dir.to_str(), Some("/from/env"));
    assert_eq!(config.converter.connect_timeout_secs, 3);
}

#[test]
fn test_missing_explicit_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = PuffConfig::load_with_env(Some(&dir.path().join("nope.toml")), env(&[]));
    assert!(matches!(result, Err(AppError::Config(_))));
}

#[test]
fn test_validate_rejects_bad_endpoint() {
    let mut config = PuffConfig::default();
    config.converter.video_endpoint = "youtubemp3.ltd/convert-video".to_string();
    assert!(matches!(config.validate(), Err(AppError::Config(_))));
}

#[test]
fn test_validate_rejects_non_sqlite_database() {
    let mut config = PuffConfig::default();
    config.storage.database_url = "postgres://localhost/puff".to_string();
    assert!(matches!(config.validate(), Err(AppError::Config(_))));
}

#[test]
fn test_validate_rejects_zero_timeout() {
    let mut config = PuffConfig::default();
    config.converter.request_timeout_secs = 0;
    assert!(config.validate().is_err());
}
