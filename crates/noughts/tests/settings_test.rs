//! Tests for settings loading and resolution order.

use std::path::{Path, PathBuf};
use std::time::Duration;

use noughts::Settings;
use noughts_core::{Difficulty, MatchMode};

#[test]
fn test_defaults() {
    let settings = Settings::default();
    assert_eq!(settings.high_score_path(), Path::new("high_scores.json"));
    assert_eq!(settings.round_delay(), Duration::from_millis(1500));
    assert!(*settings.music());
    assert_eq!(*settings.default_mode(), MatchMode::BestOf5);
    assert_eq!(*settings.default_difficulty(), Difficulty::Easy);
}

#[test]
fn test_partial_file_keeps_other_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("noughts.toml");
    std::fs::write(
        &path,
        "round_delay_ms = 250\ndefault_mode = \"Best of 20\"\ndefault_difficulty = \"Hard\"\n",
    )
    .unwrap();

    let settings = Settings::from_file(&path).unwrap();
    assert_eq!(*settings.round_delay_ms(), 250);
    assert_eq!(*settings.default_mode(), MatchMode::BestOf20);
    assert_eq!(*settings.default_difficulty(), Difficulty::Hard);
    assert_eq!(settings.high_score_path(), Path::new("high_scores.json"));
}

#[test]
fn test_bad_toml_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("noughts.toml");
    std::fs::write(&path, "round_delay_ms = \"soon\"").unwrap();

    let err = Settings::from_file(&path).unwrap_err();
    assert!(err.message.contains("Failed to parse settings"), "{err}");
}

#[test]
fn test_resolution_order() {
    let dir = tempfile::tempdir().unwrap();
    let flag = dir.path().join("flag.toml");
    let env = dir.path().join("env.toml");
    let local = dir.path().join("noughts.toml");
    std::fs::write(&flag, "round_delay_ms = 1").unwrap();
    std::fs::write(&env, "round_delay_ms = 2").unwrap();
    std::fs::write(&local, "round_delay_ms = 3").unwrap();
    let env_value = Some(env.display().to_string());

    let from_flag = Settings::resolve_with(Some(&flag), env_value.clone(), &local).unwrap();
    assert_eq!(*from_flag.round_delay_ms(), 1);

    let from_env = Settings::resolve_with(None, env_value, &local).unwrap();
    assert_eq!(*from_env.round_delay_ms(), 2);

    let from_local = Settings::resolve_with(None, None, &local).unwrap();
    assert_eq!(*from_local.round_delay_ms(), 3);

    let defaults =
        Settings::resolve_with(None, None, &dir.path().join("absent.toml")).unwrap();
    assert_eq!(defaults, Settings::default());
}

#[test]
fn test_named_file_must_exist() {
    let missing = PathBuf::from("/definitely/not/here/noughts.toml");
    assert!(Settings::resolve_with(Some(&missing), None, Path::new("x")).is_err());
    assert!(
        Settings::resolve_with(None, Some(missing.display().to_string()), Path::new("x"))
            .is_err()
    );
}

#[test]
fn test_setters_override_fields() {
    let settings = Settings::default()
        .with_high_score_path(PathBuf::from("elsewhere.json"))
        .with_music(false);
    assert_eq!(settings.high_score_path(), Path::new("elsewhere.json"));
    assert!(!*settings.music());
}
