//! Tests for layered settings loading

use std::fs;

use tempfile::TempDir;

use tree2json::application::ApplicationError;
use tree2json::config::{local_config_path, Settings};
use tree2json::domain::DuplicatePolicy;
use tree2json::util::testing;

// Prefix nobody sets, so the host environment cannot leak in
const NO_ENV: &str = "TREE2JSON_ITEST_UNSET";

#[test]
fn given_no_config_files_when_loading_then_returns_defaults() {
    testing::init_test_setup();
    let temp = TempDir::new().unwrap();

    let settings = Settings::load_from(
        Some(temp.path().join("missing.toml").as_path()),
        Some(temp.path()),
        NO_ENV,
    )
    .unwrap();

    assert_eq!(settings, Settings::default());
    assert_eq!(settings.encoding, "auto");
    assert_eq!(settings.fallback_encoding, "big5");
    assert_eq!(settings.duplicates, DuplicatePolicy::Overwrite);
}

#[test]
fn given_local_config_when_loading_then_overrides_defaults() {
    let temp = TempDir::new().unwrap();
    fs::write(
        local_config_path(temp.path()),
        "encoding = \"cp950\"\nduplicates = \"merge\"\n\n[http]\ntimeout_secs = 7\n",
    )
    .unwrap();

    let settings = Settings::load_from(None, Some(temp.path()), NO_ENV).unwrap();

    assert_eq!(settings.encoding, "cp950");
    assert_eq!(settings.duplicates, DuplicatePolicy::Merge);
    assert_eq!(settings.http.timeout_secs, 7);
    // untouched keys keep their defaults
    assert!(settings.normalize);
    assert_eq!(settings.http.user_agent, Settings::default().http.user_agent);
}

#[test]
fn given_global_and_local_config_when_loading_then_local_wins_per_key() {
    let temp = TempDir::new().unwrap();
    let global = temp.path().join("global.toml");
    fs::write(&global, "encoding = \"shift_jis\"\npretty = false\n").unwrap();
    let project = temp.path().join("project");
    fs::create_dir(&project).unwrap();
    fs::write(local_config_path(&project), "encoding = \"utf-8\"\n").unwrap();

    let settings = Settings::load_from(Some(global.as_path()), Some(project.as_path()), NO_ENV).unwrap();

    assert_eq!(settings.encoding, "utf-8");
    assert!(!settings.pretty);
}

#[test]
fn given_env_vars_when_loading_then_env_beats_files() {
    let temp = TempDir::new().unwrap();
    fs::write(local_config_path(temp.path()), "normalize = true\n").unwrap();
    std::env::set_var("TREE2JSON_ITEST_ENV_NORMALIZE", "false");
    std::env::set_var("TREE2JSON_ITEST_ENV_SOURCE", "listing.txt");

    let settings =
        Settings::load_from(None, Some(temp.path()), "TREE2JSON_ITEST_ENV").unwrap();

    assert!(!settings.normalize);
    assert_eq!(settings.source.as_deref(), Some("listing.txt"));
}

#[test]
fn given_invalid_duplicate_policy_in_env_when_loading_then_returns_config_error() {
    std::env::set_var("TREE2JSON_ITEST_BAD_DUPLICATES", "sometimes");

    let result = Settings::load_from(None, None, "TREE2JSON_ITEST_BAD");

    assert!(matches!(result, Err(ApplicationError::Config { .. })));
}

#[test]
fn given_invalid_toml_when_loading_then_returns_config_error() {
    let temp = TempDir::new().unwrap();
    fs::write(local_config_path(temp.path()), "encoding = [unclosed\n").unwrap();

    let result = Settings::load_from(None, Some(temp.path()), NO_ENV);

    match result {
        Err(ApplicationError::Config { message }) => {
            assert!(message.contains(".tree2json.toml"), "message was: {message}");
        }
        other => panic!("expected Config error, got {other:?}"),
    }
}

#[test]
fn given_template_when_written_as_local_config_then_loads_as_defaults() {
    let temp = TempDir::new().unwrap();
    fs::write(local_config_path(temp.path()), Settings::template()).unwrap();

    let settings = Settings::load_from(None, Some(temp.path()), NO_ENV).unwrap();

    assert_eq!(settings, Settings::default());
}
