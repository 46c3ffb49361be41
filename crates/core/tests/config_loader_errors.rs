use mdwrangle_core::config::{ConfigError, ConfigLoader};
use rstest::rstest;
use std::fs;
use tempfile::TempDir;

/// Write `toml` to a fresh config file and load it.
fn load(toml: &str, profile: Option<&str>) -> ConfigError {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, toml).unwrap();
    ConfigLoader::load(Some(&path), profile).unwrap_err()
}

const ONE_PROFILE: &str = "version = 1\n[profiles.default]\nvault_root = \"/tmp/notes\"\n";

#[test]
fn missing_file_is_not_found() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("absent/config.toml");

    let err = ConfigLoader::load(Some(&path), None).unwrap_err();
    assert!(matches!(err, ConfigError::NotFound(ref p) if p.ends_with("config.toml")), "{err:?}");
}

#[rstest]
#[case::future_version("version = 3\n[profiles.default]\nvault_root = \"/tmp/notes\"\n")]
#[case::zero_version("version = 0\nprofiles = {}\n")]
fn unsupported_version(#[case] toml: &str) {
    assert!(matches!(load(toml, None), ConfigError::BadVersion(v) if v != 1));
}

#[test]
fn empty_profile_table_is_rejected() {
    assert!(matches!(load("version = 1\nprofiles = {}\n", None), ConfigError::NoProfiles));
}

#[rstest]
#[case::override_flag(ONE_PROFILE, Some("work"), "work")]
#[case::selected_in_file(
    "version = 1\nprofile = \"home\"\n[profiles.default]\nvault_root = \"/tmp/notes\"\n",
    None,
    "home"
)]
fn unknown_profile(#[case] toml: &str, #[case] profile: Option<&str>, #[case] expected: &str) {
    match load(toml, profile) {
        ConfigError::ProfileNotFound(name) => assert_eq!(name, expected),
        other => panic!("expected ProfileNotFound, got {other:?}"),
    }
}

#[rstest]
#[case::option_is_not_bool(
    "version = 1\n[profiles.default]\nvault_root = \"/tmp/notes\"\n\
     [wrangle]\nsync_relationship_lists = \"yes\"\n"
)]
#[case::missing_vault_root("version = 1\n[profiles.default]\nexcluded_folders = []\n")]
#[case::not_toml("version = = 1")]
fn malformed_file_is_a_parse_error(#[case] toml: &str) {
    let err = load(toml, None);
    assert!(matches!(err, ConfigError::ParseError(_, _)), "{err:?}");
    assert!(err.to_string().starts_with("failed to parse TOML"));
}

#[test]
fn undefined_variable_in_vault_root() {
    let toml = "version = 1\n[profiles.default]\nvault_root = \"$MDWRANGLE_UNSET_TEST_ROOT/notes\"\n";
    match load(toml, None) {
        ConfigError::Expansion(input) => assert!(input.contains("MDWRANGLE_UNSET_TEST_ROOT")),
        other => panic!("expected Expansion, got {other:?}"),
    }
}
