use mdwrangle_core::config::ConfigLoader;
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

fn write_file(path: &PathBuf, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

#[test]
fn load_default_profile_ok() {
    let tmp = tempdir().unwrap();
    let cfg_path = tmp.path().join("config.toml");
    let toml = r#"
version = 1
profile = "default"

[profiles.default]
vault_root = "/tmp/vault"
excluded_folders = ["{{vault_root}}/templates", "archive"]

[logging]
level = "debug"
file = "{{vault_root}}/.mdwrangle.log"

[wrangle]
convert_keys_to_lowercase = true
"#;

    write_file(&cfg_path, toml);

    let rc = ConfigLoader::load(Some(&cfg_path), None).expect("should load");
    assert_eq!(rc.active_profile, "default");
    assert_eq!(rc.vault_root.display().to_string(), "/tmp/vault");
    assert_eq!(
        rc.excluded_folders,
        vec![PathBuf::from("/tmp/vault/templates"), PathBuf::from("archive")]
    );
    assert_eq!(rc.logging.level, "debug");
    assert_eq!(rc.logging.file, Some(PathBuf::from("/tmp/vault/.mdwrangle.log")));
    assert!(rc.wrangle.convert_keys_to_lowercase);
    assert!(!rc.wrangle.sync_relationship_lists);
}

#[test]
fn load_with_profile_override_ok() {
    let tmp = tempdir().unwrap();
    let cfg_path = tmp.path().join("mdwrangle/config.toml");
    let toml = r#"
version = 1
profile = "default"

[profiles.default]
vault_root = "/tmp/def"

[profiles.work]
vault_root = "/tmp/work"
"#;
    write_file(&cfg_path, toml);

    let rc = ConfigLoader::load(Some(&cfg_path), Some("work")).expect("should load");
    assert_eq!(rc.active_profile, "work");
    assert_eq!(rc.vault_root.display().to_string(), "/tmp/work");
    assert!(rc.excluded_folders.is_empty());
    assert_eq!(rc.logging.level, "info");
}
