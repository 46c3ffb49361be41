use assert_cmd::prelude::*;
use std::fs;
use std::process::Command;
use tempfile::tempdir;

#[test]
fn inspect_lists_properties_and_tags() {
    let tmp = tempdir().unwrap();
    let root = tmp.path().join("vault");
    fs::create_dir_all(root.join(".obsidian")).unwrap();
    fs::write(root.join("a.md"), "---\nStatus: x\ntags: [Work]\n---\nBody #idea\n").unwrap();
    fs::write(root.join("b.md"), "---\ndue: today\n---\n").unwrap();
    fs::write(root.join(".obsidian/hidden.md"), "---\nsecret: 1\n---\n").unwrap();

    let config = tmp.path().join("config.toml");
    fs::write(&config, format!("version = 1\n[profiles.default]\nvault_root = \"{}\"\n", root.display()))
        .unwrap();

    let output = Command::new(assert_cmd::cargo::cargo_bin!("mdw"))
        .arg("--config")
        .arg(&config)
        .args(["inspect", "--json"])
        .env("RUST_LOG", "off")
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["documents"].as_array().unwrap().len(), 2);
    assert_eq!(json["properties"], serde_json::json!(["due", "status", "tags"]));
    assert_eq!(json["tags"], serde_json::json!(["idea", "work"]));
    assert_eq!(json["documents"][0]["tags"], serde_json::json!(["#Work", "#idea"]));
}
