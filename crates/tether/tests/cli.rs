use std::fs;
use std::path::Path;

use assert_cmd::Command; // Bring Command into scope
use predicates::prelude::*; // Bring predicate traits into scope
use tempfile::{tempdir, TempDir};

fn write_manifest(root: &Path, relative: &str, content: &str) {
    let dir = root.join(relative);
    fs::create_dir_all(&dir).expect("Failed to create module directory");
    fs::write(dir.join("manifest.json"), content).expect("Failed to write manifest");
}

/// A <- B <- C, plus a plain module and a plugin-shaped non-plugin
fn module_tree() -> TempDir {
    let tmp = tempdir().expect("Failed to create temp directory");
    let root = tmp.path();
    write_manifest(root, "plugins/A", r#"{ "kind": "plugin", "deps": ["settings"] }"#);
    write_manifest(root, "plugins/B", r#"{ "kind": "plugin", "deps": ["plugin!A"] }"#);
    write_manifest(root, "plugins/C", r#"{ "kind": "plugin", "deps": ["plugin!B"] }"#);
    write_manifest(root, "plugins/J", r#"{ "kind": "module" }"#);
    write_manifest(root, "modules/settings", r#"{ "config": { "theme": "dark" } }"#);
    tmp
}

#[test]
fn test_ping_command() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("tether")?;

    cmd.arg("--ping");

    cmd.assert()
        .success() // Check for exit code 0
        .stdout(predicate::str::contains("pong"));

    Ok(())
}

#[test]
fn test_no_args_prints_usage_hint() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("tether")?;

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Tether"))
        .stdout(predicate::str::contains("tether load"))
        .stdout(predicate::str::contains("pong").not()); // Ensure "pong" is NOT printed

    Ok(())
}

#[test]
fn test_load_prints_dependency_first_order() -> Result<(), Box<dyn std::error::Error>> {
    let tree = module_tree();
    let mut cmd = Command::cargo_bin("tether")?;

    cmd.arg("load").arg("C").arg("--root").arg(tree.path());

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Loaded 3 plugin(s):"))
        .stdout(predicate::str::is_match(r"(?s)1\. A .*2\. B .*3\. C ")?);

    Ok(())
}

#[test]
fn test_load_json_output() -> Result<(), Box<dyn std::error::Error>> {
    let tree = module_tree();
    let mut cmd = Command::cargo_bin("tether")?;

    let output = cmd.args(["load", "B", "--json", "--root"]).arg(tree.path()).output()?;
    assert!(output.status.success());

    let reports: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    let names: Vec<_> = reports
        .as_array()
        .expect("JSON output is an array")
        .iter()
        .map(|report| report["name"].as_str().unwrap_or_default().to_string())
        .collect();
    assert_eq!(names, ["A", "B"]);
    assert_eq!(reports[1]["deps"], serde_json::json!(["A"]));
    assert_eq!(reports[0]["deps"], serde_json::json!(["settings"]));

    Ok(())
}

#[test]
fn test_load_unknown_plugin_fails() -> Result<(), Box<dyn std::error::Error>> {
    let tree = module_tree();
    let mut cmd = Command::cargo_bin("tether")?;

    cmd.arg("load").arg("BAD").arg("--root").arg(tree.path());

    cmd.assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("collection-load"))
        .stderr(predicate::str::contains("plugin!BAD"));

    Ok(())
}

#[test]
fn test_load_non_plugin_fails() -> Result<(), Box<dyn std::error::Error>> {
    let tree = module_tree();
    let mut cmd = Command::cargo_bin("tether")?;

    cmd.arg("load").arg("J").arg("--root").arg(tree.path());

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("collection-instance: Module is not a valid plugin: 'J'"));

    Ok(())
}

#[test]
fn test_load_missing_root_fails() -> Result<(), Box<dyn std::error::Error>> {
    let tmp = tempdir()?;
    let mut cmd = Command::cargo_bin("tether")?;

    cmd.arg("load").arg("A").arg("--root").arg(tmp.path().join("missing"));

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Directory not found"));

    Ok(())
}
