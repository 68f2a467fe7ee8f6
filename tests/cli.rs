//! Runs the built `til-index` binary against throwaway note trees.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn til_index(args: &[&str]) -> Output {
    let bin = env!("CARGO_BIN_EXE_til-index");
    Command::new(bin)
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run til-index")
}

fn notes_tree() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path().join("rust");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("ownership.md"), "# Ownership\n").unwrap();
    tmp
}

fn root_arg(path: &Path) -> String {
    path.to_str().unwrap().to_string()
}

#[test]
fn generate_writes_readme() {
    let tmp = notes_tree();
    let out = til_index(&["--root", &root_arg(tmp.path())]);

    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("Created README.md (1 category, 1 article)"));

    let readme = fs::read_to_string(tmp.path().join("README.md")).unwrap();
    assert!(readme.contains("- [Ownership](rust/ownership.md)"));
}

#[test]
fn missing_root_fails_without_writing() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path().join("does-not-exist");
    let out = til_index(&["generate", "--root", &root_arg(&root)]);

    assert!(!out.status.success());
    assert!(!root.exists());
    assert!(fs::read_dir(tmp.path()).unwrap().next().is_none());
}

#[test]
fn check_reports_stale_then_fresh() {
    let tmp = notes_tree();
    let root = root_arg(tmp.path());

    let stale = til_index(&["check", "--root", &root]);
    assert_eq!(stale.status.code(), Some(1));
    assert!(!tmp.path().join("README.md").exists());

    assert!(til_index(&["--root", &root]).status.success());

    let fresh = til_index(&["check", "--root", &root]);
    assert!(fresh.status.success());
    assert!(String::from_utf8_lossy(&fresh.stdout).contains("README.md is up to date"));
}

#[test]
fn output_flag_redirects_target() {
    let tmp = notes_tree();
    let out = til_index(&["--root", &root_arg(tmp.path()), "--output", "INDEX.md"]);

    assert!(out.status.success());
    assert!(tmp.path().join("INDEX.md").exists());
    assert!(!tmp.path().join("README.md").exists());
}

#[test]
fn scan_json_lists_articles() {
    let tmp = notes_tree();
    let out = til_index(&["scan", "--json", "--root", &root_arg(tmp.path())]);
    assert!(out.status.success());

    let value: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    let rust = &value["categories"][0];
    assert_eq!(rust["name"], "rust");
    assert_eq!(rust["articles"][0]["title"], "Ownership");
    assert_eq!(rust["articles"][0]["path"], "rust/ownership.md");
    assert_eq!(rust["articles"][0]["title_source"], "heading");
    assert!(!tmp.path().join("README.md").exists());
}

#[test]
fn gen_config_output_is_a_valid_config() {
    let tmp = TempDir::new().unwrap();
    let out = til_index(&["gen-config"]);
    assert!(out.status.success());

    fs::write(tmp.path().join("til-index.toml"), &out.stdout).unwrap();
    let check = til_index(&["scan", "--root", &root_arg(tmp.path())]);
    assert!(check.status.success(), "stderr: {}", String::from_utf8_lossy(&check.stderr));
}

#[test]
fn invalid_config_is_rejected() {
    let tmp = notes_tree();
    fs::write(tmp.path().join("til-index.toml"), "no_such_key = true\n").unwrap();

    let out = til_index(&["--root", &root_arg(tmp.path())]);
    assert!(!out.status.success());
    assert!(!tmp.path().join("README.md").exists());
}

#[test]
fn output_outside_root_is_rejected() {
    let tmp = notes_tree();
    let root = tmp.path().join("rust");
    let out = til_index(&["--root", &root_arg(&root), "--output", "../README.md"]);

    assert!(!out.status.success());
    assert!(!tmp.path().join("README.md").exists());
    assert!(!root.join("README.md").exists());
}
