use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::tempdir;

fn validate(dir: &Path, extra: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_texset-export"))
        .args(["--progress", "false", "--quiet", "validate"])
        .arg(dir)
        .args(extra)
        .output()
        .expect("run texset-export")
}

const GOOD: &str =
    r#"{"texture_sets":[{"name":"PROP_CHR_S_01","resolution":{"width":512,"height":512}}]}"#;

#[test]
fn strict_fails_when_every_manifest_is_unreadable() {
    let dir = tempdir().expect("tempdir");
    fs::write(dir.path().join("broken.json"), "{not json").expect("write");
    let out = validate(dir.path(), &["--strict"]);
    assert!(!out.status.success());
}

#[test]
fn unreadable_manifests_fail_even_without_strict_when_nothing_loaded() {
    let dir = tempdir().expect("tempdir");
    fs::write(dir.path().join("broken.json"), "{not json").expect("write");
    assert!(!validate(dir.path(), &[]).status.success());
}

#[test]
fn strict_fails_when_one_manifest_is_skipped() {
    let dir = tempdir().expect("tempdir");
    fs::write(dir.path().join("a_good.json"), GOOD).expect("write");
    fs::write(dir.path().join("b_broken.yaml"), "texture_sets: [").expect("write");
    assert!(!validate(dir.path(), &["--strict"]).status.success());
    assert!(validate(dir.path(), &[]).status.success());
}

#[test]
fn strict_passes_clean_manifests() {
    let dir = tempdir().expect("tempdir");
    fs::write(dir.path().join("good.json"), GOOD).expect("write");
    let out = validate(dir.path(), &["--strict", "--report", "json"]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
}

#[test]
fn strict_fails_on_over_budget_texture_set() {
    let dir = tempdir().expect("tempdir");
    fs::write(
        dir.path().join("big.json"),
        r#"{"texture_sets":[{"name":"PROP_CHR_S_01","resolution":{"width":2048,"height":2048}}]}"#,
    )
    .expect("write");
    assert!(!validate(dir.path(), &["--strict"]).status.success());
}
