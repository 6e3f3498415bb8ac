use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const SEED: &str = "JBSWY3DPEHPK3PXP";

fn twofa(store: &Path) -> Command {
    let mut cmd = Command::cargo_bin("twofa").unwrap();
    cmd.env("TWOFA_STORE", store).env_remove("TWOFA_LOG");
    cmd
}

fn store_path(dir: &TempDir) -> std::path::PathBuf {
    dir.path().join(".twofa.yaml")
}

#[test]
fn empty_store_shows_nothing() {
    let dir = TempDir::new().unwrap();
    let store = store_path(&dir);

    twofa(&store)
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing found matching pattern ''"));
    assert!(!store.exists());
}

#[test]
fn add_then_show() {
    let dir = TempDir::new().unwrap();
    let store = store_path(&dir);

    twofa(&store)
        .args(["add", "github", SEED])
        .assert()
        .success()
        .stdout(predicate::str::contains("Secret stored with label 'github'"));

    twofa(&store)
        .args(["show", "GIT"])
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"(?m)^\d{6}  github$").unwrap())
        .stdout(predicate::str::contains("Expiration in"));

    let raw = fs::read_to_string(&store).unwrap();
    assert!(raw.contains("encrypted: false"));
    assert!(raw.contains("github: JBSWY3DPEHPK3PXP"));
}

#[test]
fn add_strips_whitespace() {
    let dir = TempDir::new().unwrap();
    let store = store_path(&dir);

    twofa(&store)
        .args(["add", "spaced", "JBSW Y3DP EHPK 3PXP"])
        .assert()
        .success();

    twofa(&store)
        .args(["secret", "spaced"])
        .assert()
        .success()
        .stdout(format!("{}\n", SEED));
}

#[test]
fn duplicate_label_fails() {
    let dir = TempDir::new().unwrap();
    let store = store_path(&dir);

    twofa(&store).args(["add", "github", SEED]).assert().success();
    twofa(&store)
        .args(["add", "github", SEED])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Label 'github' already present"));
}

#[test]
fn invalid_secret_fails_without_writing() {
    let dir = TempDir::new().unwrap();
    let store = store_path(&dir);

    twofa(&store)
        .args(["add", "bad", "not-base32!!"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid secret"));
    assert!(!store.exists());
}

#[test]
fn rename_and_remove() {
    let dir = TempDir::new().unwrap();
    let store = store_path(&dir);

    twofa(&store).args(["add", "github", SEED]).assert().success();
    twofa(&store).args(["add", "gitlab", SEED]).assert().success();

    twofa(&store)
        .args(["rename", "github", "gitlab"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Label 'gitlab' already exists"));

    twofa(&store)
        .args(["rename", "github", "gh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Label 'github' renamed to 'gh'"));

    twofa(&store)
        .args(["remove", "gh"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--confirm"));
    twofa(&store).args(["secret", "gh"]).assert().success();

    twofa(&store)
        .args(["remove", "gh", "--confirm"])
        .assert()
        .success();
    twofa(&store)
        .args(["secret", "gh"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Label 'gh' not present"));
}

#[test]
fn legacy_store_is_readable() {
    let dir = TempDir::new().unwrap();
    let store = store_path(&dir);
    fs::write(&store, format!("github: {}\n", SEED)).unwrap();

    twofa(&store)
        .args(["list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("  github"));
}

#[test]
fn json_listing() {
    let dir = TempDir::new().unwrap();
    let store = store_path(&dir);
    twofa(&store).args(["add", "github", SEED]).assert().success();

    let output = twofa(&store).args(["show", "--json"]).output().unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["codes"][0]["label"], "github");
    assert_eq!(value["codes"][0]["code"].as_str().unwrap().len(), 6);
}

#[test]
fn qr_for_missing_label_fails() {
    let dir = TempDir::new().unwrap();
    let store = store_path(&dir);

    twofa(&store)
        .args(["qr", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Label 'nope' not present"));
}

#[test]
fn store_flag_overrides_env() {
    let dir = TempDir::new().unwrap();
    let env_store = dir.path().join("env.yaml");
    let flag_store = dir.path().join("flag.yaml");

    twofa(&env_store)
        .args(["--store"])
        .arg(&flag_store)
        .args(["add", "github", SEED])
        .assert()
        .success();

    assert!(flag_store.exists());
    assert!(!env_store.exists());
}
