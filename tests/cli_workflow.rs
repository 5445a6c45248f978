use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;

fn todoz(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("todoz").unwrap();
    cmd.env("TODOZ_HOME", home)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .current_dir(home);
    cmd
}

#[test]
fn test_full_lifecycle() {
    let temp_dir = tempfile::tempdir().unwrap();
    let home = temp_dir.path();

    todoz(home)
        .args(["add", "--backlog", "buy", "  milk"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added to backlog: Buy milk"));

    todoz(home)
        .args(["list", "backlog"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1. [ ] Buy milk"));

    // Positions resolve against the remembered backlog view.
    todoz(home)
        .args(["today", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Moved to today: Buy milk"));

    todoz(home)
        .args(["ls", "today"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Buy milk"));

    todoz(home)
        .args(["done", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Done: Buy milk"));

    todoz(home)
        .args(["list", "done"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[x] Buy milk"));

    todoz(home)
        .arg("clear-done")
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted 1 done todo"));

    todoz(home)
        .args(["list", "deleted"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Buy milk"));

    todoz(home).args(["purge", "-y"]).assert().success();

    todoz(home)
        .args(["list", "all"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing in all."));
}

#[test]
fn test_data_lives_under_home() {
    let temp_dir = tempfile::tempdir().unwrap();
    let home = temp_dir.path();

    todoz(home).args(["add", "water plants"]).assert().success();
    todoz(home).args(["list", "backlog"]).assert().success();

    let stored = fs::read_to_string(home.join("todos.json")).unwrap();
    assert!(stored.contains("\"title\":\"Water plants\""));
    assert!(stored.contains("\"numberOfTimesMarkedAsToBeDoneToday\":1"));

    let state = fs::read_to_string(home.join("state.json")).unwrap();
    assert_eq!(state, r#"{"filter":"backlog"}"#);
}

#[test]
fn test_export_then_import_into_fresh_home() {
    let source = tempfile::tempdir().unwrap();
    let target = tempfile::tempdir().unwrap();
    let out = source.path().join("backups");

    todoz(source.path())
        .args(["add", "--today", "renew passport"])
        .assert()
        .success();
    todoz(source.path())
        .args(["export", "--dir"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 1 todos"));

    let backups: Vec<_> = fs::read_dir(&out).unwrap().map(|e| e.unwrap().path()).collect();
    assert_eq!(backups.len(), 1);
    let name = backups[0].file_name().unwrap().to_string_lossy().to_string();
    assert!(name.starts_with("todoz-backup-"));
    assert!(name.ends_with(".json"));
    assert_eq!(
        fs::read_to_string(&backups[0]).unwrap(),
        fs::read_to_string(source.path().join("todos.json")).unwrap()
    );

    todoz(target.path())
        .args(["add", "--backlog", "already here"])
        .assert()
        .success();
    todoz(target.path())
        .arg("import")
        .arg(&backups[0])
        .arg("--merge")
        .assert()
        .success()
        .stdout(predicate::str::contains("Merged 1 new todos"));

    todoz(target.path())
        .args(["list", "all"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Renew passport"))
        .stdout(predicate::str::contains("Already here"));
}

#[test]
fn test_invalid_import_is_rejected() {
    let temp_dir = tempfile::tempdir().unwrap();
    let home = temp_dir.path();
    let bad = home.join("bad.json");
    fs::write(&bad, r#"[{"id": "", "title": "No id"}]"#).unwrap();

    todoz(home).args(["add", "keep me"]).assert().success();
    let before = fs::read_to_string(home.join("todos.json")).unwrap();

    todoz(home)
        .arg("import")
        .arg(&bad)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));

    assert_eq!(fs::read_to_string(home.join("todos.json")).unwrap(), before);
}

#[test]
fn test_empty_title_fails() {
    let temp_dir = tempfile::tempdir().unwrap();

    todoz(temp_dir.path())
        .args(["add", "   "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Title cannot be empty"));
}

#[test]
fn test_unknown_position_is_not_an_error() {
    let temp_dir = tempfile::tempdir().unwrap();

    todoz(temp_dir.path())
        .args(["done", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing at position 5"));
}

#[test]
fn test_config_set_and_show() {
    let temp_dir = tempfile::tempdir().unwrap();
    let home = temp_dir.path();

    todoz(home)
        .args(["config", "default_filter", "backlog"])
        .assert()
        .success()
        .stdout(predicate::str::contains("default_filter set to backlog"));

    todoz(home)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("storage_key = todos"))
        .stdout(predicate::str::contains("default_filter = backlog"));

    // With no remembered filter, new todos follow the configured default view.
    todoz(home).args(["add", "from config"]).assert().success();
    todoz(home)
        .args(["list", "backlog"])
        .assert()
        .success()
        .stdout(predicate::str::contains("From config"));
}

#[test]
fn test_help_lists_groups() {
    let temp_dir = tempfile::tempdir().unwrap();

    todoz(temp_dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Per-Todo Commands:"))
        .stdout(predicate::str::contains("clear-done"));
}
