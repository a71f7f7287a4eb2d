//! Integration tests for `shipit deploy`.
//!
//! The external orchestrator is faked with a shell script placed first on
//! PATH, so these tests exercise the real spawn path without ansible
//! installed. Unix-only for that reason.

#![allow(clippy::expect_used, clippy::unwrap_used)]
#![cfg(unix)]

use std::os::unix::fs::PermissionsExt as _;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn shipit() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("shipit"))
}

/// Temp project tree with a playbook and inventories for the given targets.
fn project_tree(targets: &[&str]) -> TempDir {
    let dir = TempDir::new().expect("temp dir");
    let ansible = dir.path().join("ansible");
    std::fs::create_dir_all(&ansible).expect("mkdir ansible");
    std::fs::write(ansible.join("deploy.yml"), "---\n- hosts: all\n").expect("playbook");
    for target in targets {
        std::fs::write(ansible.join(format!("{target}_hosts")), "[web]\n").expect("inventory");
    }
    dir
}

/// Install a fake `ansible-playbook` in `dir` that records its argv to
/// `argv.txt` next to it and exits with `exit_code`. Returns the PATH
/// value to run shipit with and the argv file path.
fn fake_ansible_playbook(dir: &Path, exit_code: i32) -> (String, std::path::PathBuf) {
    let argv_file = dir.join("argv.txt");
    let script = dir.join("ansible-playbook");
    std::fs::write(
        &script,
        format!("#!/bin/sh\necho \"$@\" > \"{}\"\nexit {exit_code}\n", argv_file.display()),
    )
    .expect("write fake bin");
    std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755))
        .expect("chmod fake bin");

    let path = format!(
        "{}:{}",
        dir.display(),
        std::env::var("PATH").expect("PATH set")
    );
    (path, argv_file)
}

/// Config path inside the project dir so tests never touch `~/.shipit`.
fn config_path(dir: &TempDir) -> String {
    dir.path().join("config.yaml").to_string_lossy().into_owned()
}

// ---------------------------------------------------------------------------
// Happy path and exit code propagation
// ---------------------------------------------------------------------------

#[test]
fn test_deploy_succeeds_and_passes_exact_args() {
    let project = project_tree(&["staging"]);
    let bin = TempDir::new().expect("bin dir");
    let (path, argv_file) = fake_ansible_playbook(bin.path(), 0);

    shipit()
        .args(["deploy", "--target", "staging", "--yes"])
        .current_dir(project.path())
        .env("PATH", &path)
        .env("SHIPIT_CONFIG", config_path(&project))
        .assert()
        .success()
        .stdout(predicate::str::contains("Deploy complete."));

    let argv = std::fs::read_to_string(&argv_file).expect("argv recorded");
    assert_eq!(argv.trim(), "ansible/deploy.yml -i ansible/staging_hosts");
}

#[test]
fn test_deploy_without_selection_defaults_to_production() {
    let project = project_tree(&["production"]);
    let bin = TempDir::new().expect("bin dir");
    let (path, argv_file) = fake_ansible_playbook(bin.path(), 0);

    shipit()
        .args(["deploy", "--yes"])
        .current_dir(project.path())
        .env("PATH", &path)
        .env("SHIPIT_CONFIG", config_path(&project))
        .assert()
        .success();

    let argv = std::fs::read_to_string(&argv_file).expect("argv recorded");
    assert_eq!(argv.trim(), "ansible/deploy.yml -i ansible/production_hosts");
}

#[test]
fn test_deploy_uses_configured_default_target() {
    let project = project_tree(&["staging"]);
    let bin = TempDir::new().expect("bin dir");
    let (path, argv_file) = fake_ansible_playbook(bin.path(), 0);
    let config = config_path(&project);
    std::fs::write(&config, "deploy:\n  target: staging\n").expect("config");

    shipit()
        .args(["deploy", "--yes"])
        .current_dir(project.path())
        .env("PATH", &path)
        .env("SHIPIT_CONFIG", &config)
        .assert()
        .success();

    let argv = std::fs::read_to_string(&argv_file).expect("argv recorded");
    assert_eq!(argv.trim(), "ansible/deploy.yml -i ansible/staging_hosts");
}

#[test]
fn test_deploy_propagates_child_exit_code_two() {
    let project = project_tree(&["production"]);
    let bin = TempDir::new().expect("bin dir");
    let (path, argv_file) = fake_ansible_playbook(bin.path(), 2);

    shipit()
        .args(["deploy", "--yes"])
        .current_dir(project.path())
        .env("PATH", &path)
        .env("SHIPIT_CONFIG", config_path(&project))
        .assert()
        .code(2)
        .stderr(predicate::str::contains("exited with status 2"));

    // The fake recorded exactly one invocation (the file is overwritten per
    // run; its presence plus the exit code shows there was no retry loop).
    assert!(argv_file.exists());
}

// ---------------------------------------------------------------------------
// Precondition failures (no subprocess spawned)
// ---------------------------------------------------------------------------

#[test]
fn test_deploy_fails_when_playbook_missing() {
    let project = TempDir::new().expect("temp dir");
    let bin = TempDir::new().expect("bin dir");
    let (path, argv_file) = fake_ansible_playbook(bin.path(), 0);

    shipit()
        .args(["deploy", "--yes"])
        .current_dir(project.path())
        .env("PATH", &path)
        .env("SHIPIT_CONFIG", config_path(&project))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Playbook not found"));

    assert!(!argv_file.exists(), "no subprocess may run without a playbook");
}

#[test]
fn test_deploy_fails_when_inventory_missing_for_target() {
    let project = project_tree(&["production"]);
    let bin = TempDir::new().expect("bin dir");
    let (path, argv_file) = fake_ansible_playbook(bin.path(), 0);

    shipit()
        .args(["deploy", "--target", "staging", "--yes"])
        .current_dir(project.path())
        .env("PATH", &path)
        .env("SHIPIT_CONFIG", config_path(&project))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Inventory not found"));

    assert!(!argv_file.exists(), "no subprocess may run without an inventory");
}

#[test]
fn test_deploy_rejects_invalid_target_before_spawning() {
    let project = project_tree(&["production"]);
    let bin = TempDir::new().expect("bin dir");
    let (path, argv_file) = fake_ansible_playbook(bin.path(), 0);

    shipit()
        .args(["deploy", "--target", "Bad Target", "--yes"])
        .current_dir(project.path())
        .env("PATH", &path)
        .env("SHIPIT_CONFIG", config_path(&project))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid target"));

    assert!(!argv_file.exists());
}

// ---------------------------------------------------------------------------
// Spawn failure
// ---------------------------------------------------------------------------

#[test]
fn test_deploy_reports_missing_orchestrator_binary() {
    let project = project_tree(&["production"]);
    let empty_bin = TempDir::new().expect("bin dir");

    shipit()
        .args(["deploy", "--yes"])
        .current_dir(project.path())
        .env("PATH", empty_bin.path())
        .env("SHIPIT_CONFIG", config_path(&project))
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to launch ansible-playbook"));
}
