//! Exit codes for failure classes.
//!
//! - 0: Success
//! - 1: Business-rule rejection
//! - 3: No data directory found
//! - 4: Invalid arguments
//! - 7: Configuration error
//! - 8: Authentication failure

mod common;

use common::TestEnv;
use predicates::prelude::*;

#[test]
fn test_disable_autoinit_without_database() {
    let env = TestEnv::new();
    env.command()
        .args(["--disable-autoinit", "room", "list"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Data directory not found"));
    assert!(!env.data_dir.exists());
}

#[test]
fn test_autoinit_creates_database_on_first_use() {
    let env = TestEnv::new();
    env.command().args(["room", "list"]).assert().success();
    assert!(env.data_dir.join("roomres.db").exists());
}

#[test]
fn test_first_account_needs_no_token() {
    let env = TestEnv::new();
    let output = env
        .command()
        .args(["user", "add", "--name", "Root", "--email", "root@example.edu", "--role", "admin"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let token = String::from_utf8(output.stdout).unwrap().trim().to_string();
    assert_eq!(token.len(), 32);

    env.command()
        .args(["user", "add", "--name", "Eve", "--email", "eve@example.edu"])
        .assert()
        .code(1);
}

#[test]
fn test_invalid_config_file() {
    let env = TestEnv::new();
    std::fs::create_dir_all(&env.data_dir).unwrap();
    std::fs::write(env.data_dir.join("config.yaml"), "colour: blue\n").unwrap();

    env.command()
        .args(["room", "list"])
        .assert()
        .code(7)
        .stderr(predicate::str::contains("Configuration error"));
}

#[test]
fn test_out_of_range_config_value() {
    let env = TestEnv::new();
    std::fs::create_dir_all(&env.data_dir).unwrap();
    std::fs::write(env.data_dir.join("config.yaml"), "maximum_lock_wait_seconds: 0\n").unwrap();

    env.command().args(["room", "list"]).assert().code(7);
}

#[test]
fn test_unknown_role_is_invalid_argument() {
    let env = TestEnv::new();
    env.command()
        .args(["user", "add", "--name", "X", "--email", "x@example.edu", "--role", "dean"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown role"));
}

#[test]
fn test_missing_room_is_not_found() {
    let env = TestEnv::new();
    env.command()
        .args(["room", "show", "42"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_completions_generate_script() {
    let env = TestEnv::new();
    env.command_bare()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("roomres"));
}
