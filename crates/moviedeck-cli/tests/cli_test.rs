#![allow(clippy::unwrap_used)]
#![allow(missing_docs)]

use assert_cmd::cargo_bin_cmd;
use predicates::prelude::predicate;

#[test]
fn test_help_lists_subcommands() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("moviedeck");
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("browse"))
        .stdout(predicate::str::contains("detail"))
        .stdout(predicate::str::contains("popular"));
}

#[test]
fn test_detail_help() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("moviedeck");
    cmd.args(["detail", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--id"))
        .stdout(predicate::str::contains("--verify-images"));
}

#[test]
fn test_detail_missing_id() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("moviedeck");
    cmd.arg("detail")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--id"));
}

#[test]
fn test_detail_rejects_non_numeric_id() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("moviedeck");
    cmd.args(["detail", "--id", "abc"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn test_popular_without_token_fails() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();

    // Act & Assert
    let mut cmd = cargo_bin_cmd!("moviedeck");
    cmd.env_remove("TMDB_API_TOKEN")
        .args(["popular", "--dir"])
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("TMDB_API_TOKEN"));
}

#[test]
fn test_invalid_config_fails() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("config.toml"), "[tmdb\n").unwrap();

    // Act & Assert
    let mut cmd = cargo_bin_cmd!("moviedeck");
    cmd.env("TMDB_API_TOKEN", "test-token")
        .args(["popular", "--dir"])
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load config"));
}

#[test]
fn test_detail_unreachable_server_reports_network_error() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("config.toml"),
        "[tmdb]\nbase_url = \"http://127.0.0.1:1/3/\"\napi_token = \"test-token\"\n",
    )
    .unwrap();

    // Act & Assert
    let mut cmd = cargo_bin_cmd!("moviedeck");
    cmd.env_remove("TMDB_API_TOKEN")
        .args(["detail", "--id", "12445", "--dir"])
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Could not load movie 12445: network error",
        ));
}
