#![allow(clippy::unwrap_used)]
#![allow(missing_docs)]

use assert_cmd::cargo_bin_cmd;
use predicates::prelude::predicate;

#[test]
fn test_cli_version_flag() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("movie-relay");
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("movie-relay 0.1.0 (rev:"));
}

#[test]
fn test_cli_help_lists_overrides() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("movie-relay");
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--port"))
        .stdout(predicate::str::contains("--config"));
}

#[test]
fn test_cli_rejects_zero_port() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();

    // Act & Assert
    let mut cmd = cargo_bin_cmd!("movie-relay");
    cmd.arg("--dir")
        .arg(dir.path())
        .args(["--port", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid configuration"))
        .stderr(predicate::str::contains("server.port cannot be 0"));
}

#[test]
fn test_cli_rejects_unparsable_config() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("relay.toml");
    std::fs::write(&path, "[server\nport = ").unwrap();

    // Act & Assert
    let mut cmd = cargo_bin_cmd!("movie-relay");
    cmd.arg("--config")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load config"));
}

#[test]
fn test_cli_rejects_missing_config_file() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.toml");

    // Act & Assert
    let mut cmd = cargo_bin_cmd!("movie-relay");
    cmd.arg("--config")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("config file not found"));
}

#[test]
fn test_cli_rejects_base_url_without_trailing_slash() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("config.toml"),
        "[tmdb]\nbase_url = \"https://api.themoviedb.org/3\"\n",
    )
    .unwrap();

    // Act & Assert
    let mut cmd = cargo_bin_cmd!("movie-relay");
    cmd.arg("--dir")
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("must end with '/'"));
}
