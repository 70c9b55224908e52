//! Config file path resolution.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};

/// Resolves the config file path.
///
/// - If `file` is `Some`, returns it unchanged; it must exist.
/// - If `dir` is `Some`, returns `{dir}/config.toml`.
/// - Otherwise returns `~/.config/movie-relay/config.toml`.
///
/// # Errors
///
/// Returns an error if an explicit `file` does not exist, or if the home
/// directory cannot be determined (when both are `None`).
pub fn resolve_config_path(file: Option<&Path>, dir: Option<&Path>) -> Result<PathBuf> {
    if let Some(f) = file {
        if !f.is_file() {
            bail!("config file not found: {}", f.display());
        }
        return Ok(f.to_path_buf());
    }
    if let Some(d) = dir {
        return Ok(d.join("config.toml"));
    }

    let home = std::env::var("HOME").context("HOME environment variable is not set")?;
    Ok(PathBuf::from(home)
        .join(".config")
        .join("movie-relay")
        .join("config.toml"))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_resolve_with_file() {
        // Arrange
        let tmp = tempfile::tempdir().unwrap();
        let file = tmp.path().join("relay.toml");
        std::fs::write(&file, "").unwrap();
        let dir = PathBuf::from("/tmp/ignored");

        // Act
        let path = resolve_config_path(Some(&file), Some(&dir)).unwrap();

        // Assert
        assert_eq!(path, file);
    }

    #[test]
    fn test_resolve_missing_explicit_file_fails() {
        // Arrange
        let tmp = tempfile::tempdir().unwrap();
        let file = tmp.path().join("typo.toml");

        // Act
        let err = resolve_config_path(Some(&file), None).unwrap_err();

        // Assert
        assert!(err.to_string().starts_with("config file not found:"));
    }

    #[test]
    fn test_resolve_missing_dir_config_is_allowed() {
        // Arrange
        let tmp = tempfile::tempdir().unwrap();

        // Act
        let path = resolve_config_path(None, Some(tmp.path())).unwrap();

        // Assert
        assert!(!path.exists());
    }

    #[test]
    fn test_resolve_with_dir() {
        // Arrange
        let dir = PathBuf::from("/tmp/myproject");

        // Act
        let path = resolve_config_path(None, Some(&dir)).unwrap();

        // Assert
        assert_eq!(path, PathBuf::from("/tmp/myproject/config.toml"));
    }

    #[test]
    fn test_resolve_default() {
        // Arrange & Act
        let path = resolve_config_path(None, None).unwrap();

        // Assert
        assert!(path.ends_with(".config/movie-relay/config.toml"));
    }
}
