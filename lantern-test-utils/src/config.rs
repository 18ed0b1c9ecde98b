//! Configuration directory management for testing

use std::fs;
use std::path::{Path, PathBuf};

use lantern_core::ConfigDirs;
use tempfile::TempDir;

/// Per-test config and data directories backed by a temporary directory
pub struct ConfigDirsTestGuard {
  /// Kept alive so the directories outlive the test body
  pub temp_dir: TempDir,
  pub config_dir: PathBuf,
  pub data_dir: PathBuf,
}

impl ConfigDirsTestGuard {
  pub fn new() -> std::io::Result<Self> {
    let temp_dir = TempDir::new()?;
    let config_dir = temp_dir.path().join("config");
    let data_dir = temp_dir.path().join("data");
    fs::create_dir_all(&config_dir)?;
    fs::create_dir_all(&data_dir)?;

    Ok(Self {
      temp_dir,
      config_dir,
      data_dir,
    })
  }

  /// The directories as the server resolves them
  pub fn dirs(&self) -> ConfigDirs {
    ConfigDirs::from_paths(&self.config_dir, &self.data_dir)
  }

  /// Write a TOML config file into the config directory and return its path
  pub fn write_config(&self, contents: &str) -> std::io::Result<PathBuf> {
    let path = self.dirs().config_path();
    fs::write(&path, contents)?;
    Ok(path)
  }

  pub fn path(&self) -> &Path {
    self.temp_dir.path()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_guard_creates_directories() {
    let guard = ConfigDirsTestGuard::new().unwrap();
    assert!(guard.config_dir.is_dir());
    assert!(guard.data_dir.is_dir());

    let path = guard.write_config("[jira]\nbase_url = \"https://jira.example.com\"\n").unwrap();
    assert!(path.starts_with(&guard.config_dir));
    assert!(path.exists());
  }
}
