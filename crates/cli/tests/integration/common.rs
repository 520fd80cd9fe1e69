//! Shared test helpers for CLI integration tests.

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use tempfile::TempDir;

/// Isolated test environment.
///
/// Each test gets its own temporary directory with an isolated config home
/// (`TCGEN_HOME`) and output folder.
pub struct TestEnv {
  pub temp: TempDir,
}

impl TestEnv {
  pub fn new() -> Self {
    Self {
      temp: TempDir::new().unwrap(),
    }
  }

  /// Write a file relative to the temp directory.
  pub fn write_file(&self, relative_path: &str, content: &str) -> PathBuf {
    let path = self.temp.path().join(relative_path);
    if let Some(parent) = path.parent() {
      std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, content).unwrap();
    path
  }

  /// Write the lowest-priority conf layer.
  pub fn write_global_conf(&self, content: &str) {
    self.write_file("home/global.conf", content);
  }

  /// Config directory used as `TCGEN_HOME`.
  pub fn home_path(&self) -> PathBuf {
    self.temp.path().join("home")
  }

  /// Output folder passed to `install`.
  pub fn output_path(&self) -> PathBuf {
    self.temp.path().join("output")
  }

  pub fn read(&self, path: &Path) -> String {
    std::fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {}: {}", path.display(), e))
  }

  /// Get a tcgen command bound to this environment.
  pub fn tcgen_cmd(&self) -> Command {
    let mut cmd = cargo_bin_cmd!("tcgen");
    cmd.env("TCGEN_HOME", self.home_path());
    cmd.env_remove("RUST_LOG");
    cmd
  }

  /// `tcgen install` for a Linux armv8 gcc Release host writing into the output folder.
  pub fn install_cmd(&self) -> Command {
    let mut cmd = self.tcgen_cmd();
    cmd
      .arg("install")
      .args(["-s", "os=Linux", "-s", "arch=armv8", "-s", "compiler=gcc", "-s", "build_type=Release"])
      .arg("--output-folder")
      .arg(self.output_path());
    cmd
  }
}
