//! Dependency flag exports.
//!
//! Each direct or transitive dependency publishes a `cpp_info` describing what
//! consumers need to compile and link against it. The list is taken in the
//! order dependencies were declared; nothing here reorders or deduplicates.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DepsError {
  #[error("failed to read dependencies file {}: {source}", path.display())]
  Read { path: PathBuf, source: std::io::Error },

  #[error("failed to parse dependencies file {}: {source}", path.display())]
  Parse { path: PathBuf, source: serde_json::Error },
}

/// Build information exported by one dependency.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CppInfo {
  pub includedirs: Vec<String>,
  pub libdirs: Vec<String>,
  pub libs: Vec<String>,
  pub system_libs: Vec<String>,
  pub frameworks: Vec<String>,
  pub frameworkdirs: Vec<String>,
  pub defines: Vec<String>,
  pub cxxflags: Vec<String>,
  pub cflags: Vec<String>,
  pub sharedlinkflags: Vec<String>,
  pub exelinkflags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyInfo {
  pub name: String,
  #[serde(default)]
  pub version: Option<String>,
  #[serde(default)]
  pub cpp_info: CppInfo,
}

impl DependencyInfo {
  pub fn new(name: &str, cpp_info: CppInfo) -> Self {
    Self {
      name: name.to_string(),
      version: None,
      cpp_info,
    }
  }

  /// `name/version`, or just the name when unversioned
  pub fn reference(&self) -> String {
    match &self.version {
      Some(version) => format!("{}/{}", self.name, version),
      None => self.name.clone(),
    }
  }
}

/// Load a JSON array of dependencies.
pub fn load_dependencies(path: &Path) -> Result<Vec<DependencyInfo>, DepsError> {
  let content = fs::read_to_string(path).map_err(|source| DepsError::Read {
    path: path.to_path_buf(),
    source,
  })?;
  serde_json::from_str(&content).map_err(|source| DepsError::Parse {
    path: path.to_path_buf(),
    source,
  })
}
