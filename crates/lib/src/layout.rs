//! Where generated files land relative to the output folder.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use thiserror::Error;

use crate::settings::BuildType;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown layout '{0}', expected 'none' or 'basic'")]
pub struct UnknownLayout(pub String);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Layout {
  /// Everything is generated straight into the output folder
  #[default]
  None,
  /// `build[-<build_type>]/conan` under the output folder
  Basic,
}

impl Layout {
  pub fn build_folder(&self, output_folder: &Path, build_type: Option<&BuildType>) -> PathBuf {
    match self {
      Layout::None => output_folder.to_path_buf(),
      Layout::Basic => match build_type {
        Some(build_type) => output_folder.join(format!("build-{}", build_type.as_str().to_lowercase())),
        None => output_folder.join("build"),
      },
    }
  }

  pub fn generators_folder(&self, output_folder: &Path, build_type: Option<&BuildType>) -> PathBuf {
    match self {
      Layout::None => output_folder.to_path_buf(),
      Layout::Basic => self.build_folder(output_folder, build_type).join("conan"),
    }
  }
}

impl FromStr for Layout {
  type Err = UnknownLayout;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "none" => Ok(Layout::None),
      "basic" => Ok(Layout::Basic),
      other => Err(UnknownLayout(other.to_string())),
    }
  }
}
