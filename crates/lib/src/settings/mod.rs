//! Typed build settings.
//!
//! Settings arrive as `key=value` pairs (`os=Macos`, `compiler.libcxx=libstdc++11`).
//! Each enum-valued setting has a fallback variant, so any value is accepted.
//! Keys the generators do not read (`compiler.runtime`, `os.subsystem`, ...)
//! are kept verbatim in [`Settings::extra`].

mod arch;
mod compiler;
mod os;

use std::collections::BTreeMap;

use thiserror::Error;
use tracing::debug;

pub use arch::Arch;
pub use compiler::{BuildType, Compiler};
pub use os::Os;

use crate::util::split_assignment;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SettingsError {
  #[error("malformed setting '{0}', expected key=value")]
  Malformed(String),
}

/// One settings scope (host, build or target machine).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
  pub os: Option<Os>,
  pub os_version: Option<String>,
  pub os_sdk: Option<String>,
  pub os_sdk_version: Option<String>,
  pub arch: Option<Arch>,
  pub compiler: Option<Compiler>,
  pub compiler_version: Option<String>,
  pub compiler_libcxx: Option<String>,
  pub compiler_cppstd: Option<String>,
  pub build_type: Option<BuildType>,
  /// Settings outside the typed subset, by full key
  pub extra: BTreeMap<String, String>,
}

impl Settings {
  /// Settings describing the machine this process runs on.
  pub fn detected() -> Self {
    Self {
      os: Os::current(),
      arch: Arch::current(),
      ..Default::default()
    }
  }

  /// Parse a list of `key=value` assignments, later ones overriding earlier ones.
  pub fn from_assignments<I, S>(assignments: I) -> Result<Self, SettingsError>
  where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
  {
    let mut settings = Self::default();
    for assignment in assignments {
      settings.apply_assignment(assignment.as_ref())?;
    }
    Ok(settings)
  }

  pub fn apply_assignment(&mut self, assignment: &str) -> Result<(), SettingsError> {
    let (key, value) = split_assignment(assignment).ok_or_else(|| SettingsError::Malformed(assignment.to_string()))?;
    self.set(key, value)
  }

  pub fn set(&mut self, key: &str, value: &str) -> Result<(), SettingsError> {
    let value = value.to_string();
    match key {
      "os" => self.os = Some(Os::from(value.as_str())),
      "os.version" => self.os_version = Some(value),
      "os.sdk" => self.os_sdk = Some(value),
      "os.sdk_version" => self.os_sdk_version = Some(value),
      "arch" => self.arch = Some(Arch::from(value.as_str())),
      "compiler" => self.compiler = Some(Compiler::from(value.as_str())),
      "compiler.version" => self.compiler_version = Some(value),
      "compiler.libcxx" => self.compiler_libcxx = Some(value),
      "compiler.cppstd" => self.compiler_cppstd = Some(value),
      "build_type" => self.build_type = Some(BuildType::from(value.as_str())),
      other => {
        debug!(key = other, value = %value, "keeping untyped setting");
        self.extra.insert(other.to_string(), value);
      }
    }
    Ok(())
  }

  /// Fill every unset field from `fallback`.
  pub fn or(mut self, fallback: &Settings) -> Self {
    fn fill<T: Clone>(slot: &mut Option<T>, fallback: &Option<T>) {
      if slot.is_none() {
        slot.clone_from(fallback);
      }
    }
    fill(&mut self.os, &fallback.os);
    fill(&mut self.os_version, &fallback.os_version);
    fill(&mut self.os_sdk, &fallback.os_sdk);
    fill(&mut self.os_sdk_version, &fallback.os_sdk_version);
    fill(&mut self.arch, &fallback.arch);
    fill(&mut self.compiler, &fallback.compiler);
    fill(&mut self.compiler_version, &fallback.compiler_version);
    fill(&mut self.compiler_libcxx, &fallback.compiler_libcxx);
    fill(&mut self.compiler_cppstd, &fallback.compiler_cppstd);
    fill(&mut self.build_type, &fallback.build_type);
    for (key, value) in &fallback.extra {
      self.extra.entry(key.clone()).or_insert_with(|| value.clone());
    }
    self
  }

  pub fn is_apple(&self) -> bool {
    self.os.as_ref().is_some_and(crate::apple::is_apple_os)
  }

  pub fn is_windows(&self) -> bool {
    self.os.as_ref().is_some_and(Os::is_windows)
  }
}

/// True when host and build machines differ in OS or architecture.
///
/// Settings that are unset on either side never count as a difference.
pub fn is_cross_building(host: &Settings, build: &Settings) -> bool {
  fn differs<T: PartialEq>(a: &Option<T>, b: &Option<T>) -> bool {
    matches!((a, b), (Some(a), Some(b)) if a != b)
  }
  differs(&host.os, &build.os) || differs(&host.arch, &build.arch)
}
