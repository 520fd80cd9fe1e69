pub mod paths;

use std::fmt;

use crate::settings::{Arch, Os, Settings};

/// Host platform identifier combining architecture and OS (e.g., "armv8-Macos")
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Platform {
  pub arch: Arch,
  pub os: Os,
}

impl Platform {
  pub fn new(arch: Arch, os: Os) -> Self {
    Self { arch, os }
  }

  /// Detect the current platform at runtime
  ///
  /// Returns `None` if the OS or architecture is not supported
  pub fn current() -> Option<Self> {
    Some(Self {
      arch: Arch::current()?,
      os: Os::current()?,
    })
  }

  /// Returns the platform triple string (e.g., "x86_64-Linux")
  pub fn triple(&self) -> String {
    format!("{}-{}", self.arch, self.os)
  }

  /// Settings describing this platform, usable as the default build scope.
  pub fn settings(&self) -> Settings {
    Settings {
      os: Some(self.os.clone()),
      arch: Some(self.arch.clone()),
      ..Default::default()
    }
  }
}

impl fmt::Display for Platform {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.triple())
  }
}

/// Returns the platform triple for the current system
///
/// Returns `None` if the current platform is not supported
pub fn platform_triple() -> Option<String> {
  Platform::current().map(|p| p.triple())
}
