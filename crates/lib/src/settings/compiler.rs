use std::fmt;

/// Compiler family from the `compiler` setting.
///
/// `Unknown` keeps families without a flag table (e.g. `xlc`); every flag
/// lookup for it yields nothing.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Compiler {
  Gcc,
  Clang,
  AppleClang,
  Msvc,
  IntelCc,
  Unknown(String),
}

impl Compiler {
  pub fn as_str(&self) -> &str {
    match self {
      Self::Gcc => "gcc",
      Self::Clang => "clang",
      Self::AppleClang => "apple-clang",
      Self::Msvc => "msvc",
      Self::IntelCc => "intel-cc",
      Self::Unknown(name) => name,
    }
  }

  /// GCC-compatible command line (gcc, clang, apple-clang, intel-cc)
  pub fn is_gnu_like(&self) -> bool {
    matches!(self, Self::Gcc | Self::Clang | Self::AppleClang | Self::IntelCc)
  }
}

impl From<&str> for Compiler {
  fn from(value: &str) -> Self {
    match value {
      "gcc" => Self::Gcc,
      "clang" => Self::Clang,
      "apple-clang" => Self::AppleClang,
      "msvc" => Self::Msvc,
      "intel-cc" => Self::IntelCc,
      other => Self::Unknown(other.to_string()),
    }
  }
}

impl fmt::Display for Compiler {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

/// Value of the `build_type` setting
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BuildType {
  Debug,
  Release,
  RelWithDebInfo,
  MinSizeRel,
  Other(String),
}

impl BuildType {
  pub fn as_str(&self) -> &str {
    match self {
      Self::Debug => "Debug",
      Self::Release => "Release",
      Self::RelWithDebInfo => "RelWithDebInfo",
      Self::MinSizeRel => "MinSizeRel",
      Self::Other(name) => name,
    }
  }

  /// Build types that define `NDEBUG`
  pub fn is_optimized(&self) -> bool {
    matches!(self, Self::Release | Self::RelWithDebInfo | Self::MinSizeRel)
  }
}

impl From<&str> for BuildType {
  fn from(value: &str) -> Self {
    match value {
      "Debug" => Self::Debug,
      "Release" => Self::Release,
      "RelWithDebInfo" => Self::RelWithDebInfo,
      "MinSizeRel" => Self::MinSizeRel,
      other => Self::Other(other.to_string()),
    }
  }
}

impl fmt::Display for BuildType {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}
