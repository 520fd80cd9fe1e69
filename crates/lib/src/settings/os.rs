use std::fmt;

/// Value of the `os` setting.
///
/// Unrecognized names are kept verbatim in `Other` so that nothing downstream
/// fails on an OS it does not know about.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Os {
  Linux,
  Macos,
  Windows,
  IOs,
  WatchOs,
  TvOs,
  Android,
  FreeBsd,
  Other(String),
}

impl Os {
  /// Detect the operating system this process runs on
  pub fn current() -> Option<Self> {
    match std::env::consts::OS {
      "linux" => Some(Self::Linux),
      "macos" => Some(Self::Macos),
      "windows" => Some(Self::Windows),
      "ios" => Some(Self::IOs),
      "android" => Some(Self::Android),
      "freebsd" => Some(Self::FreeBsd),
      _ => None,
    }
  }

  /// Returns the setting value for this OS (e.g. "Macos", "iOS")
  pub fn as_str(&self) -> &str {
    match self {
      Self::Linux => "Linux",
      Self::Macos => "Macos",
      Self::Windows => "Windows",
      Self::IOs => "iOS",
      Self::WatchOs => "watchOS",
      Self::TvOs => "tvOS",
      Self::Android => "Android",
      Self::FreeBsd => "FreeBSD",
      Self::Other(name) => name,
    }
  }

  pub fn is_windows(&self) -> bool {
    matches!(self, Self::Windows)
  }

  pub fn is_apple(&self) -> bool {
    matches!(self, Self::Macos | Self::IOs | Self::WatchOs | Self::TvOs)
  }
}

impl From<&str> for Os {
  fn from(value: &str) -> Self {
    match value {
      "Linux" => Self::Linux,
      "Macos" => Self::Macos,
      "Windows" => Self::Windows,
      "iOS" => Self::IOs,
      "watchOS" => Self::WatchOs,
      "tvOS" => Self::TvOs,
      "Android" => Self::Android,
      "FreeBSD" => Self::FreeBsd,
      other => Self::Other(other.to_string()),
    }
  }
}

impl fmt::Display for Os {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}
