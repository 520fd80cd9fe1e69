use std::fmt;

/// Value of the `arch` setting
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Arch {
  X86,
  X86_64,
  Armv7,
  Armv7hf,
  Armv7s,
  Armv7k,
  Armv8,
  Armv8_32,
  Armv8_3,
  Ppc32,
  Ppc64,
  Ppc64le,
  S390x,
  Sparc,
  Sparcv9,
  Wasm,
  Other(String),
}

impl Arch {
  /// Detect the CPU architecture this process runs on
  pub fn current() -> Option<Self> {
    match std::env::consts::ARCH {
      "x86" => Some(Self::X86),
      "x86_64" => Some(Self::X86_64),
      "arm" => Some(Self::Armv7),
      "aarch64" => Some(Self::Armv8),
      "powerpc" => Some(Self::Ppc32),
      "powerpc64" => Some(Self::Ppc64),
      "s390x" => Some(Self::S390x),
      "sparc64" => Some(Self::Sparcv9),
      _ => None,
    }
  }

  pub fn as_str(&self) -> &str {
    match self {
      Self::X86 => "x86",
      Self::X86_64 => "x86_64",
      Self::Armv7 => "armv7",
      Self::Armv7hf => "armv7hf",
      Self::Armv7s => "armv7s",
      Self::Armv7k => "armv7k",
      Self::Armv8 => "armv8",
      Self::Armv8_32 => "armv8_32",
      Self::Armv8_3 => "armv8.3",
      Self::Ppc32 => "ppc32",
      Self::Ppc64 => "ppc64",
      Self::Ppc64le => "ppc64le",
      Self::S390x => "s390x",
      Self::Sparc => "sparc",
      Self::Sparcv9 => "sparcv9",
      Self::Wasm => "wasm",
      Self::Other(name) => name,
    }
  }
}

impl From<&str> for Arch {
  fn from(value: &str) -> Self {
    match value {
      "x86" => Self::X86,
      "x86_64" => Self::X86_64,
      "armv7" => Self::Armv7,
      "armv7hf" => Self::Armv7hf,
      "armv7s" => Self::Armv7s,
      "armv7k" => Self::Armv7k,
      "armv8" => Self::Armv8,
      "armv8_32" => Self::Armv8_32,
      "armv8.3" => Self::Armv8_3,
      "ppc32" => Self::Ppc32,
      "ppc64" => Self::Ppc64,
      "ppc64le" => Self::Ppc64le,
      "s390x" => Self::S390x,
      "sparc" => Self::Sparc,
      "sparcv9" => Self::Sparcv9,
      "wasm" => Self::Wasm,
      other => Self::Other(other.to_string()),
    }
  }
}

impl fmt::Display for Arch {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}
