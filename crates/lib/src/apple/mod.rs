//! Apple platform helpers: SDK names, architecture names, deployment target
//! flags, `xcrun` queries and dylib install names.

pub mod install_name;
pub mod runner;
pub mod xcrun;

use thiserror::Error;

use crate::conf::Conf;
use crate::settings::{Arch, Os, Settings};

pub use install_name::{dylib_install_name, fix_apple_shared_install_name, parse_install_name};
pub use runner::{CommandRunner, SystemRunner};
pub use xcrun::XCRun;

pub const CONF_SDK_PATH: &str = "tools.apple:sdk_path";

#[derive(Debug, Error)]
pub enum AppleError {
  #[error("failed to run '{command}': {source}")]
  Spawn { command: String, source: std::io::Error },

  #[error("'{command}' failed with exit code {code:?}: {stderr}")]
  CommandFailed {
    command: String,
    code: Option<i32>,
    stderr: String,
  },

  #[error("no install name found for {}", path.display())]
  NoInstallName { path: std::path::PathBuf },

  #[error("shared library folder {} not found inside package folder", path.display())]
  LibFolderNotFound { path: std::path::PathBuf },

  #[error("failed to list {}: {source}", path.display())]
  ReadDir { path: std::path::PathBuf, source: walkdir::Error },
}

/// Macos, iOS, watchOS and tvOS.
pub fn is_apple_os(os: &Os) -> bool {
  os.is_apple()
}

/// Architecture name as Apple tools spell it (`-arch` values).
pub fn to_apple_arch(arch: &Arch) -> Option<&'static str> {
  let name = match arch {
    Arch::X86 => "i386",
    Arch::X86_64 => "x86_64",
    Arch::Armv7 => "armv7",
    Arch::Armv8 => "arm64",
    Arch::Armv8_32 => "arm64_32",
    Arch::Armv8_3 => "arm64e",
    Arch::Armv7s => "armv7s",
    Arch::Armv7k => "armv7k",
    _ => return None,
  };
  Some(name)
}

/// `os.sdk`, or the default SDK of the OS.
pub fn apple_sdk_name(settings: &Settings) -> Option<String> {
  if let Some(sdk) = &settings.os_sdk {
    return Some(sdk.clone());
  }
  let name = match settings.os.as_ref()? {
    Os::Macos => "macosx",
    Os::IOs => "iphoneos",
    Os::WatchOs => "watchos",
    Os::TvOs => "appletvos",
    _ => return None,
  };
  Some(name.to_string())
}

/// Deployment target flag, e.g. `-mios-version-min=12.0`.
pub fn apple_min_version_flag(settings: &Settings) -> Option<String> {
  let version = settings.os_version.as_deref()?;
  let simulator = settings.os_sdk.as_deref().is_some_and(|sdk| sdk.ends_with("simulator"));
  let flag = match (settings.os.as_ref()?, simulator) {
    (Os::Macos, _) => "-mmacosx-version-min",
    (Os::IOs, false) => "-mios-version-min",
    (Os::IOs, true) => "-mios-simulator-version-min",
    (Os::WatchOs, false) => "-mwatchos-version-min",
    (Os::WatchOs, true) => "-mwatchos-simulator-version-min",
    (Os::TvOs, false) => "-mtvos-version-min",
    (Os::TvOs, true) => "-mtvos-simulator-version-min",
    _ => return None,
  };
  Some(format!("{}={}", flag, version))
}

/// `-arch`, `-isysroot` and deployment target flags for an Apple host.
pub fn apple_compile_flags(settings: &Settings, conf: &Conf) -> Vec<String> {
  let mut flags = Vec::new();
  if let Some(arch) = settings.arch.as_ref().and_then(to_apple_arch) {
    flags.push(format!("-arch {}", arch));
  }
  match conf.get_str(CONF_SDK_PATH) {
    Some(sdk_path) => flags.push(format!("-isysroot {}", sdk_path)),
    None => tracing::warn!(key = CONF_SDK_PATH, "cross building to an Apple OS without an SDK path"),
  }
  flags.extend(apple_min_version_flag(settings));
  flags
}
