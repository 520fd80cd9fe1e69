use std::path::PathBuf;

use crate::consts::{APP_NAME, GLOBAL_CONF_FILENAME, HOME_ENV};

/// Returns the user's home directory, if it can be determined
#[cfg(windows)]
pub fn home_dir() -> Option<PathBuf> {
  std::env::var_os("USERPROFILE").map(PathBuf::from)
}

/// Returns the user's home directory, if it can be determined
#[cfg(not(windows))]
pub fn home_dir() -> Option<PathBuf> {
  std::env::var_os("HOME").map(PathBuf::from)
}

/// Returns the directory holding tcgen's configuration files.
///
/// `TCGEN_HOME` takes precedence on every platform.
#[cfg(windows)]
pub fn config_dir() -> Option<PathBuf> {
  if let Some(home) = std::env::var_os(HOME_ENV) {
    return Some(PathBuf::from(home));
  }
  std::env::var_os("APPDATA").map(|appdata| PathBuf::from(appdata).join(APP_NAME))
}

/// Returns the directory holding tcgen's configuration files.
///
/// `TCGEN_HOME` takes precedence, then `XDG_CONFIG_HOME`, then `~/.config`.
#[cfg(not(windows))]
pub fn config_dir() -> Option<PathBuf> {
  if let Some(home) = std::env::var_os(HOME_ENV) {
    return Some(PathBuf::from(home));
  }
  let config_home = std::env::var_os("XDG_CONFIG_HOME")
    .map(PathBuf::from)
    .or_else(|| home_dir().map(|home| home.join(".config")))?;
  Some(config_home.join(APP_NAME))
}

/// Path of the lowest-priority configuration layer
pub fn global_conf_path() -> Option<PathBuf> {
  config_dir().map(|dir| dir.join(GLOBAL_CONF_FILENAME))
}
