//! Relocatable install names for shared Apple libraries.
//!
//! A dylib built with an absolute install name only loads from where it was
//! built. Rewriting the id to `@rpath/<file>` lets consumers find it through
//! their rpaths.

use std::path::{Path, PathBuf};

use tracing::{debug, info};
use walkdir::WalkDir;

use crate::options::Options;
use crate::settings::Settings;

use super::{AppleError, CommandRunner};

/// First install name in `otool -D` output.
///
/// Every header line ends with `:` (the file path, or `<path> (architecture
/// x86_64):` per slice of a universal binary).
pub fn parse_install_name(output: &str) -> Option<String> {
  output
    .lines()
    .map(str::trim)
    .find(|line| !line.is_empty() && !line.ends_with(':'))
    .map(str::to_string)
}

pub fn dylib_install_name<R: CommandRunner>(runner: &R, path: &Path) -> Result<String, AppleError> {
  let output = runner.run("otool", &["-D".to_string(), path.display().to_string()], None)?;
  parse_install_name(&output).ok_or_else(|| AppleError::NoInstallName {
    path: path.to_path_buf(),
  })
}

/// Rewrite absolute install names of a shared Apple package to `@rpath/<file>`.
///
/// Only top-level `*.dylib` files of each libdir are visited; symlinks are
/// left alone. Returns the libraries that were changed.
pub fn fix_apple_shared_install_name<R: CommandRunner>(
  runner: &R,
  settings: &Settings,
  options: &Options,
  package_folder: &Path,
  libdirs: &[String],
) -> Result<Vec<PathBuf>, AppleError> {
  if !settings.is_apple() || !options.is_shared() {
    debug!("not a shared Apple package, install names untouched");
    return Ok(Vec::new());
  }

  let mut fixed = Vec::new();
  for libdir in libdirs {
    let folder = package_folder.join(libdir);
    if !folder.is_dir() {
      return Err(AppleError::LibFolderNotFound { path: folder });
    }

    for entry in WalkDir::new(&folder).min_depth(1).max_depth(1).sort_by_file_name() {
      let entry = entry.map_err(|source| AppleError::ReadDir {
        path: folder.clone(),
        source,
      })?;
      let path = entry.path();
      if !entry.file_type().is_file() || path.extension().is_none_or(|ext| ext != "dylib") {
        continue;
      }

      let install_name = dylib_install_name(runner, path)?;
      if install_name.starts_with('@') {
        debug!(lib = %path.display(), install_name = %install_name, "install name already relocatable");
        continue;
      }

      let file_name = entry.file_name().to_string_lossy().to_string();
      let args = vec![
        "-id".to_string(),
        format!("@rpath/{}", file_name),
        file_name.clone(),
      ];
      runner.run("install_name_tool", &args, Some(&folder))?;
      info!(lib = %path.display(), old = %install_name, "set install name to @rpath/{}", file_name);
      fixed.push(path.to_path_buf());
    }
  }
  Ok(fixed)
}
