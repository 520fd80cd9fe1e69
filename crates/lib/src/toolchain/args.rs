//! Toolchain argument files (`conanbuild.conf`).
//!
//! Build helpers read their command-line arguments (configure args, bazel
//! configs, ...) from an INI file with a single `[toolchain]` section:
//!
//! ```text
//! [toolchain]
//! autoreconf_args = --force --install
//! configure_args = --prefix=/ --bindir=${prefix}/bin ...
//! ```
//!
//! Several generators share one file. Their args are gathered in a
//! [`ToolchainArgsSet`] over a run and each file is written once, replacing
//! whatever an earlier run left. Keys are written sorted.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{info, warn};

use crate::consts::{TOOLCHAIN_ARGS_FILENAME, TOOLCHAIN_ARGS_SECTION};
use crate::util::write_atomic;

#[derive(Debug, Error)]
pub enum ToolchainArgsError {
  #[error("failed to read toolchain args {}: {source}", path.display())]
  Read { path: PathBuf, source: io::Error },

  #[error("failed to create directory {}: {source}", path.display())]
  CreateDir { path: PathBuf, source: io::Error },

  #[error("failed to write toolchain args {}: {source}", path.display())]
  Write { path: PathBuf, source: io::Error },
}

pub type ToolchainArgs = BTreeMap<String, String>;

/// `conanbuild.conf`, or `<namespace>_conanbuild.conf` when namespaced.
pub fn args_file_path(folder: &Path, namespace: Option<&str>) -> PathBuf {
  match namespace {
    Some(namespace) => folder.join(format!("{}_{}", namespace, TOOLCHAIN_ARGS_FILENAME)),
    None => folder.join(TOOLCHAIN_ARGS_FILENAME),
  }
}

/// Load the `[toolchain]` section. A missing file is an empty section.
pub fn load_toolchain_args(folder: &Path, namespace: Option<&str>) -> Result<ToolchainArgs, ToolchainArgsError> {
  let path = args_file_path(folder, namespace);
  match fs::read_to_string(&path) {
    Ok(content) => Ok(parse(&content)),
    Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(ToolchainArgs::new()),
    Err(source) => Err(ToolchainArgsError::Read { path, source }),
  }
}

/// Write the args file from `content` alone, replacing any previous file.
pub fn save_toolchain_args(
  folder: &Path,
  namespace: Option<&str>,
  content: &ToolchainArgs,
) -> Result<PathBuf, ToolchainArgsError> {
  fs::create_dir_all(folder).map_err(|source| ToolchainArgsError::CreateDir {
    path: folder.to_path_buf(),
    source,
  })?;

  let path = args_file_path(folder, namespace);
  write_atomic(&path, &render(content)).map_err(|source| ToolchainArgsError::Write {
    path: path.clone(),
    source,
  })?;
  info!(path = %path.display(), keys = content.len(), "saved toolchain args");
  Ok(path)
}

/// Toolchain args contributed by the generators of one run, keyed by file
/// namespace. Later contributions overwrite earlier keys of the same file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolchainArgsSet {
  files: BTreeMap<Option<String>, ToolchainArgs>,
}

impl ToolchainArgsSet {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn update(&mut self, namespace: Option<&str>, args: ToolchainArgs) {
    self
      .files
      .entry(namespace.map(str::to_string))
      .or_default()
      .extend(args);
  }

  pub fn get(&self, namespace: Option<&str>) -> Option<&ToolchainArgs> {
    self.files.get(&namespace.map(str::to_string))
  }

  pub fn is_empty(&self) -> bool {
    self.files.is_empty()
  }

  /// Write every file, un-namespaced first, then namespaces in sorted order.
  pub fn save(&self, folder: &Path) -> Result<Vec<(Option<&str>, PathBuf)>, ToolchainArgsError> {
    self
      .files
      .iter()
      .map(|(namespace, args)| {
        let namespace = namespace.as_deref();
        save_toolchain_args(folder, namespace, args).map(|path| (namespace, path))
      })
      .collect()
  }
}

pub fn render(args: &ToolchainArgs) -> String {
  let mut out = format!("[{}]\n", TOOLCHAIN_ARGS_SECTION);
  for (key, value) in args {
    if value.is_empty() {
      out.push_str(&format!("{} =\n", key));
    } else {
      out.push_str(&format!("{} = {}\n", key, value));
    }
  }
  out.push('\n');
  out
}

fn parse(content: &str) -> ToolchainArgs {
  let mut args = ToolchainArgs::new();
  let mut in_section = false;
  for line in content.lines() {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
      continue;
    }
    if let Some(section) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
      in_section = section == TOOLCHAIN_ARGS_SECTION;
      continue;
    }
    if !in_section {
      continue;
    }
    match line.split_once('=') {
      Some((key, value)) => {
        args.insert(key.trim().to_string(), value.trim().to_string());
      }
      None => warn!(line, "skipping malformed toolchain args line"),
    }
  }
  args
}

#[cfg(test)]
mod tests {
  use super::*;

  fn args(pairs: &[(&str, &str)]) -> ToolchainArgs {
    pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
  }

  #[test]
  fn namespaced_file_name() {
    let folder = Path::new("/gen");
    assert_eq!(args_file_path(folder, None), PathBuf::from("/gen/conanbuild.conf"));
    assert_eq!(
      args_file_path(folder, Some("bazel")),
      PathBuf::from("/gen/bazel_conanbuild.conf")
    );
  }

  #[test]
  fn render_is_sorted_ini() {
    let rendered = render(&args(&[("make_args", ""), ("configure_args", "--prefix=/")]));
    assert_eq!(rendered, "[toolchain]\nconfigure_args = --prefix=/\nmake_args =\n\n");
  }

  #[test]
  fn save_replaces_previous_file() {
    let temp = tempfile::TempDir::new().unwrap();
    save_toolchain_args(temp.path(), None, &args(&[("bazel_configs", "opt")])).unwrap();
    save_toolchain_args(temp.path(), None, &args(&[("configure_args", "--prefix=/")])).unwrap();

    let loaded = load_toolchain_args(temp.path(), None).unwrap();
    assert_eq!(loaded, args(&[("configure_args", "--prefix=/")]));
  }

  #[test]
  fn set_merges_contributions_per_namespace() {
    let temp = tempfile::TempDir::new().unwrap();
    let mut set = ToolchainArgsSet::new();
    set.update(None, args(&[("configure_args", "--prefix=/somefolder")]));
    set.update(Some("bazel"), args(&[("bazel_configs", "opt")]));
    set.update(None, args(&[("bazel_configs", "opt,dbg")]));

    let written = set.save(temp.path()).unwrap();
    assert_eq!(written.len(), 2);
    assert_eq!(written[0], (None, temp.path().join("conanbuild.conf")));
    assert_eq!(written[1], (Some("bazel"), temp.path().join("bazel_conanbuild.conf")));

    assert_eq!(
      load_toolchain_args(temp.path(), None).unwrap(),
      args(&[("bazel_configs", "opt,dbg"), ("configure_args", "--prefix=/somefolder")])
    );
    assert_eq!(
      load_toolchain_args(temp.path(), Some("bazel")).unwrap(),
      args(&[("bazel_configs", "opt")])
    );
  }

  #[test]
  fn parse_ignores_other_sections() {
    let parsed = parse("[other]\na = 1\n[toolchain]\nb = 2 = 3\n");
    assert_eq!(parsed, args(&[("b", "2 = 3")]));
  }

  #[test]
  fn missing_file_is_empty() {
    let temp = tempfile::TempDir::new().unwrap();
    assert!(load_toolchain_args(temp.path(), Some("x")).unwrap().is_empty());
  }
}
