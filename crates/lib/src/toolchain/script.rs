//! Environment script generation.
//!
//! An [`EnvScript`] is an ordered list of variables whose values are appended
//! to whatever the variable already holds when the script is sourced:
//!
//! ```text
//! export CXXFLAGS="$CXXFLAGS -O3 --flag1"      # POSIX (.sh)
//! set "CXXFLAGS=%CXXFLAGS% -O3 --flag1"        # Windows (.bat)
//! ```
//!
//! Values are emitted literally; quoting inside flags is the caller's business.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use crate::flags::render;
use crate::settings::{Os, Settings};
use crate::util::write_atomic;

#[derive(Debug, Error)]
pub enum ScriptError {
  #[error("failed to create directory {}: {source}", path.display())]
  CreateDir { path: PathBuf, source: std::io::Error },

  #[error("failed to write {}: {source}", path.display())]
  Write { path: PathBuf, source: std::io::Error },
}

/// Script flavor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptKind {
  /// POSIX shell, sourced with `.`
  Sh,
  /// Windows batch, run with `call`
  Bat,
}

impl ScriptKind {
  /// Flavor for scripts that run on the build machine.
  ///
  /// The build settings decide when they name an OS; otherwise the OS this
  /// process runs on does.
  pub fn for_build(build: &Settings) -> Self {
    match &build.os {
      Some(os) => Self::for_os(os),
      None => Self::detect(),
    }
  }

  pub fn for_os(os: &Os) -> Self {
    if os.is_windows() { Self::Bat } else { Self::Sh }
  }

  pub fn detect() -> Self {
    match Os::current() {
      Some(os) => Self::for_os(&os),
      None => Self::Sh,
    }
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Sh => "sh",
      Self::Bat => "bat",
    }
  }

  /// File extension, which happens to match the flavor name
  pub fn extension(&self) -> &'static str {
    self.as_str()
  }

  pub fn header(&self) -> &'static str {
    match self {
      Self::Sh => "#!/bin/sh",
      Self::Bat => "@echo off",
    }
  }

  pub fn line_ending(&self) -> &'static str {
    match self {
      Self::Sh => "\n",
      Self::Bat => "\r\n",
    }
  }

  /// Statement appending `value` to variable `name`.
  ///
  /// An empty value keeps the variable unchanged but still emits the line.
  pub fn append_var(&self, name: &str, value: &str) -> String {
    let separator = if value.is_empty() { "" } else { " " };
    match self {
      Self::Sh => format!("export {name}=\"${name}{separator}{value}\""),
      Self::Bat => format!("set \"{name}=%{name}%{separator}{value}\""),
    }
  }

  /// Statement running another script of the same flavor in the current shell.
  pub fn source_line(&self, path: &Path) -> String {
    let path = path.display().to_string();
    match self {
      Self::Sh => format!(". '{}'", path.replace('\'', r"'\''")),
      Self::Bat => format!("call \"{}\"", path),
    }
  }

  /// Join lines (header first) with this flavor's line ending.
  pub fn assemble<I, S>(&self, lines: I) -> String
  where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
  {
    let eol = self.line_ending();
    let mut content = String::from(self.header());
    content.push_str(eol);
    for line in lines {
      content.push_str(line.as_ref());
      content.push_str(eol);
    }
    content
  }
}

impl std::fmt::Display for ScriptKind {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

/// A named script exporting flag variables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvScript {
  name: String,
  vars: Vec<(String, String)>,
}

impl EnvScript {
  pub fn new(name: &str) -> Self {
    Self {
      name: name.to_string(),
      vars: Vec::new(),
    }
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  /// Append flags to `var`, in call order.
  pub fn append_var(&mut self, var: &str, flags: &[String]) -> &mut Self {
    self.vars.push((var.to_string(), render(flags)));
    self
  }

  pub fn vars(&self) -> &[(String, String)] {
    &self.vars
  }

  pub fn file_name(&self, kind: ScriptKind) -> String {
    format!("{}.{}", self.name, kind.extension())
  }

  pub fn render(&self, kind: ScriptKind) -> String {
    kind.assemble(self.vars.iter().map(|(name, value)| kind.append_var(name, value)))
  }

  /// Write the script into `folder`, creating it if needed.
  pub fn write(&self, folder: &Path, kind: ScriptKind) -> Result<PathBuf, ScriptError> {
    write_generated(folder, &self.file_name(kind), &self.render(kind))
  }
}

pub(crate) fn write_generated(folder: &Path, file_name: &str, content: &str) -> Result<PathBuf, ScriptError> {
  fs::create_dir_all(folder).map_err(|source| ScriptError::CreateDir {
    path: folder.to_path_buf(),
    source,
  })?;
  let path = folder.join(file_name);
  write_atomic(&path, content).map_err(|source| ScriptError::Write {
    path: path.clone(),
    source,
  })?;
  info!(path = %path.display(), "wrote generated file");
  Ok(path)
}
