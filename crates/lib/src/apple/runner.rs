//! External command execution behind a trait, so Apple tooling can be
//! exercised without Xcode installed.

use std::path::Path;
use std::process::Command;

use tracing::debug;

use super::AppleError;

pub trait CommandRunner {
  /// Run `program` with `args` and return its trimmed stdout.
  fn run(&self, program: &str, args: &[String], cwd: Option<&Path>) -> Result<String, AppleError>;
}

/// Runs commands as child processes.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
  fn run(&self, program: &str, args: &[String], cwd: Option<&Path>) -> Result<String, AppleError> {
    let command = command_line(program, args);
    debug!(command = %command, "running");

    let mut cmd = Command::new(program);
    cmd.args(args);
    if let Some(cwd) = cwd {
      cmd.current_dir(cwd);
    }
    let output = cmd.output().map_err(|source| AppleError::Spawn {
      command: command.clone(),
      source,
    })?;

    if !output.status.success() {
      return Err(AppleError::CommandFailed {
        command,
        code: output.status.code(),
        stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
      });
    }
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
  }
}

pub(crate) fn command_line(program: &str, args: &[String]) -> String {
  std::iter::once(program)
    .chain(args.iter().map(String::as_str))
    .collect::<Vec<_>>()
    .join(" ")
}

#[cfg(test)]
pub(crate) mod mock {
  use std::cell::RefCell;
  use std::collections::HashMap;
  use std::path::{Path, PathBuf};

  use super::*;

  /// Records every call and answers from a command-line → stdout table.
  #[derive(Debug, Default)]
  pub struct MockRunner {
    pub responses: HashMap<String, String>,
    pub calls: RefCell<Vec<(String, Option<PathBuf>)>>,
  }

  impl MockRunner {
    pub fn respond(mut self, command: &str, stdout: &str) -> Self {
      self.responses.insert(command.to_string(), stdout.to_string());
      self
    }

    pub fn commands(&self) -> Vec<String> {
      self.calls.borrow().iter().map(|(cmd, _)| cmd.clone()).collect()
    }
  }

  impl CommandRunner for MockRunner {
    fn run(&self, program: &str, args: &[String], cwd: Option<&Path>) -> Result<String, AppleError> {
      let command = command_line(program, args);
      self.calls.borrow_mut().push((command.clone(), cwd.map(Path::to_path_buf)));
      Ok(self.responses.get(&command).cloned().unwrap_or_default())
    }
  }
}
