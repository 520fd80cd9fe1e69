//! Package options. Toolchains react to `shared` and `fPIC`; any other
//! option is kept as its raw value.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::util::split_assignment;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum OptionsError {
  #[error("malformed option '{0}', expected key=value")]
  Malformed(String),

  #[error("option '{key}' expects True or False, got '{value}'")]
  NotBoolean { key: String, value: String },
}

/// `None` means the package does not declare the option.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Options {
  pub shared: Option<bool>,
  pub fpic: Option<bool>,
  /// Every other option, e.g. `with_ssl=True`
  pub extra: BTreeMap<String, String>,
}

impl Options {
  pub fn from_assignments<I, S>(assignments: I) -> Result<Self, OptionsError>
  where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
  {
    let mut options = Self::default();
    for assignment in assignments {
      let assignment = assignment.as_ref();
      let (key, value) = split_assignment(assignment).ok_or_else(|| OptionsError::Malformed(assignment.to_string()))?;
      match key {
        "shared" => options.shared = Some(bool_option(key, value)?),
        "fPIC" => options.fpic = Some(bool_option(key, value)?),
        other => {
          options.extra.insert(other.to_string(), value.to_string());
        }
      }
    }
    Ok(options)
  }

  pub fn is_shared(&self) -> bool {
    self.shared.unwrap_or(false)
  }
}

fn bool_option(key: &str, value: &str) -> Result<bool, OptionsError> {
  match value.to_ascii_lowercase().as_str() {
    "true" => Ok(true),
    "false" => Ok(false),
    _ => Err(OptionsError::NotBoolean {
      key: key.to_string(),
      value: value.to_string(),
    }),
  }
}
