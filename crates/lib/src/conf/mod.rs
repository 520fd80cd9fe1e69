//! Layered `[conf]` store.
//!
//! A `Conf` maps `namespace:name` keys to values together with the operation
//! that defined them. Layers are combined with [`Conf::compose`], where the
//! higher-priority layer either replaces a value (`=`), extends the list of
//! the layer below (`+=` appends, `=+` prepends) or removes it (`=!`).
//!
//! Readers never fail: a missing key yields the default, and a value of the
//! wrong type is reported with a warning and treated as missing.

mod parse;

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

pub use parse::{ConfLine, parse_line, parse_value, validate_key};

#[derive(Debug, Error)]
pub enum ConfError {
  #[error("malformed conf line '{line}', expected key=value")]
  Malformed { line: String },

  #[error("invalid conf key '{key}', expected namespace:name")]
  InvalidKey { key: String },

  #[error("failed to read conf file {}: {source}", path.display())]
  Read { path: PathBuf, source: std::io::Error },
}

/// How a conf entry combines with the layer below it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfOp {
  Set,
  Append,
  Prepend,
  Unset,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConfEntry {
  pub op: ConfOp,
  pub value: Value,
}

/// An immutable-once-built configuration layer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Conf {
  entries: BTreeMap<String, ConfEntry>,
}

impl Conf {
  pub fn new() -> Self {
    Self::default()
  }

  /// Build a layer from conf-file text, skipping (with a warning) every line
  /// that cannot be parsed. Blank lines and `#` comments are ignored.
  pub fn from_lines(text: &str) -> Self {
    let mut conf = Self::new();
    for line in text.lines() {
      let trimmed = line.trim();
      if trimmed.is_empty() || trimmed.starts_with('#') {
        continue;
      }
      if let Err(err) = conf.define(trimmed) {
        warn!(line = %trimmed, error = %err, "ignoring malformed conf line");
      }
    }
    conf
  }

  /// Read a conf file. Only I/O failures are errors; bad lines are skipped.
  pub fn from_file(path: &Path) -> Result<Self, ConfError> {
    let text = fs::read_to_string(path).map_err(|source| ConfError::Read {
      path: path.to_path_buf(),
      source,
    })?;
    debug!(path = %path.display(), "loaded conf file");
    Ok(Self::from_lines(&text))
  }

  /// Add one `key<op>value` definition to this layer.
  ///
  /// Within a single layer the definition composes with what the layer
  /// already holds, so `a+=[1]` followed by `a+=[2]` yields `[1, 2]`.
  pub fn define(&mut self, line: &str) -> Result<(), ConfError> {
    let ConfLine { key, op, value } = parse_line(line)?;
    self.apply(key, ConfEntry { op, value });
    Ok(())
  }

  pub fn set(&mut self, key: &str, value: impl Into<Value>) {
    self.apply(
      key.to_string(),
      ConfEntry {
        op: ConfOp::Set,
        value: value.into(),
      },
    );
  }

  pub fn append(&mut self, key: &str, value: impl Into<Value>) {
    self.apply(
      key.to_string(),
      ConfEntry {
        op: ConfOp::Append,
        value: value.into(),
      },
    );
  }

  pub fn prepend(&mut self, key: &str, value: impl Into<Value>) {
    self.apply(
      key.to_string(),
      ConfEntry {
        op: ConfOp::Prepend,
        value: value.into(),
      },
    );
  }

  pub fn unset(&mut self, key: &str) {
    self.apply(
      key.to_string(),
      ConfEntry {
        op: ConfOp::Unset,
        value: Value::Null,
      },
    );
  }

  /// Put `other` on top of this layer.
  pub fn compose(&mut self, other: &Conf) {
    for (key, entry) in &other.entries {
      self.apply(key.clone(), entry.clone());
    }
  }

  /// Consuming variant of [`Conf::compose`] for building layer stacks.
  pub fn composed(mut self, other: &Conf) -> Self {
    self.compose(other);
    self
  }

  fn apply(&mut self, key: String, incoming: ConfEntry) {
    let merged = match (self.entries.remove(&key), incoming.op) {
      (None, _) | (Some(_), ConfOp::Set) | (Some(_), ConfOp::Unset) => incoming,
      (Some(base), ConfOp::Append) => {
        let mut items = base_items(&base);
        items.extend(as_items(incoming.value));
        ConfEntry {
          op: base_op(&base),
          value: Value::Array(items),
        }
      }
      (Some(base), ConfOp::Prepend) => {
        let mut items = as_items(incoming.value);
        items.extend(base_items(&base));
        ConfEntry {
          op: base_op(&base),
          value: Value::Array(items),
        }
      }
    };
    self.entries.insert(key, merged);
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  /// Keys with a value (unset keys excluded), sorted.
  pub fn keys(&self) -> impl Iterator<Item = &str> {
    self
      .entries
      .iter()
      .filter(|(_, entry)| entry.op != ConfOp::Unset)
      .map(|(key, _)| key.as_str())
  }

  pub fn get(&self, key: &str) -> Option<&Value> {
    match self.entries.get(key) {
      Some(entry) if entry.op != ConfOp::Unset && !entry.value.is_null() => Some(&entry.value),
      _ => None,
    }
  }

  /// A list of strings, or empty when missing or not a list.
  ///
  /// Numbers and booleans inside the list are stringified.
  pub fn get_list(&self, key: &str) -> Vec<String> {
    let Some(value) = self.get(key) else {
      return Vec::new();
    };
    let Value::Array(items) = value else {
      warn!(key, value = %value, "conf value is not a list, ignoring it");
      return Vec::new();
    };
    items
      .iter()
      .filter_map(|item| match item {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        other => {
          warn!(key, item = %other, "skipping non-scalar item in conf list");
          None
        }
      })
      .collect()
  }

  /// A scalar rendered as string; lists and maps are rejected with a warning.
  pub fn get_str(&self, key: &str) -> Option<String> {
    match self.get(key)? {
      Value::String(s) if s.is_empty() => None,
      Value::String(s) => Some(s.clone()),
      Value::Number(n) => Some(n.to_string()),
      Value::Bool(b) => Some(b.to_string()),
      other => {
        warn!(key, value = %other, "conf value is not a string, ignoring it");
        None
      }
    }
  }

  pub fn get_bool(&self, key: &str) -> Option<bool> {
    match self.get(key)? {
      Value::Bool(b) => Some(*b),
      Value::String(s) => match s.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => {
          warn!(key, value = %s, "conf value is not a boolean, ignoring it");
          None
        }
      },
      Value::Number(n) => Some(n.as_i64().is_some_and(|n| n != 0)),
      other => {
        warn!(key, value = %other, "conf value is not a boolean, ignoring it");
        None
      }
    }
  }

  /// A string-to-string map (e.g. `{"c": "gcc", "cpp": "g++"}`), sorted by key.
  pub fn get_map(&self, key: &str) -> BTreeMap<String, String> {
    let Some(value) = self.get(key) else {
      return BTreeMap::new();
    };
    let Value::Object(map) = value else {
      warn!(key, value = %value, "conf value is not a map, ignoring it");
      return BTreeMap::new();
    };
    map
      .iter()
      .filter_map(|(k, v)| v.as_str().map(|v| (k.clone(), v.to_string())))
      .collect()
  }
}

/// Compose the global conf file (when it exists), then `files` in order,
/// then one layer per command-line `line`.
pub fn load_layers(global: Option<&Path>, files: &[PathBuf], lines: &[String]) -> Result<Conf, ConfError> {
  let mut conf = match global {
    Some(path) if path.is_file() => Conf::from_file(path)?,
    _ => Conf::new(),
  };
  for file in files {
    conf.compose(&Conf::from_file(file)?);
  }
  for line in lines {
    conf.compose(&Conf::from_lines(line));
  }
  debug!(keys = conf.entries.len(), "conf layers composed");
  Ok(conf)
}

fn base_op(base: &ConfEntry) -> ConfOp {
  match base.op {
    ConfOp::Unset => ConfOp::Set,
    op => op,
  }
}

fn base_items(base: &ConfEntry) -> Vec<Value> {
  match base.op {
    ConfOp::Unset => Vec::new(),
    _ => as_items(base.value.clone()),
  }
}

fn as_items(value: Value) -> Vec<Value> {
  match value {
    Value::Array(items) => items,
    Value::Null => Vec::new(),
    scalar => vec![scalar],
  }
}
