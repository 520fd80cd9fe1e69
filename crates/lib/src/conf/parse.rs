//! Parsing of single conf lines (`key=value`, `key+=value`, `key=+value`, `key=!`).

use serde_json::Value;

use super::{ConfError, ConfOp};

/// A parsed conf line.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfLine {
  pub key: String,
  pub op: ConfOp,
  pub value: Value,
}

/// Parse one conf definition.
///
/// The operator is taken from the first `=`: a `+` right before it appends,
/// a `+` right after it prepends and a lone `!` value unsets the key.
pub fn parse_line(line: &str) -> Result<ConfLine, ConfError> {
  let line = line.trim();
  let (raw_key, raw_value) = line
    .split_once('=')
    .ok_or_else(|| ConfError::Malformed { line: line.to_string() })?;

  let (key, op, raw_value) = if let Some(key) = raw_key.strip_suffix('+') {
    (key, ConfOp::Append, raw_value)
  } else if let Some(value) = raw_value.strip_prefix('+') {
    (raw_key, ConfOp::Prepend, value)
  } else if raw_value.trim() == "!" {
    (raw_key, ConfOp::Unset, "")
  } else {
    (raw_key, ConfOp::Set, raw_value)
  };

  let key = key.trim();
  validate_key(key)?;

  let value = match op {
    ConfOp::Unset => Value::Null,
    _ => parse_value(raw_value),
  };

  Ok(ConfLine {
    key: key.to_string(),
    op,
    value,
  })
}

/// Keys look like `tools.build:cxxflags`: a dotted namespace, a colon and a name.
pub fn validate_key(key: &str) -> Result<(), ConfError> {
  let valid = match key.split_once(':') {
    Some((namespace, name)) => {
      !namespace.is_empty()
        && !name.is_empty()
        && !key.chars().any(char::is_whitespace)
        && !name.contains(':')
    }
    None => false,
  };
  if valid {
    Ok(())
  } else {
    Err(ConfError::InvalidKey { key: key.to_string() })
  }
}

/// Interpret a conf value literal.
///
/// Accepts JSON (`["-a", "-b"]`, `{"c": "gcc"}`, `1`), Python-style booleans and
/// `None`, and single-quoted lists. Anything else is kept as a plain string.
pub fn parse_value(raw: &str) -> Value {
  let raw = raw.trim();
  match raw {
    "" => return Value::String(String::new()),
    "True" => return Value::Bool(true),
    "False" => return Value::Bool(false),
    "None" => return Value::Null,
    _ => {}
  }

  if let Ok(value) = serde_json::from_str::<Value>(raw) {
    return value;
  }

  if raw.starts_with('[') || raw.starts_with('{') {
    let requoted = raw.replace('\'', "\"");
    if let Ok(value) = serde_json::from_str::<Value>(&requoted) {
      return value;
    }
  }

  Value::String(raw.to_string())
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[test]
  fn set_line_with_json_list() {
    let line = parse_line(r#"tools.build:cxxflags=["--flag1", "--flag2"]"#).unwrap();
    assert_eq!(line.key, "tools.build:cxxflags");
    assert_eq!(line.op, ConfOp::Set);
    assert_eq!(line.value, json!(["--flag1", "--flag2"]));
  }

  #[test]
  fn append_prepend_and_unset_operators() {
    let append = parse_line(r#"tools.build:cflags+=["--flag3"]"#).unwrap();
    assert_eq!(append.key, "tools.build:cflags");
    assert_eq!(append.op, ConfOp::Append);

    let prepend = parse_line(r#"tools.build:cflags=+["--flag0"]"#).unwrap();
    assert_eq!(prepend.key, "tools.build:cflags");
    assert_eq!(prepend.op, ConfOp::Prepend);
    assert_eq!(prepend.value, json!(["--flag0"]));

    let unset = parse_line("tools.build:cflags=!").unwrap();
    assert_eq!(unset.op, ConfOp::Unset);
    assert_eq!(unset.value, Value::Null);
  }

  #[test]
  fn scalar_values() {
    assert_eq!(parse_value("True"), json!(true));
    assert_eq!(parse_value("false"), json!(false));
    assert_eq!(parse_value("42"), json!(42));
    assert_eq!(parse_value("/path/to/sysroot"), json!("/path/to/sysroot"));
    assert_eq!(parse_value("None"), Value::Null);
    assert_eq!(parse_value("['-Wall', '-Werror']"), json!(["-Wall", "-Werror"]));
  }

  #[test]
  fn rejects_bad_keys() {
    assert!(matches!(
      parse_line("cxxflags=[]"),
      Err(ConfError::InvalidKey { .. })
    ));
    assert!(matches!(parse_line("tools.build:=1"), Err(ConfError::InvalidKey { .. })));
    assert!(matches!(
      parse_line("tools.build:cxxflags"),
      Err(ConfError::Malformed { .. })
    ));
  }
}
