//! CLI output formatting utilities.
//!
//! Colored status lines on the terminal, or pretty JSON when `--format json`
//! is requested. Status goes to stdout; warnings and errors go to stderr.

use std::fmt::Display;

use anyhow::Context;
use clap::ValueEnum;
use owo_colors::{OwoColorize, Stream};

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
  #[default]
  Text,
  Json,
}

impl OutputFormat {
  pub fn is_json(self) -> bool {
    matches!(self, OutputFormat::Json)
  }
}

pub mod symbols {
  pub const SUCCESS: &str = "✓";
  pub const ERROR: &str = "✗";
  pub const WARNING: &str = "⚠";
  pub const INFO: &str = "•";
  pub const ARROW: &str = "→";
}

/// First 12 hex digits of a digest, for compact listings.
pub fn short_digest(digest: &str) -> &str {
  &digest[..digest.len().min(12)]
}

pub fn print_success(message: impl Display) {
  let mark = symbols::SUCCESS.if_supports_color(Stream::Stdout, |s| s.green());
  println!("{} {}", mark, message);
}

pub fn print_info(message: impl Display) {
  let mark = symbols::INFO.if_supports_color(Stream::Stdout, |s| s.blue());
  println!("{} {}", mark, message);
}

pub fn print_warning(message: impl Display) {
  let message = message.to_string();
  eprintln!(
    "{} {}",
    symbols::WARNING.if_supports_color(Stream::Stderr, |s| s.yellow()),
    message.if_supports_color(Stream::Stderr, |s| s.yellow())
  );
}

pub fn print_error(message: impl Display) {
  let message = message.to_string();
  eprintln!(
    "{} {}",
    symbols::ERROR.if_supports_color(Stream::Stderr, |s| s.red()),
    message.if_supports_color(Stream::Stderr, |s| s.red())
  );
}

/// Indented `label: value` line.
pub fn print_stat(label: &str, value: impl Display) {
  println!("  {}: {}", label.if_supports_color(Stream::Stdout, |s| s.dimmed()), value);
}

/// One generated file: `  → <role> <path> (<digest>)`.
pub fn print_file(role: &str, path: impl Display, digest: &str) {
  let digest = format!("({})", short_digest(digest));
  println!(
    "  {} {:<14} {} {}",
    symbols::ARROW.if_supports_color(Stream::Stdout, |s| s.cyan()),
    role,
    path,
    digest.if_supports_color(Stream::Stdout, |s| s.dimmed())
  );
}

pub fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
  let json = serde_json::to_string_pretty(value).context("Failed to serialize to JSON")?;
  println!("{}", json);
  Ok(())
}
