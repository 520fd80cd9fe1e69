//! Shared helpers for library integration tests.

use std::fs;
use std::path::Path;

use tcgen_lib::conf::Conf;
use tcgen_lib::generate::{GenerateContext, GenerateOptions, GenerateReport, GeneratorKind, generate};
use tcgen_lib::settings::Settings;
use tcgen_lib::toolchain::ScriptKind;

/// Profile-style settings, panicking on bad input.
pub fn settings(pairs: &[&str]) -> Settings {
  Settings::from_assignments(pairs).expect("valid settings")
}

pub fn gcc_armv8(os: &str) -> Settings {
  let os = format!("os={}", os);
  settings(&[
    os.as_str(),
    "compiler=gcc",
    "compiler.version=6",
    "compiler.libcxx=libstdc++11",
    "arch=armv8",
    "build_type=Release",
  ])
}

pub fn context(settings: Settings, folder: &Path, conf: &str, kind: ScriptKind) -> GenerateContext {
  GenerateContext::new(settings, folder)
    .with_conf(Conf::from_lines(conf))
    .with_script_kind(kind)
}

pub fn run(ctx: &GenerateContext, generators: &[GeneratorKind]) -> GenerateReport {
  generate(ctx, generators, &GenerateOptions::default()).expect("generation succeeds")
}

pub fn read(path: &Path) -> String {
  fs::read_to_string(path).unwrap_or_else(|e| panic!("failed to read {}: {}", path.display(), e))
}

/// Source `script` in `/bin/sh` and print `var`.
#[cfg(unix)]
pub fn source_and_echo(script: &Path, var: &str) -> std::process::Command {
  let mut cmd = std::process::Command::new("/bin/sh");
  cmd
    .arg("-c")
    .arg(format!(". \"$TCGEN_SCRIPT\"; printf '%s' \"${}\"", var))
    .env("TCGEN_SCRIPT", script);
  cmd
}
