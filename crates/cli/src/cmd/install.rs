//! Install command implementation.
//!
//! Resolves the settings scopes, conf layers and dependency list, then runs
//! the requested generators into the output folder.

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::debug;

use tcgen_lib::conf::load_layers;
use tcgen_lib::deps::load_dependencies;
use tcgen_lib::generate::{FileRole, GenerateContext, GenerateOptions, GeneratedFile, GeneratorKind, generate};
use tcgen_lib::layout::Layout;
use tcgen_lib::options::Options;
use tcgen_lib::platform::paths::global_conf_path;
use tcgen_lib::settings::Settings;

use crate::output::{OutputFormat, print_file, print_json, print_stat, print_success, print_warning};

pub struct InstallArgs {
  pub settings: Vec<String>,
  pub settings_build: Vec<String>,
  pub settings_target: Vec<String>,
  pub options: Vec<String>,
  pub conf: Vec<String>,
  pub conf_files: Vec<PathBuf>,
  pub deps: Option<PathBuf>,
  pub generators: Vec<GeneratorKind>,
  pub output_folder: PathBuf,
  pub layout: Layout,
  pub prefix: Option<String>,
  pub bazel_namespace: Option<String>,
  pub format: OutputFormat,
}

#[derive(Serialize)]
struct FileOutput<'a> {
  #[serde(flatten)]
  file: &'a GeneratedFile,
  sha256: String,
}

#[derive(Serialize)]
struct InstallOutput<'a> {
  generators_folder: &'a PathBuf,
  cross_building: bool,
  files: Vec<FileOutput<'a>>,
}

fn role_label(role: FileRole) -> &'static str {
  match role {
    FileRole::EnvScript => "env script",
    FileRole::MachineFile => "machine file",
    FileRole::ToolchainArgs => "toolchain args",
    FileRole::Launcher => "launcher",
  }
}

/// Host settings fall back to the detected machine; build settings default to
/// the host scope unless given explicitly.
fn resolve_settings(args: &InstallArgs) -> Result<(Settings, Settings, Option<Settings>)> {
  let detected = Settings::detected();
  let host = Settings::from_assignments(&args.settings)
    .context("Invalid host settings")?
    .or(&detected);
  let build = if args.settings_build.is_empty() {
    host.clone()
  } else {
    Settings::from_assignments(&args.settings_build)
      .context("Invalid build settings")?
      .or(&detected)
  };
  let target = if args.settings_target.is_empty() {
    None
  } else {
    Some(Settings::from_assignments(&args.settings_target).context("Invalid target settings")?)
  };
  Ok((host, build, target))
}

pub fn cmd_install(args: InstallArgs) -> Result<()> {
  let (host, build, target) = resolve_settings(&args)?;
  let options = Options::from_assignments(&args.options).context("Invalid options")?;

  let global = global_conf_path();
  debug!(global = ?global, files = args.conf_files.len(), lines = args.conf.len(), "loading conf layers");
  let conf = load_layers(global.as_deref(), &args.conf_files, &args.conf).context("Failed to load conf")?;

  let dependencies = match &args.deps {
    Some(path) => load_dependencies(path).context("Failed to load dependencies")?,
    None => Vec::new(),
  };

  let folder = args.layout.generators_folder(&args.output_folder, host.build_type.as_ref());
  let mut ctx = GenerateContext::new(host, folder)
    .with_build_settings(build)
    .with_options(options)
    .with_conf(conf)
    .with_dependencies(dependencies);
  if let Some(target) = target {
    ctx = ctx.with_target_settings(target);
  }

  let generate_options = GenerateOptions {
    prefix: args.prefix.clone(),
    bazel_namespace: args.bazel_namespace.clone(),
  };
  let report = generate(&ctx, &args.generators, &generate_options).context("Generation failed")?;
  let hashes = report.hashes()?;

  if args.format.is_json() {
    let output = InstallOutput {
      generators_folder: &report.generators_folder,
      cross_building: ctx.is_cross_building(),
      files: hashes
        .into_iter()
        .map(|(file, hash)| FileOutput { file, sha256: hash.0 })
        .collect(),
    };
    print_json(&output)?;
    return Ok(());
  }

  print_success(&format!(
    "Generated {} file(s) into {}",
    report.files.len(),
    report.generators_folder.display()
  ));
  if ctx.is_cross_building() {
    print_stat("Cross building", "yes");
  }
  print_stat("Scripts", ctx.script_kind.as_str());
  for (file, hash) in &hashes {
    print_file(role_label(file.role), file.path.display(), &hash.0);
  }
  if report.env_scripts().next().is_none() {
    print_warning("No environment scripts were generated, so no launcher was written");
  }

  Ok(())
}
