//! Running generators over one build configuration.
//!
//! [`GenerateContext`] carries everything a generator reads. [`generate`] runs
//! the requested generators in order, writes the toolchain args files they
//! contributed to, then writes the `conanbuild` launcher over every
//! environment script they produced.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::conf::Conf;
use crate::deps::DependencyInfo;
use crate::gnu::{AutotoolsDeps, AutotoolsToolchain};
use crate::google::BazelToolchain;
use crate::meson::{MesonDeps, MesonToolchain};
use crate::options::Options;
use crate::settings::{Settings, is_cross_building};
use crate::toolchain::{ScriptError, ScriptKind, ToolchainArgsError, ToolchainArgsSet, write_launcher};
use crate::util::hash::{ContentHash, hash_file};

#[derive(Debug, Error)]
pub enum GenerateError {
  #[error("failed to create generators folder {}: {source}", path.display())]
  CreateFolder { path: PathBuf, source: std::io::Error },

  #[error("failed to hash generated file {}: {source}", path.display())]
  Hash { path: PathBuf, source: std::io::Error },

  #[error(transparent)]
  Script(#[from] ScriptError),

  #[error(transparent)]
  ToolchainArgs(#[from] ToolchainArgsError),
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown generator '{0}'")]
pub struct UnknownGenerator(pub String);

/// The generators this crate knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum GeneratorKind {
  AutotoolsToolchain,
  AutotoolsDeps,
  MesonToolchain,
  MesonDeps,
  BazelToolchain,
}

impl GeneratorKind {
  pub const ALL: [GeneratorKind; 5] = [
    GeneratorKind::AutotoolsToolchain,
    GeneratorKind::AutotoolsDeps,
    GeneratorKind::MesonToolchain,
    GeneratorKind::MesonDeps,
    GeneratorKind::BazelToolchain,
  ];

  pub fn as_str(&self) -> &'static str {
    match self {
      Self::AutotoolsToolchain => "AutotoolsToolchain",
      Self::AutotoolsDeps => "AutotoolsDeps",
      Self::MesonToolchain => "MesonToolchain",
      Self::MesonDeps => "MesonDeps",
      Self::BazelToolchain => "BazelToolchain",
    }
  }
}

impl fmt::Display for GeneratorKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

impl FromStr for GeneratorKind {
  type Err = UnknownGenerator;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Self::ALL
      .into_iter()
      .find(|kind| kind.as_str() == s)
      .ok_or_else(|| UnknownGenerator(s.to_string()))
  }
}

/// What a generated file is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FileRole {
  EnvScript,
  MachineFile,
  ToolchainArgs,
  Launcher,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedFile {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub generator: Option<GeneratorKind>,
  pub role: FileRole,
  pub path: PathBuf,
}

impl GeneratedFile {
  pub fn new(generator: GeneratorKind, role: FileRole, path: PathBuf) -> Self {
    Self {
      generator: Some(generator),
      role,
      path,
    }
  }
}

/// Everything generators read. Build settings default to the host settings.
#[derive(Debug, Clone)]
pub struct GenerateContext {
  pub settings: Settings,
  pub settings_build: Settings,
  pub settings_target: Option<Settings>,
  pub options: Options,
  pub conf: Conf,
  pub dependencies: Vec<DependencyInfo>,
  pub generators_folder: PathBuf,
  pub script_kind: ScriptKind,
}

impl GenerateContext {
  pub fn new(settings: Settings, generators_folder: impl Into<PathBuf>) -> Self {
    let script_kind = ScriptKind::for_build(&settings);
    Self {
      settings_build: settings.clone(),
      settings,
      settings_target: None,
      options: Options::default(),
      conf: Conf::new(),
      dependencies: Vec::new(),
      generators_folder: generators_folder.into(),
      script_kind,
    }
  }

  /// Use distinct build-machine settings; the script flavor follows them.
  pub fn with_build_settings(mut self, settings_build: Settings) -> Self {
    self.script_kind = ScriptKind::for_build(&settings_build);
    self.settings_build = settings_build;
    self
  }

  pub fn with_target_settings(mut self, settings_target: Settings) -> Self {
    self.settings_target = Some(settings_target);
    self
  }

  pub fn with_options(mut self, options: Options) -> Self {
    self.options = options;
    self
  }

  pub fn with_conf(mut self, conf: Conf) -> Self {
    self.conf = conf;
    self
  }

  pub fn with_dependencies(mut self, dependencies: Vec<DependencyInfo>) -> Self {
    self.dependencies = dependencies;
    self
  }

  pub fn with_script_kind(mut self, script_kind: ScriptKind) -> Self {
    self.script_kind = script_kind;
    self
  }

  pub fn is_cross_building(&self) -> bool {
    is_cross_building(&self.settings, &self.settings_build)
  }
}

/// Options for a [`generate`] run that belong to no single generator.
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
  /// Autotools `--prefix`; `/` when unset
  pub prefix: Option<String>,
  /// Prefix for the Bazel toolchain args file
  pub bazel_namespace: Option<String>,
}

/// Files written by one [`generate`] run, in write order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GenerateReport {
  pub generators_folder: PathBuf,
  pub files: Vec<GeneratedFile>,
}

impl GenerateReport {
  pub fn env_scripts(&self) -> impl Iterator<Item = &Path> {
    self
      .files
      .iter()
      .filter(|file| file.role == FileRole::EnvScript)
      .map(|file| file.path.as_path())
  }

  /// Content digest of each file, for reporting.
  pub fn hashes(&self) -> Result<Vec<(&GeneratedFile, ContentHash)>, GenerateError> {
    self
      .files
      .iter()
      .map(|file| {
        hash_file(&file.path)
          .map(|hash| (file, hash))
          .map_err(|source| GenerateError::Hash {
            path: file.path.clone(),
            source,
          })
      })
      .collect()
  }
}

/// Run `generators` over `ctx`, each kind at most once, in the given order.
pub fn generate(
  ctx: &GenerateContext,
  generators: &[GeneratorKind],
  options: &GenerateOptions,
) -> Result<GenerateReport, GenerateError> {
  fs::create_dir_all(&ctx.generators_folder).map_err(|source| GenerateError::CreateFolder {
    path: ctx.generators_folder.clone(),
    source,
  })?;
  // Launcher lines need absolute paths
  let folder = dunce::canonicalize(&ctx.generators_folder).map_err(|source| GenerateError::CreateFolder {
    path: ctx.generators_folder.clone(),
    source,
  })?;

  let mut report = GenerateReport {
    generators_folder: folder.clone(),
    files: Vec::new(),
  };
  let mut seen = Vec::new();
  let mut args = ToolchainArgsSet::new();
  // First generator to contribute to each args file
  let mut args_owners: Vec<(Option<String>, GeneratorKind)> = Vec::new();
  let with_meson_deps = generators.contains(&GeneratorKind::MesonDeps);

  for &kind in generators {
    if seen.contains(&kind) {
      debug!(generator = %kind, "generator requested twice, skipping");
      continue;
    }
    seen.push(kind);
    info!(generator = %kind, folder = %folder.display(), "generating");

    let files = match kind {
      GeneratorKind::AutotoolsToolchain => {
        let mut toolchain = AutotoolsToolchain::new(ctx);
        if let Some(prefix) = &options.prefix {
          toolchain = toolchain.with_prefix(prefix);
        }
        let files = toolchain.generate(&folder, &mut args)?;
        claim_args_file(&mut args_owners, None, kind);
        files
      }
      GeneratorKind::AutotoolsDeps => AutotoolsDeps::new(ctx).generate(&folder)?,
      GeneratorKind::MesonToolchain => MesonToolchain::new(ctx)
        .with_deps_flags(with_meson_deps)
        .generate(&folder)?,
      GeneratorKind::MesonDeps => MesonDeps::new(ctx).generate(&folder)?,
      GeneratorKind::BazelToolchain => {
        let mut toolchain = BazelToolchain::new(ctx);
        if let Some(namespace) = &options.bazel_namespace {
          toolchain = toolchain.with_namespace(namespace);
        }
        toolchain.generate(&mut args);
        claim_args_file(&mut args_owners, toolchain.namespace(), kind);
        Vec::new()
      }
    };
    report.files.extend(files);
  }

  for (namespace, path) in args.save(&folder)? {
    let owner = args_owners
      .iter()
      .find(|(owned, _)| owned.as_deref() == namespace)
      .map(|(_, kind)| *kind);
    report.files.push(GeneratedFile {
      generator: owner,
      role: FileRole::ToolchainArgs,
      path,
    });
  }

  let scripts: Vec<PathBuf> = report.env_scripts().map(Path::to_path_buf).collect();
  if !scripts.is_empty() {
    let path = write_launcher(&folder, ctx.script_kind, &scripts)?;
    report.files.push(GeneratedFile {
      generator: None,
      role: FileRole::Launcher,
      path,
    });
  }

  info!(files = report.files.len(), "generation finished");
  Ok(report)
}

fn claim_args_file(
  owners: &mut Vec<(Option<String>, GeneratorKind)>,
  namespace: Option<&str>,
  kind: GeneratorKind,
) {
  if !owners.iter().any(|(owned, _)| owned.as_deref() == namespace) {
    owners.push((namespace.map(str::to_string), kind));
  }
}
