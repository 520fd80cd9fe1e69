//! `AutotoolsToolchain`: compiler flags for `./configure` and the arguments
//! build helpers pass to `configure`, `make` and `autoreconf`.

use std::path::Path;

use tracing::{debug, warn};

use crate::apple::apple_compile_flags;
use crate::consts::AUTOTOOLS_TOOLCHAIN_NAME;
use crate::flags::{CompilerFlags, FlagCategory, FlagMerger, FlagSet, render};
use crate::generate::{FileRole, GenerateContext, GenerateError, GeneratedFile, GeneratorKind};
use crate::toolchain::{EnvScript, ToolchainArgs, ToolchainArgsSet};

use super::triplet::{CONF_HOST_TRIPLET, gnu_triplet};

const DEFAULT_PREFIX: &str = "/";

pub struct AutotoolsToolchain<'a> {
  ctx: &'a GenerateContext,
  prefix: String,
  /// Flags appended after defaults, conf and dependencies
  pub extra: FlagSet,
  pub make_args: Vec<String>,
  pub autoreconf_args: Vec<String>,
}

impl<'a> AutotoolsToolchain<'a> {
  pub fn new(ctx: &'a GenerateContext) -> Self {
    Self {
      ctx,
      prefix: DEFAULT_PREFIX.to_string(),
      extra: FlagSet::new(),
      make_args: Vec::new(),
      autoreconf_args: vec!["--force".to_string(), "--install".to_string()],
    }
  }

  pub fn with_prefix(mut self, prefix: &str) -> Self {
    self.prefix = prefix.to_string();
    self
  }

  /// Settings-derived flags, before conf, dependencies and extras.
  pub fn default_flags(&self) -> FlagSet {
    let ctx = self.ctx;
    let compiler = CompilerFlags::for_settings(&ctx.settings, &ctx.options, &ctx.conf);
    let apple = if ctx.is_cross_building() && ctx.settings.is_apple() {
      apple_compile_flags(&ctx.settings, &ctx.conf)
    } else {
      Vec::new()
    };

    let mut set = FlagSet::new();
    set.extend(
      FlagCategory::CxxFlags,
      [compiler.fpic.clone(), compiler.arch.clone(), compiler.libcxx, compiler.cppstd]
        .into_iter()
        .flatten(),
    );
    set.extend(FlagCategory::CxxFlags, compiler.build_type.iter().cloned());
    set.extend(FlagCategory::CxxFlags, apple.iter().cloned());
    set.extend(FlagCategory::CxxFlags, compiler.sysroot.clone());

    set.extend(FlagCategory::CFlags, [compiler.fpic, compiler.arch.clone()].into_iter().flatten());
    set.extend(FlagCategory::CFlags, compiler.build_type);
    set.extend(FlagCategory::CFlags, apple.iter().cloned());
    set.extend(FlagCategory::CFlags, compiler.sysroot.clone());

    set.extend(FlagCategory::LdFlags, compiler.arch);
    set.extend(FlagCategory::LdFlags, apple);
    set.extend(FlagCategory::LdFlags, compiler.sysroot);

    set.extend(FlagCategory::Defines, [compiler.ndebug, compiler.cxx11_abi].into_iter().flatten());
    set
  }

  /// Defaults, then conf, then dependencies, then [`Self::extra`].
  pub fn flags(&self) -> FlagSet {
    FlagMerger::new(self.default_flags())
      .with_conf(&self.ctx.conf)
      .with_dependencies(&self.ctx.dependencies)
      .with_extra(self.extra.clone())
      .merge()
  }

  pub fn environment(&self) -> EnvScript {
    let flags = self.flags();
    let mut script = EnvScript::new(AUTOTOOLS_TOOLCHAIN_NAME);
    script
      .append_var("CPPFLAGS", &flags.define_flags())
      .append_var("CXXFLAGS", &flags.cxxflags)
      .append_var("CFLAGS", &flags.cflags)
      .append_var("LDFLAGS", &flags.link_flags());
    script
  }

  pub fn configure_args(&self) -> Vec<String> {
    let mut args = vec![format!("--prefix={}", self.prefix)];
    args.extend(
      [
        "--bindir=${prefix}/bin",
        "--sbindir=${prefix}/bin",
        "--libdir=${prefix}/lib",
        "--includedir=${prefix}/include",
        "--oldincludedir=${prefix}/include",
        "--datarootdir=${prefix}/res",
      ]
      .map(String::from),
    );

    match self.ctx.options.shared {
      Some(true) => args.extend(["--enable-shared".to_string(), "--disable-static".to_string()]),
      Some(false) => args.extend(["--disable-shared".to_string(), "--enable-static".to_string()]),
      None => {}
    }

    if self.ctx.is_cross_building() {
      let host = self
        .ctx
        .conf
        .get_str(CONF_HOST_TRIPLET)
        .or_else(|| gnu_triplet(&self.ctx.settings));
      let build = gnu_triplet(&self.ctx.settings_build);
      match (host, build) {
        (Some(host), Some(build)) => {
          args.push(format!("--host={}", host));
          args.push(format!("--build={}", build));
        }
        _ => warn!("cross building without a known GNU triplet, omitting --host/--build"),
      }
    }
    args
  }

  pub fn toolchain_args(&self) -> ToolchainArgs {
    let mut args = ToolchainArgs::new();
    args.insert("configure_args".to_string(), render(&self.configure_args()));
    args.insert("make_args".to_string(), render(&self.make_args));
    args.insert("autoreconf_args".to_string(), render(&self.autoreconf_args));
    args
  }

  /// Write the env script and queue `configure_args`, `make_args` and
  /// `autoreconf_args` for the un-namespaced args file.
  pub fn generate(&self, folder: &Path, args: &mut ToolchainArgsSet) -> Result<Vec<GeneratedFile>, GenerateError> {
    debug!(prefix = %self.prefix, cross = self.ctx.is_cross_building(), "autotools toolchain");
    let script = self.environment().write(folder, self.ctx.script_kind)?;
    args.update(None, self.toolchain_args());
    Ok(vec![GeneratedFile::new(
      GeneratorKind::AutotoolsToolchain,
      FileRole::EnvScript,
      script,
    )])
  }
}
