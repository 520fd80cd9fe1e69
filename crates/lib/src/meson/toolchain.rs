//! `MesonToolchain`: the native or cross machine file.

use std::path::Path;

use tracing::debug;

use crate::apple::apple_compile_flags;
use crate::consts::{MESON_CROSS_FILENAME, MESON_NATIVE_FILENAME};
use crate::flags::{CompilerFlags, FlagCategory, FlagMerger, FlagSet};
use crate::generate::{FileRole, GenerateContext, GenerateError, GeneratedFile, GeneratorKind};
use crate::settings::BuildType;
use crate::toolchain::script::write_generated;

use super::machine::{MachineFile, machine_entries, to_meson_bool, to_meson_list, to_meson_value};

pub const CONF_COMPILER_EXECUTABLES: &str = "tools.build:compiler_executables";

const CONSTANTS: &str = "constants";
const BINARIES: &str = "binaries";
const BUILTIN_OPTIONS: &str = "built-in options";

pub struct MesonToolchain<'a> {
  ctx: &'a GenerateContext,
  preprocessor_definitions: Vec<(String, String)>,
  with_deps_flags: bool,
  /// Flags appended after defaults and conf
  pub extra: FlagSet,
}

impl<'a> MesonToolchain<'a> {
  pub fn new(ctx: &'a GenerateContext) -> Self {
    Self {
      ctx,
      preprocessor_definitions: Vec::new(),
      with_deps_flags: false,
      extra: FlagSet::new(),
    }
  }

  /// Reference the `deps_*` constants written by `MesonDeps`.
  pub fn with_deps_flags(mut self, enabled: bool) -> Self {
    self.with_deps_flags = enabled;
    self
  }

  /// Add or replace a `-D<name>="<value>"` preprocessor definition.
  pub fn define(&mut self, name: &str, value: &str) -> &mut Self {
    match self.preprocessor_definitions.iter_mut().find(|(existing, _)| existing == name) {
      Some(entry) => entry.1 = value.to_string(),
      None => self.preprocessor_definitions.push((name.to_string(), value.to_string())),
    }
    self
  }

  pub fn file_name(&self) -> &'static str {
    if self.ctx.is_cross_building() {
      MESON_CROSS_FILENAME
    } else {
      MESON_NATIVE_FILENAME
    }
  }

  /// Settings-derived flags. Optimization and `NDEBUG` are left to Meson's
  /// own `buildtype` and `b_ndebug` options.
  pub fn default_flags(&self) -> FlagSet {
    let ctx = self.ctx;
    let compiler = CompilerFlags::for_settings(&ctx.settings, &ctx.options, &ctx.conf);
    let apple = if ctx.is_cross_building() && ctx.settings.is_apple() {
      apple_compile_flags(&ctx.settings, &ctx.conf)
    } else {
      Vec::new()
    };

    let mut set = FlagSet::new();
    set.extend(FlagCategory::CxxFlags, compiler.libcxx);
    set.extend(FlagCategory::CxxFlags, apple.iter().cloned());
    set.extend(FlagCategory::CxxFlags, compiler.sysroot.clone());
    set.extend(FlagCategory::CFlags, apple.iter().cloned());
    set.extend(FlagCategory::CFlags, compiler.sysroot.clone());
    set.extend(FlagCategory::LdFlags, apple);
    set.extend(FlagCategory::LdFlags, compiler.sysroot);
    set.extend(FlagCategory::Defines, compiler.cxx11_abi);
    set
  }

  /// Defaults, conf and extras. Dependency flags reach Meson through the
  /// `deps_*` constants instead.
  pub fn flags(&self) -> FlagSet {
    FlagMerger::new(self.default_flags())
      .with_conf(&self.ctx.conf)
      .with_extra(self.extra.clone())
      .merge()
  }

  pub fn machine_file(&self) -> MachineFile {
    let ctx = self.ctx;
    let settings = &ctx.settings;
    let mut file = MachineFile::new();

    let definitions: Vec<String> = self
      .preprocessor_definitions
      .iter()
      .map(|(name, value)| format!("-D{}=\"{}\"", name, value))
      .collect();
    file.set(CONSTANTS, "preprocessor_definitions", to_meson_list(&definitions));

    for (tool, path) in ctx.conf.get_map(CONF_COMPILER_EXECUTABLES) {
      file.set(BINARIES, &tool, to_meson_value(&path));
    }

    if let Some(build_type) = &settings.build_type {
      if let Some(meson_type) = meson_buildtype(build_type) {
        file.set(BUILTIN_OPTIONS, "buildtype", to_meson_value(meson_type));
      }
      let debug = matches!(build_type, BuildType::Debug | BuildType::RelWithDebInfo);
      file.set(BUILTIN_OPTIONS, "debug", to_meson_bool(debug));
      file.set(BUILTIN_OPTIONS, "b_ndebug", to_meson_value(to_meson_bool(build_type.is_optimized())));
    }
    if let Some(cppstd) = &settings.compiler_cppstd {
      let std = match cppstd.strip_prefix("gnu") {
        Some(version) => format!("gnu++{}", version),
        None => format!("c++{}", cppstd),
      };
      file.set(BUILTIN_OPTIONS, "cpp_std", to_meson_value(&std));
    }
    if let Some(shared) = ctx.options.shared {
      file.set(
        BUILTIN_OPTIONS,
        "default_library",
        to_meson_value(if shared { "shared" } else { "static" }),
      );
    }
    if let Some(fpic) = ctx.options.fpic {
      file.set(BUILTIN_OPTIONS, "b_staticpic", to_meson_bool(fpic));
    }

    let flags = self.flags();
    let mut c_args = flags.define_flags();
    c_args.extend(flags.cflags.iter().cloned());
    let mut cpp_args = flags.define_flags();
    cpp_args.extend(flags.cxxflags.iter().cloned());
    let link_args = flags.link_flags();

    file.set(BUILTIN_OPTIONS, "c_args", self.args_expression(&c_args, "preprocessor_definitions", "deps_c_args"));
    file.set(BUILTIN_OPTIONS, "c_link_args", self.args_expression(&link_args, "", "deps_c_link_args"));
    file.set(BUILTIN_OPTIONS, "cpp_args", self.args_expression(&cpp_args, "preprocessor_definitions", "deps_cpp_args"));
    file.set(BUILTIN_OPTIONS, "cpp_link_args", self.args_expression(&link_args, "", "deps_cpp_link_args"));

    if ctx.is_cross_building() {
      for (key, value) in machine_entries(&ctx.settings_build) {
        file.set("build_machine", key, value);
      }
      for (key, value) in machine_entries(settings) {
        file.set("host_machine", key, value);
      }
    }
    file
  }

  /// `[flags] + <constant> + <deps constant>`, skipping what does not apply.
  fn args_expression(&self, flags: &[String], constant: &str, deps_constant: &str) -> String {
    let mut expression = to_meson_list(flags);
    if !constant.is_empty() {
      expression.push_str(" + ");
      expression.push_str(constant);
    }
    if self.with_deps_flags {
      expression.push_str(" + ");
      expression.push_str(deps_constant);
    }
    expression
  }

  pub fn generate(&self, folder: &Path) -> Result<Vec<GeneratedFile>, GenerateError> {
    debug!(
      file = self.file_name(),
      with_deps_flags = self.with_deps_flags,
      "meson toolchain"
    );
    let path = write_generated(folder, self.file_name(), &self.machine_file().render())?;
    Ok(vec![GeneratedFile::new(GeneratorKind::MesonToolchain, FileRole::MachineFile, path)])
  }
}

fn meson_buildtype(build_type: &BuildType) -> Option<&'static str> {
  match build_type {
    BuildType::Debug => Some("debug"),
    BuildType::Release => Some("release"),
    BuildType::RelWithDebInfo => Some("debugoptimized"),
    BuildType::MinSizeRel => Some("minsize"),
    BuildType::Other(_) => None,
  }
}
