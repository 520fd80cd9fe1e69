//! `MesonDeps`: dependency compile and link flags as `[constants]` that the
//! toolchain machine file appends to its own arguments.

use std::path::Path;

use crate::consts::MESON_DEPS_FILENAME;
use crate::deps::DependencyInfo;
use crate::generate::{FileRole, GenerateContext, GenerateError, GeneratedFile, GeneratorKind};
use crate::toolchain::script::write_generated;

use super::machine::{MachineFile, to_meson_list};

pub struct MesonDeps<'a> {
  ctx: &'a GenerateContext,
}

impl<'a> MesonDeps<'a> {
  pub fn new(ctx: &'a GenerateContext) -> Self {
    Self { ctx }
  }

  fn compile_args(&self, language_flags: impl Fn(&DependencyInfo) -> &[String]) -> Vec<String> {
    let mut args = Vec::new();
    for dep in &self.ctx.dependencies {
      let info = &dep.cpp_info;
      args.extend(info.includedirs.iter().map(|dir| format!("-I{}", dir)));
      args.extend(info.defines.iter().map(|define| format!("-D{}", define)));
      args.extend(language_flags(dep).iter().cloned());
    }
    args
  }

  pub fn c_args(&self) -> Vec<String> {
    self.compile_args(|dep| dep.cpp_info.cflags.as_slice())
  }

  pub fn cpp_args(&self) -> Vec<String> {
    self.compile_args(|dep| dep.cpp_info.cxxflags.as_slice())
  }

  pub fn link_args(&self) -> Vec<String> {
    let mut args = Vec::new();
    for dep in &self.ctx.dependencies {
      let info = &dep.cpp_info;
      args.extend(info.libdirs.iter().map(|dir| format!("-L{}", dir)));
      args.extend(info.sharedlinkflags.iter().cloned());
      args.extend(info.exelinkflags.iter().cloned());
    }
    args
  }

  pub fn machine_file(&self) -> MachineFile {
    let link_args = to_meson_list(&self.link_args());
    let mut file = MachineFile::new();
    file
      .set("constants", "deps_c_args", to_meson_list(&self.c_args()))
      .set("constants", "deps_c_link_args", link_args.clone())
      .set("constants", "deps_cpp_args", to_meson_list(&self.cpp_args()))
      .set("constants", "deps_cpp_link_args", link_args);
    file
  }

  pub fn generate(&self, folder: &Path) -> Result<Vec<GeneratedFile>, GenerateError> {
    let path = write_generated(folder, MESON_DEPS_FILENAME, &self.machine_file().render())?;
    Ok(vec![GeneratedFile::new(GeneratorKind::MesonDeps, FileRole::MachineFile, path)])
  }
}
