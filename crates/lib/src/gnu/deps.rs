//! `AutotoolsDeps`: search paths and libraries of the dependencies, exported
//! as `CPPFLAGS`, `LDFLAGS` and `LIBS`.

use std::path::Path;

use crate::consts::AUTOTOOLS_DEPS_NAME;
use crate::deps::DependencyInfo;
use crate::generate::{FileRole, GenerateContext, GenerateError, GeneratedFile, GeneratorKind};
use crate::toolchain::EnvScript;

pub struct AutotoolsDeps<'a> {
  ctx: &'a GenerateContext,
}

impl<'a> AutotoolsDeps<'a> {
  pub fn new(ctx: &'a GenerateContext) -> Self {
    Self { ctx }
  }

  fn collect<F>(&self, f: F) -> Vec<String>
  where
    F: Fn(&DependencyInfo) -> Vec<String>,
  {
    self.ctx.dependencies.iter().flat_map(f).collect()
  }

  /// `-I` per include dir
  pub fn cppflags(&self) -> Vec<String> {
    self.collect(|dep| dep.cpp_info.includedirs.iter().map(|dir| format!("-I{}", dir)).collect())
  }

  /// `-L` per lib dir, then `-F` per framework dir
  pub fn ldflags(&self) -> Vec<String> {
    let mut flags = self.collect(|dep| dep.cpp_info.libdirs.iter().map(|dir| format!("-L{}", dir)).collect());
    flags.extend(self.collect(|dep| {
      dep
        .cpp_info
        .frameworkdirs
        .iter()
        .map(|dir| format!("-F{}", dir))
        .collect()
    }));
    flags
  }

  /// `-l` for libs and system libs, `-framework` for frameworks
  pub fn libs(&self) -> Vec<String> {
    self.collect(|dep| {
      let info = &dep.cpp_info;
      info
        .libs
        .iter()
        .chain(&info.system_libs)
        .map(|lib| format!("-l{}", lib))
        .chain(info.frameworks.iter().map(|framework| format!("-framework {}", framework)))
        .collect()
    })
  }

  pub fn environment(&self) -> EnvScript {
    let mut script = EnvScript::new(AUTOTOOLS_DEPS_NAME);
    script
      .append_var("CPPFLAGS", &self.cppflags())
      .append_var("LDFLAGS", &self.ldflags())
      .append_var("LIBS", &self.libs());
    script
  }

  pub fn generate(&self, folder: &Path) -> Result<Vec<GeneratedFile>, GenerateError> {
    let script = self.environment().write(folder, self.ctx.script_kind)?;
    Ok(vec![GeneratedFile::new(GeneratorKind::AutotoolsDeps, FileRole::EnvScript, script)])
  }
}
