//! `meson setup` command line for the files in a generators folder.

use std::path::{Path, PathBuf};

use crate::consts::{MESON_CROSS_FILENAME, MESON_DEPS_FILENAME, MESON_NATIVE_FILENAME};

/// Machine files found in a generators folder, in the order Meson must read
/// them: the deps constants before the toolchain file that references them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MachineFiles {
  pub cross: bool,
  pub files: Vec<PathBuf>,
}

impl MachineFiles {
  pub fn discover(generators_folder: &Path) -> Self {
    let cross_file = generators_folder.join(MESON_CROSS_FILENAME);
    let native_file = generators_folder.join(MESON_NATIVE_FILENAME);
    let deps_file = generators_folder.join(MESON_DEPS_FILENAME);

    let cross = cross_file.is_file();
    let mut files = Vec::new();
    if deps_file.is_file() {
      files.push(deps_file);
    }
    if cross {
      files.push(cross_file);
    } else if native_file.is_file() {
      files.push(native_file);
    }
    Self { cross, files }
  }

  pub fn option(&self) -> &'static str {
    if self.cross { "--cross-file" } else { "--native-file" }
  }
}

/// `setup --native-file <f>... <build> <source> [--prefix=<p>]`
pub fn setup_args(
  generators_folder: &Path,
  build_folder: &Path,
  source_folder: &Path,
  prefix: Option<&str>,
) -> Vec<String> {
  let machine_files = MachineFiles::discover(generators_folder);
  let mut args = vec!["setup".to_string()];
  for file in &machine_files.files {
    args.push(machine_files.option().to_string());
    args.push(file.display().to_string());
  }
  args.push(build_folder.display().to_string());
  args.push(source_folder.display().to_string());
  if let Some(prefix) = prefix {
    args.push(format!("--prefix={}", prefix));
  }
  args
}
