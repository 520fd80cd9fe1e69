use std::path::Path;

use tcgen_lib::deps::{CppInfo, DependencyInfo};
use tcgen_lib::generate::{FileRole, GeneratorKind};
use tcgen_lib::meson::setup_args;
use tcgen_lib::toolchain::ScriptKind;

use super::common::{context, read, run, settings};

fn hello_dependency() -> DependencyInfo {
  DependencyInfo::new(
    "hello",
    CppInfo {
      includedirs: vec!["/hello/include".to_string()],
      defines: vec!["DEF1=one_string".to_string()],
      cxxflags: vec!["-Wpedantic".to_string()],
      ..Default::default()
    },
  )
}

#[test]
fn dependency_flags_are_appended_to_toolchain_flags() {
  let temp = tempfile::TempDir::new().unwrap();
  let host = settings(&["os=Linux", "arch=x86_64", "compiler=gcc", "build_type=Release"]);
  let conf = r#"tools.build:cxxflags=["-flag0"]"#;
  let ctx = context(host, temp.path(), conf, ScriptKind::Sh).with_dependencies(vec![hello_dependency()]);

  let report = run(&ctx, &[GeneratorKind::MesonDeps, GeneratorKind::MesonToolchain]);
  assert!(report.files.iter().all(|file| file.role == FileRole::MachineFile));

  let native = read(&temp.path().join("conan_meson_native.ini"));
  assert!(native.contains("cpp_args = ['-flag0'] + preprocessor_definitions + deps_cpp_args\n"));

  let deps = read(&temp.path().join("conan_meson_deps_flags.ini"));
  assert!(deps.contains("deps_cpp_args = ['-I/hello/include', '-DDEF1=one_string', '-Wpedantic']\n"));
}

#[test]
fn toolchain_alone_does_not_reference_deps_constants() {
  let temp = tempfile::TempDir::new().unwrap();
  let host = settings(&["os=Linux", "arch=x86_64", "compiler=gcc"]);
  let ctx = context(host, temp.path(), "", ScriptKind::Sh).with_dependencies(vec![hello_dependency()]);

  run(&ctx, &[GeneratorKind::MesonToolchain]);
  let native = read(&temp.path().join("conan_meson_native.ini"));
  assert!(!native.contains("deps_"));
}

#[test]
fn cross_build_writes_cross_file_and_setup_uses_it() {
  let temp = tempfile::TempDir::new().unwrap();
  let host = settings(&["os=Linux", "arch=armv8", "compiler=gcc", "build_type=Release"]);
  let build = settings(&["os=Linux", "arch=x86_64", "compiler=gcc"]);
  let ctx = context(host, temp.path(), "", ScriptKind::Sh).with_build_settings(build);

  run(&ctx, &[GeneratorKind::MesonToolchain, GeneratorKind::MesonDeps]);

  let cross = read(&temp.path().join("conan_meson_cross.ini"));
  assert!(cross.contains("[host_machine]\nsystem = 'linux'\ncpu_family = 'aarch64'\n"));
  assert!(!temp.path().join("conan_meson_native.ini").exists());

  let args = setup_args(temp.path(), Path::new("build"), Path::new("src"), None);
  assert_eq!(args[1], "--cross-file");
  assert!(args[2].ends_with("conan_meson_deps_flags.ini"));
  assert!(args[4].ends_with("conan_meson_cross.ini"));
}
