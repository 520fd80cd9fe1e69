use tcgen_lib::generate::{GenerateContext, GenerateOptions, GeneratorKind, generate};
use tcgen_lib::layout::Layout;
use tcgen_lib::toolchain::{ScriptKind, load_toolchain_args};
use tcgen_lib::util::hash::hash_file;

use super::common::{context, gcc_armv8, read, run, settings};

const EXTRA_FLAGS_CONF: &str = r#"
tools.build:cxxflags=["--flag1", "--flag2"]
tools.build:cflags+=["--flag3", "--flag4"]
tools.build:sharedlinkflags+=["--flag5"]
tools.build:exelinkflags+=["--flag6"]
tools.build:defines+=["DEF1", "DEF2"]
"#;

#[test]
fn extra_flags_via_conf_batch() {
  let temp = tempfile::TempDir::new().unwrap();
  let ctx = context(gcc_armv8("Windows"), temp.path(), EXTRA_FLAGS_CONF, ScriptKind::Bat);
  run(&ctx, &[GeneratorKind::AutotoolsToolchain]);

  let toolchain = read(&temp.path().join("conanautotoolstoolchain.bat"));
  assert!(toolchain.contains(r#"set "CPPFLAGS=%CPPFLAGS% -DNDEBUG -DDEF1 -DDEF2""#));
  assert!(toolchain.contains(r#"set "CXXFLAGS=%CXXFLAGS% -O3 --flag1 --flag2""#));
  assert!(toolchain.contains(r#"set "CFLAGS=%CFLAGS% -O3 --flag3 --flag4""#));
  assert!(toolchain.contains(r#"set "LDFLAGS=%LDFLAGS% --flag5 --flag6""#));
  assert!(toolchain.starts_with("@echo off\r\n"));
}

#[test]
fn extra_flags_via_conf_posix() {
  let temp = tempfile::TempDir::new().unwrap();
  let ctx = context(gcc_armv8("Linux"), temp.path(), EXTRA_FLAGS_CONF, ScriptKind::Sh);
  run(&ctx, &[GeneratorKind::AutotoolsToolchain]);

  let toolchain = read(&temp.path().join("conanautotoolstoolchain.sh"));
  assert!(toolchain.contains(r#"export CPPFLAGS="$CPPFLAGS -DNDEBUG -DDEF1 -DDEF2""#));
  assert!(toolchain.contains(r#"export CXXFLAGS="$CXXFLAGS -O3 --flag1 --flag2""#));
  assert!(toolchain.contains(r#"export CFLAGS="$CFLAGS -O3 --flag3 --flag4""#));
  assert!(toolchain.contains(r#"export LDFLAGS="$LDFLAGS --flag5 --flag6""#));
}

#[test]
fn linker_scripts_via_conf() {
  let conf = r#"
tools.build:sharedlinkflags+=["--flag5"]
tools.build:exelinkflags+=["--flag6"]
tools.build:linker_scripts+=["/linker/scripts/flash.ld", "/linker/scripts/extra_data.ld"]
"#;
  let temp = tempfile::TempDir::new().unwrap();

  let ctx = context(gcc_armv8("Windows"), temp.path(), conf, ScriptKind::Bat);
  run(&ctx, &[GeneratorKind::AutotoolsToolchain]);
  let toolchain = read(&temp.path().join("conanautotoolstoolchain.bat"));
  assert!(toolchain.contains(
    r#"set "LDFLAGS=%LDFLAGS% --flag5 --flag6 -T'/linker/scripts/flash.ld' -T'/linker/scripts/extra_data.ld'""#
  ));

  let ctx = context(gcc_armv8("Linux"), temp.path(), conf, ScriptKind::Sh);
  run(&ctx, &[GeneratorKind::AutotoolsToolchain]);
  let toolchain = read(&temp.path().join("conanautotoolstoolchain.sh"));
  assert!(toolchain.contains(
    r#"export LDFLAGS="$LDFLAGS --flag5 --flag6 -T'/linker/scripts/flash.ld' -T'/linker/scripts/extra_data.ld'""#
  ));
}

#[test]
fn set_replaces_earlier_conf_definition() {
  let temp = tempfile::TempDir::new().unwrap();
  let conf = r#"
tools.build:cxxflags=["--global"]
tools.build:cxxflags=["--profile"]
tools.build:cxxflags+=["--cli"]
"#;
  let ctx = context(gcc_armv8("Linux"), temp.path(), conf, ScriptKind::Sh);
  run(&ctx, &[GeneratorKind::AutotoolsToolchain]);

  let toolchain = read(&temp.path().join("conanautotoolstoolchain.sh"));
  assert!(toolchain.contains(r#"export CXXFLAGS="$CXXFLAGS -O3 --profile --cli""#));
}

#[test]
fn unknown_compiler_still_generates() {
  let temp = tempfile::TempDir::new().unwrap();
  let host = settings(&[
    "os=Linux",
    "arch=x86_64",
    "compiler=xlc",
    "compiler.cppstd=17",
    "compiler.libcxx=libstdc++",
    "build_type=Release",
  ]);
  let ctx = context(host, temp.path(), "", ScriptKind::Sh);
  run(&ctx, &[GeneratorKind::AutotoolsToolchain]);

  let toolchain = read(&temp.path().join("conanautotoolstoolchain.sh"));
  assert!(toolchain.contains("export CXXFLAGS=\"$CXXFLAGS\"\n"));
  assert!(toolchain.contains("export CFLAGS=\"$CFLAGS\"\n"));
  assert!(toolchain.contains("export LDFLAGS=\"$LDFLAGS\"\n"));
}

#[test]
fn prefix_is_set_once_in_basic_layout() {
  let temp = tempfile::TempDir::new().unwrap();
  let host = gcc_armv8("Linux");
  let folder = Layout::Basic.generators_folder(temp.path(), host.build_type.as_ref());
  let ctx = GenerateContext::new(host, &folder);

  let options = GenerateOptions {
    prefix: Some("/somefolder".to_string()),
    ..Default::default()
  };
  generate(&ctx, &[GeneratorKind::AutotoolsToolchain], &options).unwrap();

  assert!(folder.ends_with("build-release/conan"));
  let args = load_toolchain_args(&folder, None).unwrap();
  let configure_args = &args["configure_args"];
  assert_eq!(configure_args.matches("--prefix").count(), 1);
  assert!(configure_args.starts_with("--prefix=/somefolder"));
}

#[test]
fn rerun_is_byte_identical() {
  let temp = tempfile::TempDir::new().unwrap();
  let ctx = context(gcc_armv8("Linux"), temp.path(), EXTRA_FLAGS_CONF, ScriptKind::Sh);
  let generators = [GeneratorKind::AutotoolsToolchain, GeneratorKind::AutotoolsDeps];

  let first = run(&ctx, &generators);
  let first_hashes: Vec<_> = first.files.iter().map(|f| hash_file(&f.path).unwrap()).collect();
  let second = run(&ctx, &generators);
  let second_hashes: Vec<_> = second.files.iter().map(|f| hash_file(&f.path).unwrap()).collect();

  assert_eq!(first.files, second.files);
  assert_eq!(first_hashes, second_hashes);
}

#[cfg(unix)]
#[test]
fn launcher_from_special_characters_folder() {
  use super::common::source_and_echo;

  let temp = tempfile::TempDir::new().unwrap();
  let folder = temp.path().join("päthñç$");
  let ctx = context(gcc_armv8("Linux"), &folder, EXTRA_FLAGS_CONF, ScriptKind::Sh);
  let report = run(&ctx, &[GeneratorKind::AutotoolsToolchain]);

  let launcher = &report.files.last().unwrap().path;
  let output = source_and_echo(launcher, "CXXFLAGS")
    .env("CXXFLAGS", "-pipe")
    .output()
    .unwrap();
  assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
  assert_eq!(String::from_utf8_lossy(&output.stdout), "-pipe -O3 --flag1 --flag2");
}
