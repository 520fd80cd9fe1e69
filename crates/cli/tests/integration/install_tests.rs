//! `tcgen install` integration tests.

use predicates::prelude::*;

use super::common::TestEnv;

#[test]
fn global_conf_then_conf_file_then_cli_lines() {
  let env = TestEnv::new();
  env.write_global_conf("tools.build:cxxflags=[\"--global\"]\n");
  let conf_file = env.write_file("profile.conf", "tools.build:cxxflags+=[\"--file\"]\n");

  env
    .install_cmd()
    .args(["-g", "AutotoolsToolchain", "--conf-file"])
    .arg(&conf_file)
    .args(["-c", "tools.build:cxxflags+=[\"--cli\"]"])
    .assert()
    .success();

  let script = env.read(&env.output_path().join("conanautotoolstoolchain.sh"));
  assert!(script.contains("export CXXFLAGS=\"$CXXFLAGS -O3 --global --file --cli\""));
}

#[test]
fn cli_set_replaces_global_conf() {
  let env = TestEnv::new();
  env.write_global_conf("tools.build:cflags=[\"--global\"]\n");

  env
    .install_cmd()
    .args(["-g", "AutotoolsToolchain", "-c", "tools.build:cflags=[\"--cli\"]"])
    .assert()
    .success();

  let script = env.read(&env.output_path().join("conanautotoolstoolchain.sh"));
  assert!(script.contains("export CFLAGS=\"$CFLAGS -O3 --cli\""));
  assert!(!script.contains("--global"));
}

#[test]
fn missing_global_conf_is_not_an_error() {
  let env = TestEnv::new();
  env.install_cmd().args(["-g", "BazelToolchain"]).assert().success();
  assert!(env.output_path().join("conanbuild.conf").exists());
}

#[test]
fn basic_layout_places_files_under_build_type_folder() {
  let env = TestEnv::new();
  env
    .install_cmd()
    .args(["-g", "AutotoolsToolchain", "--layout", "basic", "--prefix", "/somefolder"])
    .assert()
    .success();

  let folder = env.output_path().join("build-release").join("conan");
  assert!(folder.join("conanautotoolstoolchain.sh").exists());
  let args = env.read(&folder.join("conanbuild.conf"));
  assert!(args.contains("--prefix=/somefolder"));
  assert!(!env.output_path().join("conanbuild.conf").exists());
}

#[test]
fn json_report_lists_files_with_digests() {
  let env = TestEnv::new();
  let output = env
    .install_cmd()
    .args(["-g", "AutotoolsToolchain", "-g", "AutotoolsDeps", "--format", "json"])
    .output()
    .unwrap();
  assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

  let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
  assert_eq!(report["cross_building"], false);
  let files = report["files"].as_array().unwrap();
  assert_eq!(files.len(), 4);
  assert_eq!(files[0]["generator"], "AutotoolsToolchain");
  assert_eq!(files[0]["role"], "env_script");
  assert_eq!(files[1]["generator"], "AutotoolsDeps");
  assert_eq!(files[2]["generator"], "AutotoolsToolchain");
  assert_eq!(files[2]["role"], "toolchain_args");

  let launcher = &files[3];
  assert_eq!(launcher["role"], "launcher");
  assert!(launcher.get("generator").is_none());
  for file in files {
    assert_eq!(file["sha256"].as_str().unwrap().len(), 64);
  }
}

#[test]
fn rerun_without_bazel_conf_clears_old_keys() {
  let env = TestEnv::new();
  env
    .install_cmd()
    .args(["-g", "BazelToolchain", "-c", "tools.google.bazel:configs=[\"opt\"]"])
    .assert()
    .success();
  let args_file = env.output_path().join("conanbuild.conf");
  assert!(env.read(&args_file).contains("bazel_configs = opt"));

  env.install_cmd().args(["-g", "BazelToolchain"]).assert().success();
  assert_eq!(env.read(&args_file), "[toolchain]\n\n");
}

#[test]
fn repeated_generator_runs_once() {
  let env = TestEnv::new();
  let output = env
    .install_cmd()
    .args(["-g", "MesonDeps", "-g", "MesonDeps", "--format", "json"])
    .output()
    .unwrap();
  assert!(output.status.success());

  let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
  assert_eq!(report["files"].as_array().unwrap().len(), 1);
}

#[test]
fn build_scope_flag_makes_meson_cross_file() {
  let env = TestEnv::new();
  env
    .install_cmd()
    .args(["-s:b", "os=Linux", "-s:b", "arch=x86_64", "-g", "MesonToolchain"])
    .assert()
    .success()
    .stdout(predicate::str::contains("Cross building"));

  let cross = env.read(&env.output_path().join("conan_meson_cross.ini"));
  assert!(cross.contains("[host_machine]"));
  assert!(cross.contains("[build_machine]"));
  assert!(!env.output_path().join("conan_meson_native.ini").exists());
}

#[test]
fn meson_deps_from_dependencies_file() {
  let env = TestEnv::new();
  let deps = env.write_file(
    "deps.json",
    r#"[
  {
    "name": "hello",
    "version": "1.0",
    "cpp_info": {
      "includedirs": ["/hello/include"],
      "defines": ["DEF1=one_string"],
      "cxxflags": ["-Wpedantic"]
    }
  }
]"#,
  );

  env
    .install_cmd()
    .args(["-g", "MesonToolchain", "-g", "MesonDeps", "--deps"])
    .arg(&deps)
    .assert()
    .success();

  let native = env.read(&env.output_path().join("conan_meson_native.ini"));
  assert!(native.contains("+ deps_cpp_args"));
  let flags = env.read(&env.output_path().join("conan_meson_deps_flags.ini"));
  assert!(flags.contains("deps_cpp_args = ['-I/hello/include', '-DDEF1=one_string', '-Wpedantic']"));
}

#[test]
fn malformed_dependencies_file_fails() {
  let env = TestEnv::new();
  let deps = env.write_file("deps.json", "{ not json");

  env
    .install_cmd()
    .args(["-g", "AutotoolsDeps", "--deps"])
    .arg(&deps)
    .assert()
    .failure()
    .stderr(predicate::str::contains("Failed to load dependencies"));
}

#[test]
fn meson_only_run_warns_about_missing_launcher() {
  let env = TestEnv::new();
  env
    .install_cmd()
    .args(["-g", "MesonDeps"])
    .assert()
    .success()
    .stderr(predicate::str::contains("no launcher was written"));
  assert!(!env.output_path().join("conanbuild.sh").exists());
}
