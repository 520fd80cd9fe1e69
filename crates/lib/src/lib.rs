//! tcgen-lib: toolchain generators for native build systems
//!
//! This crate turns a resolved build configuration into the files a native
//! build tool consumes:
//! - `Conf`: layered `namespace:key` configuration with set/append semantics
//! - `FlagSet`: ordered compiler/linker flags merged from defaults, conf and dependencies
//! - `EnvScript`: POSIX shell / Windows batch environment scripts
//! - generators for Autotools, Meson and Bazel, plus Apple/Xcode helpers

pub mod apple;
pub mod conf;
pub mod consts;
pub mod deps;
pub mod flags;
pub mod generate;
pub mod gnu;
pub mod google;
pub mod layout;
pub mod meson;
pub mod options;
pub mod platform;
pub mod settings;
pub mod toolchain;
pub mod util;
