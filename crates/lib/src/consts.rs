//! Shared constants: application name and generated file names.

pub const APP_NAME: &str = "tcgen";

/// Environment variable overriding the configuration directory.
pub const HOME_ENV: &str = "TCGEN_HOME";

/// Name of the lowest-priority configuration layer inside the config dir.
pub const GLOBAL_CONF_FILENAME: &str = "global.conf";

pub const AUTOTOOLS_TOOLCHAIN_NAME: &str = "conanautotoolstoolchain";
pub const AUTOTOOLS_DEPS_NAME: &str = "conanautotoolsdeps";
pub const LAUNCHER_NAME: &str = "conanbuild";

pub const TOOLCHAIN_ARGS_FILENAME: &str = "conanbuild.conf";
pub const TOOLCHAIN_ARGS_SECTION: &str = "toolchain";

pub const MESON_NATIVE_FILENAME: &str = "conan_meson_native.ini";
pub const MESON_CROSS_FILENAME: &str = "conan_meson_cross.ini";
pub const MESON_DEPS_FILENAME: &str = "conan_meson_deps_flags.ini";
