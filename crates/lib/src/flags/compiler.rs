//! Per-compiler default flags derived from settings.
//!
//! Every lookup matches on the closed [`Compiler`] enum and falls through to
//! "no flags" for `Compiler::Unknown` or a missing compiler, so generators
//! never fail for compilers without a table.

use crate::conf::Conf;
use crate::options::Options;
use crate::settings::{Arch, BuildType, Compiler, Settings};

pub const CONF_SYSROOT: &str = "tools.build:sysroot";
pub const CONF_DEFINE_LIBCXX11_ABI: &str = "tools.gnu:define_libcxx11_abi";

/// Optimization/debug flags for a build type.
pub fn build_type_flags(compiler: Option<&Compiler>, build_type: Option<&BuildType>) -> Vec<String> {
  let (Some(compiler), Some(build_type)) = (compiler, build_type) else {
    return Vec::new();
  };
  let flags: &[&str] = match compiler {
    Compiler::Gcc | Compiler::Clang | Compiler::AppleClang | Compiler::IntelCc => match build_type {
      BuildType::Debug => &["-g"],
      BuildType::Release => &["-O3"],
      BuildType::RelWithDebInfo => &["-O2", "-g"],
      BuildType::MinSizeRel => &["-Os"],
      BuildType::Other(_) => &[],
    },
    Compiler::Msvc => match build_type {
      BuildType::Debug => &["-Zi", "-Ob0", "-Od"],
      BuildType::Release => &["-O2", "-Ob2"],
      BuildType::RelWithDebInfo => &["-Zi", "-O2", "-Ob1"],
      BuildType::MinSizeRel => &["-O1", "-Ob1"],
      BuildType::Other(_) => &[],
    },
    Compiler::Unknown(_) => &[],
  };
  flags.iter().map(|f| f.to_string()).collect()
}

pub fn ndebug_define(build_type: Option<&BuildType>) -> Option<String> {
  build_type.filter(|bt| bt.is_optimized()).map(|_| "NDEBUG".to_string())
}

/// `-m64`/`-m32` for GCC-like compilers. Apple targets use `-arch` instead.
pub fn architecture_flag(settings: &Settings) -> Option<String> {
  let compiler = settings.compiler.as_ref()?;
  if !compiler.is_gnu_like() || settings.is_apple() {
    return None;
  }
  let flag = match settings.arch.as_ref()? {
    Arch::X86_64 | Arch::S390x | Arch::Sparcv9 | Arch::Ppc64 | Arch::Ppc64le => "-m64",
    Arch::X86 | Arch::Sparc | Arch::Ppc32 => "-m32",
    _ => return None,
  };
  Some(flag.to_string())
}

pub fn libcxx_flag(settings: &Settings) -> Option<String> {
  let libcxx = settings.compiler_libcxx.as_deref()?;
  match settings.compiler.as_ref()? {
    Compiler::Clang | Compiler::AppleClang => match libcxx {
      "libstdc++" | "libstdc++11" => Some("-stdlib=libstdc++".to_string()),
      "libc++" => Some("-stdlib=libc++".to_string()),
      _ => None,
    },
    _ => None,
  }
}

/// `_GLIBCXX_USE_CXX11_ABI` define selecting the libstdc++ ABI.
pub fn cxx11_abi_define(settings: &Settings, conf: &Conf) -> Option<String> {
  match settings.compiler.as_ref()? {
    Compiler::Gcc => {}
    Compiler::Clang if !settings.is_apple() => {}
    _ => return None,
  }
  match settings.compiler_libcxx.as_deref()? {
    "libstdc++" => Some("_GLIBCXX_USE_CXX11_ABI=0".to_string()),
    "libstdc++11" if conf.get_bool(CONF_DEFINE_LIBCXX11_ABI).unwrap_or(false) => {
      Some("_GLIBCXX_USE_CXX11_ABI=1".to_string())
    }
    _ => None,
  }
}

pub fn cppstd_flag(settings: &Settings) -> Option<String> {
  let cppstd = settings.compiler_cppstd.as_deref()?;
  match settings.compiler.as_ref()? {
    Compiler::Gcc | Compiler::Clang | Compiler::AppleClang | Compiler::IntelCc => {
      let flag = match cppstd.strip_prefix("gnu") {
        Some(version) => format!("-std=gnu++{}", version),
        None => format!("-std=c++{}", cppstd),
      };
      Some(flag)
    }
    Compiler::Msvc => match cppstd {
      "14" | "17" | "20" => Some(format!("/std:c++{}", cppstd)),
      "23" => Some("/std:c++latest".to_string()),
      _ => None,
    },
    Compiler::Unknown(_) => None,
  }
}

pub fn fpic_flag(settings: &Settings, options: &Options) -> Option<String> {
  let wants_pic = options.fpic.unwrap_or(false) || options.is_shared();
  let compiler = settings.compiler.as_ref()?;
  if wants_pic && compiler.is_gnu_like() && !settings.is_windows() {
    Some("-fPIC".to_string())
  } else {
    None
  }
}

pub fn sysroot_flag(conf: &Conf) -> Option<String> {
  conf
    .get_str(CONF_SYSROOT)
    .map(|sysroot| format!("--sysroot {}", sysroot.replace('\\', "/")))
}

/// All settings-derived defaults for one compiler invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompilerFlags {
  pub fpic: Option<String>,
  pub arch: Option<String>,
  pub libcxx: Option<String>,
  pub cppstd: Option<String>,
  pub build_type: Vec<String>,
  pub sysroot: Option<String>,
  pub ndebug: Option<String>,
  pub cxx11_abi: Option<String>,
}

impl CompilerFlags {
  pub fn for_settings(settings: &Settings, options: &Options, conf: &Conf) -> Self {
    Self {
      fpic: fpic_flag(settings, options),
      arch: architecture_flag(settings),
      libcxx: libcxx_flag(settings),
      cppstd: cppstd_flag(settings),
      build_type: build_type_flags(settings.compiler.as_ref(), settings.build_type.as_ref()),
      sysroot: sysroot_flag(conf),
      ndebug: ndebug_define(settings.build_type.as_ref()),
      cxx11_abi: cxx11_abi_define(settings, conf),
    }
  }
}
