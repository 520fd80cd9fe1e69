//! GNU target triplets for `--host`/`--build`.

use crate::settings::{Arch, Compiler, Os, Settings};

pub const CONF_HOST_TRIPLET: &str = "tools.gnu:host_triplet";

/// `<machine>-<vendor/os>` for a settings scope, e.g. `aarch64-linux-gnu`.
///
/// `None` when os or arch is missing or has no GNU spelling.
pub fn gnu_triplet(settings: &Settings) -> Option<String> {
  let os = settings.os.as_ref()?;
  let arch = settings.arch.as_ref()?;

  let machine = match arch {
    Arch::X86 => "i686",
    Arch::X86_64 => "x86_64",
    Arch::Armv7 | Arch::Armv7hf | Arch::Armv7s | Arch::Armv7k => "arm",
    Arch::Armv8 | Arch::Armv8_32 | Arch::Armv8_3 => "aarch64",
    Arch::Ppc32 => "powerpc",
    Arch::Ppc64 => "powerpc64",
    Arch::Ppc64le => "powerpc64le",
    Arch::S390x => "s390x",
    Arch::Sparc => "sparc",
    Arch::Sparcv9 => "sparc64",
    Arch::Wasm => "wasm32",
    Arch::Other(_) => return None,
  };

  let system = match os {
    Os::Linux => match arch {
      Arch::Armv7hf => "linux-gnueabihf",
      Arch::Armv7 => "linux-gnueabi",
      _ => "linux-gnu",
    },
    Os::Android => match arch {
      Arch::Armv7 | Arch::Armv7hf => "linux-androideabi",
      _ => "linux-android",
    },
    Os::Macos | Os::IOs | Os::WatchOs | Os::TvOs => "apple-darwin",
    Os::Windows => match settings.compiler.as_ref() {
      Some(Compiler::Msvc) => "pc-windows-msvc",
      _ => "w64-mingw32",
    },
    Os::FreeBsd => "unknown-freebsd",
    Os::Other(_) if *arch == Arch::Wasm => "local-emscripten",
    Os::Other(_) => return None,
  };

  Some(format!("{}-{}", machine, system))
}

#[cfg(test)]
mod tests {
  use super::*;

  fn triplet(pairs: &[&str]) -> Option<String> {
    gnu_triplet(&Settings::from_assignments(pairs).unwrap())
  }

  #[test]
  fn common_triplets() {
    assert_eq!(triplet(&["os=Linux", "arch=x86_64"]).as_deref(), Some("x86_64-linux-gnu"));
    assert_eq!(triplet(&["os=Linux", "arch=armv7hf"]).as_deref(), Some("arm-linux-gnueabihf"));
    assert_eq!(triplet(&["os=Macos", "arch=armv8"]).as_deref(), Some("aarch64-apple-darwin"));
    assert_eq!(triplet(&["os=iOS", "arch=armv8"]).as_deref(), Some("aarch64-apple-darwin"));
    assert_eq!(
      triplet(&["os=Windows", "arch=x86_64", "compiler=gcc"]).as_deref(),
      Some("x86_64-w64-mingw32")
    );
    assert_eq!(triplet(&["os=Android", "arch=armv7"]).as_deref(), Some("arm-linux-androideabi"));
  }

  #[test]
  fn incomplete_settings_have_no_triplet() {
    assert_eq!(triplet(&["os=Linux"]), None);
    assert_eq!(triplet(&["os=Haiku", "arch=x86_64"]), None);
  }
}
