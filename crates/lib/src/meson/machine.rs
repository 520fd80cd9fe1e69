//! Meson machine file model and rendering.
//!
//! Machine files are INI-like; values are Meson literals. Strings use single
//! quotes, lists use `[...]`, and a value can be an expression over
//! `[constants]` (e.g. `['-O2'] + preprocessor_definitions`).

use crate::settings::{Arch, Os, Settings};

/// A Meson string literal.
pub fn to_meson_value(value: &str) -> String {
  format!("'{}'", value.replace('\\', "\\\\").replace('\'', "\\'"))
}

pub fn to_meson_list(values: &[String]) -> String {
  let items: Vec<String> = values.iter().map(|value| to_meson_value(value)).collect();
  format!("[{}]", items.join(", "))
}

pub fn to_meson_bool(value: bool) -> &'static str {
  if value { "true" } else { "false" }
}

/// Ordered sections of `key = <meson expression>` entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MachineFile {
  sections: Vec<(String, Vec<(String, String)>)>,
}

impl MachineFile {
  pub fn new() -> Self {
    Self::default()
  }

  /// Set `key` in `section`, keeping the position of an existing key.
  pub fn set(&mut self, section: &str, key: &str, expression: impl Into<String>) -> &mut Self {
    let expression = expression.into();
    let entries = match self.sections.iter_mut().position(|(name, _)| name == section) {
      Some(index) => &mut self.sections[index].1,
      None => {
        self.sections.push((section.to_string(), Vec::new()));
        let last = self.sections.len() - 1;
        &mut self.sections[last].1
      }
    };
    match entries.iter_mut().find(|(existing, _)| existing == key) {
      Some(entry) => entry.1 = expression,
      None => entries.push((key.to_string(), expression)),
    }
    self
  }

  pub fn get(&self, section: &str, key: &str) -> Option<&str> {
    self
      .sections
      .iter()
      .find(|(name, _)| name == section)
      .and_then(|(_, entries)| entries.iter().find(|(existing, _)| existing == key))
      .map(|(_, expression)| expression.as_str())
  }

  pub fn render(&self) -> String {
    let mut out = String::new();
    for (name, entries) in &self.sections {
      out.push_str(&format!("[{}]\n", name));
      for (key, expression) in entries {
        out.push_str(&format!("{} = {}\n", key, expression));
      }
      out.push('\n');
    }
    out
  }
}

/// `system`, `cpu_family`, `cpu` and `endian` of a `[host_machine]` /
/// `[build_machine]` section.
pub fn machine_entries(settings: &Settings) -> Vec<(&'static str, String)> {
  let mut entries = Vec::new();
  if let Some(os) = &settings.os {
    let system = match os {
      Os::Macos | Os::IOs | Os::WatchOs | Os::TvOs => "darwin".to_string(),
      other => other.as_str().to_lowercase(),
    };
    entries.push(("system", to_meson_value(&system)));
  }
  if let Some(arch) = &settings.arch {
    let (family, endian) = cpu_family(arch);
    entries.push(("cpu_family", to_meson_value(&family)));
    entries.push(("cpu", to_meson_value(arch.as_str())));
    entries.push(("endian", to_meson_value(endian)));
  }
  entries
}

fn cpu_family(arch: &Arch) -> (String, &'static str) {
  let (family, endian) = match arch {
    Arch::X86 => ("x86", "little"),
    Arch::X86_64 => ("x86_64", "little"),
    Arch::Armv7 | Arch::Armv7hf | Arch::Armv7s | Arch::Armv7k => ("arm", "little"),
    Arch::Armv8 | Arch::Armv8_32 | Arch::Armv8_3 => ("aarch64", "little"),
    Arch::Ppc32 => ("ppc", "big"),
    Arch::Ppc64 => ("ppc64", "big"),
    Arch::Ppc64le => ("ppc64", "little"),
    Arch::S390x => ("s390x", "big"),
    Arch::Sparc => ("sparc", "big"),
    Arch::Sparcv9 => ("sparc64", "big"),
    Arch::Wasm => ("wasm32", "little"),
    Arch::Other(name) => return (name.clone(), "little"),
  };
  (family.to_string(), endian)
}
