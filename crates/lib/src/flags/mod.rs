//! Flag composition.
//!
//! A [`FlagSet`] holds one ordered list per flag category. [`FlagMerger`]
//! builds it from four sources, in this order:
//!
//! 1. toolchain defaults derived from settings (e.g. `-O3`, `NDEBUG`)
//! 2. the `tools.build:<category>` conf entries
//! 3. each dependency's `cpp_info`, in declaration order
//! 4. extras added programmatically by the generator's user
//!
//! Nothing is sorted or deduplicated; a flag given twice is emitted twice.

pub mod compiler;

use serde::Serialize;
use tracing::debug;

use crate::conf::Conf;
use crate::deps::{CppInfo, DependencyInfo};

pub use compiler::CompilerFlags;

/// A flag category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlagCategory {
  CxxFlags,
  CFlags,
  Defines,
  /// Generic link flags; only toolchain defaults and extras land here.
  LdFlags,
  SharedLinkFlags,
  ExeLinkFlags,
  LinkerScripts,
}

impl FlagCategory {
  pub const ALL: [FlagCategory; 7] = [
    FlagCategory::CxxFlags,
    FlagCategory::CFlags,
    FlagCategory::Defines,
    FlagCategory::LdFlags,
    FlagCategory::SharedLinkFlags,
    FlagCategory::ExeLinkFlags,
    FlagCategory::LinkerScripts,
  ];

  /// The conf key feeding this category, if it is configurable.
  pub fn conf_key(&self) -> Option<&'static str> {
    match self {
      FlagCategory::CxxFlags => Some("tools.build:cxxflags"),
      FlagCategory::CFlags => Some("tools.build:cflags"),
      FlagCategory::Defines => Some("tools.build:defines"),
      FlagCategory::LdFlags => None,
      FlagCategory::SharedLinkFlags => Some("tools.build:sharedlinkflags"),
      FlagCategory::ExeLinkFlags => Some("tools.build:exelinkflags"),
      FlagCategory::LinkerScripts => Some("tools.build:linker_scripts"),
    }
  }
}

/// Ordered flags per category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FlagSet {
  pub cxxflags: Vec<String>,
  pub cflags: Vec<String>,
  pub defines: Vec<String>,
  pub ldflags: Vec<String>,
  pub sharedlinkflags: Vec<String>,
  pub exelinkflags: Vec<String>,
  pub linker_scripts: Vec<String>,
}

impl FlagSet {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn get(&self, category: FlagCategory) -> &[String] {
    match category {
      FlagCategory::CxxFlags => &self.cxxflags,
      FlagCategory::CFlags => &self.cflags,
      FlagCategory::Defines => &self.defines,
      FlagCategory::LdFlags => &self.ldflags,
      FlagCategory::SharedLinkFlags => &self.sharedlinkflags,
      FlagCategory::ExeLinkFlags => &self.exelinkflags,
      FlagCategory::LinkerScripts => &self.linker_scripts,
    }
  }

  fn get_mut(&mut self, category: FlagCategory) -> &mut Vec<String> {
    match category {
      FlagCategory::CxxFlags => &mut self.cxxflags,
      FlagCategory::CFlags => &mut self.cflags,
      FlagCategory::Defines => &mut self.defines,
      FlagCategory::LdFlags => &mut self.ldflags,
      FlagCategory::SharedLinkFlags => &mut self.sharedlinkflags,
      FlagCategory::ExeLinkFlags => &mut self.exelinkflags,
      FlagCategory::LinkerScripts => &mut self.linker_scripts,
    }
  }

  /// Append flags to a category. Empty strings are dropped.
  pub fn extend<I, S>(&mut self, category: FlagCategory, flags: I)
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self
      .get_mut(category)
      .extend(flags.into_iter().map(Into::into).filter(|flag: &String| !flag.is_empty()));
  }

  pub fn push(&mut self, category: FlagCategory, flag: impl Into<String>) {
    let flag: String = flag.into();
    self.extend(category, [flag]);
  }

  /// Append every category of `other` after this set's flags.
  pub fn append(&mut self, other: &FlagSet) {
    for category in FlagCategory::ALL {
      self.extend(category, other.get(category).iter().cloned());
    }
  }

  /// The configurable categories read from `tools.build:*`.
  pub fn from_conf(conf: &Conf) -> Self {
    let mut set = Self::new();
    for category in FlagCategory::ALL {
      if let Some(key) = category.conf_key() {
        set.extend(category, conf.get_list(key));
      }
    }
    set
  }

  /// Flags a dependency exports to its consumers.
  pub fn from_cpp_info(cpp_info: &CppInfo) -> Self {
    let mut set = Self::new();
    set.extend(FlagCategory::CxxFlags, cpp_info.cxxflags.iter().cloned());
    set.extend(FlagCategory::CFlags, cpp_info.cflags.iter().cloned());
    set.extend(FlagCategory::Defines, cpp_info.defines.iter().cloned());
    set.extend(FlagCategory::SharedLinkFlags, cpp_info.sharedlinkflags.iter().cloned());
    set.extend(FlagCategory::ExeLinkFlags, cpp_info.exelinkflags.iter().cloned());
    set
  }

  /// Defines rendered as `-D<define>`.
  pub fn define_flags(&self) -> Vec<String> {
    self.defines.iter().map(|define| format!("-D{}", define)).collect()
  }

  /// Everything passed to the linker: generic, shared and exe link flags,
  /// then one `-T'<path>'` per linker script.
  pub fn link_flags(&self) -> Vec<String> {
    self
      .ldflags
      .iter()
      .chain(&self.sharedlinkflags)
      .chain(&self.exelinkflags)
      .cloned()
      .chain(self.linker_scripts.iter().map(|script| linker_script_flag(script)))
      .collect()
  }
}

pub fn linker_script_flag(path: &str) -> String {
  format!("-T'{}'", path)
}

/// Join flags with single spaces.
pub fn render(flags: &[String]) -> String {
  flags.join(" ")
}

/// Builder combining flag sources in their fixed precedence order.
#[derive(Debug, Default)]
pub struct FlagMerger<'a> {
  defaults: FlagSet,
  conf: Option<&'a Conf>,
  dependencies: &'a [DependencyInfo],
  extra: FlagSet,
}

impl<'a> FlagMerger<'a> {
  pub fn new(defaults: FlagSet) -> Self {
    Self {
      defaults,
      ..Default::default()
    }
  }

  pub fn with_conf(mut self, conf: &'a Conf) -> Self {
    self.conf = Some(conf);
    self
  }

  pub fn with_dependencies(mut self, dependencies: &'a [DependencyInfo]) -> Self {
    self.dependencies = dependencies;
    self
  }

  pub fn with_extra(mut self, extra: FlagSet) -> Self {
    self.extra = extra;
    self
  }

  pub fn merge(self) -> FlagSet {
    let mut merged = self.defaults;
    if let Some(conf) = self.conf {
      merged.append(&FlagSet::from_conf(conf));
    }
    for dependency in self.dependencies {
      debug!(dependency = %dependency.reference(), "merging dependency flags");
      merged.append(&FlagSet::from_cpp_info(&dependency.cpp_info));
    }
    merged.append(&self.extra);
    merged
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
  }

  #[test]
  fn defaults_then_conf_then_dependencies_then_extra() {
    let mut defaults = FlagSet::new();
    defaults.push(FlagCategory::CxxFlags, "-O3");
    defaults.push(FlagCategory::Defines, "NDEBUG");

    let conf = Conf::from_lines(
      r#"
      tools.build:cxxflags=["--flag1", "--flag2"]
      tools.build:defines+=["DEF1", "DEF2"]
      "#,
    );
    let deps = vec![
      DependencyInfo::new(
        "hello",
        CppInfo {
          cxxflags: strings(&["-Wpedantic"]),
          defines: strings(&["DEF1=one_string"]),
          ..Default::default()
        },
      ),
      DependencyInfo::new(
        "other",
        CppInfo {
          defines: strings(&["DEF3=simple_string"]),
          ..Default::default()
        },
      ),
    ];
    let mut extra = FlagSet::new();
    extra.push(FlagCategory::CxxFlags, "-fextra");

    let merged = FlagMerger::new(defaults)
      .with_conf(&conf)
      .with_dependencies(&deps)
      .with_extra(extra)
      .merge();

    assert_eq!(merged.cxxflags, strings(&["-O3", "--flag1", "--flag2", "-Wpedantic", "-fextra"]));
    assert_eq!(
      merged.defines,
      strings(&["NDEBUG", "DEF1", "DEF2", "DEF1=one_string", "DEF3=simple_string"])
    );
  }

  #[test]
  fn repeated_flags_are_kept() {
    let conf = Conf::from_lines(r#"tools.build:cflags=["-Wall", "-Wall"]"#);
    let mut defaults = FlagSet::new();
    defaults.push(FlagCategory::CFlags, "-Wall");
    let merged = FlagMerger::new(defaults).with_conf(&conf).merge();
    assert_eq!(merged.cflags, strings(&["-Wall", "-Wall", "-Wall"]));
  }

  #[test]
  fn linker_scripts_follow_link_flags() {
    let conf = Conf::from_lines(
      r#"
      tools.build:sharedlinkflags+=["--flag5"]
      tools.build:exelinkflags+=["--flag6"]
      tools.build:linker_scripts+=["/linker/scripts/flash.ld", "/linker/scripts/extra_data.ld"]
      "#,
    );
    let set = FlagSet::from_conf(&conf);
    assert_eq!(
      render(&set.link_flags()),
      "--flag5 --flag6 -T'/linker/scripts/flash.ld' -T'/linker/scripts/extra_data.ld'"
    );
  }

  #[test]
  fn empty_strings_never_enter_a_set() {
    let mut set = FlagSet::new();
    set.extend(FlagCategory::CxxFlags, ["", "-g", ""]);
    set.push(FlagCategory::Defines, "");
    assert_eq!(set.cxxflags, strings(&["-g"]));
    assert!(set.defines.is_empty());
  }

  #[test]
  fn define_flags_prefix_each_define() {
    let mut set = FlagSet::new();
    set.extend(FlagCategory::Defines, ["NDEBUG", "DEF1"]);
    assert_eq!(render(&set.define_flags()), "-DNDEBUG -DDEF1");
  }

  #[test]
  fn ldflags_is_not_configurable() {
    assert_eq!(FlagCategory::LdFlags.conf_key(), None);
    assert_eq!(FlagCategory::LinkerScripts.conf_key(), Some("tools.build:linker_scripts"));
  }
}
