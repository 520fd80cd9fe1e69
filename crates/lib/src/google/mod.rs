//! Bazel toolchain arguments.

use tracing::debug;

use crate::generate::GenerateContext;
use crate::toolchain::{ToolchainArgs, ToolchainArgsSet};

pub const CONF_BAZEL_CONFIGS: &str = "tools.google.bazel:configs";
pub const CONF_BAZELRC_PATH: &str = "tools.google.bazel:bazelrc_path";

/// Writes `bazel_configs` and `bazelrc_path` into the toolchain args file
/// read by the Bazel build helper.
pub struct BazelToolchain<'a> {
  ctx: &'a GenerateContext,
  namespace: Option<String>,
}

impl<'a> BazelToolchain<'a> {
  pub fn new(ctx: &'a GenerateContext) -> Self {
    Self { ctx, namespace: None }
  }

  /// Write `<namespace>_conanbuild.conf` instead of `conanbuild.conf`.
  pub fn with_namespace(mut self, namespace: &str) -> Self {
    self.namespace = Some(namespace.to_string());
    self
  }

  pub fn bazel_configs(&self) -> Option<String> {
    let configs = self.ctx.conf.get_list(CONF_BAZEL_CONFIGS);
    (!configs.is_empty()).then(|| configs.join(","))
  }

  pub fn bazelrc_path(&self) -> Option<String> {
    self.ctx.conf.get_str(CONF_BAZELRC_PATH)
  }

  pub fn toolchain_args(&self) -> ToolchainArgs {
    let mut args = ToolchainArgs::new();
    if let Some(configs) = self.bazel_configs() {
      args.insert("bazel_configs".to_string(), configs);
    }
    if let Some(bazelrc) = self.bazelrc_path() {
      args.insert("bazelrc_path".to_string(), bazelrc);
    }
    args
  }

  pub fn namespace(&self) -> Option<&str> {
    self.namespace.as_deref()
  }

  /// Queue the args for this toolchain's file. The file is written even when
  /// no key is set, so a rerun drops keys the conf no longer provides.
  pub fn generate(&self, args: &mut ToolchainArgsSet) {
    let contribution = self.toolchain_args();
    debug!(namespace = ?self.namespace, keys = contribution.len(), "bazel toolchain");
    args.update(self.namespace(), contribution);
  }
}
