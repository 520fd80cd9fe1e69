//! Generator output plumbing shared by every toolchain: environment scripts,
//! the launcher that activates them and toolchain argument files.

pub mod args;
pub mod launcher;
pub mod script;

pub use args::{ToolchainArgs, ToolchainArgsError, ToolchainArgsSet, load_toolchain_args, save_toolchain_args};
pub use launcher::write_launcher;
pub use script::{EnvScript, ScriptError, ScriptKind};
