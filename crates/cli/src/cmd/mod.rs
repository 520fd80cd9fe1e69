mod info;
mod install;
mod xcrun;

pub use info::cmd_info;
pub use install::{InstallArgs, cmd_install};
pub use xcrun::cmd_xcrun;
