use anyhow::{Context, Result};

use tcgen_lib::apple::XCRun;
use tcgen_lib::settings::Settings;

use crate::output::{print_info, print_stat, print_warning};

pub fn cmd_xcrun(
  settings: &[String],
  settings_target: &[String],
  use_settings_target: bool,
  sdk_path: bool,
) -> Result<()> {
  let host = Settings::from_assignments(settings)
    .context("Invalid host settings")?
    .or(&Settings::detected());
  let target = if settings_target.is_empty() {
    None
  } else {
    Some(Settings::from_assignments(settings_target).context("Invalid target settings")?)
  };

  let xcrun = XCRun::new(&host, target.as_ref(), use_settings_target);
  if !xcrun.settings().is_apple() {
    print_warning("Selected settings do not describe an Apple OS");
  }

  print_info("Apple SDK");
  print_stat("SDK", xcrun.sdk().unwrap_or("(default)"));
  if sdk_path {
    let path = xcrun.sdk_path().context("xcrun could not resolve the SDK path")?;
    print_stat("Path", &path);
  }
  Ok(())
}
