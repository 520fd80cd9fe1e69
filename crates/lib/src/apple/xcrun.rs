//! `xcrun` wrapper: SDK queries and tool lookup.

use crate::settings::Settings;

use super::{AppleError, CommandRunner, SystemRunner, apple_sdk_name};

/// Queries `xcrun` for the SDK selected by a settings scope.
///
/// With `use_settings_target` and target settings present, the target scope
/// picks the SDK (e.g. a compiler package building for iOS); otherwise the
/// host scope does.
#[derive(Debug, Clone)]
pub struct XCRun<R = SystemRunner> {
  settings: Settings,
  sdk: Option<String>,
  runner: R,
}

impl XCRun<SystemRunner> {
  pub fn new(settings: &Settings, settings_target: Option<&Settings>, use_settings_target: bool) -> Self {
    Self::with_runner(settings, settings_target, use_settings_target, SystemRunner)
  }
}

impl<R: CommandRunner> XCRun<R> {
  pub fn with_runner(
    settings: &Settings,
    settings_target: Option<&Settings>,
    use_settings_target: bool,
    runner: R,
  ) -> Self {
    let settings = match settings_target {
      Some(target) if use_settings_target => target.clone(),
      _ => settings.clone(),
    };
    let sdk = if settings.is_apple() {
      apple_sdk_name(&settings).map(|sdk| match &settings.os_sdk_version {
        Some(version) => format!("{}{}", sdk, version),
        None => sdk,
      })
    } else {
      None
    };
    Self { settings, sdk, runner }
  }

  pub fn settings(&self) -> &Settings {
    &self.settings
  }

  /// SDK passed as `-sdk`, or `None` for a non-Apple scope.
  pub fn sdk(&self) -> Option<&str> {
    self.sdk.as_deref()
  }

  fn invoke(&self, args: &[&str]) -> Result<String, AppleError> {
    let mut full = Vec::with_capacity(args.len() + 2);
    if let Some(sdk) = &self.sdk {
      full.push("-sdk".to_string());
      full.push(sdk.clone());
    }
    full.extend(args.iter().map(|arg| arg.to_string()));
    self.runner.run("xcrun", &full, None)
  }

  pub fn sdk_path(&self) -> Result<String, AppleError> {
    self.invoke(&["--show-sdk-path"])
  }

  pub fn sdk_version(&self) -> Result<String, AppleError> {
    self.invoke(&["--show-sdk-version"])
  }

  pub fn sdk_platform_path(&self) -> Result<String, AppleError> {
    self.invoke(&["--show-sdk-platform-path"])
  }

  pub fn sdk_platform_version(&self) -> Result<String, AppleError> {
    self.invoke(&["--show-sdk-platform-version"])
  }

  /// Absolute path of `tool` inside the selected SDK's toolchain.
  pub fn find(&self, tool: &str) -> Result<String, AppleError> {
    self.invoke(&["--find", tool])
  }

  pub fn cc(&self) -> Result<String, AppleError> {
    self.find("clang")
  }

  pub fn cxx(&self) -> Result<String, AppleError> {
    self.find("clang++")
  }

  pub fn ar(&self) -> Result<String, AppleError> {
    self.find("ar")
  }

  pub fn ranlib(&self) -> Result<String, AppleError> {
    self.find("ranlib")
  }

  pub fn strip(&self) -> Result<String, AppleError> {
    self.find("strip")
  }

  pub fn libtool(&self) -> Result<String, AppleError> {
    self.find("libtool")
  }

  pub fn otool(&self) -> Result<String, AppleError> {
    self.find("otool")
  }

  pub fn install_name_tool(&self) -> Result<String, AppleError> {
    self.find("install_name_tool")
  }
}
