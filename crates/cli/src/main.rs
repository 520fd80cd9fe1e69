mod cmd;
mod output;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tcgen_lib::generate::GeneratorKind;
use tcgen_lib::layout::Layout;
use tracing_subscriber::EnvFilter;

use crate::output::{OutputFormat, print_error};

/// tcgen - toolchain files for native build systems
#[derive(Parser)]
#[command(name = "tcgen")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Enable verbose output
  #[arg(short, long, global = true)]
  verbose: bool,

  #[command(subcommand)]
  command: Commands,
}

/// Settings scopes shared by commands that read a profile.
#[derive(Args)]
struct SettingsArgs {
  /// Host setting, e.g. `-s os=Linux` (also `-s:h`)
  #[arg(short = 's', long = "settings", value_name = "KEY=VALUE")]
  settings: Vec<String>,

  /// Build machine setting (also `-s:b`); defaults to the host settings
  #[arg(long = "settings-build", value_name = "KEY=VALUE")]
  settings_build: Vec<String>,

  /// Target setting (also `-s:t`)
  #[arg(long = "settings-target", value_name = "KEY=VALUE")]
  settings_target: Vec<String>,
}

#[derive(Subcommand)]
enum Commands {
  /// Generate toolchain files into the output folder
  Install {
    #[command(flatten)]
    settings: SettingsArgs,

    /// Package option, e.g. `-o shared=True`
    #[arg(short = 'o', long = "options", value_name = "KEY=VALUE")]
    options: Vec<String>,

    /// Conf line, e.g. `-c tools.build:cxxflags+=["-g"]`
    #[arg(short = 'c', long = "conf", value_name = "LINE")]
    conf: Vec<String>,

    /// Conf file applied after the global conf and before `-c` lines
    #[arg(long = "conf-file", value_name = "FILE")]
    conf_files: Vec<PathBuf>,

    /// JSON file describing the dependencies' cpp_info
    #[arg(long, value_name = "FILE")]
    deps: Option<PathBuf>,

    /// Generator to run (repeatable)
    #[arg(short = 'g', long = "generator", value_name = "NAME", required = true)]
    generators: Vec<GeneratorKind>,

    /// Folder receiving the generated files
    #[arg(long = "output-folder", default_value = ".")]
    output_folder: PathBuf,

    /// Folder layout below the output folder (none or basic)
    #[arg(long, default_value = "none")]
    layout: Layout,

    /// Installation prefix passed to configure
    #[arg(long)]
    prefix: Option<String>,

    /// Namespace for the Bazel toolchain args file
    #[arg(long = "bazel-namespace")]
    bazel_namespace: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t)]
    format: OutputFormat,
  },

  /// Show the Apple SDK selected by a settings scope
  Xcrun {
    #[command(flatten)]
    settings: SettingsArgs,

    /// Select the SDK from the target settings when given
    #[arg(long)]
    use_settings_target: bool,

    /// Also ask xcrun for the SDK path
    #[arg(long)]
    sdk_path: bool,
  },

  /// Show the detected platform
  Info {
    /// Output format
    #[arg(long, value_enum, default_value_t)]
    format: OutputFormat,
  },
}

/// Rewrite profile-style scope flags (`-s:h`, `-s:b`, `-s:t`) into their
/// long forms so clap can parse them.
fn normalize_args<I>(args: I) -> Vec<String>
where
  I: IntoIterator<Item = String>,
{
  args
    .into_iter()
    .map(|arg| match arg.as_str() {
      "-s:h" => "--settings".to_string(),
      "-s:b" => "--settings-build".to_string(),
      "-s:t" => "--settings-target".to_string(),
      _ => arg,
    })
    .collect()
}

fn main() {
  let cli = Cli::parse_from(normalize_args(std::env::args()));

  let default_level = if cli.verbose { "debug" } else { "warn" };
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
    .with_writer(std::io::stderr)
    .without_time()
    .init();

  let result = match cli.command {
    Commands::Install {
      settings,
      options,
      conf,
      conf_files,
      deps,
      generators,
      output_folder,
      layout,
      prefix,
      bazel_namespace,
      format,
    } => cmd::cmd_install(cmd::InstallArgs {
      settings: settings.settings,
      settings_build: settings.settings_build,
      settings_target: settings.settings_target,
      options,
      conf,
      conf_files,
      deps,
      generators,
      output_folder,
      layout,
      prefix,
      bazel_namespace,
      format,
    }),
    Commands::Xcrun {
      settings,
      use_settings_target,
      sdk_path,
    } => cmd::cmd_xcrun(
      &settings.settings,
      &settings.settings_target,
      use_settings_target,
      sdk_path,
    ),
    Commands::Info { format } => cmd::cmd_info(format),
  };

  if let Err(err) = result {
    print_error(&format!("{:#}", err));
    std::process::exit(1);
  }
}
