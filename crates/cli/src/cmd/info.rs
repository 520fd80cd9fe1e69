use anyhow::Result;

use tcgen_lib::platform::paths::global_conf_path;
use tcgen_lib::platform::platform_triple;
use tcgen_lib::toolchain::ScriptKind;

use crate::output::{OutputFormat, print_info, print_json, print_stat};

pub fn cmd_info(format: OutputFormat) -> Result<()> {
  let triple = platform_triple();
  let scripts = ScriptKind::detect();
  let global = global_conf_path();

  if format.is_json() {
    print_json(&serde_json::json!({
      "platform": triple,
      "scripts": scripts.as_str(),
      "global_conf": global,
    }))?;
    return Ok(());
  }

  print_info("System");
  match triple {
    Some(triple) => print_stat("Platform", &triple),
    None => print_stat("Platform", "could not detect platform"),
  }
  print_stat("Scripts", scripts.as_str());
  if let Some(global) = global {
    let state = if global.exists() { "" } else { " (missing)" };
    print_stat("Global conf", &format!("{}{}", global.display(), state));
  }
  Ok(())
}
