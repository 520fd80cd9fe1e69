//! The `conanbuild` launcher: one script that activates every environment
//! script produced in an invocation.
//!
//! Paths are quoted so that non-ASCII characters and `$` survive: POSIX uses
//! single quotes, batch switches the console to UTF-8 for the duration of the
//! calls and restores the previous code page afterwards.

use std::path::{Path, PathBuf};

use crate::consts::LAUNCHER_NAME;

use super::script::{ScriptError, ScriptKind, write_generated};

const BAT_SAVE_CODEPAGE: &str = r#"for /f "tokens=2 delims=:" %%a in ('chcp') do set "_tcgen_old_cp=%%a""#;
const BAT_UTF8_CODEPAGE: &str = "chcp 65001 > nul";
const BAT_RESTORE_CODEPAGE: &str = "chcp %_tcgen_old_cp% > nul";

pub fn launcher_file_name(kind: ScriptKind) -> String {
  format!("{}.{}", LAUNCHER_NAME, kind.extension())
}

pub fn render_launcher(kind: ScriptKind, scripts: &[PathBuf]) -> String {
  let calls = scripts.iter().map(|script| kind.source_line(script));
  match kind {
    ScriptKind::Sh => kind.assemble(calls),
    ScriptKind::Bat => {
      let mut lines = vec![BAT_SAVE_CODEPAGE.to_string(), BAT_UTF8_CODEPAGE.to_string()];
      lines.extend(calls);
      lines.push(BAT_RESTORE_CODEPAGE.to_string());
      kind.assemble(lines)
    }
  }
}

/// Write the launcher into `folder`. `scripts` should be absolute paths.
pub fn write_launcher(folder: &Path, kind: ScriptKind, scripts: &[PathBuf]) -> Result<PathBuf, ScriptError> {
  write_generated(folder, &launcher_file_name(kind), &render_launcher(kind, scripts))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn posix_launcher_sources_each_script() {
    let scripts = vec![PathBuf::from("/gen/a.sh"), PathBuf::from("/gen/b.sh")];
    assert_eq!(
      render_launcher(ScriptKind::Sh, &scripts),
      "#!/bin/sh\n. '/gen/a.sh'\n. '/gen/b.sh'\n"
    );
  }

  #[test]
  fn batch_launcher_switches_codepage() {
    let scripts = vec![PathBuf::from(r"C:\gen\a.bat")];
    let content = render_launcher(ScriptKind::Bat, &scripts);
    let lines: Vec<&str> = content.split("\r\n").collect();
    assert_eq!(lines[0], "@echo off");
    assert_eq!(lines[2], "chcp 65001 > nul");
    assert_eq!(lines[3], r#"call "C:\gen\a.bat""#);
    assert_eq!(lines[4], "chcp %_tcgen_old_cp% > nul");
  }
}
