//! Idempotent PATH provisioning in shell resource files.
//!
//! The resource file receives at most one PATH-export block across any
//! number of re-runs: the append is guarded by a substring search for the
//! binary directory, so calling twice produces the same file content as
//! calling once.

use crate::error::{Result, classify_io};
use crate::outcome::StepOutcome;
use crate::profile::ShellFlavor;
use camino::Utf8Path;
use std::io::Write as _;

/// Marker comment written above the export line.
const BLOCK_MARKER: &str = "# added by dna-installer";

/// The export line for a binary directory in the given shell's syntax.
#[must_use]
pub fn export_line(shell: ShellFlavor, bin_dir: &Utf8Path) -> String {
    match shell {
        ShellFlavor::Bash | ShellFlavor::Zsh => {
            format!("export PATH=\"{bin_dir}:$PATH\"")
        }
        ShellFlavor::Fish => format!("set -gx PATH \"{bin_dir}\" $PATH"),
    }
}

/// Ensure the shell resource file puts `bin_dir` on PATH.
///
/// Creates the file (and its parent directories, for fish) when absent. When
/// the file already references `bin_dir` the call is a guarded no-op
/// reporting [`StepOutcome::AlreadyPresent`].
///
/// # Errors
///
/// Returns a `Permission` error when the file cannot be read, created, or
/// appended to.
pub fn ensure_path_entry(
    rc_path: &Utf8Path,
    shell: ShellFlavor,
    bin_dir: &Utf8Path,
) -> Result<StepOutcome> {
    let existing = if rc_path.as_std_path().exists() {
        std::fs::read_to_string(rc_path.as_std_path())
            .map_err(|e| classify_io(rc_path, e))?
    } else {
        if let Some(parent) = rc_path.parent() {
            std::fs::create_dir_all(parent.as_std_path())
                .map_err(|e| classify_io(parent, e))?;
        }
        String::new()
    };

    if existing.contains(bin_dir.as_str()) {
        log::debug!("{rc_path} already references {bin_dir}");
        return Ok(StepOutcome::AlreadyPresent);
    }

    let mut block = String::new();
    if !existing.is_empty() && !existing.ends_with('\n') {
        block.push('\n');
    }
    block.push('\n');
    block.push_str(BLOCK_MARKER);
    block.push('\n');
    block.push_str(&export_line(shell, bin_dir));
    block.push('\n');

    let mut file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(rc_path.as_std_path())
        .map_err(|e| classify_io(rc_path, e))?;
    file.write_all(block.as_bytes())
        .map_err(|e| classify_io(rc_path, e))?;

    Ok(StepOutcome::Created)
}
