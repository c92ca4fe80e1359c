//! Wrapper script generation for privileged installs.
//!
//! A global install keeps the artifact under `<prefix>/lib/dna` and exposes
//! it as `<prefix>/bin/dna` through a thin shell script that invokes the
//! python3 runtime. User installs do not need a wrapper; the artifact itself
//! carries a shebang and is installed directly onto PATH.

use crate::error::{InstallerError, Result};
use camino::{Utf8Path, Utf8PathBuf};

/// Result of wrapper script generation.
#[derive(Debug)]
pub struct WrapperResult {
    /// Path of the generated script.
    pub script_path: Utf8PathBuf,
    /// Whether the script's directory is already on PATH.
    pub in_path: bool,
}

/// Generate the `dna` wrapper script invoking `artifact_path`.
///
/// # Errors
///
/// Returns [`InstallerError::WrapperGeneration`] when the script cannot be
/// written or made executable, or on platforms without shell scripts.
pub fn generate_wrapper(bin_dir: &Utf8Path, artifact_path: &Utf8Path) -> Result<WrapperResult> {
    let script_path = write_wrapper_script(bin_dir, artifact_path)?;
    let in_path = is_directory_in_path(bin_dir);
    Ok(WrapperResult {
        script_path,
        in_path,
    })
}

#[cfg(unix)]
fn write_wrapper_script(bin_dir: &Utf8Path, artifact_path: &Utf8Path) -> Result<Utf8PathBuf> {
    use std::os::unix::fs::PermissionsExt;

    let script_path = bin_dir.join(crate::layout::USER_BINARY_NAME);
    let content = format!(
        r#"#!/bin/sh
exec python3 "{artifact_path}" "$@"
"#
    );

    std::fs::write(script_path.as_std_path(), content).map_err(|e| {
        InstallerError::WrapperGeneration(format!("failed to write script: {e}"))
    })?;

    let mut perms = std::fs::metadata(script_path.as_std_path())
        .map_err(|e| InstallerError::WrapperGeneration(format!("failed to read permissions: {e}")))?
        .permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(script_path.as_std_path(), perms).map_err(|e| {
        InstallerError::WrapperGeneration(format!("failed to set permissions: {e}"))
    })?;

    Ok(script_path)
}

#[cfg(not(unix))]
fn write_wrapper_script(_bin_dir: &Utf8Path, _artifact_path: &Utf8Path) -> Result<Utf8PathBuf> {
    Err(InstallerError::WrapperGeneration(
        "wrapper scripts are only supported on unix platforms".to_owned(),
    ))
}

/// Checks if a directory is in the PATH environment variable.
#[must_use]
pub fn is_directory_in_path(dir: &Utf8Path) -> bool {
    std::env::var_os("PATH")
        .map(|path| std::env::split_paths(&path).any(|p| p == dir.as_std_path()))
        .unwrap_or(false)
}

/// Returns instructions for adding a directory to PATH.
#[must_use]
pub fn path_instructions(bin_dir: &Utf8Path) -> String {
    format!(
        concat!(
            "Add the following to your shell profile (~/.bashrc or ~/.zshrc):\n",
            "  export PATH=\"{}:$PATH\""
        ),
        bin_dir
    )
}
