//! Output formatting for the installer CLI.
//!
//! User-facing progress and summaries go to stderr; this module holds the
//! formatting helpers plus the dry-run report.

use crate::artifact::ArtefactOrigin;
use crate::profile::ShellFlavor;
use camino::Utf8Path;
use std::io::Write;

/// Write one line to the given stderr sink, ignoring write failures.
pub fn write_stderr_line(stderr: &mut dyn Write, message: impl std::fmt::Display) {
    if writeln!(stderr, "{message}").is_err() {
        // Best-effort output; nothing sensible to do on failure.
    }
}

/// Format the success message after installation.
#[must_use]
pub fn success_message(artifact_path: &Utf8Path, origin: &ArtefactOrigin) -> String {
    format!("Installed {artifact_path} (from {origin})")
}

/// The command a user runs to pick up the new PATH entry immediately.
#[must_use]
pub fn reload_hint(shell: ShellFlavor, rc_path: &Utf8Path) -> String {
    match shell {
        ShellFlavor::Bash | ShellFlavor::Zsh | ShellFlavor::Fish => {
            format!("Restart your shell or run: source {rc_path}")
        }
    }
}

/// Configuration information for dry-run output.
#[derive(Debug)]
pub struct DryRunInfo<'a> {
    /// Whether this is a privileged (global) install.
    pub global: bool,
    /// Root of the per-user tree.
    pub user_root: &'a Utf8Path,
    /// System prefix, for global installs.
    pub prefix: Option<&'a Utf8Path>,
    /// Remote registry URL.
    pub registry: &'a str,
    /// Local mesh registry URL, when configured.
    pub local_registry: Option<&'a str>,
    /// Destination of the artifact.
    pub artifact_path: &'a Utf8Path,
    /// Shell resource file that would be edited, when applicable.
    pub rc_path: Option<&'a Utf8Path>,
    /// Requested diagnostic verbosity level.
    pub verbosity: u8,
}

impl DryRunInfo<'_> {
    /// Format the dry-run information for display.
    #[must_use]
    pub fn display_text(&self) -> String {
        let mut lines = vec![
            "Dry run - no files will be modified".to_owned(),
            String::new(),
            format!("Variant: {}", if self.global { "global" } else { "user" }),
            format!("User tree: {}", self.user_root),
        ];

        if let Some(prefix) = self.prefix {
            lines.push(format!("Prefix: {prefix}"));
        }

        lines.push(format!("Registry: {}", self.registry));
        if let Some(local) = self.local_registry {
            lines.push(format!("Local registry: {local}"));
        }

        lines.push(format!("Artifact destination: {}", self.artifact_path));
        match self.rc_path {
            Some(rc) => lines.push(format!("Shell resource file: {rc}")),
            None => lines.push("Shell resource file: (not edited)".to_owned()),
        }
        lines.push(format!("Verbosity level: {}", self.verbosity));

        lines.join("\n")
    }
}
