//! CLI argument definitions for the dna installer.
//!
//! The installer deliberately has no subcommands: it is invoked once and
//! performs a fixed linear sequence of provisioning steps. Flags only
//! repoint or skip individual steps.

use crate::settings::SettingsOverrides;
use camino::Utf8PathBuf;
use clap::Parser;

/// Install the dna::}{::lang package manager CLI.
#[derive(Parser, Debug, Clone)]
#[command(name = "dna-installer")]
#[command(version, about)]
#[command(long_about = concat!(
    "Install the dna::}{::lang package manager CLI.\n\n",
    "The installer provisions the ~/.dna directory tree, fetches the dna CLI ",
    "from the mesh registry (falling back to the remote registry), installs it ",
    "as an executable, seeds ~/.dna/config.json on first run, and ensures your ",
    "interactive shell finds it on PATH.\n\n",
    "With --global (run under sudo) the CLI is installed under a system prefix ",
    "behind a thin wrapper script instead, and your ~/.dna tree is handed back ",
    "to your own user.",
))]
#[command(after_help = concat!(
    "EXAMPLES:\n",
    "  User install into ~/.dna:\n",
    "    $ dna-installer\n\n",
    "  Global install under /usr/local:\n",
    "    $ sudo dna-installer --global\n\n",
    "  Point at a different mesh registry:\n",
    "    $ dna-installer --local-registry http://10.0.0.5:8000\n\n",
    "  Preview without touching anything:\n",
    "    $ dna-installer --dry-run\n",
))]
pub struct Cli {
    /// Install system-wide under a prefix (requires elevated privileges).
    #[arg(long)]
    pub global: bool,

    /// System prefix for --global installs [default: /usr/local].
    #[arg(long, value_name = "DIR", requires = "global")]
    pub prefix: Option<Utf8PathBuf>,

    /// Remote registry URL.
    #[arg(long, value_name = "URL")]
    pub registry: Option<String>,

    /// Local mesh registry URL, tried before the remote registry.
    #[arg(long, value_name = "URL")]
    pub local_registry: Option<String>,

    /// Install root for the user tree [default: ~/.dna].
    #[arg(long, value_name = "DIR")]
    pub dna_home: Option<Utf8PathBuf>,

    /// Do not edit any shell resource file.
    #[arg(long)]
    pub skip_profile: bool,

    /// Show the resolved plan and exit without side effects.
    #[arg(long)]
    pub dry_run: bool,

    /// Increase diagnostic verbosity (repeatable).
    #[arg(
        short,
        long = "verbose",
        action = clap::ArgAction::Count,
        conflicts_with = "quiet"
    )]
    pub verbosity: u8,

    /// Suppress progress output (errors still shown).
    #[arg(short, long, conflicts_with = "verbosity")]
    pub quiet: bool,
}

impl Cli {
    /// Settings overrides carried by the command line.
    #[must_use]
    pub fn overrides(&self) -> SettingsOverrides {
        SettingsOverrides {
            registry: self.registry.clone(),
            local_registry: self.local_registry.clone(),
            dna_home: self.dna_home.clone(),
        }
    }
}

impl Default for Cli {
    /// All flags disabled; useful for tests and programmatic construction.
    fn default() -> Self {
        Self {
            global: false,
            prefix: None,
            registry: None,
            local_registry: None,
            dna_home: None,
            skip_profile: false,
            dry_run: false,
            verbosity: 0,
            quiet: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_with_no_arguments() {
        let cli = Cli::parse_from(["dna-installer"]);
        assert!(!cli.global);
        assert!(!cli.dry_run);
        assert!(cli.registry.is_none());
    }

    #[test]
    fn prefix_requires_global() {
        let result = Cli::try_parse_from(["dna-installer", "--prefix", "/opt"]);
        assert!(result.is_err());

        let cli = Cli::parse_from(["dna-installer", "--global", "--prefix", "/opt"]);
        assert_eq!(cli.prefix.as_deref().map(camino::Utf8Path::as_str), Some("/opt"));
    }

    #[test]
    fn quiet_conflicts_with_verbose() {
        let result = Cli::try_parse_from(["dna-installer", "-q", "-v"]);
        assert!(result.is_err());
    }

    #[test]
    fn overrides_carry_registry_flags() {
        let cli = Cli::parse_from([
            "dna-installer",
            "--registry",
            "https://mirror.example/dna",
            "--local-registry",
            "http://10.0.0.5:8000",
            "--dna-home",
            "/srv/dna",
        ]);
        let overrides = cli.overrides();
        assert_eq!(overrides.registry.as_deref(), Some("https://mirror.example/dna"));
        assert_eq!(overrides.local_registry.as_deref(), Some("http://10.0.0.5:8000"));
        assert_eq!(overrides.dna_home.as_deref().map(camino::Utf8Path::as_str), Some("/srv/dna"));
    }

    #[test]
    fn verbosity_is_counted() {
        let cli = Cli::parse_from(["dna-installer", "-vv"]);
        assert_eq!(cli.verbosity, 2);
    }
}
