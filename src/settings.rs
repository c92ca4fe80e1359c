//! Install settings resolution.
//!
//! Settings are assembled once at startup from built-in defaults, the
//! `DNA_*` environment variables, and CLI flags (flags win over the
//! environment). The resulting [`InstallSettings`] is immutable for the
//! rest of the run.

use camino::Utf8PathBuf;

/// Installer version string, recorded in the persisted mesh config.
pub const VERSION: &str = "1.0.0";

/// Omega release tag of the DNALang suite this installer provisions.
pub const OMEGA_VERSION: &str = "omega51.843";

/// Universal memory constant, carried verbatim into the mesh config.
pub const LAMBDA_PHI: f64 = 2.176_435e-8;

/// Default remote registry serving the artifact.
pub const DEFAULT_REGISTRY: &str =
    "https://raw.githubusercontent.com/ENKI-420/dna-lang-pkg-mgr/main";

/// Default local mesh registry, tried before the remote one.
pub const DEFAULT_LOCAL_REGISTRY: &str = "http://192.168.1.103:8000";

/// Filename of the artifact on every registry.
pub const ARTEFACT_FILE: &str = "dna_cli.py";

/// Environment variable overriding the remote registry URL.
pub const ENV_REGISTRY: &str = "DNA_REGISTRY";
/// Environment variable overriding the local mesh registry URL.
pub const ENV_LOCAL_REGISTRY: &str = "DNA_LOCAL_REGISTRY";
/// Environment variable overriding the install root (instead of `~/.dna`).
pub const ENV_DNA_HOME: &str = "DNA_HOME";

/// Snapshot of the `DNA_*` environment variables.
///
/// Captured once so the rest of the resolution logic is a pure function of
/// its inputs and tests never need to mutate the process environment.
#[derive(Debug, Default, Clone)]
pub struct EnvSnapshot {
    /// Value of [`ENV_REGISTRY`], when set.
    pub registry: Option<String>,
    /// Value of [`ENV_LOCAL_REGISTRY`], when set.
    pub local_registry: Option<String>,
    /// Value of [`ENV_DNA_HOME`], when set.
    pub dna_home: Option<String>,
}

impl EnvSnapshot {
    /// Capture the relevant environment variables from the process.
    #[must_use]
    pub fn capture() -> Self {
        Self {
            registry: std::env::var(ENV_REGISTRY).ok(),
            local_registry: std::env::var(ENV_LOCAL_REGISTRY).ok(),
            dna_home: std::env::var(ENV_DNA_HOME).ok(),
        }
    }
}

/// Overrides supplied on the command line.
#[derive(Debug, Default, Clone)]
pub struct SettingsOverrides {
    /// Remote registry URL.
    pub registry: Option<String>,
    /// Local mesh registry URL.
    pub local_registry: Option<String>,
    /// Install root directory.
    pub dna_home: Option<Utf8PathBuf>,
}

/// Resolved installer settings. Immutable after construction.
#[derive(Debug, Clone)]
pub struct InstallSettings {
    registry: String,
    local_registry: Option<String>,
    dna_home: Option<Utf8PathBuf>,
}

impl InstallSettings {
    /// Resolve settings from CLI overrides and an environment snapshot.
    ///
    /// Precedence: CLI flag, then environment variable, then built-in
    /// default. The local registry is always present by default; there is no
    /// way to disable it, only to repoint it (a dead local registry merely
    /// costs one failed connection attempt before the remote fallback).
    #[must_use]
    pub fn resolve(overrides: &SettingsOverrides, env: &EnvSnapshot) -> Self {
        let registry = overrides
            .registry
            .clone()
            .or_else(|| env.registry.clone())
            .unwrap_or_else(|| DEFAULT_REGISTRY.to_owned());

        let local_registry = overrides
            .local_registry
            .clone()
            .or_else(|| env.local_registry.clone())
            .or_else(|| Some(DEFAULT_LOCAL_REGISTRY.to_owned()));

        let dna_home = overrides
            .dna_home
            .clone()
            .or_else(|| env.dna_home.clone().map(Utf8PathBuf::from));

        Self {
            registry,
            local_registry,
            dna_home,
        }
    }

    /// The remote registry URL.
    #[must_use]
    pub fn registry(&self) -> &str {
        &self.registry
    }

    /// The local mesh registry URL, when configured.
    #[must_use]
    pub fn local_registry(&self) -> Option<&str> {
        self.local_registry.as_deref()
    }

    /// Explicit install root override, when configured.
    #[must_use]
    pub fn dna_home(&self) -> Option<&Utf8PathBuf> {
        self.dna_home.as_ref()
    }

    /// The artifact URLs to try, in priority order (local mesh first).
    #[must_use]
    pub fn artifact_urls(&self) -> Vec<String> {
        let mut urls = Vec::new();
        if let Some(local) = &self.local_registry {
            urls.push(artifact_url(local));
        }
        urls.push(artifact_url(&self.registry));
        urls
    }
}

/// Join a registry base URL with the artifact filename.
fn artifact_url(base: &str) -> String {
    format!("{}/{ARTEFACT_FILE}", base.trim_end_matches('/'))
}
