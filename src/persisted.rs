//! Persisted mesh configuration.
//!
//! The installer seeds `~/.dna/config.json` exactly once. The downloaded
//! `dna` tool owns the file afterwards (it appends to `spliced` as packages
//! are installed), so re-running the installer must never overwrite it.

use crate::error::{InstallerError, Result, classify_io};
use crate::outcome::StepOutcome;
use crate::settings::{InstallSettings, LAMBDA_PHI, VERSION};
use camino::Utf8Path;
use serde::{Deserialize, Serialize};

/// The on-disk mesh configuration, JSON-shaped.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MeshConfig {
    /// Installer version that seeded the file.
    pub version: String,
    /// Remote registry URL.
    pub registry: String,
    /// Local mesh registry URL, when configured.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub local_registry: Option<String>,
    /// Identifiers of spliced packages; seeded empty.
    pub spliced: Vec<String>,
    /// Universal memory constant.
    pub lambda_phi: f64,
}

impl MeshConfig {
    /// First-run configuration derived from the resolved settings.
    #[must_use]
    pub fn initial(settings: &InstallSettings) -> Self {
        Self {
            version: VERSION.to_owned(),
            registry: settings.registry().to_owned(),
            local_registry: settings.local_registry().map(str::to_owned),
            spliced: Vec::new(),
            lambda_phi: LAMBDA_PHI,
        }
    }
}

/// Serialize `config` to `path` only if no file currently exists there.
///
/// An existing file is never read or rewritten; the call reports
/// [`StepOutcome::AlreadyPresent`] and leaves it byte-for-byte intact.
///
/// # Errors
///
/// Returns a `Permission` error when the file cannot be written, or a
/// serialization error for an unrepresentable config.
pub fn write_default_config(path: &Utf8Path, config: &MeshConfig) -> Result<StepOutcome> {
    if path.as_std_path().exists() {
        log::debug!("{path} already exists; leaving it untouched");
        return Ok(StepOutcome::AlreadyPresent);
    }

    let json = serde_json::to_string_pretty(config)
        .map_err(|source| InstallerError::Serialize { source })?;
    std::fs::write(path.as_std_path(), json)
        .map_err(|e| classify_io(path, e))?;
    Ok(StepOutcome::Created)
}
