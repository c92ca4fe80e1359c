//! The linear provisioning pipeline.
//!
//! There is no state machine: a run is a fixed sequence of guarded,
//! individually-idempotent steps, each either succeeding or terminating the
//! whole run. The pipeline operates on an explicit [`InstallPlan`] and an
//! injected fetcher so the full flow can be exercised against temporary
//! directories in tests.

use crate::artifact::{ArtefactOrigin, ArtefactSources, install_artifact, mark_executable};
use crate::error::Result;
use crate::fetch::ArtefactFetcher;
use crate::layout::{InstallLayout, SystemLayout};
use crate::outcome::StepOutcome;
use crate::output::write_stderr_line;
use crate::ownership::{Owner, apply_ownership};
use crate::persisted::{MeshConfig, write_default_config};
use crate::profile::ShellFlavor;
use crate::rcfile::ensure_path_entry;
use crate::settings::InstallSettings;
use crate::wrapper::{WrapperResult, generate_wrapper};
use camino::Utf8PathBuf;
use std::io::Write;

/// Which install variant a plan describes.
#[derive(Debug, Clone)]
pub enum InstallVariant {
    /// Everything under the user tree; artifact installed directly.
    User,
    /// Artifact under a system prefix behind a wrapper script; the user tree
    /// is still provisioned and optionally chowned back to the invoking
    /// user.
    Global {
        /// The system prefix tree.
        system: SystemLayout,
        /// Identity to hand the user tree back to, when known.
        owner: Option<Owner>,
    },
}

/// Everything one install run needs, resolved up front.
#[derive(Debug, Clone)]
pub struct InstallPlan {
    /// Resolved settings (registries, overrides).
    pub settings: InstallSettings,
    /// The per-user tree.
    pub layout: InstallLayout,
    /// Detected shell flavor.
    pub shell: ShellFlavor,
    /// Shell resource file to edit; `None` skips the PATH step.
    pub rc_path: Option<Utf8PathBuf>,
    /// Artifact sources in priority order.
    pub sources: ArtefactSources,
    /// User or global install.
    pub variant: InstallVariant,
    /// Suppress progress output.
    pub quiet: bool,
}

impl InstallPlan {
    /// The destination the artifact is installed to under this plan.
    #[must_use]
    pub fn artifact_dest(&self) -> Utf8PathBuf {
        match &self.variant {
            InstallVariant::User => self.layout.artifact_path(),
            InstallVariant::Global { system, .. } => system.artifact_path(),
        }
    }
}

/// Per-step outcomes of one successful run.
#[derive(Debug)]
pub struct InstallReport {
    /// Where the artifact was installed.
    pub artifact_path: Utf8PathBuf,
    /// Which source supplied it.
    pub origin: ArtefactOrigin,
    /// Whether the mesh config was seeded or already present.
    pub config: StepOutcome,
    /// Outcome of the PATH step, when it ran.
    pub path_entry: Option<StepOutcome>,
    /// Wrapper script details, for global installs.
    pub wrapper: Option<WrapperResult>,
}

/// Run the full provisioning sequence.
///
/// # Errors
///
/// Any step error aborts the remaining sequence immediately; directories
/// already created remain (no rollback).
pub fn run(
    plan: &InstallPlan,
    fetcher: &dyn ArtefactFetcher,
    stderr: &mut dyn Write,
) -> Result<InstallReport> {
    progress(plan, stderr, "Provisioning directories...");
    plan.layout.ensure()?;
    if let InstallVariant::Global { system, .. } = &plan.variant {
        system.ensure()?;
    }

    let artifact_path = plan.artifact_dest();
    progress(plan, stderr, format!("Fetching {}...", crate::settings::ARTEFACT_FILE));
    let origin = install_artifact(&plan.sources, fetcher, &artifact_path)?;
    mark_executable(&artifact_path)?;
    progress(plan, stderr, format!("Installed {artifact_path}"));

    let wrapper = match &plan.variant {
        InstallVariant::User => None,
        InstallVariant::Global { system, .. } => {
            progress(plan, stderr, "Generating wrapper script...");
            Some(generate_wrapper(&system.bin_dir(), &artifact_path)?)
        }
    };

    let config = write_default_config(
        &plan.layout.config_path(),
        &MeshConfig::initial(&plan.settings),
    )?;
    if config.is_already_present() {
        progress(plan, stderr, "Mesh config already present; left untouched.");
    }

    let path_entry = match &plan.rc_path {
        Some(rc_path) => {
            let outcome = ensure_path_entry(rc_path, plan.shell, &plan.layout.bin_dir())?;
            if !outcome.is_already_present() {
                progress(plan, stderr, format!("Added PATH entry to {rc_path}"));
            }
            Some(outcome)
        }
        None => None,
    };

    if let InstallVariant::Global {
        owner: Some(owner), ..
    } = &plan.variant
    {
        progress(plan, stderr, "Restoring user tree ownership...");
        apply_ownership(plan.layout.root(), *owner)?;
    }

    Ok(InstallReport {
        artifact_path,
        origin,
        config,
        path_entry,
        wrapper,
    })
}

fn progress(plan: &InstallPlan, stderr: &mut dyn Write, message: impl std::fmt::Display) {
    if !plan.quiet {
        write_stderr_line(stderr, message);
    }
}

#[cfg(test)]
#[path = "pipeline_tests.rs"]
mod tests;
