//! Filesystem layout of an installation.
//!
//! Two trees are involved: the per-user `~/.dna` scaffold (always created,
//! even by a privileged install) and, for privileged installs only, the
//! system prefix tree holding the shared artifact and its wrapper.

use crate::error::{Result, classify_io};
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;

/// Directory name of the per-user tree under the home directory.
pub const DNA_DIRNAME: &str = ".dna";

/// Filename of the persisted mesh config inside the user tree.
pub const CONFIG_FILENAME: &str = "config.json";

/// Name the artifact is installed under in a user install.
pub const USER_BINARY_NAME: &str = "dna";

/// Default prefix for privileged installs.
pub const DEFAULT_PREFIX: &str = "/usr/local";

/// The per-user `~/.dna` tree.
#[derive(Debug, Clone)]
pub struct InstallLayout {
    root: Utf8PathBuf,
}

impl InstallLayout {
    /// Layout rooted at an explicit directory.
    #[must_use]
    pub fn at(root: Utf8PathBuf) -> Self {
        Self { root }
    }

    /// Layout under the given home directory (`<home>/.dna`).
    #[must_use]
    pub fn under_home(home: &Utf8Path) -> Self {
        Self::at(home.join(DNA_DIRNAME))
    }

    /// The tree root.
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// Library directory for fetched package files.
    #[must_use]
    pub fn lib_dir(&self) -> Utf8PathBuf {
        self.root.join("lib")
    }

    /// Binary directory for installed executables.
    #[must_use]
    pub fn bin_dir(&self) -> Utf8PathBuf {
        self.root.join("bin")
    }

    /// Organisms directory, an empty scaffold for future package content.
    #[must_use]
    pub fn organisms_dir(&self) -> Utf8PathBuf {
        self.root.join("organisms")
    }

    /// Path of the persisted mesh config.
    #[must_use]
    pub fn config_path(&self) -> Utf8PathBuf {
        self.root.join(CONFIG_FILENAME)
    }

    /// Destination of the artifact in a user install.
    #[must_use]
    pub fn artifact_path(&self) -> Utf8PathBuf {
        self.bin_dir().join(USER_BINARY_NAME)
    }

    /// Create the full directory scaffold, succeeding if it already exists.
    ///
    /// # Errors
    ///
    /// Returns a `Permission` error when the process lacks rights to create
    /// any of the directories.
    pub fn ensure(&self) -> Result<()> {
        for dir in [
            self.root.clone(),
            self.lib_dir(),
            self.bin_dir(),
            self.organisms_dir(),
        ] {
            fs::create_dir_all(&dir).map_err(|e| classify_io(&dir, e))?;
        }
        Ok(())
    }
}

/// The system prefix tree used by privileged installs.
#[derive(Debug, Clone)]
pub struct SystemLayout {
    prefix: Utf8PathBuf,
}

impl SystemLayout {
    /// Layout under the given prefix (normally `/usr/local`).
    #[must_use]
    pub fn at(prefix: Utf8PathBuf) -> Self {
        Self { prefix }
    }

    /// The prefix root.
    #[must_use]
    pub fn prefix(&self) -> &Utf8Path {
        &self.prefix
    }

    /// Shared library directory holding the artifact.
    #[must_use]
    pub fn lib_dir(&self) -> Utf8PathBuf {
        self.prefix.join("lib").join("dna")
    }

    /// System binary directory receiving the wrapper script.
    #[must_use]
    pub fn bin_dir(&self) -> Utf8PathBuf {
        self.prefix.join("bin")
    }

    /// Destination of the artifact in a privileged install.
    #[must_use]
    pub fn artifact_path(&self) -> Utf8PathBuf {
        self.lib_dir().join(crate::settings::ARTEFACT_FILE)
    }

    /// Path of the wrapper script.
    #[must_use]
    pub fn wrapper_path(&self) -> Utf8PathBuf {
        self.bin_dir().join(USER_BINARY_NAME)
    }

    /// Create the prefix directories and verify the lib directory is
    /// writable.
    ///
    /// # Errors
    ///
    /// Returns a `Permission` error when directory creation is refused, and
    /// an I/O error when the writability probe fails for another reason.
    pub fn ensure(&self) -> Result<()> {
        for dir in [self.lib_dir(), self.bin_dir()] {
            fs::create_dir_all(&dir).map_err(|e| classify_io(&dir, e))?;
        }

        // Probe writability up front so a read-only prefix fails before any
        // network traffic.
        let probe = self.lib_dir().join(".dna-installer-probe");
        fs::write(&probe, b"probe").map_err(|e| classify_io(&probe, e))?;
        let _ = fs::remove_file(&probe);
        Ok(())
    }
}
