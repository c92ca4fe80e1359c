//! Error types for the dna-installer CLI.
//!
//! This module defines semantic error variants that provide actionable guidance
//! to users when provisioning fails. Each error names the step that failed and
//! includes recovery hints where applicable.

use camino::{Utf8Path, Utf8PathBuf};
use thiserror::Error;

/// Errors that can occur during the installation process.
#[derive(Debug, Error)]
pub enum InstallerError {
    /// The process lacks rights to create or modify a filesystem path.
    #[error("permission denied for {path}: {source}")]
    Permission {
        /// Path that could not be created or modified.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The artifact could not be retrieved from any configured source.
    #[error("fetch failed for {url}: {reason}")]
    Fetch {
        /// The last URL that was attempted.
        url: String,
        /// Description of the failure.
        reason: String,
    },

    /// The invoking user's home directory could not be determined.
    #[error("could not determine home directory; set DNA_HOME to override")]
    HomeNotFound,

    /// A global install was requested without elevated privileges.
    #[error("global install requires elevated privileges; re-run with: sudo dna-installer --global")]
    ElevationRequired,

    /// Recursive ownership transfer to the invoking user failed.
    #[error("ownership transfer failed for {path}: {reason}")]
    Ownership {
        /// Path in the tree that could not be chowned.
        path: Utf8PathBuf,
        /// Description of the failure.
        reason: String,
    },

    /// Wrapper script generation failed.
    #[error("wrapper script generation failed: {0}")]
    WrapperGeneration(String),

    /// Serializing the persisted mesh configuration failed.
    #[error("failed to serialize mesh config")]
    Serialize {
        /// Underlying serialization error.
        #[source]
        source: serde_json::Error,
    },

    /// An I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using [`InstallerError`].
pub type Result<T> = std::result::Result<T, InstallerError>;

/// Classify an I/O error against the path it occurred on.
///
/// Permission failures get their own variant so the user-facing message names
/// the path that needs different rights; everything else stays a plain I/O
/// error.
#[must_use]
pub fn classify_io(path: &Utf8Path, source: std::io::Error) -> InstallerError {
    if source.kind() == std::io::ErrorKind::PermissionDenied {
        InstallerError::Permission {
            path: path.to_owned(),
            source,
        }
    } else {
        InstallerError::Io(source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elevation_required_suggests_sudo_rerun() {
        let msg = InstallerError::ElevationRequired.to_string();
        assert!(msg.contains("sudo"));
        assert!(msg.contains("--global"));
    }

    #[test]
    fn fetch_error_includes_url_and_reason() {
        let err = InstallerError::Fetch {
            url: "http://192.168.1.103:8000/dna_cli.py".to_owned(),
            reason: "connection refused".to_owned(),
        };
        let msg = err.to_string();
        assert!(msg.contains("dna_cli.py"));
        assert!(msg.contains("connection refused"));
    }

    #[test]
    fn home_not_found_mentions_override() {
        let msg = InstallerError::HomeNotFound.to_string();
        assert!(msg.contains("DNA_HOME"));
    }

    #[test]
    fn classify_io_maps_permission_denied() {
        let path = Utf8PathBuf::from("/usr/local/lib/dna");
        let source = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = classify_io(&path, source);
        assert!(matches!(err, InstallerError::Permission { .. }));
        assert!(err.to_string().contains("/usr/local/lib/dna"));
    }

    #[test]
    fn classify_io_keeps_other_kinds_as_io() {
        let path = Utf8PathBuf::from("/tmp/x");
        let source = std::io::Error::other("disk full");
        let err = classify_io(&path, source);
        assert!(matches!(err, InstallerError::Io(_)));
    }

    #[test]
    fn ownership_error_includes_path() {
        let err = InstallerError::Ownership {
            path: Utf8PathBuf::from("/home/user/.dna"),
            reason: "operation not permitted".to_owned(),
        };
        let msg = err.to_string();
        assert!(msg.contains(".dna"));
        assert!(msg.contains("not permitted"));
    }
}
