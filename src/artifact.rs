//! Artifact installation: source priority, atomic placement, permissions.
//!
//! Sources are tried in a fixed priority order: local file candidates first
//! (checked for existence, no network), then the registry URLs. Downloads
//! land in a temporary file beside the destination and are persisted only on
//! success, so a failed fetch leaves the destination absent or unmodified.

use crate::error::{InstallerError, Result, classify_io};
use crate::fetch::ArtefactFetcher;
use camino::{Utf8Path, Utf8PathBuf};

/// Where the installed artifact ultimately came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArtefactOrigin {
    /// Copied from a pre-existing local file.
    LocalFile(Utf8PathBuf),
    /// Downloaded from a registry URL.
    Registry(String),
}

impl std::fmt::Display for ArtefactOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ArtefactOrigin::LocalFile(path) => write!(f, "local file {path}"),
            ArtefactOrigin::Registry(url) => write!(f, "{url}"),
        }
    }
}

/// Ordered artifact sources for one install run.
#[derive(Debug, Clone, Default)]
pub struct ArtefactSources {
    /// Local files tried before any network fetch.
    pub local_candidates: Vec<Utf8PathBuf>,
    /// Registry URLs in priority order (local mesh before remote).
    pub urls: Vec<String>,
}

/// Install the artifact at `dest`, trying each source in priority order.
///
/// # Errors
///
/// Returns [`InstallerError::Fetch`] carrying the last attempted URL when
/// every source fails; the destination is left untouched in that case.
pub fn install_artifact(
    sources: &ArtefactSources,
    fetcher: &dyn ArtefactFetcher,
    dest: &Utf8Path,
) -> Result<ArtefactOrigin> {
    for candidate in &sources.local_candidates {
        if candidate.as_std_path().is_file() {
            place_local(candidate, dest)?;
            return Ok(ArtefactOrigin::LocalFile(candidate.clone()));
        }
    }

    let mut last_failure: Option<(String, String)> = None;
    for url in &sources.urls {
        match download_to(fetcher, url, dest)? {
            DownloadAttempt::Placed => return Ok(ArtefactOrigin::Registry(url.clone())),
            DownloadAttempt::Failed(reason) => {
                log::warn!("fetch from {url} failed: {reason}");
                last_failure = Some((url.clone(), reason));
            }
        }
    }

    let (url, reason) = last_failure.unwrap_or_else(|| {
        (
            String::new(),
            "no artifact sources configured".to_owned(),
        )
    });
    Err(InstallerError::Fetch { url, reason })
}

enum DownloadAttempt {
    Placed,
    Failed(String),
}

/// Fetch one URL into a temporary file beside `dest`, persisting on success.
///
/// A fetch failure is reported as a non-fatal [`DownloadAttempt::Failed`];
/// local I/O trouble around the temporary file is fatal.
fn download_to(
    fetcher: &dyn ArtefactFetcher,
    url: &str,
    dest: &Utf8Path,
) -> Result<DownloadAttempt> {
    let parent = parent_dir(dest)?;
    let temp = tempfile::NamedTempFile::new_in(parent.as_std_path())
        .map_err(|e| classify_io(&parent, e))?;

    if let Err(failure) = fetcher.fetch(url, temp.path()) {
        return Ok(DownloadAttempt::Failed(failure.to_string()));
    }

    temp.persist(dest.as_std_path())
        .map_err(|e| classify_io(dest, e.error))?;
    Ok(DownloadAttempt::Placed)
}

/// Copy a local candidate file into place.
fn place_local(candidate: &Utf8Path, dest: &Utf8Path) -> Result<()> {
    std::fs::copy(candidate.as_std_path(), dest.as_std_path())
        .map_err(|e| classify_io(dest, e))?;
    Ok(())
}

fn parent_dir(dest: &Utf8Path) -> Result<Utf8PathBuf> {
    dest.parent().map(Utf8Path::to_owned).ok_or_else(|| {
        InstallerError::Io(std::io::Error::other(format!(
            "artifact destination {dest} has no parent directory"
        )))
    })
}

/// Set the artifact's permission bits so it can be invoked directly.
///
/// # Errors
///
/// Returns a `Permission` error when the filesystem refuses the change.
#[cfg(unix)]
pub fn mark_executable(path: &Utf8Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let metadata = std::fs::metadata(path.as_std_path())
        .map_err(|e| classify_io(path, e))?;
    let mut perms = metadata.permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(path.as_std_path(), perms)
        .map_err(|e| classify_io(path, e))
}

/// No-op on platforms without unix permission bits.
#[cfg(not(unix))]
pub fn mark_executable(_path: &Utf8Path) -> Result<()> {
    Ok(())
}
