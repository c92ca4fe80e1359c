//! Directory resolution abstraction.
//!
//! Wraps platform home-directory lookup behind a small trait so the
//! provisioning logic can be exercised against temporary directories in
//! tests.

use camino::Utf8PathBuf;

/// Resolves base directories for the invoking user.
pub trait BaseDirs {
    /// The invoking user's home directory, when it can be determined and is
    /// valid UTF-8.
    fn home_dir(&self) -> Option<Utf8PathBuf>;
}

/// Production resolver backed by the platform conventions.
#[derive(Debug, Default)]
pub struct SystemBaseDirs;

impl BaseDirs for SystemBaseDirs {
    fn home_dir(&self) -> Option<Utf8PathBuf> {
        directories_next::BaseDirs::new()
            .and_then(|dirs| Utf8PathBuf::from_path_buf(dirs.home_dir().to_path_buf()).ok())
    }
}

/// Fixed-path resolver for tests and explicit overrides.
#[derive(Debug)]
pub struct FixedBaseDirs {
    home: Utf8PathBuf,
}

impl FixedBaseDirs {
    /// Create a resolver that always reports `home` as the home directory.
    #[must_use]
    pub fn new(home: Utf8PathBuf) -> Self {
        Self { home }
    }
}

impl BaseDirs for FixedBaseDirs {
    fn home_dir(&self) -> Option<Utf8PathBuf> {
        Some(self.home.clone())
    }
}
