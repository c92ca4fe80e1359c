//! Shell detection and user profile resolution.
//!
//! The installer edits exactly one shell resource file, chosen from the
//! invoking user's `$SHELL`. Unknown or missing shells fall back to bash,
//! matching the original installer scripts.

use crate::dirs::BaseDirs;
use crate::error::{InstallerError, Result};
use camino::{Utf8Path, Utf8PathBuf};

/// The interactive shell flavor used to pick a resource file and export
/// syntax.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellFlavor {
    /// Bourne-again shell; also the fallback for unknown shells.
    Bash,
    /// Z shell.
    Zsh,
    /// Fish shell; uses `set -gx` rather than `export`.
    Fish,
}

impl ShellFlavor {
    /// Detect the shell flavor from a `$SHELL` value.
    ///
    /// Only the final path component is considered, so `/usr/bin/zsh` and
    /// `zsh` both resolve to [`ShellFlavor::Zsh`].
    #[must_use]
    pub fn detect(shell_var: Option<&str>) -> Self {
        let Some(shell) = shell_var else {
            return ShellFlavor::Bash;
        };
        match Utf8Path::new(shell).file_name() {
            Some("zsh") => ShellFlavor::Zsh,
            Some("fish") => ShellFlavor::Fish,
            _ => ShellFlavor::Bash,
        }
    }

    /// Path of the shell resource file this flavor edits, under `home`.
    #[must_use]
    pub fn rc_path(self, home: &Utf8Path) -> Utf8PathBuf {
        match self {
            ShellFlavor::Bash => home.join(".bashrc"),
            ShellFlavor::Zsh => home.join(".zshrc"),
            ShellFlavor::Fish => home.join(".config").join("fish").join("config.fish"),
        }
    }
}

/// The invoking user's home directory and shell, resolved once at startup.
#[derive(Debug, Clone)]
pub struct UserProfile {
    home: Utf8PathBuf,
    shell: ShellFlavor,
}

impl UserProfile {
    /// Resolve the profile from a directory provider and a `$SHELL` value.
    ///
    /// # Errors
    ///
    /// Returns [`InstallerError::HomeNotFound`] when no home directory can
    /// be determined.
    pub fn resolve(dirs: &dyn BaseDirs, shell_var: Option<&str>) -> Result<Self> {
        let home = dirs.home_dir().ok_or(InstallerError::HomeNotFound)?;
        Ok(Self {
            home,
            shell: ShellFlavor::detect(shell_var),
        })
    }

    /// Construct a profile from explicit parts.
    #[must_use]
    pub fn new(home: Utf8PathBuf, shell: ShellFlavor) -> Self {
        Self { home, shell }
    }

    /// The user's home directory.
    #[must_use]
    pub fn home(&self) -> &Utf8Path {
        &self.home
    }

    /// The detected shell flavor.
    #[must_use]
    pub fn shell(&self) -> ShellFlavor {
        self.shell
    }

    /// The shell resource file this profile's shell reads on startup.
    #[must_use]
    pub fn rc_path(&self) -> Utf8PathBuf {
        self.shell.rc_path(&self.home)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dirs::FixedBaseDirs;
    use rstest::rstest;

    #[rstest]
    #[case::absolute_zsh(Some("/usr/bin/zsh"), ShellFlavor::Zsh)]
    #[case::bare_fish(Some("fish"), ShellFlavor::Fish)]
    #[case::bash(Some("/bin/bash"), ShellFlavor::Bash)]
    #[case::unknown(Some("/bin/ksh"), ShellFlavor::Bash)]
    #[case::unset(None, ShellFlavor::Bash)]
    fn detect_resolves_shell_flavor(#[case] shell: Option<&str>, #[case] expected: ShellFlavor) {
        assert_eq!(ShellFlavor::detect(shell), expected);
    }

    #[rstest]
    #[case::bash(ShellFlavor::Bash, "/home/u/.bashrc")]
    #[case::zsh(ShellFlavor::Zsh, "/home/u/.zshrc")]
    #[case::fish(ShellFlavor::Fish, "/home/u/.config/fish/config.fish")]
    fn rc_path_follows_flavor(#[case] flavor: ShellFlavor, #[case] expected: &str) {
        let home = Utf8PathBuf::from("/home/u");
        assert_eq!(flavor.rc_path(&home), Utf8PathBuf::from(expected));
    }

    #[test]
    fn resolve_uses_provided_home() {
        let dirs = FixedBaseDirs::new(Utf8PathBuf::from("/home/enki"));
        let profile = UserProfile::resolve(&dirs, Some("/usr/bin/zsh")).expect("profile");
        assert_eq!(profile.home().as_str(), "/home/enki");
        assert_eq!(profile.shell(), ShellFlavor::Zsh);
        assert!(profile.rc_path().as_str().ends_with(".zshrc"));
    }
}
