//! Elevation detection and ownership transfer.
//!
//! A privileged install runs as root but provisions a tree inside the
//! invoking user's home directory. sudo exposes that user's identity via
//! `SUDO_UID`/`SUDO_GID`; after provisioning, the whole user tree is chowned
//! back so no file is left root-owned.

use crate::error::{InstallerError, Result};
use camino::Utf8Path;

/// Numeric identity of the invoking (non-privileged) user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Owner {
    /// User id.
    pub uid: u32,
    /// Group id.
    pub gid: u32,
}

/// Returns true when the process runs with elevated privileges.
#[cfg(unix)]
#[must_use]
pub fn is_elevated() -> bool {
    // SAFETY: geteuid has no preconditions and cannot fail.
    unsafe { libc::geteuid() == 0 }
}

/// Elevation never applies on non-unix platforms.
#[cfg(not(unix))]
#[must_use]
pub fn is_elevated() -> bool {
    false
}

/// Recover the invoking user's identity from sudo's environment variables.
///
/// Returns `None` when either variable is missing or malformed (for example
/// when running as a real root login rather than under sudo); in that case
/// there is no one to hand ownership back to.
#[must_use]
pub fn sudo_owner(uid_var: Option<&str>, gid_var: Option<&str>) -> Option<Owner> {
    let uid = uid_var?.parse().ok()?;
    let gid = gid_var?.parse().ok()?;
    Some(Owner { uid, gid })
}

/// Capture [`sudo_owner`] from the process environment.
#[must_use]
pub fn sudo_owner_from_env() -> Option<Owner> {
    let uid = std::env::var("SUDO_UID").ok();
    let gid = std::env::var("SUDO_GID").ok();
    sudo_owner(uid.as_deref(), gid.as_deref())
}

/// Recursively transfer ownership of `path` and everything under it.
///
/// # Errors
///
/// Returns [`InstallerError::Ownership`] naming the first path that could
/// not be chowned or traversed.
#[cfg(unix)]
pub fn apply_ownership(path: &Utf8Path, owner: Owner) -> Result<()> {
    chown_one(path, owner)?;

    if path.as_std_path().is_dir() {
        let entries = std::fs::read_dir(path.as_std_path()).map_err(|e| {
            InstallerError::Ownership {
                path: path.to_owned(),
                reason: e.to_string(),
            }
        })?;
        for entry in entries {
            let entry = entry.map_err(|e| InstallerError::Ownership {
                path: path.to_owned(),
                reason: e.to_string(),
            })?;
            let child = Utf8Path::from_path(&entry.path())
                .map(Utf8Path::to_owned)
                .ok_or_else(|| InstallerError::Ownership {
                    path: path.to_owned(),
                    reason: "child path is not valid UTF-8".to_owned(),
                })?;
            apply_ownership(&child, owner)?;
        }
    }

    Ok(())
}

#[cfg(unix)]
fn chown_one(path: &Utf8Path, owner: Owner) -> Result<()> {
    std::os::unix::fs::chown(path.as_std_path(), Some(owner.uid), Some(owner.gid)).map_err(
        |e| InstallerError::Ownership {
            path: path.to_owned(),
            reason: e.to_string(),
        },
    )
}

/// Ownership transfer is not applicable on non-unix platforms.
#[cfg(not(unix))]
pub fn apply_ownership(_path: &Utf8Path, _owner: Owner) -> Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::both_present(Some("1000"), Some("1000"), Some(Owner { uid: 1000, gid: 1000 }))]
    #[case::missing_uid(None, Some("1000"), None)]
    #[case::missing_gid(Some("1000"), None, None)]
    #[case::malformed(Some("enki"), Some("1000"), None)]
    fn sudo_owner_requires_both_numeric_ids(
        #[case] uid: Option<&str>,
        #[case] gid: Option<&str>,
        #[case] expected: Option<Owner>,
    ) {
        assert_eq!(sudo_owner(uid, gid), expected);
    }

    #[test]
    fn sudo_owner_from_env_reads_sudo_variables() {
        temp_env::with_vars(
            [("SUDO_UID", Some("1234")), ("SUDO_GID", Some("1234"))],
            || {
                assert_eq!(
                    sudo_owner_from_env(),
                    Some(Owner {
                        uid: 1234,
                        gid: 1234
                    })
                );
            },
        );
    }

    // Chowning to the current identity is a permitted no-op, which lets the
    // recursive walk be exercised without privileges.
    #[cfg(unix)]
    #[test]
    fn apply_ownership_walks_the_whole_tree() {
        let temp = tempfile::tempdir().expect("tempdir");
        let root = camino::Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).expect("utf8");
        std::fs::create_dir_all(root.join("lib").as_std_path()).expect("mkdir");
        std::fs::write(root.join("lib").join("dna_cli.py").as_std_path(), "x").expect("write");

        // SAFETY: getuid/getgid have no preconditions and cannot fail.
        let owner = unsafe {
            Owner {
                uid: libc::getuid(),
                gid: libc::getgid(),
            }
        };
        apply_ownership(&root, owner).expect("chown to self");
    }
}
