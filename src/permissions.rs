//! # File Permissions
//!
//! Derives per-file capabilities from the signed-in user's collection
//! permission lists plus file ownership. Pure derivation; nothing here
//! talks to the network or enforces anything, the backend remains the
//! authority.
//!
//! ## Permission Model
//!
//! Collection permissions form three tiers, checked highest first:
//!
//! - `delete`: full access (download, view history, archive, delete)
//! - `write`: can download own files only
//! - `read`: can download any file
//!
//! Ownership is a case-sensitive comparison of the file's owner against the
//! user's username.

use crate::constants::{PERMISSION_DELETE, PERMISSION_READ, PERMISSION_WRITE};
use crate::models::{FileRecord, User};

/// What the signed-in user may do with one file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilePermissions {
    pub can_read: bool,
    pub can_write: bool,
    pub can_delete: bool,
    pub can_download: bool,
    pub can_archive: bool,
    pub can_view_history: bool,
    pub is_own_file: bool,
}

impl FilePermissions {
    /// No capabilities at all; the unauthenticated baseline.
    pub fn none() -> Self {
        Self::default()
    }
}

/// Derives the capabilities `user` holds on `file`.
///
/// `None` means no signed-in user and yields [`FilePermissions::none`].
/// Tiers are exclusive: holding `delete` grants everything regardless of
/// the other entries, `write` without `delete` limits downloads to own
/// files, and `read` alone allows downloading any file but nothing else.
pub fn file_permissions(user: Option<&User>, file: &FileRecord) -> FilePermissions {
    let Some(user) = user else {
        return FilePermissions::none();
    };

    let is_own_file = file.owner == user.username;
    let granted = user
        .collections
        .get(&file.collection)
        .map(Vec::as_slice)
        .unwrap_or(&[]);
    let has = |permission: &str| granted.iter().any(|p| p == permission);

    if has(PERMISSION_DELETE) {
        return FilePermissions {
            can_read: true,
            can_write: true,
            can_delete: true,
            can_download: true,
            can_archive: true,
            can_view_history: true,
            is_own_file,
        };
    }
    if has(PERMISSION_WRITE) {
        return FilePermissions {
            can_read: true,
            can_write: true,
            can_download: is_own_file,
            is_own_file,
            ..FilePermissions::none()
        };
    }
    if has(PERMISSION_READ) {
        return FilePermissions {
            can_read: true,
            can_download: true,
            is_own_file,
            ..FilePermissions::none()
        };
    }

    FilePermissions {
        is_own_file,
        ..FilePermissions::none()
    }
}
