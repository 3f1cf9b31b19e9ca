//! Health-passport sharing permissions.
//!
//! A patient selects which parts of their record a one-time access token
//! unlocks. The set is fixed when the token is issued and never widened.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A category of data a passport token may share.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SharePermission {
    Allergies,
    MedicalHistory,
    Insurance,
}

impl fmt::Display for SharePermission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SharePermission::Allergies => f.write_str("allergies"),
            SharePermission::MedicalHistory => f.write_str("medical-history"),
            SharePermission::Insurance => f.write_str("insurance"),
        }
    }
}

/// The permissions attached to one access token.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionSet {
    inner: BTreeSet<SharePermission>,
}

impl PermissionSet {
    /// Grant a permission. Granting twice is a no-op.
    pub fn grant(&mut self, permission: SharePermission) {
        self.inner.insert(permission);
    }

    pub fn has(&self, permission: SharePermission) -> bool {
        self.inner.contains(&permission)
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Iterate granted permissions in a stable order.
    pub fn all(&self) -> impl Iterator<Item = SharePermission> + '_ {
        self.inner.iter().copied()
    }
}

impl FromIterator<SharePermission> for PermissionSet {
    fn from_iter<I: IntoIterator<Item = SharePermission>>(iter: I) -> Self {
        Self { inner: iter.into_iter().collect() }
    }
}
