use changeset_core::Package;
use changeset_version::Version;

use crate::Result;

/// Rewrites package manifests.
pub trait ManifestWriter: Send + Sync {
    /// # Errors
    ///
    /// Returns an error if the manifest cannot be read or written.
    fn write_version(&self, package: &Package, new_version: &Version) -> Result<()>;

    /// Replaces `dependent`'s requirement on `dependency` with `requirement`.
    ///
    /// # Errors
    ///
    /// Returns an error if the manifest cannot be read or written.
    fn write_dependency_requirement(
        &self,
        dependent: &Package,
        dependency: &str,
        requirement: &str,
    ) -> Result<()>;
}
