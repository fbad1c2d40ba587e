use std::sync::{Arc, Mutex};

use changeset_core::Package;
use changeset_version::Version;

use crate::Result;
use crate::error::OperationError;
use crate::traits::{ChangelogWriter, ManifestWriter};
use crate::types::ChangelogEntry;

pub struct MockManifestWriter {
    written_versions: Mutex<Vec<(String, Version)>>,
    written_requirements: Mutex<Vec<(String, String, String)>>,
    fail: bool,
}

impl MockManifestWriter {
    #[must_use]
    pub fn new() -> Self {
        Self {
            written_versions: Mutex::new(Vec::new()),
            written_requirements: Mutex::new(Vec::new()),
            fail: false,
        }
    }

    #[must_use]
    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }

    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn written_versions(&self) -> Vec<(String, Version)> {
        self.written_versions.lock().expect("lock poisoned").clone()
    }

    /// `(dependent, dependency, requirement)` triples.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn written_requirements(&self) -> Vec<(String, String, String)> {
        self.written_requirements
            .lock()
            .expect("lock poisoned")
            .clone()
    }

    fn check(&self) -> Result<()> {
        if self.fail {
            return Err(OperationError::Io(std::io::Error::other(
                "mock manifest failure",
            )));
        }
        Ok(())
    }
}

impl Default for MockManifestWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl ManifestWriter for MockManifestWriter {
    fn write_version(&self, package: &Package, new_version: &Version) -> Result<()> {
        self.check()?;
        self.written_versions
            .lock()
            .expect("lock poisoned")
            .push((package.name.clone(), new_version.clone()));
        Ok(())
    }

    fn write_dependency_requirement(
        &self,
        dependent: &Package,
        dependency: &str,
        requirement: &str,
    ) -> Result<()> {
        self.check()?;
        self.written_requirements
            .lock()
            .expect("lock poisoned")
            .push((
                dependent.name.clone(),
                dependency.to_string(),
                requirement.to_string(),
            ));
        Ok(())
    }
}

impl ManifestWriter for Arc<MockManifestWriter> {
    fn write_version(&self, package: &Package, new_version: &Version) -> Result<()> {
        (**self).write_version(package, new_version)
    }

    fn write_dependency_requirement(
        &self,
        dependent: &Package,
        dependency: &str,
        requirement: &str,
    ) -> Result<()> {
        (**self).write_dependency_requirement(dependent, dependency, requirement)
    }
}

pub struct MockChangelogWriter {
    written_entries: Mutex<Vec<ChangelogEntry>>,
}

impl MockChangelogWriter {
    #[must_use]
    pub fn new() -> Self {
        Self {
            written_entries: Mutex::new(Vec::new()),
        }
    }

    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn written_entries(&self) -> Vec<ChangelogEntry> {
        self.written_entries.lock().expect("lock poisoned").clone()
    }
}

impl Default for MockChangelogWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl ChangelogWriter for MockChangelogWriter {
    fn write_release(&self, entry: &ChangelogEntry) -> Result<()> {
        self.written_entries
            .lock()
            .expect("lock poisoned")
            .push(entry.clone());
        Ok(())
    }
}

impl ChangelogWriter for Arc<MockChangelogWriter> {
    fn write_release(&self, entry: &ChangelogEntry) -> Result<()> {
        (**self).write_release(entry)
    }
}
