use std::fmt;

use changeset_config::ChangesetConfig;
use changeset_core::{Changeset, Package};
use indexmap::IndexMap;
use tracing::{debug, warn};

use crate::error::{OperationError, Result};
use crate::traits::{ChangelogWriter, ManifestWriter};
use crate::types::{ChangelogEntry, Release, ReleaseTag};

/// What [`ReleaseApplier::apply`] touched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplyReport {
    pub versions_written: Vec<String>,
    /// Private packages whose manifest version was left alone.
    pub versions_skipped: Vec<String>,
    /// `(dependent, dependency)` pairs whose requirement was rewritten.
    pub requirements_rewritten: Vec<(String, String)>,
    pub changelogs_written: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReleaseViolation {
    UnknownPackage { package: String },
    NoChangesets { package: String },
    UnknownDependent { package: String, dependent: String },
    MissingRequirement { package: String, dependent: String },
}

impl fmt::Display for ReleaseViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownPackage { package } => write!(f, "package '{package}' not found"),
            Self::NoChangesets { package } => {
                write!(f, "release of '{package}' has no changesets")
            }
            Self::UnknownDependent { package, dependent } => {
                write!(f, "dependent '{dependent}' of '{package}' not found")
            }
            Self::MissingRequirement { package, dependent } => write!(
                f,
                "dependent '{dependent}' declares no requirement on '{package}'"
            ),
        }
    }
}

/// Writes an already ordered release list through the manifest and
/// changelog writers.
pub struct ReleaseApplier<M, C> {
    manifest_writer: M,
    changelog_writer: C,
    config: ChangesetConfig,
}

impl<M, C> ReleaseApplier<M, C>
where
    M: ManifestWriter,
    C: ChangelogWriter,
{
    pub fn new(manifest_writer: M, changelog_writer: C) -> Self {
        Self {
            manifest_writer,
            changelog_writer,
            config: ChangesetConfig::default(),
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: ChangesetConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn config(&self) -> &ChangesetConfig {
        &self.config
    }

    /// Applies `releases` in order. Each release rewrites its package's
    /// version, then pins every recorded dependent's requirement to the
    /// literal new version, then hands a changelog entry to the changelog
    /// writer. Dependents are taken as recorded, never re-derived.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::UnknownPackage`] if a release names a
    /// package missing from `packages`, or any error raised by a writer.
    pub fn apply(
        &self,
        releases: &[Release],
        packages: &[Package],
        changesets: &[Changeset],
    ) -> Result<ApplyReport> {
        let lookup = package_lookup(packages);
        let changeset_lookup: IndexMap<&str, &Changeset> =
            changesets.iter().map(|c| (c.id.as_str(), c)).collect();
        let mut report = ApplyReport::default();

        for release in releases {
            let package = lookup.get(release.name.as_str()).copied().ok_or_else(|| {
                OperationError::UnknownPackage {
                    name: release.name.clone(),
                    available: lookup.keys().copied().collect::<Vec<_>>().join(", "),
                }
            })?;

            if package.private && !self.config.private_packages().version() {
                debug!(package = %package.name, "skipping version of private package");
                report.versions_skipped.push(package.name.clone());
            } else {
                self.manifest_writer
                    .write_version(package, &release.new_version)?;
                report.versions_written.push(package.name.clone());
            }

            let requirement = release.new_version.to_string();
            for name in &release.dependents {
                let Some(dependent) = lookup.get(name.as_str()).copied() else {
                    warn!(package = %release.name, dependent = %name, "unknown dependent");
                    continue;
                };
                if !dependent.has_dependency(&release.name) {
                    debug!(
                        package = %release.name,
                        dependent = %name,
                        "dependent has no direct requirement"
                    );
                    continue;
                }
                self.manifest_writer.write_dependency_requirement(
                    dependent,
                    &release.name,
                    &requirement,
                )?;
                report
                    .requirements_rewritten
                    .push((dependent.name.clone(), release.name.clone()));
            }

            let entry = ChangelogEntry {
                package: package.name.clone(),
                directory: package.directory.clone(),
                bump_type: release.bump_type,
                previous_version: release.old_version.clone(),
                version: release.new_version.clone(),
                summaries: release
                    .changesets
                    .iter()
                    .filter_map(|id| changeset_lookup.get(id.as_str()))
                    .map(|changeset| changeset.summary.clone())
                    .filter(|summary| !summary.is_empty())
                    .collect(),
                dependents: release.dependents.clone(),
            };
            self.changelog_writer.write_release(&entry)?;
            report.changelogs_written.push(package.name.clone());

            debug!(
                package = %release.name,
                version = %release.new_version,
                "applied release"
            );
        }

        Ok(report)
    }

    /// Checks `releases` against the packages they are about to rewrite.
    #[must_use]
    pub fn validate_releases(
        &self,
        releases: &[Release],
        packages: &[Package],
    ) -> Vec<ReleaseViolation> {
        let lookup = package_lookup(packages);
        let mut violations = Vec::new();

        for release in releases {
            if !lookup.contains_key(release.name.as_str()) {
                violations.push(ReleaseViolation::UnknownPackage {
                    package: release.name.clone(),
                });
                continue;
            }

            if release.changesets.is_empty() {
                violations.push(ReleaseViolation::NoChangesets {
                    package: release.name.clone(),
                });
            }

            for name in &release.dependents {
                match lookup.get(name.as_str()) {
                    None => violations.push(ReleaseViolation::UnknownDependent {
                        package: release.name.clone(),
                        dependent: name.clone(),
                    }),
                    Some(dependent) if !dependent.has_dependency(&release.name) => {
                        violations.push(ReleaseViolation::MissingRequirement {
                            package: release.name.clone(),
                            dependent: name.clone(),
                        });
                    }
                    Some(_) => {}
                }
            }
        }

        violations
    }

    /// One tag per release of a known package; private packages only when
    /// configured.
    #[must_use]
    pub fn release_tags(&self, releases: &[Release], packages: &[Package]) -> Vec<ReleaseTag> {
        let lookup = package_lookup(packages);
        let tag_private = self.config.private_packages().tag();

        releases
            .iter()
            .filter(|release| {
                lookup
                    .get(release.name.as_str())
                    .is_some_and(|package| tag_private || !package.private)
            })
            .map(|release| ReleaseTag {
                name: format!("{}@{}", release.name.replace('/', "-"), release.new_version),
                package: release.name.clone(),
                version: release.new_version.clone(),
                message: format!("Release {} {}", release.name, release.new_version),
            })
            .collect()
    }
}

#[must_use]
pub fn release_commit_message(releases: &[Release]) -> String {
    let names: Vec<&str> = releases.iter().map(|r| r.name.as_str()).collect();
    format!("Release {}", names.join(", "))
}

fn package_lookup(packages: &[Package]) -> IndexMap<&str, &Package> {
    packages.iter().map(|p| (p.name.as_str(), p)).collect()
}
