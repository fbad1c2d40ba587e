use std::fmt;

use changeset_config::ChangesetConfig;
use changeset_core::{BumpType, Changeset, Package};
use changeset_graph::DependencyGraph;
use changeset_version::{RequirementOperator, Version, max_bump_type};
use indexmap::{IndexMap, IndexSet};
use tracing::{debug, warn};

use crate::error::{OperationError, Result};
use crate::types::{Release, ReleaseSummary};

/// Result of planning releases from changesets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleasePlan {
    /// Releases ordered so that each release follows its recorded dependents.
    pub releases: Vec<Release>,
    /// Packages referenced in changesets but not found in the package set.
    pub unknown_packages: Vec<String>,
}

impl ReleasePlan {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.releases.is_empty()
    }

    #[must_use]
    pub fn summary(&self) -> ReleaseSummary {
        ReleaseSummary::from_releases(&self.releases)
    }
}

/// A problem found in a release plan. Advisory: the caller decides whether
/// to abort.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanViolation {
    UnknownPackage {
        package: String,
    },
    VersionNotIncreased {
        package: String,
        old_version: Version,
        new_version: Version,
    },
    NoChangesets {
        package: String,
    },
    UnknownDependent {
        package: String,
        dependent: String,
    },
}

impl fmt::Display for PlanViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownPackage { package } => write!(f, "package '{package}' not found"),
            Self::VersionNotIncreased {
                package,
                old_version,
                new_version,
            } => write!(
                f,
                "new version {new_version} of '{package}' must be greater than {old_version}"
            ),
            Self::NoChangesets { package } => {
                write!(f, "release of '{package}' has no changesets")
            }
            Self::UnknownDependent { package, dependent } => write!(
                f,
                "dependent '{dependent}' of '{package}' not found"
            ),
        }
    }
}

/// Turns changesets into an ordered list of releases over one package set.
pub struct ReleasePlanner {
    graph: DependencyGraph,
}

impl ReleasePlanner {
    /// # Errors
    ///
    /// Returns an error if two packages share a name.
    pub fn new(packages: &[Package]) -> Result<Self> {
        Ok(Self {
            graph: DependencyGraph::build(packages)?,
        })
    }

    /// # Errors
    ///
    /// Returns an error if two packages share a name.
    pub fn with_config(packages: &[Package], config: &ChangesetConfig) -> Result<Self> {
        let graph =
            DependencyGraph::build(packages)?.with_internal_prefix(config.internal_prefix());
        Ok(Self { graph })
    }

    #[must_use]
    pub fn from_graph(graph: DependencyGraph) -> Self {
        Self { graph }
    }

    #[must_use]
    pub fn graph(&self) -> &DependencyGraph {
        &self.graph
    }

    /// Plans one release per package named by at least one changeset.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::InvalidPackageVersion`] if a released
    /// package's current version cannot be parsed, or
    /// [`OperationError::BumpOverflow`] if its bumped component would
    /// exceed `u64::MAX`.
    pub fn plan_releases(&self, changesets: &[Changeset]) -> Result<ReleasePlan> {
        let (buckets, unknown_packages) = self.group_by_package(changesets);

        let mut releases = Vec::new();
        for package in self.graph.packages() {
            let Some(bucket) = buckets.get(package.name.as_str()) else {
                continue;
            };
            releases.push(self.plan_release(package, bucket)?);
        }

        for name in &unknown_packages {
            warn!(package = %name, "changeset references unknown package");
        }

        let releases = order_releases(releases);
        debug!(releases = releases.len(), "ordered releases");

        Ok(ReleasePlan {
            releases,
            unknown_packages,
        })
    }

    fn group_by_package<'a>(
        &self,
        changesets: &'a [Changeset],
    ) -> (IndexMap<&'a str, Vec<&'a Changeset>>, Vec<String>) {
        let mut buckets: IndexMap<&str, Vec<&Changeset>> = IndexMap::new();
        let mut unknown: IndexSet<&str> = IndexSet::new();

        for changeset in changesets {
            for name in changeset.packages() {
                if self.graph.has_package(name) {
                    buckets.entry(name).or_default().push(changeset);
                } else {
                    unknown.insert(name);
                }
            }
        }

        (buckets, unknown.into_iter().map(str::to_string).collect())
    }

    fn plan_release(&self, package: &Package, bucket: &[&Changeset]) -> Result<Release> {
        let bumps: Vec<BumpType> = bucket
            .iter()
            .filter_map(|changeset| changeset.bump_for(&package.name))
            .collect();
        let bump_type = max_bump_type(&bumps);

        let old_version = package.version.parse::<Version>().map_err(|source| {
            OperationError::InvalidPackageVersion {
                package: package.name.clone(),
                source,
            }
        })?;
        let new_version =
            old_version
                .bump(bump_type)
                .map_err(|source| OperationError::BumpOverflow {
                    package: package.name.clone(),
                    source,
                })?;
        let dependents = self.dependents_to_update(&package.name, bump_type)?;

        debug!(
            package = %package.name,
            bump = %bump_type,
            from = %old_version,
            to = %new_version,
            dependents = dependents.len(),
            "planned release"
        );

        Ok(Release {
            name: package.name.clone(),
            bump_type,
            old_version,
            new_version,
            changesets: bucket.iter().map(|c| c.id.clone()).collect(),
            dependents,
        })
    }

    /// A transitive dependent is recorded when the bump is major, or when
    /// its requirement on `name` still accepts the bump.
    fn dependents_to_update(&self, name: &str, bump_type: BumpType) -> Result<Vec<String>> {
        let mut recorded = Vec::new();

        for dependent in self.graph.all_dependents(name)? {
            if dependent == name {
                continue;
            }
            let requirement = self
                .graph
                .package(dependent)
                .and_then(|package| package.dependency_requirement(name));
            let accepts = requirement
                .map(RequirementOperator::classify)
                .is_some_and(|operator| operator.accepts(bump_type));

            if bump_type.is_breaking() || accepts {
                recorded.push(dependent.to_string());
            }
        }

        Ok(recorded)
    }

    /// Checks every release against the package set.
    #[must_use]
    pub fn validate_release_plan(&self, releases: &[Release]) -> Vec<PlanViolation> {
        let mut violations = Vec::new();

        for release in releases {
            if !self.graph.has_package(&release.name) {
                violations.push(PlanViolation::UnknownPackage {
                    package: release.name.clone(),
                });
                continue;
            }

            if release.new_version <= release.old_version {
                violations.push(PlanViolation::VersionNotIncreased {
                    package: release.name.clone(),
                    old_version: release.old_version.clone(),
                    new_version: release.new_version.clone(),
                });
            }

            if release.changesets.is_empty() {
                violations.push(PlanViolation::NoChangesets {
                    package: release.name.clone(),
                });
            }

            for dependent in &release.dependents {
                if !self.graph.has_package(dependent) {
                    violations.push(PlanViolation::UnknownDependent {
                        package: release.name.clone(),
                        dependent: dependent.clone(),
                    });
                }
            }
        }

        violations
    }
}

/// Emits every release after the releases of its recorded dependents.
fn order_releases(releases: Vec<Release>) -> Vec<Release> {
    let index: IndexMap<&str, usize> = releases
        .iter()
        .enumerate()
        .map(|(i, release)| (release.name.as_str(), i))
        .collect();

    let mut visited = vec![false; releases.len()];
    let mut order = Vec::with_capacity(releases.len());
    let mut stack: Vec<(usize, usize)> = Vec::new();

    for start in 0..releases.len() {
        if visited[start] {
            continue;
        }
        visited[start] = true;
        stack.push((start, 0));

        while let Some((node, cursor)) = stack.last_mut() {
            let node = *node;
            let next = releases[node].dependents.get(*cursor);
            *cursor += 1;

            match next {
                Some(dependent) => {
                    let Some(&target) = index.get(dependent.as_str()) else {
                        continue;
                    };
                    if !visited[target] {
                        visited[target] = true;
                        stack.push((target, 0));
                    }
                }
                None => {
                    stack.pop();
                    order.push(node);
                }
            }
        }
    }

    let mut slots: Vec<Option<Release>> = releases.into_iter().map(Some).collect();
    order
        .into_iter()
        .filter_map(|i| slots[i].take())
        .collect()
}
