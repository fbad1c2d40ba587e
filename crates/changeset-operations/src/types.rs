use std::path::PathBuf;

use changeset_core::BumpType;
use changeset_version::Version;
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// A planned version change for one package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Release {
    pub name: String,
    #[serde(rename = "type")]
    pub bump_type: BumpType,
    pub old_version: Version,
    pub new_version: Version,
    /// Ids of the changesets justifying this release.
    pub changesets: Vec<String>,
    /// Other packages whose requirement on this one must be rewritten.
    pub dependents: Vec<String>,
}

impl Release {
    #[must_use]
    pub fn has_dependents(&self) -> bool {
        !self.dependents.is_empty()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct VersionTypeCounts {
    pub major: usize,
    pub minor: usize,
    pub patch: usize,
    pub none: usize,
}

impl VersionTypeCounts {
    fn record(&mut self, bump_type: BumpType) {
        match bump_type {
            BumpType::Major => self.major += 1,
            BumpType::Minor => self.minor += 1,
            BumpType::Patch => self.patch += 1,
            BumpType::None => self.none += 1,
        }
    }
}

/// Aggregate view over a list of releases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseSummary {
    pub total_releases: usize,
    pub packages: Vec<String>,
    pub version_types: VersionTypeCounts,
    /// Changeset ids across all releases, deduplicated in first-seen order.
    pub changesets: Vec<String>,
    pub changeset_count: usize,
}

impl ReleaseSummary {
    #[must_use]
    pub fn from_releases(releases: &[Release]) -> Self {
        let mut version_types = VersionTypeCounts::default();
        let mut changesets: IndexSet<&str> = IndexSet::new();

        for release in releases {
            version_types.record(release.bump_type);
            changesets.extend(release.changesets.iter().map(String::as_str));
        }

        let changesets: Vec<String> = changesets.into_iter().map(str::to_string).collect();
        Self {
            total_releases: releases.len(),
            packages: releases.iter().map(|r| r.name.clone()).collect(),
            version_types,
            changeset_count: changesets.len(),
            changesets,
        }
    }
}

/// Everything a changelog writer needs to record one release.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangelogEntry {
    pub package: String,
    pub directory: PathBuf,
    pub bump_type: BumpType,
    pub previous_version: Version,
    pub version: Version,
    /// Summaries of the contributing changesets, in release order.
    pub summaries: Vec<String>,
    pub dependents: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseTag {
    pub name: String,
    pub package: String,
    pub version: Version,
    pub message: String,
}
