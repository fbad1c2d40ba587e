use std::cmp::Ordering;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::ChangesetError;

/// Magnitude of a semantic-version increment.
///
/// Ordering is defined by [`BumpType::ordinal`], never by declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BumpType {
    Major,
    Minor,
    Patch,
    #[default]
    None,
}

impl BumpType {
    #[must_use]
    pub const fn ordinal(self) -> u8 {
        match self {
            Self::None => 0,
            Self::Patch => 1,
            Self::Minor => 2,
            Self::Major => 3,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Major => "major",
            Self::Minor => "minor",
            Self::Patch => "patch",
            Self::None => "none",
        }
    }

    #[must_use]
    pub fn is_breaking(self) -> bool {
        self == Self::Major
    }

    #[must_use]
    pub fn is_feature(self) -> bool {
        self == Self::Minor
    }

    #[must_use]
    pub fn is_fix(self) -> bool {
        self == Self::Patch
    }

    #[must_use]
    pub fn is_none(self) -> bool {
        self == Self::None
    }
}

impl PartialOrd for BumpType {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for BumpType {
    fn cmp(&self, other: &Self) -> Ordering {
        self.ordinal().cmp(&other.ordinal())
    }
}

impl fmt::Display for BumpType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BumpType {
    type Err = ChangesetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "major" => Ok(Self::Major),
            "minor" => Ok(Self::Minor),
            "patch" => Ok(Self::Patch),
            "none" => Ok(Self::None),
            other => Err(ChangesetError::InvalidBumpType(other.to_string())),
        }
    }
}

/// A package of the monorepo as read from its manifest.
///
/// `dependencies` maps a dependency name to the requirement string declared
/// for it (`^1.2.0`, `~1.2.0`, `1.2.0`, ...). External dependencies are kept
/// here as well; the dependency graph filters them out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Package {
    pub name: String,
    pub version: String,
    pub directory: PathBuf,
    #[serde(default)]
    pub private: bool,
    #[serde(default)]
    pub dependencies: IndexMap<String, String>,
}

impl Package {
    #[must_use]
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            directory: PathBuf::from(&name),
            name,
            version: version.into(),
            private: false,
            dependencies: IndexMap::new(),
        }
    }

    #[must_use]
    pub fn with_directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.directory = directory.into();
        self
    }

    #[must_use]
    pub fn with_private(mut self, private: bool) -> Self {
        self.private = private;
        self
    }

    #[must_use]
    pub fn with_dependency(
        mut self,
        name: impl Into<String>,
        requirement: impl Into<String>,
    ) -> Self {
        self.dependencies.insert(name.into(), requirement.into());
        self
    }

    /// Returns a copy of this package carrying `version`.
    #[must_use]
    pub fn with_version(&self, version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            ..self.clone()
        }
    }

    /// Returns a copy of this package with its dependency table replaced.
    #[must_use]
    pub fn with_dependencies(&self, dependencies: IndexMap<String, String>) -> Self {
        Self {
            dependencies,
            ..self.clone()
        }
    }

    #[must_use]
    pub fn dependency_requirement(&self, name: &str) -> Option<&str> {
        self.dependencies.get(name).map(String::as_str)
    }

    #[must_use]
    pub fn has_dependency(&self, name: &str) -> bool {
        self.dependencies.contains_key(name)
    }

    #[must_use]
    pub fn is_internal(&self, prefix: &str) -> bool {
        self.name.starts_with(prefix)
    }
}

/// A pending change declaration naming one or more packages and the minimum
/// bump each of them needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Changeset {
    pub id: String,
    pub releases: IndexMap<String, BumpType>,
    pub summary: String,
}

impl Changeset {
    #[must_use]
    pub fn new(id: impl Into<String>, summary: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            releases: IndexMap::new(),
            summary: summary.into(),
        }
    }

    #[must_use]
    pub fn with_release(mut self, package: impl Into<String>, bump_type: BumpType) -> Self {
        self.releases.insert(package.into(), bump_type);
        self
    }

    #[must_use]
    pub fn bump_for(&self, package: &str) -> Option<BumpType> {
        self.releases.get(package).copied()
    }

    #[must_use]
    pub fn targets(&self, package: &str) -> bool {
        self.releases.contains_key(package)
    }

    pub fn packages(&self) -> impl Iterator<Item = &str> {
        self.releases.keys().map(String::as_str)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.releases.is_empty()
    }
}
