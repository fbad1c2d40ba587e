use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use changeset_core::BumpType;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::VersionError;

/// A semantic version value.
///
/// Ordering compares the numeric triple, then ranks a version without a
/// pre-release label above one with a label, then compares labels
/// lexicographically. Build metadata never takes part in comparison, and
/// equality follows the ordering.
#[derive(Debug, Clone)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    pub prerelease: Option<String>,
    pub build: Option<String>,
}

impl Version {
    #[must_use]
    pub const fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
            prerelease: None,
            build: None,
        }
    }

    #[must_use]
    pub fn with_prerelease(mut self, prerelease: impl Into<String>) -> Self {
        self.prerelease = Some(prerelease.into());
        self
    }

    #[must_use]
    pub fn with_build(mut self, build: impl Into<String>) -> Self {
        self.build = Some(build.into());
        self
    }

    #[must_use]
    pub fn without_prerelease(mut self) -> Self {
        self.prerelease = None;
        self
    }

    #[must_use]
    pub fn without_build(mut self) -> Self {
        self.build = None;
        self
    }

    /// Applies `bump_type`. Every real bump drops pre-release and build
    /// labels; [`BumpType::None`] returns the version untouched.
    ///
    /// # Errors
    ///
    /// Returns [`VersionError::Overflow`] if the bumped component is already
    /// `u64::MAX`.
    pub fn bump(&self, bump_type: BumpType) -> Result<Self, VersionError> {
        let overflow = || VersionError::Overflow {
            version: self.to_string(),
            bump: bump_type,
        };

        Ok(match bump_type {
            BumpType::Major => Self::new(self.major.checked_add(1).ok_or_else(overflow)?, 0, 0),
            BumpType::Minor => Self::new(
                self.major,
                self.minor.checked_add(1).ok_or_else(overflow)?,
                0,
            ),
            BumpType::Patch => Self::new(
                self.major,
                self.minor,
                self.patch.checked_add(1).ok_or_else(overflow)?,
            ),
            BumpType::None => self.clone(),
        })
    }

    #[must_use]
    pub fn is_prerelease(&self) -> bool {
        self.prerelease.is_some()
    }

    #[must_use]
    pub fn is_stable(&self) -> bool {
        !self.is_prerelease()
    }
}

fn is_label(s: &str) -> bool {
    !s.is_empty()
        && s
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'.' || b == b'-')
}

fn numeric(part: Option<&str>) -> Option<u64> {
    let part = part?;
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}

impl FromStr for Version {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || VersionError::Malformed {
            version: s.to_string(),
        };

        let (rest, build) = match s.split_once('+') {
            Some((rest, build)) if is_label(build) => (rest, Some(build.to_string())),
            Some(_) => return Err(malformed()),
            None => (s, None),
        };

        let (triple, prerelease) = match rest.split_once('-') {
            Some((triple, pre)) if is_label(pre) => (triple, Some(pre.to_string())),
            Some(_) => return Err(malformed()),
            None => (rest, None),
        };

        let mut parts = triple.split('.');
        let major = numeric(parts.next()).ok_or_else(malformed)?;
        let minor = numeric(parts.next()).ok_or_else(malformed)?;
        let patch = numeric(parts.next()).ok_or_else(malformed)?;
        if parts.next().is_some() {
            return Err(malformed());
        }

        Ok(Self {
            major,
            minor,
            patch,
            prerelease,
            build,
        })
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if let Some(pre) = &self.prerelease {
            write!(f, "-{pre}")?;
        }
        if let Some(build) = &self.build {
            write!(f, "+{build}")?;
        }
        Ok(())
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Version {}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        self.major
            .cmp(&other.major)
            .then(self.minor.cmp(&other.minor))
            .then(self.patch.cmp(&other.patch))
            .then_with(|| match (&self.prerelease, &other.prerelease) {
                (None, None) => Ordering::Equal,
                (None, Some(_)) => Ordering::Greater,
                (Some(_), None) => Ordering::Less,
                (Some(a), Some(b)) => a.cmp(b),
            })
    }
}

impl Serialize for Version {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Version {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
