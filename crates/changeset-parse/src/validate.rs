use std::fmt;

use changeset_core::Changeset;

/// A structural problem found in a changeset. Advisory: callers decide
/// whether any of these block a release.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangesetIssue {
    MissingId,
    NoReleases,
    EmptySummary,
    EmptyPackageName,
    OutsideNamespace { package: String, prefix: String },
}

impl fmt::Display for ChangesetIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingId => write!(f, "changeset id is required"),
            Self::NoReleases => write!(f, "at least one package release is required"),
            Self::EmptySummary => write!(f, "changeset summary is required"),
            Self::EmptyPackageName => write!(f, "package name cannot be empty"),
            Self::OutsideNamespace { package, prefix } => {
                write!(f, "package name '{package}' must start with '{prefix}'")
            }
        }
    }
}

/// Collects every structural issue of `changeset`. With a non-empty
/// `internal_prefix`, every named package must carry it.
#[must_use]
pub fn validate_changeset(changeset: &Changeset, internal_prefix: &str) -> Vec<ChangesetIssue> {
    let mut issues = Vec::new();

    if changeset.id.trim().is_empty() {
        issues.push(ChangesetIssue::MissingId);
    }
    if changeset.is_empty() {
        issues.push(ChangesetIssue::NoReleases);
    }
    if changeset.summary.trim().is_empty() {
        issues.push(ChangesetIssue::EmptySummary);
    }

    for package in changeset.packages() {
        if package.trim().is_empty() {
            issues.push(ChangesetIssue::EmptyPackageName);
        } else if !package.starts_with(internal_prefix) {
            issues.push(ChangesetIssue::OutsideNamespace {
                package: package.to_string(),
                prefix: internal_prefix.to_string(),
            });
        }
    }

    issues
}

#[cfg(test)]
mod tests {
    use changeset_core::BumpType;

    use super::*;

    #[test]
    fn well_formed_changeset_has_no_issues() {
        let changeset = Changeset::new("c1", "Fix").with_release("acme/a", BumpType::Patch);

        assert!(validate_changeset(&changeset, "acme/").is_empty());
    }

    #[test]
    fn collects_all_issues() {
        let changeset = Changeset::new(" ", "  ");

        assert_eq!(
            validate_changeset(&changeset, ""),
            vec![
                ChangesetIssue::MissingId,
                ChangesetIssue::NoReleases,
                ChangesetIssue::EmptySummary,
            ]
        );
    }

    #[test]
    fn flags_empty_and_foreign_package_names() {
        let changeset = Changeset::new("c1", "Fix")
            .with_release("", BumpType::Patch)
            .with_release("vendor/x", BumpType::Patch);

        let issues = validate_changeset(&changeset, "acme/");

        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0], ChangesetIssue::EmptyPackageName);
        assert_eq!(
            issues[1].to_string(),
            "package name 'vendor/x' must start with 'acme/'"
        );
    }

    #[test]
    fn empty_prefix_accepts_any_name() {
        let changeset = Changeset::new("c1", "Fix").with_release("anything", BumpType::Minor);

        assert!(validate_changeset(&changeset, "").is_empty());
    }
}
