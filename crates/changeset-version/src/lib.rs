mod error;
mod requirement;
mod version;

use changeset_core::BumpType;

pub use error::VersionError;
pub use requirement::RequirementOperator;
pub use version::Version;

/// Returns the dominant bump of `bumps`, or [`BumpType::None`] when empty.
#[must_use]
pub fn max_bump_type(bumps: &[BumpType]) -> BumpType {
    bumps.iter().copied().max().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn max_bump_type_empty_is_none() {
        assert_eq!(max_bump_type(&[]), BumpType::None);
    }

    #[test]
    fn max_bump_type_picks_highest() {
        assert_eq!(
            max_bump_type(&[BumpType::Patch, BumpType::Minor, BumpType::Patch]),
            BumpType::Minor
        );
        assert_eq!(
            max_bump_type(&[BumpType::None, BumpType::Major]),
            BumpType::Major
        );
    }
}
