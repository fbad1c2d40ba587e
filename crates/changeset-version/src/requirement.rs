use changeset_core::BumpType;

/// The range operator leading a declared dependency requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequirementOperator {
    /// `^1.2.0`
    Caret,
    /// `~1.2.0`
    Tilde,
    /// An exact pin or any other form.
    Pinned,
}

impl RequirementOperator {
    #[must_use]
    pub fn classify(requirement: &str) -> Self {
        if requirement.starts_with('^') {
            Self::Caret
        } else if requirement.starts_with('~') {
            Self::Tilde
        } else {
            Self::Pinned
        }
    }

    /// Whether a requirement with this operator stays compatible with a
    /// release of the given bump.
    #[must_use]
    pub fn accepts(self, bump_type: BumpType) -> bool {
        match self {
            Self::Caret => bump_type != BumpType::Major,
            Self::Tilde => bump_type == BumpType::Patch,
            Self::Pinned => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_by_prefix() {
        assert_eq!(RequirementOperator::classify("^1.0.0"), RequirementOperator::Caret);
        assert_eq!(RequirementOperator::classify("~1.0.0"), RequirementOperator::Tilde);
        assert_eq!(RequirementOperator::classify("1.0.0"), RequirementOperator::Pinned);
        assert_eq!(RequirementOperator::classify(">=1.0"), RequirementOperator::Pinned);
        assert_eq!(RequirementOperator::classify(""), RequirementOperator::Pinned);
    }

    #[test]
    fn caret_accepts_everything_but_major() {
        let op = RequirementOperator::Caret;
        assert!(op.accepts(BumpType::Patch));
        assert!(op.accepts(BumpType::Minor));
        assert!(op.accepts(BumpType::None));
        assert!(!op.accepts(BumpType::Major));
    }

    #[test]
    fn tilde_accepts_only_patch() {
        let op = RequirementOperator::Tilde;
        assert!(op.accepts(BumpType::Patch));
        assert!(!op.accepts(BumpType::Minor));
        assert!(!op.accepts(BumpType::Major));
        assert!(!op.accepts(BumpType::None));
    }

    #[test]
    fn pinned_accepts_nothing() {
        for bump in [BumpType::None, BumpType::Patch, BumpType::Minor, BumpType::Major] {
            assert!(!RequirementOperator::Pinned.accepts(bump));
        }
    }
}
