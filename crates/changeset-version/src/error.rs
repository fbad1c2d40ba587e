use changeset_core::BumpType;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum VersionError {
    #[error("malformed version '{version}' (expected MAJOR.MINOR.PATCH[-prerelease][+build])")]
    Malformed { version: String },

    #[error("cannot apply a {bump} bump to {version}: component overflows")]
    Overflow { version: String, bump: BumpType },
}
