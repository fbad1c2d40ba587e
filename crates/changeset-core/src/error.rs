use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChangesetError {
    #[error("invalid bump type '{0}' (expected one of: none, patch, minor, major)")]
    InvalidBumpType(String),
}

pub type Result<T> = std::result::Result<T, ChangesetError>;
