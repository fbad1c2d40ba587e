use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GraphError {
    #[error("package '{name}' is not part of the dependency graph")]
    UnknownPackage { name: String },

    #[error("package '{name}' is declared more than once")]
    DuplicatePackage { name: String },
}
