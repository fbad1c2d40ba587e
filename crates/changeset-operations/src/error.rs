use changeset_graph::GraphError;
use changeset_version::VersionError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OperationError {
    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error("invalid version for package '{package}'")]
    InvalidPackageVersion {
        package: String,
        #[source]
        source: VersionError,
    },

    #[error("cannot bump package '{package}'")]
    BumpOverflow {
        package: String,
        #[source]
        source: VersionError,
    },

    #[error("unknown package '{name}' (available: {available})")]
    UnknownPackage { name: String, available: String },

    #[error("IO error")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, OperationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_package_error_includes_name_and_available() {
        let err = OperationError::UnknownPackage {
            name: "missing".to_string(),
            available: "foo, bar".to_string(),
        };

        let msg = err.to_string();

        assert!(msg.contains("missing"));
        assert!(msg.contains("foo, bar"));
    }

    #[test]
    fn invalid_version_error_keeps_source() {
        let err = OperationError::InvalidPackageVersion {
            package: "acme/a".to_string(),
            source: VersionError::Malformed {
                version: "one".to_string(),
            },
        };

        assert!(err.to_string().contains("acme/a"));
        let source = std::error::Error::source(&err).expect("has source");
        assert!(source.to_string().contains("'one'"));
    }

    #[test]
    fn graph_error_is_transparent() {
        let err: OperationError = GraphError::DuplicatePackage {
            name: "acme/a".to_string(),
        }
        .into();

        assert_eq!(err.to_string(), "package 'acme/a' is declared more than once");
    }
}
