use changeset_core::ChangesetError;
use thiserror::Error;

/// A changeset file that cannot be read or written. Every variant names the
/// changeset it concerns.
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("changeset '{id}' does not start with a '---' line")]
    MissingFrontMatter { id: String },

    #[error("changeset '{id}' front matter is not closed by a '---' line")]
    UnclosedFrontMatter { id: String },

    #[error("changeset '{id}' declares no package release")]
    NoReleases { id: String },

    #[error("changeset '{id}' has an invalid bump for package '{package}'")]
    InvalidBump {
        id: String,
        package: String,
        #[source]
        source: ChangesetError,
    },

    #[error("changeset '{id}' front matter is not a package-to-bump mapping: {source}")]
    Yaml {
        id: String,
        #[source]
        source: serde_yml::Error,
    },

    #[error("changeset '{id}' is larger than {max_bytes} bytes")]
    TooLarge { id: String, max_bytes: usize },
}

impl FormatError {
    /// Id of the changeset the error concerns.
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::MissingFrontMatter { id }
            | Self::UnclosedFrontMatter { id }
            | Self::NoReleases { id }
            | Self::InvalidBump { id, .. }
            | Self::Yaml { id, .. }
            | Self::TooLarge { id, .. } => id,
        }
    }
}
