use std::path::Path;

use crate::error::ConfigError;
use crate::raw::{RawConfig, RawPrivatePackages};

pub const DEFAULT_CONFIG_FILE: &str = ".changeset/config.toml";

/// How private packages take part in a release.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrivatePackagesConfig {
    version: bool,
    tag: bool,
}

impl Default for PrivatePackagesConfig {
    fn default() -> Self {
        Self {
            version: true,
            tag: false,
        }
    }
}

impl PrivatePackagesConfig {
    #[must_use]
    pub fn new(version: bool, tag: bool) -> Self {
        Self { version, tag }
    }

    /// Whether private packages get their manifest version rewritten.
    #[must_use]
    pub fn version(&self) -> bool {
        self.version
    }

    /// Whether release tags are created for private packages.
    #[must_use]
    pub fn tag(&self) -> bool {
        self.tag
    }

    fn from_raw(raw: Option<RawPrivatePackages>) -> Self {
        let defaults = Self::default();
        match raw {
            None => defaults,
            Some(raw) => Self {
                version: raw.version.unwrap_or(defaults.version),
                tag: raw.tag.unwrap_or(defaults.tag),
            },
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangesetConfig {
    internal_prefix: String,
    private_packages: PrivatePackagesConfig,
}

impl ChangesetConfig {
    /// Loads the configuration at `path`. A missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        let raw: RawConfig = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::from_raw(raw))
    }

    /// # Errors
    ///
    /// Returns an error if `content` is not a valid configuration document.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = toml::from_str(content)?;
        Ok(Self::from_raw(raw))
    }

    fn from_raw(raw: RawConfig) -> Self {
        Self {
            internal_prefix: raw.internal_prefix.unwrap_or_default(),
            private_packages: PrivatePackagesConfig::from_raw(raw.private_packages),
        }
    }

    /// Name prefix shared by the packages of this repository. Empty means
    /// every package counts as internal.
    #[must_use]
    pub fn internal_prefix(&self) -> &str {
        &self.internal_prefix
    }

    #[must_use]
    pub fn private_packages(&self) -> PrivatePackagesConfig {
        self.private_packages
    }

    #[must_use]
    pub fn with_internal_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.internal_prefix = prefix.into();
        self
    }

    #[must_use]
    pub fn with_private_packages(mut self, private_packages: PrivatePackagesConfig) -> Self {
        self.private_packages = private_packages;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = ChangesetConfig::default();

        assert_eq!(config.internal_prefix(), "");
        assert!(config.private_packages().version());
        assert!(!config.private_packages().tag());
    }

    #[test]
    fn empty_document_yields_defaults() {
        let config = ChangesetConfig::from_toml_str("").expect("valid");

        assert_eq!(config, ChangesetConfig::default());
    }

    #[test]
    fn reads_all_settings() {
        let config = ChangesetConfig::from_toml_str(
            r#"
internal-prefix = "acme/"

[private-packages]
version = false
tag = true
"#,
        )
        .expect("valid");

        assert_eq!(config.internal_prefix(), "acme/");
        assert_eq!(config.private_packages(), PrivatePackagesConfig::new(false, true));
    }

    #[test]
    fn partial_private_packages_keeps_defaults() {
        let config = ChangesetConfig::from_toml_str("[private-packages]\ntag = true\n")
            .expect("valid");

        assert!(config.private_packages().version());
        assert!(config.private_packages().tag());
    }

    #[test]
    fn unknown_key_rejected() {
        let err = ChangesetConfig::from_toml_str("base-branch = \"main\"\n").expect_err("unknown key");

        assert!(matches!(err, ConfigError::TomlParse(_)));
    }

    #[test]
    fn wrong_type_rejected() {
        assert!(ChangesetConfig::from_toml_str("internal-prefix = 3\n").is_err());
    }
}
