use serde::Deserialize;

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub(crate) struct RawConfig {
    #[serde(default, rename = "internal-prefix")]
    pub(crate) internal_prefix: Option<String>,
    #[serde(default, rename = "private-packages")]
    pub(crate) private_packages: Option<RawPrivatePackages>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub(crate) struct RawPrivatePackages {
    pub(crate) version: Option<bool>,
    pub(crate) tag: Option<bool>,
}
