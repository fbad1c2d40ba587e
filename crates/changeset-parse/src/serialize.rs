use changeset_core::Changeset;

use crate::error::FormatError;
use crate::parse::DELIMITER;

/// Renders `changeset` in the changeset file format. The id is not part of
/// the content; it travels as the file name.
///
/// # Errors
///
/// Returns [`FormatError`] if the changeset has no release or the front
/// matter cannot be encoded.
#[must_use = "serialization result should be handled"]
pub fn serialize_changeset(changeset: &Changeset) -> Result<String, FormatError> {
    if changeset.releases.is_empty() {
        return Err(FormatError::NoReleases {
            id: changeset.id.clone(),
        });
    }

    let yaml = serde_yml::to_string(&changeset.releases).map_err(|source| FormatError::Yaml {
        id: changeset.id.clone(),
        source,
    })?;

    let mut output = String::new();
    output.push_str(DELIMITER);
    output.push('\n');
    output.push_str(&yaml);
    output.push_str(DELIMITER);
    output.push('\n');

    if !changeset.summary.is_empty() {
        output.push_str(&changeset.summary);
        output.push('\n');
    }

    Ok(output)
}
