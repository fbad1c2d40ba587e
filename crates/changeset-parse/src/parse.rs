use indexmap::IndexMap;
use serde::Deserialize;
use serde_with::{MapPreventDuplicates, serde_as};

use changeset_core::{BumpType, Changeset};

use crate::error::FormatError;

pub(crate) const DELIMITER: &str = "---";

/// Changeset files are a handful of lines; anything past this is not one.
const MAX_CHANGESET_BYTES: usize = 1024 * 1024;

/// Package name to bump literal, in file order.
#[serde_as]
#[derive(Deserialize)]
#[serde(transparent)]
struct FrontMatter(#[serde_as(as = "MapPreventDuplicates<_, _>")] IndexMap<String, String>);

fn is_delimiter(line: &str) -> bool {
    line.trim_end() == DELIMITER
}

/// Splits `content` into the front matter text and the trimmed summary.
fn split_sections(id: &str, content: &str) -> Result<(String, String), FormatError> {
    let mut lines = content.lines().skip_while(|line| line.trim().is_empty());

    if !lines.next().is_some_and(is_delimiter) {
        return Err(FormatError::MissingFrontMatter { id: id.to_string() });
    }

    let mut front_matter = Vec::new();
    loop {
        match lines.next() {
            Some(line) if is_delimiter(line) => break,
            Some(line) => front_matter.push(line),
            None => return Err(FormatError::UnclosedFrontMatter { id: id.to_string() }),
        }
    }

    let summary = lines.collect::<Vec<_>>().join("\n");
    Ok((front_matter.join("\n"), summary.trim().to_string()))
}

fn parse_releases(id: &str, front_matter: &str) -> Result<IndexMap<String, BumpType>, FormatError> {
    if front_matter.trim().is_empty() {
        return Ok(IndexMap::new());
    }

    let FrontMatter(entries) =
        serde_yml::from_str(front_matter).map_err(|source| FormatError::Yaml {
            id: id.to_string(),
            source,
        })?;

    entries
        .into_iter()
        .map(|(package, literal)| match literal.parse::<BumpType>() {
            Ok(bump_type) => Ok((package, bump_type)),
            Err(source) => Err(FormatError::InvalidBump {
                id: id.to_string(),
                package,
                source,
            }),
        })
        .collect()
}

/// Parses the content of a changeset file. `id` identifies the changeset,
/// conventionally the file stem, and is carried by every error.
///
/// # Errors
///
/// Returns [`FormatError`] when the front matter is missing or unclosed,
/// is not a mapping, names a package twice, uses an unknown bump literal,
/// or declares no release.
#[must_use = "parsing result should be handled"]
pub fn parse_changeset(id: &str, content: &str) -> Result<Changeset, FormatError> {
    if content.len() > MAX_CHANGESET_BYTES {
        return Err(FormatError::TooLarge {
            id: id.to_string(),
            max_bytes: MAX_CHANGESET_BYTES,
        });
    }

    let (front_matter, summary) = split_sections(id, content)?;
    let releases = parse_releases(id, &front_matter)?;
    if releases.is_empty() {
        return Err(FormatError::NoReleases { id: id.to_string() });
    }

    Ok(Changeset {
        id: id.to_string(),
        releases,
        summary,
    })
}
