use changeset_core::Changeset;
use changeset_parse::{FormatError, parse_changeset};
use tracing::warn;

#[derive(Debug)]
pub struct SkippedChangeset {
    pub id: String,
    pub error: FormatError,
}

#[derive(Debug, Default)]
pub struct ChangesetCollection {
    pub changesets: Vec<Changeset>,
    /// Sources that failed to parse. They do not stop the collection.
    pub skipped: Vec<SkippedChangeset>,
}

/// Parses `(id, content)` sources into changesets, skipping unreadable ones.
#[must_use]
pub fn collect_changesets<'a, I>(sources: I) -> ChangesetCollection
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut collection = ChangesetCollection::default();

    for (id, content) in sources {
        match parse_changeset(id, content) {
            Ok(changeset) => collection.changesets.push(changeset),
            Err(error) => {
                warn!(changeset = %id, %error, "skipping unparseable changeset");
                collection.skipped.push(SkippedChangeset {
                    id: id.to_string(),
                    error,
                });
            }
        }
    }

    collection
}

#[cfg(test)]
mod tests {
    use changeset_core::BumpType;

    use super::*;

    #[test]
    fn skips_broken_sources_and_keeps_order() {
        let sources = [
            ("first", "---\n\"acme/a\": minor\n---\nFirst.\n"),
            ("broken", "no front matter"),
            ("second", "---\n\"acme/b\": patch\n---\nSecond.\n"),
        ];

        let collection = collect_changesets(sources);

        let ids: Vec<&str> = collection.changesets.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["first", "second"]);
        assert_eq!(collection.changesets[0].bump_for("acme/a"), Some(BumpType::Minor));
        assert_eq!(collection.skipped.len(), 1);
        assert_eq!(collection.skipped[0].id, "broken");
        assert!(matches!(
            collection.skipped[0].error,
            FormatError::MissingFrontMatter { .. }
        ));
        assert_eq!(collection.skipped[0].error.id(), "broken");
    }

    #[test]
    fn empty_input() {
        let collection = collect_changesets(std::iter::empty());

        assert!(collection.changesets.is_empty());
        assert!(collection.skipped.is_empty());
    }
}
