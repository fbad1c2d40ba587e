mod changelog_writer;
mod manifest_writer;

pub use changelog_writer::ChangelogWriter;
pub use manifest_writer::ManifestWriter;
