use crate::Result;
use crate::types::ChangelogEntry;

pub trait ChangelogWriter: Send + Sync {
    /// # Errors
    ///
    /// Returns an error if the changelog cannot be read or written.
    fn write_release(&self, entry: &ChangelogEntry) -> Result<()>;
}
