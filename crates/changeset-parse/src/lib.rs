//! Reading and writing changeset files.
//!
//! A changeset file carries YAML front matter mapping package names to bump
//! types, followed by a markdown summary:
//!
//! ```text
//! ---
//! "acme/http": minor
//! "acme/cli": patch
//! ---
//! Add request retries.
//! ```
//!
//! Every [`FormatError`] carries the id of the changeset it concerns.

mod error;
mod parse;
mod serialize;
mod validate;

pub use error::FormatError;
pub use parse::parse_changeset;
pub use serialize::serialize_changeset;
pub use validate::{ChangesetIssue, validate_changeset};
