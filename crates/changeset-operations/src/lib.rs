//! Release planning for changeset-managed monorepos.
//!
//! [`ReleasePlanner`] turns pending changesets and the package set into an
//! ordered list of [`Release`]s. [`ReleaseApplier`] hands that list to the
//! manifest and changelog writers.

mod apply;
mod collect;
mod error;
mod planner;
pub mod traits;
mod types;

#[cfg(test)]
pub mod mocks;

pub use apply::{ApplyReport, ReleaseApplier, ReleaseViolation, release_commit_message};
pub use collect::{ChangesetCollection, SkippedChangeset, collect_changesets};
pub use error::{OperationError, Result};
pub use planner::{PlanViolation, ReleasePlan, ReleasePlanner};
pub use types::{ChangelogEntry, Release, ReleaseSummary, ReleaseTag, VersionTypeCounts};
