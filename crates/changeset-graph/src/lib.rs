//! Directed graph of the internal dependencies between monorepo packages.
//!
//! Packages are mapped to dense indices at construction; every traversal runs
//! over an explicit stack so deep dependency chains cannot exhaust the call
//! stack, and every traversal terminates on cyclic input.

mod error;
mod graph;

pub use error::GraphError;
pub use graph::{DependencyGraph, GraphStats};
