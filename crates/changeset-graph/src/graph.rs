use changeset_core::Package;
use indexmap::IndexMap;
use indexmap::map::Entry;
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::GraphError;

#[derive(Debug, Clone)]
struct Edge {
    target: usize,
    requirement: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Color {
    Unvisited,
    InProgress,
    Done,
}

/// Aggregate figures about a [`DependencyGraph`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphStats {
    pub total_packages: usize,
    pub internal_packages: usize,
    pub external_packages: usize,
    pub has_circular_dependencies: bool,
    pub circular_dependency_count: usize,
}

/// Immutable dependency graph built from a package set.
///
/// Only edges between packages of the set are recorded; requirements on
/// anything else are invisible here. `dependencies[i]` and `dependents[i]`
/// are exact inverses of each other.
#[derive(Debug, Clone)]
pub struct DependencyGraph {
    packages: IndexMap<String, Package>,
    dependencies: Vec<Vec<Edge>>,
    dependents: Vec<Vec<Edge>>,
    internal_prefix: String,
}

impl DependencyGraph {
    /// Builds the graph for `packages`, keeping their order.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::DuplicatePackage`] if two packages share a name.
    pub fn build(packages: &[Package]) -> Result<Self, GraphError> {
        let mut lookup: IndexMap<String, Package> = IndexMap::with_capacity(packages.len());
        for package in packages {
            match lookup.entry(package.name.clone()) {
                Entry::Occupied(_) => {
                    return Err(GraphError::DuplicatePackage {
                        name: package.name.clone(),
                    });
                }
                Entry::Vacant(slot) => {
                    slot.insert(package.clone());
                }
            }
        }

        let mut dependencies = vec![Vec::new(); lookup.len()];
        let mut dependents = vec![Vec::new(); lookup.len()];
        let mut edge_count = 0usize;

        for (index, package) in lookup.values().enumerate() {
            for (name, requirement) in &package.dependencies {
                let Some(target) = lookup.get_index_of(name) else {
                    continue;
                };
                dependencies[index].push(Edge {
                    target,
                    requirement: requirement.clone(),
                });
                dependents[target].push(Edge {
                    target: index,
                    requirement: requirement.clone(),
                });
                edge_count += 1;
            }
        }

        debug!(
            packages = lookup.len(),
            edges = edge_count,
            "built dependency graph"
        );

        Ok(Self {
            packages: lookup,
            dependencies,
            dependents,
            internal_prefix: String::new(),
        })
    }

    /// Sets the name prefix that marks a package as internal. The default
    /// empty prefix makes every package internal.
    #[must_use]
    pub fn with_internal_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.internal_prefix = prefix.into();
        self
    }

    #[must_use]
    pub fn internal_prefix(&self) -> &str {
        &self.internal_prefix
    }

    fn index_of(&self, name: &str) -> Result<usize, GraphError> {
        self.packages
            .get_index_of(name)
            .ok_or_else(|| GraphError::UnknownPackage {
                name: name.to_string(),
            })
    }

    fn name(&self, index: usize) -> &str {
        &self.packages[index].name
    }

    fn names(&self, indices: impl IntoIterator<Item = usize>) -> Vec<&str> {
        indices.into_iter().map(|index| self.name(index)).collect()
    }

    fn edges<'a>(&'a self, edges: &'a [Edge]) -> Vec<(&'a str, &'a str)> {
        edges
            .iter()
            .map(|edge| (self.name(edge.target), edge.requirement.as_str()))
            .collect()
    }

    /// Internal dependencies of `name` with the requirement declared on each.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::UnknownPackage`] if `name` is not in the graph.
    pub fn dependencies(&self, name: &str) -> Result<Vec<(&str, &str)>, GraphError> {
        let index = self.index_of(name)?;
        Ok(self.edges(&self.dependencies[index]))
    }

    /// Packages depending on `name` with the requirement each declares on it.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::UnknownPackage`] if `name` is not in the graph.
    pub fn dependents(&self, name: &str) -> Result<Vec<(&str, &str)>, GraphError> {
        let index = self.index_of(name)?;
        Ok(self.edges(&self.dependents[index]))
    }

    /// # Errors
    ///
    /// Returns [`GraphError::UnknownPackage`] if `name` is not in the graph.
    pub fn direct_dependents(&self, name: &str) -> Result<Vec<&str>, GraphError> {
        let index = self.index_of(name)?;
        Ok(self.names(self.dependents[index].iter().map(|edge| edge.target)))
    }

    /// Every package reachable through dependent edges from `name`, each once,
    /// in discovery order of a depth-first walk. On a cycle through `name`,
    /// `name` itself is part of the result.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::UnknownPackage`] if `name` is not in the graph.
    pub fn all_dependents(&self, name: &str) -> Result<Vec<&str>, GraphError> {
        let start = self.index_of(name)?;
        let count = self.packages.len();
        let mut expanded = vec![false; count];
        let mut discovered = vec![false; count];
        let mut order = Vec::new();

        expanded[start] = true;
        let mut stack = vec![(start, 0usize)];
        while let Some(frame) = stack.last_mut() {
            let (node, cursor) = *frame;
            let Some(edge) = self.dependents[node].get(cursor) else {
                stack.pop();
                continue;
            };
            frame.1 += 1;

            let next = edge.target;
            if !discovered[next] {
                discovered[next] = true;
                order.push(next);
            }
            if !expanded[next] {
                expanded[next] = true;
                stack.push((next, 0));
            }
        }

        Ok(self.names(order))
    }

    /// Transitive dependencies of `name` followed by `name` itself, every
    /// dependency ahead of the packages that need it.
    ///
    /// The DFS post-order is returned as is, not reversed into the
    /// dependents-first chain (`name` first) that earlier changeset tooling
    /// returned.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::UnknownPackage`] if `name` is not in the graph.
    pub fn dependency_chain(&self, name: &str) -> Result<Vec<&str>, GraphError> {
        let start = self.index_of(name)?;
        Ok(self.names(self.post_order([start])))
    }

    /// All packages, dependencies first.
    ///
    /// As with [`Self::dependency_chain`], the post-order is not reversed,
    /// so dependents come last rather than first.
    ///
    /// Covers every package exactly once. The result is only a valid
    /// topological order when [`Self::has_circular_dependencies`] is false.
    #[must_use]
    pub fn topological_order(&self) -> Vec<&str> {
        self.names(self.post_order(0..self.packages.len()))
    }

    fn post_order(&self, roots: impl IntoIterator<Item = usize>) -> Vec<usize> {
        let mut visited = vec![false; self.packages.len()];
        let mut order = Vec::with_capacity(self.packages.len());
        let mut stack: Vec<(usize, usize)> = Vec::new();

        for root in roots {
            if visited[root] {
                continue;
            }
            visited[root] = true;
            stack.push((root, 0));

            while let Some(frame) = stack.last_mut() {
                let (node, cursor) = *frame;
                let Some(edge) = self.dependencies[node].get(cursor) else {
                    order.push(node);
                    stack.pop();
                    continue;
                };
                frame.1 += 1;

                if !visited[edge.target] {
                    visited[edge.target] = true;
                    stack.push((edge.target, 0));
                }
            }
        }

        order
    }

    /// Back edges of a three-colour depth-first search over the dependency
    /// edges, as `(package, dependency)` index pairs.
    fn back_edges(&self, stop_at_first: bool) -> Vec<(usize, usize)> {
        let mut colors = vec![Color::Unvisited; self.packages.len()];
        let mut found = Vec::new();
        let mut stack: Vec<(usize, usize)> = Vec::new();

        for root in 0..self.packages.len() {
            if colors[root] != Color::Unvisited {
                continue;
            }
            colors[root] = Color::InProgress;
            stack.push((root, 0));

            while let Some(frame) = stack.last_mut() {
                let (node, cursor) = *frame;
                let Some(edge) = self.dependencies[node].get(cursor) else {
                    colors[node] = Color::Done;
                    stack.pop();
                    continue;
                };
                frame.1 += 1;

                match colors[edge.target] {
                    Color::Unvisited => {
                        colors[edge.target] = Color::InProgress;
                        stack.push((edge.target, 0));
                    }
                    Color::InProgress => {
                        found.push((node, edge.target));
                        if stop_at_first {
                            return found;
                        }
                    }
                    Color::Done => {}
                }
            }
        }

        found
    }

    #[must_use]
    pub fn has_circular_dependencies(&self) -> bool {
        !self.back_edges(true).is_empty()
    }

    /// `(package, dependency)` pairs closing a dependency cycle.
    #[must_use]
    pub fn circular_dependencies(&self) -> Vec<(&str, &str)> {
        self.back_edges(false)
            .into_iter()
            .map(|(from, to)| (self.name(from), self.name(to)))
            .collect()
    }

    #[must_use]
    pub fn package(&self, name: &str) -> Option<&Package> {
        self.packages.get(name)
    }

    #[must_use]
    pub fn has_package(&self, name: &str) -> bool {
        self.packages.contains_key(name)
    }

    #[must_use]
    pub fn package_count(&self) -> usize {
        self.packages.len()
    }

    pub fn packages(&self) -> impl Iterator<Item = &Package> {
        self.packages.values()
    }

    #[must_use]
    pub fn is_internal_package(&self, name: &str) -> bool {
        self.package(name)
            .is_some_and(|package| package.is_internal(&self.internal_prefix))
    }

    #[must_use]
    pub fn internal_packages(&self) -> Vec<&Package> {
        self.packages()
            .filter(|package| package.is_internal(&self.internal_prefix))
            .collect()
    }

    #[must_use]
    pub fn external_packages(&self) -> Vec<&Package> {
        self.packages()
            .filter(|package| !package.is_internal(&self.internal_prefix))
            .collect()
    }

    /// # Errors
    ///
    /// Returns [`GraphError::UnknownPackage`] if `name` is not in the graph.
    pub fn dependency_count(&self, name: &str) -> Result<usize, GraphError> {
        Ok(self.dependencies[self.index_of(name)?].len())
    }

    /// # Errors
    ///
    /// Returns [`GraphError::UnknownPackage`] if `name` is not in the graph.
    pub fn dependent_count(&self, name: &str) -> Result<usize, GraphError> {
        Ok(self.dependents[self.index_of(name)?].len())
    }

    #[must_use]
    pub fn stats(&self) -> GraphStats {
        let internal_packages = self.internal_packages().len();
        let cycles = self.back_edges(false);
        if !cycles.is_empty() {
            warn!(count = cycles.len(), "dependency graph contains cycles");
        }

        GraphStats {
            total_packages: self.packages.len(),
            internal_packages,
            external_packages: self.packages.len() - internal_packages,
            has_circular_dependencies: !cycles.is_empty(),
            circular_dependency_count: cycles.len(),
        }
    }
}
