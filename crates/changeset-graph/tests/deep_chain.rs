use changeset_core::Package;
use changeset_graph::DependencyGraph;

const DEPTH: usize = 50_000;

fn chain(depth: usize) -> Vec<Package> {
    (0..depth)
        .map(|i| {
            let package = Package::new(format!("p{i}"), "1.0.0");
            if i == 0 {
                package
            } else {
                package.with_dependency(format!("p{}", i - 1), "^1.0.0")
            }
        })
        .collect()
}

#[test]
fn deep_chain_traversals_do_not_recurse() {
    let graph = DependencyGraph::build(&chain(DEPTH)).expect("unique names");

    let last = format!("p{}", DEPTH - 1);

    let dependents = graph.all_dependents("p0").expect("known package");
    assert_eq!(dependents.len(), DEPTH - 1);
    assert_eq!(dependents.first(), Some(&"p1"));
    assert_eq!(dependents.last(), Some(&last.as_str()));

    let build_order = graph.dependency_chain(&last).expect("known package");
    assert_eq!(build_order.len(), DEPTH);
    assert_eq!(build_order.first(), Some(&"p0"));
    assert_eq!(build_order.last(), Some(&last.as_str()));

    assert_eq!(graph.topological_order().len(), DEPTH);
    assert!(!graph.has_circular_dependencies());
}

#[test]
fn closing_the_chain_into_a_ring_is_detected() {
    let mut packages = chain(DEPTH);
    packages[0] = packages[0].clone().with_dependency(format!("p{}", DEPTH - 1), "^1.0.0");
    let graph = DependencyGraph::build(&packages).expect("unique names");

    assert!(graph.has_circular_dependencies());
    assert_eq!(graph.circular_dependencies().len(), 1);
    assert_eq!(graph.topological_order().len(), DEPTH);
    assert_eq!(graph.all_dependents("p0").expect("known package").len(), DEPTH);
}
