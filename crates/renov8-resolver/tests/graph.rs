use renov8_core::config::{DistributionConfig, PackConfigNode};
use renov8_core::location::PackLocation;
use renov8_resolver::{MemoryRepository, PackResolver};

fn loc(producer: &str, version: &str) -> PackLocation {
    PackLocation::new("central", producer, version)
}

fn dep(producer: &str, version: &str) -> PackConfigNode {
    PackConfigNode::direct(loc(producer, version))
}

fn diamond() -> (MemoryRepository, DistributionConfig) {
    let repo = MemoryRepository::new()
        .with_pack(loc("a", "1.0"), vec![dep("b", "1.0"), dep("c", "1.0")])
        .with_pack(loc("b", "1.0"), vec![])
        .with_pack(loc("c", "1.0"), vec![dep("b", "1.0")]);
    (repo, DistributionConfig::new(vec![dep("a", "1.0")]))
}

#[test]
fn dependency_graph_has_one_edge_per_wired_slot() {
    let (repo, config) = diamond();
    let resolver = PackResolver::resolve(&repo, config).unwrap();
    let graph = resolver.dependency_graph();
    assert_eq!(graph.node_count(), 3);
    assert_eq!(graph.edge_count(), 3);
    assert!(resolver.cycles().is_empty());
}

#[test]
fn tree_lists_shared_packs_under_each_dependent() {
    let (repo, config) = diamond();
    let resolver = PackResolver::resolve(&repo, config).unwrap();
    let tree = resolver.print_tree(None);
    assert_eq!(
        tree,
        "└── a@1.0\n    ├── b@1.0\n    └── c@1.0\n        └── b@1.0\n"
    );
}

#[test]
fn tree_respects_max_depth() {
    let (repo, config) = diamond();
    let resolver = PackResolver::resolve(&repo, config).unwrap();
    let tree = resolver.print_tree(Some(2));
    assert!(tree.contains("c@1.0"));
    assert_eq!(tree.matches("b@1.0").count(), 1);
}

#[test]
fn find_path_explains_inclusion() {
    let (repo, config) = diamond();
    let resolver = PackResolver::resolve(&repo, config).unwrap();
    let path: Vec<&str> = resolver
        .find_path("b")
        .unwrap()
        .into_iter()
        .map(|n| n.producer())
        .collect();
    assert_eq!(path, vec!["a", "b"]);
    assert!(resolver.find_path("missing").is_none());
}

#[test]
fn self_dependency_is_reported_as_cycle() {
    let repo = MemoryRepository::new().with_pack(loc("a", "1.0"), vec![dep("a", "1.0")]);
    let resolver =
        PackResolver::resolve(&repo, DistributionConfig::new(vec![dep("a", "1.0")])).unwrap();
    assert_eq!(resolver.cycles(), vec![vec!["a".to_string()]]);
    assert_eq!(resolver.producers_in_order(), vec!["a"]);
    assert_eq!(
        resolver.print_tree(None),
        "└── a@1.0\n    └── a@1.0 (cycle)\n"
    );
}

#[test]
fn tree_marks_overridden_declarations() {
    let repo = MemoryRepository::new()
        .with_pack(loc("a", "1.0"), vec![dep("b", "1.0")])
        .with_pack(loc("b", "2.0"), vec![]);
    let resolver = PackResolver::resolve(
        &repo,
        DistributionConfig::new(vec![dep("a", "1.0"), dep("b", "2.0")]),
    )
    .unwrap();
    assert_eq!(
        resolver.print_tree(None),
        "├── a@1.0\n│   └── b@1.0 -> 2.0\n└── b@2.0\n"
    );
}

