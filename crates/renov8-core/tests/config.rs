use renov8_core::config::{DistributionConfig, PackConfigNode};
use renov8_core::location::PackLocation;
use renov8_core::pack::Pack;

fn loc(producer: &str, version: &str) -> PackLocation {
    PackLocation::new("central", producer, version)
}

#[test]
fn direct_and_transitive_constructors() {
    let d = PackConfigNode::direct(loc("a", "1.0"));
    assert!(!d.transitive);
    assert!(d.dependencies.is_empty());

    let t = PackConfigNode::transitive(loc("a", "1.0"));
    assert!(t.transitive);
    assert_ne!(d, t);
}

#[test]
fn builder_collects_nested_dependencies_in_order() {
    let node = PackConfigNode::builder(loc("a", "1.0"))
        .dependency(PackConfigNode::direct(loc("b", "1.0")))
        .dependencies([
            PackConfigNode::direct(loc("c", "1.0")),
            PackConfigNode::transitive(loc("d", "2.0")),
        ])
        .build();
    let producers: Vec<&str> = node.dependencies.iter().map(|d| d.producer()).collect();
    assert_eq!(producers, vec!["b", "c", "d"]);
    assert!(node.dependencies[2].transitive);
}

#[test]
fn distribution_config_builder_and_lookup() {
    let config = DistributionConfig::builder()
        .add_pack(PackConfigNode::direct(loc("a", "1.0")))
        .add_pack(PackConfigNode::transitive(loc("t", "3.0")))
        .build();
    assert!(config.has_packs());
    assert_eq!(config.packs.len(), 2);
    assert!(config.pack("t").unwrap().transitive);
    assert!(config.pack("missing").is_none());
    assert!(!DistributionConfig::default().has_packs());
}

#[test]
fn rebuilt_config_equals_original() {
    let original = DistributionConfig::new(vec![
        PackConfigNode::builder(loc("a", "1.0"))
            .dependency(PackConfigNode::direct(loc("b", "1.0")))
            .build(),
        PackConfigNode::transitive(loc("t", "1.0")),
    ]);
    let mut builder = DistributionConfig::builder();
    for pack in &original.packs {
        builder.push(pack.clone());
    }
    assert_eq!(builder.len(), 2);
    assert!(!builder.is_empty());
    assert!(DistributionConfig::builder().is_empty());
    assert_eq!(builder.build(), original);
}

#[test]
fn pack_reports_dependencies() {
    let leaf = Pack::new(loc("b", "1.0"), vec![]);
    assert!(!leaf.has_dependencies());
    let root = Pack::new(loc("a", "1.0"), vec![PackConfigNode::direct(loc("b", "1.0"))]);
    assert!(root.has_dependencies());
    assert_eq!(root.producer(), "a");
}

#[test]
fn config_deserializes_with_kebab_case_fields() {
    let config: DistributionConfig = toml::from_str(
        r#"
[[packs]]
location = { repository-id = "central", producer = "wildfly", version = "27.0.1", channel = "27" }

[[packs.dependencies]]
location = { repository-id = "central", producer = "servlet", version = "27.0.1" }

[[packs]]
transitive = true
location = { repository-id = "central", producer = "galleon-plugins", version = "6.0.0" }
"#,
    )
    .unwrap();

    assert_eq!(config.packs.len(), 2);
    let wildfly = &config.packs[0];
    assert_eq!(wildfly.location.channel.as_deref(), Some("27"));
    assert!(wildfly.location.frequency.is_none());
    assert!(!wildfly.transitive);
    assert_eq!(wildfly.dependencies[0].producer(), "servlet");
    assert!(config.packs[1].transitive);
}
