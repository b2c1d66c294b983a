use nova_beans::{
    BeanInfo, BeanInfoFlags, BeanMetadata, ExplicitBeanInfo, IntrospectionConfig, Introspector,
    PropertyDescriptor,
};
use nova_beans_types::{ClassStub, ClassTable};
use pretty_assertions::assert_eq;

use super::table_with;

fn shapes() -> ClassTable {
    table_with([
        ClassStub::builder("com.example.Shape")
            .extends("java.lang.Object")
            .method("getWidth", "()I")
            .method("setWidth", "(I)V")
            .method("getHeight", "()I")
            .method("setHeight", "(I)V"),
        ClassStub::builder("com.example.Label")
            .extends("com.example.Shape")
            .method("getText", "()Ljava/lang/String;")
            .method("setText", "(Ljava/lang/String;)V"),
        ClassStub::builder("com.example.Point")
            .extends("java.lang.Object")
            .method("getX", "()I")
            .method("setX", "(I)V")
            .method("getY", "()I")
            .method("setY", "(I)V"),
    ])
}

fn names(metadata: &BeanMetadata) -> Vec<&str> {
    metadata
        .property_descriptors()
        .iter()
        .map(|p| p.name.as_str())
        .collect()
}

#[test]
fn inherited_property_matches_ancestor_and_keeps_default() {
    let table = shapes();
    let config = IntrospectionConfig::default();
    let mut introspector = Introspector::new(&table, config.clone());

    let shape = BeanMetadata::build(&table, "com.example.Shape", None, None, &config).unwrap();
    let width = shape.property("width").cloned().unwrap();
    let height = shape.property("height").cloned().unwrap();
    introspector.register_explicit(
        "com.example.Shape",
        ExplicitBeanInfo {
            default_property_index: Some(0),
            ..ExplicitBeanInfo::default()
        }
        .with_properties(vec![width.clone(), height]),
    );

    let label = introspector.bean_info("com.example.Label").unwrap();
    assert_eq!(names(&label), vec!["height", "text", "width"]);
    assert_eq!(label.property("width"), Some(&width));
    assert_eq!(label.default_property().map(|p| p.name.as_str()), Some("width"));
}

#[test]
fn merging_the_same_ancestor_twice_changes_nothing() {
    let table = shapes();
    let config = IntrospectionConfig::default();
    let shape = BeanMetadata::build(&table, "com.example.Shape", None, None, &config).unwrap();
    let mut label = BeanMetadata::build(&table, "com.example.Label", None, None, &config).unwrap();

    label.merge_bean_info(&shape, false);
    let once = label.clone();
    label.merge_bean_info(&shape, false);
    assert_eq!(label, once);
    assert_eq!(label.properties().map(<[PropertyDescriptor]>::len), Some(3));
}

#[test]
fn point_default_index_survives_sorting() {
    let table = shapes();
    let config = IntrospectionConfig::default();

    // Introspected order is x, y; the default points at y.
    let explicit = ExplicitBeanInfo {
        default_property_index: Some(1),
        ..ExplicitBeanInfo::default()
    }
    .with_properties(
        BeanMetadata::build(&table, "com.example.Point", None, None, &config)
            .unwrap()
            .property_descriptors()
            .to_vec(),
    );
    let mut introspector = Introspector::new(&table, config.clone());
    introspector.register_explicit("com.example.Point", explicit);
    let point = introspector.bean_info("com.example.Point").unwrap();
    assert_eq!(names(&point), vec!["x", "y"]);
    assert_eq!(point.default_property_index(), Some(1));

    // Same default when the input order is reversed.
    let mut reversed = BeanMetadata::build(&table, "com.example.Point", None, None, &config)
        .unwrap()
        .property_descriptors()
        .to_vec();
    reversed.reverse();
    introspector.register_explicit(
        "com.example.Point",
        ExplicitBeanInfo {
            default_property_index: Some(0),
            ..ExplicitBeanInfo::default()
        }
        .with_properties(reversed),
    );
    let point = introspector.bean_info("com.example.Point").unwrap();
    assert_eq!(names(&point), vec!["x", "y"]);
    assert_eq!(point.default_property_index(), Some(1));
}

#[test]
fn additional_bean_infos_are_forced_in() {
    let table = shapes();
    let config = IntrospectionConfig::default();
    let shape = BeanMetadata::build(&table, "com.example.Shape", None, None, &config).unwrap();
    let mut hidden_width = shape.property("width").cloned().unwrap();
    hidden_width.attributes.hidden = true;

    let mut introspector = Introspector::new(&table, config);
    introspector.register_explicit(
        "com.example.Label",
        ExplicitBeanInfo::default()
            .with_properties(Vec::new())
            .with_additional(ExplicitBeanInfo::default().with_properties(vec![hidden_width])),
    );

    let label = introspector.bean_info("com.example.Label").unwrap();
    // Explicit properties absorb the additional info but not the super class.
    assert_eq!(names(&label), vec!["width"]);
    assert!(label.property("width").unwrap().attributes.hidden);
}

#[test]
fn flags_control_explicit_infos() {
    let table = shapes();
    let mut introspector = Introspector::new(&table, IntrospectionConfig::default());
    introspector.register_explicit(
        "com.example.Shape",
        ExplicitBeanInfo::default().with_properties(Vec::new()),
    );

    let label = introspector.bean_info("com.example.Label").unwrap();
    assert_eq!(names(&label), vec!["text"]);

    let label = introspector
        .bean_info_with_flags("com.example.Label", BeanInfoFlags::IgnoreImmediate)
        .unwrap();
    assert_eq!(names(&label), vec!["text"]);

    let label = introspector
        .bean_info_with_flags("com.example.Label", BeanInfoFlags::IgnoreAll)
        .unwrap();
    assert_eq!(names(&label), vec!["height", "text", "width"]);
}

#[test]
fn cache_is_flushed_per_class() {
    let table = shapes();
    let mut introspector = Introspector::new(&table, IntrospectionConfig::default());
    let first = introspector.bean_info("com.example.Label").unwrap();
    let second = introspector.bean_info("com.example.Label").unwrap();
    assert_eq!(first, second);

    introspector.flush_from_caches("com.example.Label");
    assert_eq!(introspector.bean_info("com.example.Label").unwrap(), first);
    introspector.flush_caches();
    assert_eq!(introspector.bean_info("com.example.Label").unwrap(), first);
}

#[test]
fn unknown_ancestor_ends_the_chain() {
    let table = table_with([ClassStub::builder("com.example.Orphan")
        .extends("com.example.Missing")
        .method("getName", "()Ljava/lang/String;")]);
    let mut introspector = Introspector::new(&table, IntrospectionConfig::default());

    let orphan = introspector.bean_info("com.example.Orphan").unwrap();
    assert_eq!(names(&orphan), vec!["name"]);
}
