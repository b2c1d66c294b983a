use nova_beans::{BeanMetadata, IntrospectionConfig, Introspector};
use nova_beans_types::{ClassStub, JavaType, ACC_PRIVATE, ACC_PUBLIC};
use pretty_assertions::assert_eq;

use super::table_with;

fn build(table: &nova_beans_types::ClassTable, class: &str) -> BeanMetadata {
    let mut metadata =
        BeanMetadata::build(table, class, None, None, &IntrospectionConfig::default()).unwrap();
    metadata.finalize();
    metadata
}

#[test]
fn getter_setter_pair_yields_one_plain_property() {
    let table = table_with([ClassStub::builder("com.example.Label")
        .method("getText", "()Ljava/lang/String;")
        .method("setText", "(Ljava/lang/String;)V")]);
    let metadata = build(&table, "com.example.Label");

    let props = metadata.property_descriptors();
    assert_eq!(props.len(), 1);
    let text = &props[0];
    assert_eq!(text.name, "text");
    assert_eq!(text.property_type(), Some(&JavaType::object("java.lang.String")));
    assert_eq!(text.read_method.as_ref().unwrap().name, "getText");
    assert_eq!(text.write_method.as_ref().unwrap().name, "setText");
    assert!(!text.is_indexed());
    assert!(!text.bound && !text.constrained);
}

#[test]
fn indexed_accessors_alone_yield_indexed_property() {
    let table = table_with([ClassStub::builder("com.example.Grid")
        .method("getCell", "(I)Ljava/lang/String;")
        .method("setCell", "(ILjava/lang/String;)V")]);
    let metadata = build(&table, "com.example.Grid");

    let props = metadata.property_descriptors();
    assert_eq!(props.len(), 1);
    let cell = &props[0];
    assert!(cell.is_indexed());
    assert!(cell.read_method.is_none() && cell.write_method.is_none());
    assert_eq!(cell.indexed_type(), Some(&JavaType::object("java.lang.String")));
    assert_eq!(cell.indexed_read_method().unwrap().name, "getCell");
    assert_eq!(cell.indexed_write_method().unwrap().name, "setCell");
}

#[test]
fn array_accessors_join_indexed_ones() {
    let table = table_with([ClassStub::builder("com.example.Grid")
        .method("getCells", "()[I")
        .method("setCells", "([I)V")
        .method("getCells", "(I)I")
        .method("setCells", "(II)V")]);
    let metadata = build(&table, "com.example.Grid");

    let cells = metadata.property("cells").unwrap();
    assert!(cell_accessors_complete(cells));
    assert_eq!(cells.property_type(), Some(&JavaType::array_of(JavaType::INT)));
}

fn cell_accessors_complete(desc: &nova_beans::PropertyDescriptor) -> bool {
    desc.read_method.is_some()
        && desc.write_method.is_some()
        && desc.indexed_read_method().is_some()
        && desc.indexed_write_method().is_some()
}

#[test]
fn boolean_properties_prefer_is_getters() {
    let table = table_with([ClassStub::builder("com.example.Toggle")
        .method("getOn", "()Z")
        .method("isOn", "()Z")
        .method("setOn", "(Z)V")
        .method("isBig", "()I")]);
    let metadata = build(&table, "com.example.Toggle");

    assert_eq!(metadata.property_descriptors().len(), 1);
    let on = metadata.property("on").unwrap();
    assert_eq!(on.read_method.as_ref().unwrap().name, "isOn");
    assert!(metadata.property("big").is_none());
}

#[test]
fn static_and_malformed_methods_are_not_accessors() {
    let table = table_with([ClassStub::builder("com.example.Odd")
        .method_with_flags("getInstance", "()Lcom/example/Odd;", ACC_PUBLIC | nova_beans_types::ACC_STATIC)
        .method("getPair", "(II)I")
        .method("setValue", "(I)I")
        .method("get", "()I")
        .method_with_flags("getSecret", "()I", ACC_PRIVATE)]);
    let metadata = build(&table, "com.example.Odd");

    assert!(metadata.property_descriptors().is_empty());
    // Static methods still show up as methods.
    assert!(metadata.method("getInstance", &[]).is_some());
    assert!(metadata.method("getSecret", &[]).is_none());
}

#[test]
fn property_change_support_marks_every_property_bound() {
    let table = table_with([
        ClassStub::builder("com.example.Support")
            .extends("java.lang.Object")
            .method(
                "addPropertyChangeListener",
                "(Ljava/beans/PropertyChangeListener;)V",
            )
            .method(
                "removePropertyChangeListener",
                "(Ljava/beans/PropertyChangeListener;)V",
            ),
        ClassStub::builder("com.example.Model")
            .extends("com.example.Support")
            .method("getName", "()Ljava/lang/String;")
            .method("setName", "(Ljava/lang/String;)V")
            .method("getAge", "()I"),
    ]);
    let metadata = build(&table, "com.example.Model");
    assert!(metadata.property_descriptors().iter().all(|p| p.bound));
    assert_eq!(metadata.property_descriptors().len(), 2);

    // Behind the stop class the listener methods are out of reach.
    let introspector = Introspector::new(&table, IntrospectionConfig::default());
    let bounded = introspector
        .bean_info_with_stop("com.example.Model", "com.example.Support")
        .unwrap();
    assert!(bounded.property_descriptors().iter().all(|p| !p.bound));
}

#[test]
fn veto_exception_marks_property_constrained() {
    let table = table_with([ClassStub::builder("com.example.Account")
        .method("getBalance", "()J")
        .method_throwing(
            "setBalance",
            "(J)V",
            ACC_PUBLIC,
            &["java.beans.PropertyVetoException"],
        )
        .method("getOwner", "()Ljava/lang/String;")]);
    let metadata = build(&table, "com.example.Account");

    assert!(metadata.property("balance").unwrap().constrained);
    assert!(!metadata.property("owner").unwrap().constrained);
}

#[test]
fn indexed_boolean_setter_falls_back_to_declared_plain_setter() {
    let table = table_with([ClassStub::builder("com.example.Flags")
        .method("setFlag", "(IZ)V")
        .method_with_flags("setFlag", "(Z)V", ACC_PRIVATE)]);
    let metadata = build(&table, "com.example.Flags");

    let flag = metadata.property("flag").unwrap();
    assert!(!flag.is_indexed());
    assert_eq!(flag.property_type(), Some(&JavaType::BOOLEAN));
    let setter = flag.write_method.as_ref().unwrap();
    assert_eq!(setter.params, vec![JavaType::BOOLEAN]);
    assert!(!setter.is_public());
}

#[test]
fn public_plain_and_indexed_boolean_setters_keep_the_indexed_one() {
    let table = table_with([ClassStub::builder("com.example.Flags")
        .method("setFlag", "(Z)V")
        .method("setFlag", "(IZ)V")]);
    let metadata = build(&table, "com.example.Flags");

    let flag = metadata.property("flag").unwrap();
    assert!(flag.is_indexed());
    assert!(flag.read_method.is_none() && flag.write_method.is_none());
    assert!(flag.indexed_read_method().is_none());
    assert_eq!(
        flag.indexed_write_method().unwrap().params,
        vec![JavaType::INT, JavaType::BOOLEAN]
    );
}

#[test]
fn plain_getter_blocks_the_boolean_setter_fallback() {
    let table = table_with([ClassStub::builder("com.example.Flags")
        .method("isFlag", "()Z")
        .method("setFlag", "(IZ)V")
        .method_with_flags("setFlag", "(Z)V", ACC_PRIVATE)]);
    let metadata = build(&table, "com.example.Flags");

    let flag = metadata.property("flag").unwrap();
    assert!(flag.is_indexed());
    assert!(flag.write_method.is_none());
    assert_eq!(
        flag.indexed_write_method().unwrap().params,
        vec![JavaType::INT, JavaType::BOOLEAN]
    );
}

#[test]
fn acronym_names_keep_their_case() {
    let table = table_with([ClassStub::builder("com.example.Link")
        .method("getURL", "()Ljava/lang/String;")
        .method("getId", "()I")]);
    let metadata = build(&table, "com.example.Link");

    let names: Vec<_> = metadata
        .property_descriptors()
        .iter()
        .map(|p| p.name.as_str())
        .collect();
    assert_eq!(names, vec!["URL", "id"]);
}
