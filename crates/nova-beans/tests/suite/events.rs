use nova_beans::{BeanMetadata, EventResolver, IntrospectionConfig, MethodInventory};
use nova_beans_types::{ClassStub, ClassStubBuilder, ClassTable, ACC_PUBLIC};
use pretty_assertions::assert_eq;

use super::table_with;

const ADD_FOO: &str = "(Lcom/example/FooListener;)V";

fn listener_types() -> Vec<ClassStubBuilder> {
    vec![
        ClassStub::builder("com.example.FooEvent").extends("java.util.EventObject"),
        ClassStub::builder("com.example.FooListener")
            .interface()
            .implements("java.util.EventListener")
            .method("fooHappened", "(Lcom/example/FooEvent;)V")
            .method("fooReset", "(Lcom/example/FooEvent;)V")
            .method("describe", "()Ljava/lang/String;"),
    ]
}

fn events_of(table: &ClassTable, class: &str) -> Vec<nova_beans::EventSetDescriptor> {
    let config = IntrospectionConfig::default();
    let methods = MethodInventory::new(table).methods(class, false, None).unwrap();
    EventResolver::new(table, &config).resolve(&methods)
}

#[test]
fn add_remove_pair_yields_multicast_event() {
    let mut classes = listener_types();
    classes.push(
        ClassStub::builder("com.example.Source")
            .method("addFooListener", ADD_FOO)
            .method("removeFooListener", ADD_FOO),
    );
    let table = table_with(classes);
    let events = events_of(&table, "com.example.Source");

    assert_eq!(events.len(), 1);
    let foo = &events[0];
    assert_eq!(foo.name, "foo");
    assert_eq!(foo.listener_type, "com.example.FooListener");
    assert!(!foo.unicast);
    assert!(foo.in_default_event_set);
    assert!(foo.get_listener_method.is_none());
    let callbacks: Vec<_> = foo.listener_methods.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(callbacks, vec!["fooHappened", "fooReset"]);
}

#[test]
fn too_many_listeners_makes_event_unicast() {
    let mut classes = listener_types();
    classes.push(
        ClassStub::builder("com.example.Source")
            .method_throwing(
                "addFooListener",
                ADD_FOO,
                ACC_PUBLIC,
                &["java.util.TooManyListenersException"],
            )
            .method("removeFooListener", ADD_FOO),
    );
    let table = table_with(classes);
    let events = events_of(&table, "com.example.Source");

    assert_eq!(events.len(), 1);
    assert!(events[0].unicast);
}

#[test]
fn add_without_remove_yields_no_event() {
    let mut classes = listener_types();
    classes.push(ClassStub::builder("com.example.Source").method("addFooListener", ADD_FOO));
    let table = table_with(classes);

    assert!(events_of(&table, "com.example.Source").is_empty());
}

#[test]
fn get_listeners_method_is_attached() {
    let mut classes = listener_types();
    classes.push(
        ClassStub::builder("com.example.Source")
            .method("addFooListener", ADD_FOO)
            .method("removeFooListener", ADD_FOO)
            .method("getFooListeners", "()[Lcom/example/FooListener;"),
    );
    let table = table_with(classes);
    let events = events_of(&table, "com.example.Source");

    assert_eq!(
        events[0].get_listener_method.as_ref().map(|m| m.name.as_str()),
        Some("getFooListeners")
    );
}

#[test]
fn listener_must_be_an_event_listener() {
    let table = table_with([
        ClassStub::builder("com.example.BarListener").interface(),
        ClassStub::builder("com.example.Source")
            .method("addBarListener", "(Lcom/example/BarListener;)V")
            .method("removeBarListener", "(Lcom/example/BarListener;)V"),
    ]);

    assert!(events_of(&table, "com.example.Source").is_empty());
}

#[test]
fn listener_type_must_match_method_name() {
    let mut classes = listener_types();
    classes.push(
        ClassStub::builder("com.example.Source")
            .method("addBarListener", ADD_FOO)
            .method("removeBarListener", ADD_FOO),
    );
    let table = table_with(classes);

    assert!(events_of(&table, "com.example.Source").is_empty());
}

#[test]
fn property_change_events_are_found_on_beans() {
    let table = table_with([ClassStub::builder("com.example.Model")
        .method(
            "addPropertyChangeListener",
            "(Ljava/beans/PropertyChangeListener;)V",
        )
        .method(
            "removePropertyChangeListener",
            "(Ljava/beans/PropertyChangeListener;)V",
        )
        .method("getName", "()Ljava/lang/String;")]);
    let mut metadata = BeanMetadata::build(
        &table,
        "com.example.Model",
        None,
        None,
        &IntrospectionConfig::default(),
    )
    .unwrap();
    metadata.finalize();

    let event = metadata.event("propertyChange").unwrap();
    assert_eq!(event.listener_methods.len(), 1);
    assert!(metadata.property("name").unwrap().bound);
}
