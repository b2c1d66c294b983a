use nova_beans::{BeansConfig, ConfigError, EventResolver, MethodInventory};
use nova_beans_types::ClassStub;
use pretty_assertions::assert_eq;

use super::table_with;

#[test]
fn config_file_renames_well_known_types() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nova-beans.toml");
    std::fs::write(
        &path,
        r#"
[introspection]
event_listener = "com.example.Observer"

[logging]
level = "debug"
"#,
    )
    .unwrap();
    let config = BeansConfig::load_from_path(&path).unwrap();
    assert_eq!(config.introspection.event_listener, "com.example.Observer");
    assert_eq!(config.logging.level, "debug");

    let table = table_with([
        ClassStub::builder("com.example.Observer").interface(),
        ClassStub::builder("com.example.TickListener")
            .interface()
            .implements("com.example.Observer"),
        ClassStub::builder("com.example.Clock")
            .method("addTickListener", "(Lcom/example/TickListener;)V")
            .method("removeTickListener", "(Lcom/example/TickListener;)V"),
    ]);
    let methods = MethodInventory::new(&table)
        .methods("com.example.Clock", false, None)
        .unwrap();

    let events = EventResolver::new(&table, &config.introspection).resolve(&methods);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].name, "tick");

    let defaults = BeansConfig::default();
    assert!(EventResolver::new(&table, &defaults.introspection)
        .resolve(&methods)
        .is_empty());
}

#[test]
fn missing_config_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = BeansConfig::load_from_path(dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
}
