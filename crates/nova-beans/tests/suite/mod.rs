mod config;
mod events;
mod inheritance;
mod properties;

use nova_beans_types::{ClassStub, ClassStubBuilder, ClassTable};

/// The handful of platform types the resolvers look for.
pub(crate) fn platform() -> Vec<ClassStubBuilder> {
    vec![
        ClassStub::builder("java.lang.Object")
            .method("hashCode", "()I")
            .method("toString", "()Ljava/lang/String;"),
        ClassStub::builder("java.util.EventListener").interface(),
        ClassStub::builder("java.util.EventObject")
            .extends("java.lang.Object")
            .method("getSource", "()Ljava/lang/Object;"),
        ClassStub::builder("java.beans.PropertyChangeEvent").extends("java.util.EventObject"),
        ClassStub::builder("java.beans.PropertyChangeListener")
            .interface()
            .implements("java.util.EventListener")
            .method("propertyChange", "(Ljava/beans/PropertyChangeEvent;)V"),
    ]
}

pub(crate) fn table_with(classes: impl IntoIterator<Item = ClassStubBuilder>) -> ClassTable {
    let mut table = ClassTable::new();
    for builder in platform().into_iter().chain(classes) {
        table
            .insert(builder.build().expect("valid class stub"))
            .expect("unique class");
    }
    table
}
