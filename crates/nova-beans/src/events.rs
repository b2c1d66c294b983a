use indexmap::IndexMap;
use nova_beans_types::{is_assignable, ClassProvider, JavaType, MethodSignature};

use crate::config::IntrospectionConfig;
use crate::descriptor::EventSetDescriptor;
use crate::names::decapitalize;

const PREFIX_ADD: &str = "add";
const PREFIX_REMOVE: &str = "remove";
const PREFIX_GET: &str = "get";
const SUFFIX_LISTENER: &str = "Listener";
const SUFFIX_LISTENERS: &str = "Listeners";

/// Infers event sets from `add<Name>Listener` / `remove<Name>Listener` pairs.
pub struct EventResolver<'a> {
    provider: &'a dyn ClassProvider,
    config: &'a IntrospectionConfig,
}

#[derive(Debug, Default)]
struct EventCandidates {
    listener_type: Option<String>,
    listener_methods: Vec<MethodSignature>,
    add: Option<MethodSignature>,
    remove: Option<MethodSignature>,
    get: Option<MethodSignature>,
    unicast: bool,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Registration {
    Add,
    Remove,
}

impl Registration {
    fn prefix(self) -> &'static str {
        match self {
            Registration::Add => PREFIX_ADD,
            Registration::Remove => PREFIX_REMOVE,
        }
    }
}

impl<'a> EventResolver<'a> {
    pub fn new(provider: &'a dyn ClassProvider, config: &'a IntrospectionConfig) -> Self {
        Self { provider, config }
    }

    /// Event sets of a class whose public methods are `methods`. Buckets
    /// missing either the add or the remove method are dropped.
    pub fn resolve(&self, methods: &[MethodSignature]) -> Vec<EventSetDescriptor> {
        let mut table: IndexMap<String, EventCandidates> = IndexMap::new();
        for method in methods {
            self.record_registration(Registration::Add, method, &mut table);
            self.record_registration(Registration::Remove, method, &mut table);
            record_get_listeners(method, &mut table);
        }

        let mut out = Vec::new();
        for (event_name, candidates) in table {
            let (Some(add), Some(remove), Some(listener_type)) =
                (candidates.add, candidates.remove, candidates.listener_type)
            else {
                tracing::debug!(target: "nova.beans", event = %event_name, "event without add/remove pair");
                continue;
            };
            let mut desc = EventSetDescriptor::new(
                decapitalize(&event_name),
                listener_type,
                candidates.listener_methods,
                add,
                remove,
                candidates.get,
            );
            desc.unicast = candidates.unicast;
            out.push(desc);
        }
        out
    }

    fn record_registration(
        &self,
        registration: Registration,
        method: &MethodSignature,
        table: &mut IndexMap<String, EventCandidates>,
    ) {
        let Some(listener_name) = method
            .name
            .strip_prefix(registration.prefix())
            .filter(|rest| rest.ends_with(SUFFIX_LISTENER))
        else {
            return;
        };
        let Some(event_name) = event_name(listener_name) else {
            return;
        };

        let [JavaType::Object(listener_type)] = method.params.as_slice() else {
            return;
        };
        if !is_assignable(self.provider, listener_type, &self.config.event_listener) {
            return;
        }
        if !listener_type.ends_with(listener_name) {
            return;
        }

        let candidates = table.entry(event_name.to_string()).or_default();
        if candidates.listener_type.is_none() {
            candidates.listener_type = Some(listener_type.clone());
            candidates.listener_methods = self.listener_methods(listener_type);
        }
        match registration {
            Registration::Add => {
                if method.throws(&self.config.too_many_listeners_exception) {
                    candidates.unicast = true;
                }
                candidates.add = Some(method.clone());
            }
            Registration::Remove => candidates.remove = Some(method.clone()),
        }
    }

    /// Callback methods declared on the listener: one parameter, an event object.
    fn listener_methods(&self, listener_type: &str) -> Vec<MethodSignature> {
        let Some(listener) = self.provider.lookup_class(listener_type) else {
            return Vec::new();
        };
        listener
            .methods
            .iter()
            .filter(|m| match m.params.as_slice() {
                [JavaType::Object(arg)] => {
                    is_assignable(self.provider, arg, &self.config.event_object)
                }
                _ => false,
            })
            .cloned()
            .collect()
    }
}

/// `FooListener` -> `Foo`; `None` when nothing precedes the suffix.
fn event_name(listener_name: &str) -> Option<&str> {
    let end = listener_name.rfind(SUFFIX_LISTENER)?;
    let name = &listener_name[..end];
    (!name.is_empty()).then_some(name)
}

fn record_get_listeners(method: &MethodSignature, table: &mut IndexMap<String, EventCandidates>) {
    if !method.name.ends_with(SUFFIX_LISTENERS) {
        return;
    }
    let Some(rest) = method.name.strip_prefix(PREFIX_GET) else {
        return;
    };
    // Drop the plural `s`.
    let listener_name = &rest[..rest.len() - 1];
    let Some(event_name) = event_name(listener_name) else {
        return;
    };
    if !method.params.is_empty() {
        return;
    }
    let Some(component) = method.returns().and_then(JavaType::component_type) else {
        return;
    };
    if !component.binary_name().ends_with(listener_name) {
        return;
    }

    table.entry(event_name.to_string()).or_default().get = Some(method.clone());
}
