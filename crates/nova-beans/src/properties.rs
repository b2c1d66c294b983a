//! Property inference from accessor naming patterns.
//!
//! Candidates are bucketed by inferred property name, each bucket is narrowed
//! to at most one getter/setter per kind (plain and indexed), and the
//! presence pattern of those four slots decides which descriptor survives.

use indexmap::IndexMap;
use nova_beans_types::{ClassStub, JavaType, MethodSignature};

use crate::config::IntrospectionConfig;
use crate::descriptor::PropertyDescriptor;
use crate::names::decapitalize;

const PREFIX_GET: &str = "get";
const PREFIX_IS: &str = "is";
const PREFIX_SET: &str = "set";

const ADD_PROPERTY_CHANGE_LISTENER: &str = "addPropertyChangeListener";
const REMOVE_PROPERTY_CHANGE_LISTENER: &str = "removePropertyChangeListener";

pub struct PropertyResolver<'a> {
    class: &'a ClassStub,
    config: &'a IntrospectionConfig,
}

#[derive(Debug, Default)]
struct Candidates {
    getters: Vec<MethodSignature>,
    setters: Vec<MethodSignature>,
    constrained: bool,
}

/// The four accessor slots of one property after tie-breaking.
#[derive(Debug, Default, Clone, PartialEq)]
pub(crate) struct Accessors {
    pub(crate) normal_getter: Option<MethodSignature>,
    pub(crate) normal_setter: Option<MethodSignature>,
    pub(crate) indexed_getter: Option<MethodSignature>,
    pub(crate) indexed_setter: Option<MethodSignature>,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub(crate) struct Pair {
    pub(crate) getter: Option<MethodSignature>,
    pub(crate) setter: Option<MethodSignature>,
}

/// Which halves of a property survive pairing. Both `None` means the
/// property is dropped.
#[derive(Debug, Default, Clone, PartialEq)]
pub(crate) struct Pairing {
    pub(crate) normal: Option<Pair>,
    pub(crate) indexed: Option<Pair>,
}

impl<'a> PropertyResolver<'a> {
    pub fn new(class: &'a ClassStub, config: &'a IntrospectionConfig) -> Self {
        Self { class, config }
    }

    /// Infer properties from `methods` (the class's public instance methods).
    ///
    /// `bound_scope` is the ancestor-inclusive inventory searched for the
    /// property-change listener pair that marks every property as bound.
    pub fn resolve(
        &self,
        methods: &[MethodSignature],
        bound_scope: &[MethodSignature],
    ) -> Vec<PropertyDescriptor> {
        let mut table: IndexMap<String, Candidates> = IndexMap::new();
        for method in methods {
            if let Some(name) = getter_property(method) {
                table.entry(name).or_default().getters.push(method.clone());
            }
            if let Some(name) = setter_property(method) {
                let candidates = table.entry(name).or_default();
                if method.throws(&self.config.property_veto_exception) {
                    candidates.constrained = true;
                }
                candidates.setters.push(method.clone());
            }
        }

        let bound = self.is_bound(bound_scope);
        let mut out = Vec::with_capacity(table.len());
        for (name, candidates) in table {
            let accessors = select_accessors(&candidates);
            let no_plain = accessors.normal_getter.is_none() && accessors.normal_setter.is_none();
            let pairing = pair_accessors(accessors);
            let Some(mut desc) = build_descriptor(&name, pairing) else {
                tracing::debug!(target: "nova.beans", class = %self.class.binary_name, property = %name, "no resolvable accessor pairing");
                continue;
            };
            if no_plain {
                if let Some(replacement) = self.boolean_setter_fallback(&desc) {
                    desc = replacement;
                }
            }
            desc.bound = bound;
            desc.constrained = candidates.constrained;
            out.push(desc);
        }
        out
    }

    fn is_bound(&self, methods: &[MethodSignature]) -> bool {
        let listener = JavaType::object(self.config.property_change_listener.as_str());
        let has = |name: &str| {
            methods
                .iter()
                .any(|m| m.name == name && m.params.len() == 1 && m.params[0] == listener)
        };
        has(ADD_PROPERTY_CHANGE_LISTENER) && has(REMOVE_PROPERTY_CHANGE_LISTENER)
    }

    /// An indexed boolean property reachable only through its indexed setter
    /// becomes a plain boolean property when the class declares a
    /// `set<Name>(boolean)` under the indexed setter's name. Only consulted
    /// for buckets without plain accessor candidates.
    fn boolean_setter_fallback(&self, desc: &PropertyDescriptor) -> Option<PropertyDescriptor> {
        let indexed = desc.indexed.as_ref()?;
        if indexed.read_method.is_some() {
            return None;
        }
        if !indexed.indexed_type.is_boolean() {
            return None;
        }
        let setter_name = &indexed.write_method.as_ref()?.name;
        let setter = self
            .class
            .declared_method(setter_name, &[JavaType::BOOLEAN])?;
        PropertyDescriptor::new(desc.name.clone(), None, Some(setter.clone())).ok()
    }
}

fn getter_property(method: &MethodSignature) -> Option<String> {
    let (prefix_len, is_prefix) = if method.name.starts_with(PREFIX_IS) {
        (PREFIX_IS.len(), true)
    } else if method.name.starts_with(PREFIX_GET) {
        (PREFIX_GET.len(), false)
    } else {
        return None;
    };

    let name = decapitalize(&method.name[prefix_len..]);
    if name.is_empty() {
        return None;
    }

    let return_type = method.returns()?;
    if is_prefix && !return_type.is_boolean() {
        return None;
    }

    match method.params.as_slice() {
        [] => Some(name),
        [index] if index.is_int() => Some(name),
        _ => None,
    }
}

fn setter_property(method: &MethodSignature) -> Option<String> {
    if !method.return_type.is_void() {
        return None;
    }
    let suffix = method.name.strip_prefix(PREFIX_SET)?;
    let name = decapitalize(suffix);
    if name.is_empty() {
        return None;
    }

    match method.params.as_slice() {
        [_] => Some(name),
        [index, _] if index.is_int() => Some(name),
        _ => None,
    }
}

fn is_normal_getter(method: &MethodSignature) -> bool {
    method.params.is_empty()
}

fn is_indexed_getter(method: &MethodSignature) -> bool {
    matches!(method.params.as_slice(), [index] if index.is_int())
}

fn is_indexed_setter(method: &MethodSignature) -> bool {
    matches!(method.params.as_slice(), [index, _] if index.is_int())
}

fn select_accessors(candidates: &Candidates) -> Accessors {
    let mut normal_getter: Option<&MethodSignature> = None;
    let mut indexed_getter: Option<&MethodSignature> = None;

    for getter in &candidates.getters {
        if is_normal_getter(getter) && (normal_getter.is_none() || getter.name.starts_with(PREFIX_IS)) {
            normal_getter = Some(getter);
        }
        if is_indexed_getter(getter) {
            let replace = match indexed_getter {
                None => true,
                Some(current) => {
                    getter.name.starts_with(PREFIX_GET)
                        || (getter.name.starts_with(PREFIX_IS)
                            && !current.name.starts_with(PREFIX_GET))
                }
            };
            if replace {
                indexed_getter = Some(getter);
            }
        }
    }

    let normal_setter = match normal_getter.and_then(MethodSignature::returns) {
        Some(ty) => candidates
            .setters
            .iter()
            .find(|s| s.params.len() == 1 && s.params[0] == *ty),
        None => candidates.setters.iter().filter(|s| s.params.len() == 1).last(),
    };

    let indexed_setter = match indexed_getter.and_then(MethodSignature::returns) {
        Some(ty) => candidates
            .setters
            .iter()
            .find(|s| is_indexed_setter(s) && s.params[1] == *ty),
        None => candidates
            .setters
            .iter()
            .filter(|s| is_indexed_setter(s))
            .last(),
    };

    Accessors {
        normal_getter: normal_getter.cloned(),
        normal_setter: normal_setter.cloned(),
        indexed_getter: indexed_getter.cloned(),
        indexed_setter: indexed_setter.cloned(),
    }
}

fn normal(getter: Option<MethodSignature>, setter: Option<MethodSignature>) -> Option<Pair> {
    Some(Pair { getter, setter })
}

fn indexed(getter: Option<MethodSignature>, setter: Option<MethodSignature>) -> Option<Pair> {
    Some(Pair { getter, setter })
}

fn get_named(method: &Option<MethodSignature>) -> bool {
    method
        .as_ref()
        .is_some_and(|m| m.name.starts_with(PREFIX_GET))
}

/// Decide which halves survive, keyed by which of the four slots are filled.
pub(crate) fn pair_accessors(accessors: Accessors) -> Pairing {
    let Accessors {
        normal_getter: ng,
        normal_setter: ns,
        indexed_getter: ig,
        indexed_setter: is,
    } = accessors;
    let ig_get_named = get_named(&ig);

    match (ng.is_some(), ns.is_some(), ig.is_some(), is.is_some()) {
        (false, false, false, false) => Pairing::default(),

        // A full plain pair wins unless a full indexed pair competes.
        (true, true, false, _) | (true, true, true, false) => Pairing {
            normal: normal(ng, ns),
            indexed: None,
        },
        // Only plain accessors.
        (true, false, false, false) | (false, true, false, false) => Pairing {
            normal: normal(ng, ns),
            indexed: None,
        },

        // Mixed plain and indexed accessors.
        (true, true, true, true) => {
            if ig_get_named {
                Pairing {
                    normal: normal(ng, ns),
                    indexed: indexed(ig, is),
                }
            } else {
                let ng_is_named = ng.as_ref().is_some_and(|m| m.name.starts_with(PREFIX_IS));
                let ng_boolean = ng
                    .as_ref()
                    .and_then(MethodSignature::returns)
                    .is_some_and(JavaType::is_boolean);
                if !ng_boolean && ng_is_named {
                    Pairing {
                        normal: None,
                        indexed: indexed(None, is),
                    }
                } else {
                    Pairing {
                        normal: normal(ng, ns),
                        indexed: None,
                    }
                }
            }
        }
        (true, false, true, true) => Pairing {
            normal: normal(ng, None),
            indexed: indexed(ig.filter(|_| ig_get_named), is),
        },
        (false, true, true, true) => Pairing {
            normal: None,
            indexed: indexed(ig.filter(|_| ig_get_named), is),
        },
        (true, false, true, false) | (false, true, true, false) => {
            if ig_get_named {
                Pairing {
                    normal: normal(ng, ns),
                    indexed: indexed(ig, None),
                }
            } else {
                Pairing {
                    normal: normal(ng, ns),
                    indexed: None,
                }
            }
        }
        (true, false, false, true) | (false, true, false, true) => Pairing {
            normal: None,
            indexed: indexed(None, is),
        },

        // Only indexed accessors. An `is`-named indexed getter is not a
        // generic indexed getter; only the setter can carry the property.
        (false, false, true, _) if !ig_get_named => Pairing {
            normal: None,
            indexed: is.and_then(|is| indexed(None, Some(is))),
        },
        (false, false, _, _) => Pairing {
            normal: None,
            indexed: indexed(ig, is),
        },
    }
}

/// Materialize a pairing. A plain accessor pair that disagrees with the
/// indexed type is dropped in favour of the indexed accessors alone.
pub(crate) fn build_descriptor(name: &str, pairing: Pairing) -> Option<PropertyDescriptor> {
    match pairing {
        Pairing {
            normal: None,
            indexed: None,
        } => None,
        Pairing {
            normal: Some(pair),
            indexed: None,
        } => PropertyDescriptor::new(name, pair.getter, pair.setter)
            .map_err(|err| {
                tracing::debug!(target: "nova.beans", property = name, error = %err, "dropping property");
            })
            .ok(),
        Pairing {
            normal,
            indexed: Some(indexed),
        } => {
            let Pair { getter, setter } = normal.unwrap_or_default();
            PropertyDescriptor::new_indexed(
                name,
                getter,
                setter,
                indexed.getter.clone(),
                indexed.setter.clone(),
            )
            .or_else(|err| {
                tracing::debug!(target: "nova.beans", property = name, error = %err, "plain accessors incompatible with indexed ones; keeping indexed accessors only");
                PropertyDescriptor::new_indexed(name, None, None, indexed.getter, indexed.setter)
            })
            .map_err(|err| {
                tracing::debug!(target: "nova.beans", property = name, error = %err, "dropping property");
            })
            .ok()
        }
    }
}
