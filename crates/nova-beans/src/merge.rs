//! Reconciling a class's descriptors with those inherited from an ancestor.
//!
//! Every merge keeps the subclass's order and appends ancestor entries it did
//! not know about. Ancestor descriptors are cloned, never shared.

use indexmap::IndexMap;
use nova_beans_types::{ClassStub, JavaType};

use crate::descriptor::{EventSetDescriptor, MethodDescriptor, PropertyDescriptor};
use crate::names::capitalize;

/// Class-level lookups some property reconciliations fall back to.
pub(crate) struct MergeContext<'a> {
    pub(crate) class: &'a ClassStub,
    pub(crate) superclass: Option<&'a ClassStub>,
}

pub(crate) fn merge_methods(
    current: Vec<MethodDescriptor>,
    ancestor: &[MethodDescriptor],
) -> Vec<MethodDescriptor> {
    let mut merged: IndexMap<String, MethodDescriptor> = current
        .into_iter()
        .map(|desc| (desc.qualified_name(), desc))
        .collect();
    for desc in ancestor {
        merged
            .entry(desc.qualified_name())
            .and_modify(|existing| existing.merge(desc))
            .or_insert_with(|| desc.clone());
    }
    merged.into_values().collect()
}

pub(crate) fn merge_events(
    current: Vec<EventSetDescriptor>,
    ancestor: &[EventSetDescriptor],
) -> Vec<EventSetDescriptor> {
    let mut merged: IndexMap<String, EventSetDescriptor> = current
        .into_iter()
        .map(|desc| (desc.name.clone(), desc))
        .collect();
    for desc in ancestor {
        merged
            .entry(desc.name.clone())
            .and_modify(|existing| existing.merge(desc))
            .or_insert_with(|| desc.clone());
    }
    merged.into_values().collect()
}

pub(crate) fn merge_properties(
    current: Vec<PropertyDescriptor>,
    ancestor: &[PropertyDescriptor],
    ctx: &MergeContext<'_>,
) -> Vec<PropertyDescriptor> {
    let mut merged: IndexMap<String, PropertyDescriptor> = current
        .into_iter()
        .map(|desc| (desc.name.clone(), desc))
        .collect();

    for ancestor_desc in ancestor {
        let Some(sub) = merged.get_mut(&ancestor_desc.name) else {
            merged.insert(ancestor_desc.name.clone(), ancestor_desc.clone());
            continue;
        };
        if let Some(replacement) = reconcile(sub, ancestor_desc, ctx) {
            *sub = replacement;
        }
        sub.merge_attributes(ancestor_desc);
    }
    merged.into_values().collect()
}

/// Fill or replace `sub`'s accessors from the same-named ancestor property.
/// Returns a replacement descriptor when `sub` must be swapped wholesale.
fn reconcile(
    sub: &mut PropertyDescriptor,
    ancestor: &PropertyDescriptor,
    ctx: &MergeContext<'_>,
) -> Option<PropertyDescriptor> {
    let sub_indexed = sub.indexed_type().cloned();
    match (sub_indexed, ancestor.indexed_type()) {
        (None, None) => reconcile_plain(sub, ancestor, ctx),
        (Some(sub_indexed), None) => reconcile_indexed_with_plain(sub, &sub_indexed, ancestor, ctx),
        (None, Some(ancestor_indexed)) => {
            reconcile_plain_with_indexed(sub, ancestor, ancestor_indexed, ctx)
        }
        (Some(sub_indexed), Some(ancestor_indexed)) if sub_indexed == *ancestor_indexed => {
            fill_indexed(sub, ancestor);
            None
        }
        (Some(_), Some(_)) => {
            tracing::trace!(target: "nova.beans", property = %sub.name, "indexed types differ; ancestor property ignored");
            None
        }
    }
}

fn reconcile_plain(
    sub: &mut PropertyDescriptor,
    ancestor: &PropertyDescriptor,
    ctx: &MergeContext<'_>,
) -> Option<PropertyDescriptor> {
    let sub_get = sub.read_method.clone();
    let sub_set = sub.write_method.clone();
    let ancestor_type = ancestor.property_type();

    match (sub.property_type().cloned(), ancestor_type) {
        (Some(sub_type), Some(ancestor_type)) if sub_type == *ancestor_type => {
            if let Some(ancestor_get) = &ancestor.read_method {
                if sub_get.as_ref().map_or(true, |g| g == ancestor_get) {
                    sub.read_method = Some(ancestor_get.clone());
                }
            }
            if let Some(ancestor_set) = &ancestor.write_method {
                if sub_set.as_ref().map_or(true, |s| s == ancestor_set) {
                    sub.write_method = Some(ancestor_set.clone());
                }
            }
            // A boolean `is` getter on the ancestor beats the subclass's own getter.
            if sub_type.is_boolean() && sub_get.is_some() {
                if let Some(ancestor_get) = &ancestor.read_method {
                    if ancestor_get.name.starts_with("is") {
                        sub.read_method = Some(ancestor_get.clone());
                    }
                }
            }
            None
        }
        _ => {
            if sub_get.is_some() && sub_set.is_some() {
                return None;
            }
            let ancestor_get = ancestor.read_method.clone()?;
            let mut rebuilt =
                PropertyDescriptor::new(ancestor.name.clone(), Some(ancestor_get), ancestor.write_method.clone())
                    .ok()?;
            if let (Some(sub_get), Some(ancestor_type)) = (&sub_get, ancestor_type) {
                // Another same-named getter on the subclass with the ancestor's type.
                let alternate = ctx.class.methods.iter().find(|m| {
                    m.is_public()
                        && *m != sub_get
                        && m.name == sub_get.name
                        && m.params.is_empty()
                        && m.returns() == Some(ancestor_type)
                });
                if let Some(alternate) = alternate {
                    rebuilt.read_method = Some(alternate.clone());
                }
            }
            Some(rebuilt)
        }
    }
}

fn reconcile_indexed_with_plain(
    sub: &mut PropertyDescriptor,
    sub_indexed: &JavaType,
    ancestor: &PropertyDescriptor,
    ctx: &MergeContext<'_>,
) -> Option<PropertyDescriptor> {
    let ancestor_type = ancestor.property_type();
    if ancestor_type.and_then(JavaType::component_type) == Some(sub_indexed) {
        if sub.read_method.is_none() {
            sub.read_method.clone_from(&ancestor.read_method);
        }
        if sub.write_method.is_none() {
            sub.write_method.clone_from(&ancestor.write_method);
        }
        return None;
    }

    if !(sub_indexed.is_boolean() && ancestor_type.is_some_and(JavaType::is_boolean)) {
        return None;
    }
    if sub.read_method.is_some() || sub.write_method.is_some() {
        return None;
    }
    let indexed_setter = sub.indexed_write_method()?;
    let ancestor_get = ancestor.read_method.clone()?;
    let setter = ctx
        .class
        .declared_method(&indexed_setter.name, &[JavaType::BOOLEAN])?;
    PropertyDescriptor::new(sub.name.clone(), Some(ancestor_get), Some(setter.clone())).ok()
}

fn reconcile_plain_with_indexed(
    sub: &mut PropertyDescriptor,
    ancestor: &PropertyDescriptor,
    ancestor_indexed: &JavaType,
    ctx: &MergeContext<'_>,
) -> Option<PropertyDescriptor> {
    let sub_type = sub.property_type().cloned();
    if sub_type.as_ref().and_then(JavaType::component_type) == Some(ancestor_indexed) {
        let mut adopted = ancestor.clone();
        if sub.read_method.is_some() {
            adopted.read_method.clone_from(&sub.read_method);
        }
        if sub.write_method.is_some() {
            adopted.write_method.clone_from(&sub.write_method);
        }
        adopted.bound |= sub.bound;
        adopted.constrained |= sub.constrained;
        adopted.attributes.merge_from(&sub.attributes);
        return Some(adopted);
    }

    // Different shapes: try to complete the subclass's plain accessors from
    // its direct super class.
    let (Some(sub_type), Some(superclass)) = (sub_type, ctx.superclass) else {
        return None;
    };
    let suffix = capitalize(&sub.name);
    if sub.read_method.is_none() {
        let prefix = if sub_type.is_boolean() { "is" } else { "get" };
        let getter = superclass
            .declared_method(&format!("{prefix}{suffix}"), &[])
            .filter(|m| !m.is_static() && m.returns() == Some(&sub_type));
        if let Some(getter) = getter {
            sub.read_method = Some(getter.clone());
        }
    } else if sub.write_method.is_none() {
        let setter = superclass
            .declared_method(&format!("set{suffix}"), std::slice::from_ref(&sub_type))
            .filter(|m| !m.is_static() && m.return_type.is_void());
        if let Some(setter) = setter {
            sub.write_method = Some(setter.clone());
        }
    }
    None
}

fn fill_indexed(sub: &mut PropertyDescriptor, ancestor: &PropertyDescriptor) {
    if sub.read_method.is_none() {
        sub.read_method.clone_from(&ancestor.read_method);
    }
    if sub.write_method.is_none() {
        sub.write_method.clone_from(&ancestor.write_method);
    }
    let (Some(sub_indexed), Some(ancestor_indexed)) = (sub.indexed.as_mut(), ancestor.indexed.as_ref())
    else {
        return;
    };
    if sub_indexed.read_method.is_none() {
        sub_indexed.read_method.clone_from(&ancestor_indexed.read_method);
    }
    if sub_indexed.write_method.is_none() {
        sub_indexed
            .write_method
            .clone_from(&ancestor_indexed.write_method);
    }
}
