use std::collections::BTreeMap;

use nova_beans_types::{simple_name, JavaType, MethodSignature};
use serde::Serialize;

use crate::error::{IntrospectionError, Result};

/// Presentation attributes shared by every kind of descriptor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FeatureAttributes {
    pub display_name: Option<String>,
    pub short_description: Option<String>,
    pub expert: bool,
    pub hidden: bool,
    pub preferred: bool,
    /// Named attribute values attached by explicit bean infos.
    pub values: BTreeMap<String, String>,
}

impl FeatureAttributes {
    /// Union of flags; strings and named values only fill gaps.
    pub fn merge_from(&mut self, other: &FeatureAttributes) {
        if self.display_name.is_none() {
            self.display_name.clone_from(&other.display_name);
        }
        if self.short_description.is_none() {
            self.short_description.clone_from(&other.short_description);
        }
        self.expert |= other.expert;
        self.hidden |= other.hidden;
        self.preferred |= other.preferred;
        for (key, value) in &other.values {
            self.values
                .entry(key.clone())
                .or_insert_with(|| value.clone());
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MethodDescriptor {
    pub method: MethodSignature,
    pub attributes: FeatureAttributes,
}

impl MethodDescriptor {
    pub fn new(method: MethodSignature) -> Self {
        Self {
            method,
            attributes: FeatureAttributes::default(),
        }
    }

    pub fn name(&self) -> &str {
        &self.method.name
    }

    pub fn qualified_name(&self) -> String {
        self.method.qualified_name()
    }

    pub fn merge(&mut self, other: &MethodDescriptor) {
        self.attributes.merge_from(&other.attributes);
    }
}

/// The indexed half of a property: `T get<Name>(int)` / `void set<Name>(int, T)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexedAccessors {
    pub indexed_type: JavaType,
    pub read_method: Option<MethodSignature>,
    pub write_method: Option<MethodSignature>,
}

/// A named property and its accessors.
///
/// A descriptor with `indexed` set is an indexed property; its plain
/// accessors, when present, operate on `T[]` where `T` is the indexed type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PropertyDescriptor {
    pub name: String,
    pub read_method: Option<MethodSignature>,
    pub write_method: Option<MethodSignature>,
    pub indexed: Option<IndexedAccessors>,
    pub bound: bool,
    pub constrained: bool,
    pub attributes: FeatureAttributes,
}

impl PropertyDescriptor {
    pub fn new(
        name: impl Into<String>,
        read_method: Option<MethodSignature>,
        write_method: Option<MethodSignature>,
    ) -> Result<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(IntrospectionError::EmptyPropertyName);
        }

        let read_type = read_method
            .as_ref()
            .map(|m| check_read(&name, m))
            .transpose()?;
        let write_type = write_method
            .as_ref()
            .map(|m| check_write(&name, m))
            .transpose()?;
        if let (Some(read), Some(write)) = (read_type, write_type) {
            if read != write {
                return Err(type_mismatch(&name, read, write));
            }
        }

        Ok(Self {
            name,
            read_method,
            write_method,
            indexed: None,
            bound: false,
            constrained: false,
            attributes: FeatureAttributes::default(),
        })
    }

    pub fn new_indexed(
        name: impl Into<String>,
        read_method: Option<MethodSignature>,
        write_method: Option<MethodSignature>,
        indexed_read_method: Option<MethodSignature>,
        indexed_write_method: Option<MethodSignature>,
    ) -> Result<Self> {
        let mut desc = Self::new(name, read_method, write_method)?;

        let read_type = indexed_read_method
            .as_ref()
            .map(|m| check_indexed_read(&desc.name, m))
            .transpose()?;
        let write_type = indexed_write_method
            .as_ref()
            .map(|m| check_indexed_write(&desc.name, m))
            .transpose()?;
        let indexed_type = match (read_type, write_type) {
            (Some(read), Some(write)) if read != write => {
                return Err(type_mismatch(&desc.name, read, write));
            }
            (Some(ty), _) | (None, Some(ty)) => ty.clone(),
            (None, None) => return Err(IntrospectionError::MissingIndexedAccessor(desc.name)),
        };

        if let Some(plain) = desc.property_type() {
            let expected = JavaType::array_of(indexed_type.clone());
            if *plain != expected {
                return Err(type_mismatch(&desc.name, &expected, plain));
            }
        }

        desc.indexed = Some(IndexedAccessors {
            indexed_type,
            read_method: indexed_read_method,
            write_method: indexed_write_method,
        });
        Ok(desc)
    }

    /// Type of the whole value, taken from the plain accessors. `None` for an
    /// indexed property without plain access.
    pub fn property_type(&self) -> Option<&JavaType> {
        if let Some(read) = &self.read_method {
            return read.returns();
        }
        self.write_method.as_ref().and_then(|m| m.params.first())
    }

    pub fn is_indexed(&self) -> bool {
        self.indexed.is_some()
    }

    pub fn indexed_type(&self) -> Option<&JavaType> {
        self.indexed.as_ref().map(|indexed| &indexed.indexed_type)
    }

    pub fn indexed_read_method(&self) -> Option<&MethodSignature> {
        self.indexed.as_ref()?.read_method.as_ref()
    }

    pub fn indexed_write_method(&self) -> Option<&MethodSignature> {
        self.indexed.as_ref()?.write_method.as_ref()
    }

    /// Pull flags and presentation attributes from the same-named ancestor
    /// property. The name is always taken from the ancestor.
    pub fn merge_attributes(&mut self, ancestor: &PropertyDescriptor) {
        self.attributes.merge_from(&ancestor.attributes);
        self.bound |= ancestor.bound;
        self.constrained |= ancestor.constrained;
        self.name.clone_from(&ancestor.name);
    }
}

fn check_read<'m>(property: &str, method: &'m MethodSignature) -> Result<&'m JavaType> {
    if !method.params.is_empty() {
        return Err(invalid(property, "read method", method, "expected no parameters"));
    }
    method
        .returns()
        .ok_or_else(|| invalid(property, "read method", method, "returns void"))
}

fn check_write<'m>(property: &str, method: &'m MethodSignature) -> Result<&'m JavaType> {
    match method.params.as_slice() {
        [ty] => Ok(ty),
        _ => Err(invalid(property, "write method", method, "expected one parameter")),
    }
}

fn check_indexed_read<'m>(property: &str, method: &'m MethodSignature) -> Result<&'m JavaType> {
    match method.params.as_slice() {
        [index] if index.is_int() => method
            .returns()
            .ok_or_else(|| invalid(property, "indexed read method", method, "returns void")),
        _ => Err(invalid(
            property,
            "indexed read method",
            method,
            "expected a single int parameter",
        )),
    }
}

fn check_indexed_write<'m>(property: &str, method: &'m MethodSignature) -> Result<&'m JavaType> {
    match method.params.as_slice() {
        [index, ty] if index.is_int() => Ok(ty),
        _ => Err(invalid(
            property,
            "indexed write method",
            method,
            "expected (int, T) parameters",
        )),
    }
}

fn invalid(
    property: &str,
    role: &'static str,
    method: &MethodSignature,
    reason: &'static str,
) -> IntrospectionError {
    IntrospectionError::InvalidAccessor {
        property: property.to_string(),
        role,
        method: method.to_string(),
        reason,
    }
}

fn type_mismatch(property: &str, expected: &JavaType, found: &JavaType) -> IntrospectionError {
    IntrospectionError::TypeMismatch {
        property: property.to_string(),
        expected: expected.to_string(),
        found: found.to_string(),
    }
}

/// A listener registration protocol: `add<Name>Listener` / `remove<Name>Listener`
/// plus an optional `get<Name>Listeners`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventSetDescriptor {
    pub name: String,
    pub listener_type: String,
    pub listener_methods: Vec<MethodSignature>,
    pub add_listener_method: MethodSignature,
    pub remove_listener_method: MethodSignature,
    pub get_listener_method: Option<MethodSignature>,
    pub unicast: bool,
    pub in_default_event_set: bool,
    pub attributes: FeatureAttributes,
}

impl EventSetDescriptor {
    pub fn new(
        name: impl Into<String>,
        listener_type: impl Into<String>,
        listener_methods: Vec<MethodSignature>,
        add_listener_method: MethodSignature,
        remove_listener_method: MethodSignature,
        get_listener_method: Option<MethodSignature>,
    ) -> Self {
        Self {
            name: name.into(),
            listener_type: listener_type.into(),
            listener_methods,
            add_listener_method,
            remove_listener_method,
            get_listener_method,
            unicast: false,
            in_default_event_set: true,
            attributes: FeatureAttributes::default(),
        }
    }

    pub fn merge(&mut self, other: &EventSetDescriptor) {
        self.attributes.merge_from(&other.attributes);
        if self.get_listener_method.is_none() {
            self.get_listener_method.clone_from(&other.get_listener_method);
        }
        if self.listener_methods.is_empty() {
            self.listener_methods.clone_from(&other.listener_methods);
        }
        self.unicast |= other.unicast;
        self.in_default_event_set &= other.in_default_event_set;
    }
}

/// Bean-level information: the class itself and an optional customizer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BeanDescriptor {
    pub bean_class: String,
    pub customizer_class: Option<String>,
    pub name: String,
    pub attributes: FeatureAttributes,
}

impl BeanDescriptor {
    pub fn new(bean_class: impl Into<String>) -> Self {
        let bean_class = bean_class.into();
        let name = simple_name(&bean_class).to_string();
        Self {
            bean_class,
            customizer_class: None,
            name,
            attributes: FeatureAttributes::default(),
        }
    }
}
