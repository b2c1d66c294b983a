use nova_beans_types::{ClassProvider, ClassStub, JavaType};
use serde::Serialize;

use crate::config::IntrospectionConfig;
use crate::descriptor::{BeanDescriptor, EventSetDescriptor, MethodDescriptor, PropertyDescriptor};
use crate::error::Result;
use crate::events::EventResolver;
use crate::inventory::MethodInventory;
use crate::merge::{merge_events, merge_methods, merge_properties, MergeContext};
use crate::names::compare_by_name;
use crate::properties::PropertyResolver;

/// Read access to bean metadata, whether synthesized or supplied by a caller.
///
/// An aspect returning `None` was not supplied at all, which is different
/// from an empty list: only unsupplied aspects are introspected.
pub trait BeanInfo {
    fn bean_descriptor(&self) -> Option<&BeanDescriptor>;

    fn properties(&self) -> Option<&[PropertyDescriptor]>;

    fn methods(&self) -> Option<&[MethodDescriptor]>;

    fn events(&self) -> Option<&[EventSetDescriptor]>;

    fn default_property_index(&self) -> Option<usize>;

    fn default_event_index(&self) -> Option<usize>;

    /// Further bean infos folded into this one unconditionally.
    fn additional_bean_info(&self) -> Vec<&dyn BeanInfo> {
        Vec::new()
    }
}

/// Caller-supplied overrides for a class.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExplicitBeanInfo {
    pub bean_descriptor: Option<BeanDescriptor>,
    pub properties: Option<Vec<PropertyDescriptor>>,
    pub methods: Option<Vec<MethodDescriptor>>,
    pub events: Option<Vec<EventSetDescriptor>>,
    pub default_property_index: Option<usize>,
    pub default_event_index: Option<usize>,
    pub additional: Vec<ExplicitBeanInfo>,
}

impl ExplicitBeanInfo {
    pub fn with_properties(mut self, properties: Vec<PropertyDescriptor>) -> Self {
        self.properties = Some(properties);
        self
    }

    pub fn with_methods(mut self, methods: Vec<MethodDescriptor>) -> Self {
        self.methods = Some(methods);
        self
    }

    pub fn with_events(mut self, events: Vec<EventSetDescriptor>) -> Self {
        self.events = Some(events);
        self
    }

    pub fn with_additional(mut self, info: ExplicitBeanInfo) -> Self {
        self.additional.push(info);
        self
    }
}

impl BeanInfo for ExplicitBeanInfo {
    fn bean_descriptor(&self) -> Option<&BeanDescriptor> {
        self.bean_descriptor.as_ref()
    }

    fn properties(&self) -> Option<&[PropertyDescriptor]> {
        self.properties.as_deref()
    }

    fn methods(&self) -> Option<&[MethodDescriptor]> {
        self.methods.as_deref()
    }

    fn events(&self) -> Option<&[EventSetDescriptor]> {
        self.events.as_deref()
    }

    fn default_property_index(&self) -> Option<usize> {
        self.default_property_index
    }

    fn default_event_index(&self) -> Option<usize> {
        self.default_event_index
    }

    fn additional_bean_info(&self) -> Vec<&dyn BeanInfo> {
        self.additional.iter().map(|info| info as &dyn BeanInfo).collect()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct ExplicitAspects {
    properties: bool,
    methods: bool,
    events: bool,
}

/// Properties, events and methods of one class, reconciled with explicit
/// overrides and with whatever ancestors have been merged in so far.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BeanMetadata {
    bean_descriptor: BeanDescriptor,
    properties: Option<Vec<PropertyDescriptor>>,
    methods: Option<Vec<MethodDescriptor>>,
    events: Option<Vec<EventSetDescriptor>>,
    default_property_index: Option<usize>,
    default_event_index: Option<usize>,
    #[serde(skip)]
    explicit: ExplicitAspects,
    #[serde(skip)]
    class: ClassStub,
    #[serde(skip)]
    superclass: Option<ClassStub>,
}

impl BeanMetadata {
    /// Metadata for `class`: explicit aspects are adopted as-is, the rest is
    /// introspected from the class's declared public methods.
    ///
    /// `stop_class` bounds the ancestor methods consulted when deciding
    /// whether properties are bound.
    pub fn build(
        provider: &dyn ClassProvider,
        class: &str,
        explicit: Option<&dyn BeanInfo>,
        stop_class: Option<&str>,
        config: &IntrospectionConfig,
    ) -> Result<Self> {
        let inventory = MethodInventory::new(provider);
        let stub = inventory.class(class)?;
        let superclass = stub
            .super_class
            .as_deref()
            .and_then(|name| provider.lookup_class(name));

        let mut metadata = BeanMetadata {
            bean_descriptor: explicit
                .and_then(|info| info.bean_descriptor())
                .cloned()
                .unwrap_or_else(|| BeanDescriptor::new(class)),
            properties: None,
            methods: None,
            events: None,
            default_property_index: None,
            default_event_index: None,
            explicit: ExplicitAspects::default(),
            class: stub.clone(),
            superclass: superclass.cloned(),
        };

        if let Some(info) = explicit {
            metadata.properties = info.properties().map(<[_]>::to_vec);
            metadata.methods = info.methods().map(<[_]>::to_vec);
            metadata.events = info.events().map(<[_]>::to_vec);
            metadata.default_property_index =
                normalize_index(info.default_property_index(), metadata.properties.as_deref());
            metadata.default_event_index =
                normalize_index(info.default_event_index(), metadata.events.as_deref());
            metadata.explicit = ExplicitAspects {
                properties: metadata.properties.is_some(),
                methods: metadata.methods.is_some(),
                events: metadata.events.is_some(),
            };
        }

        let declared = inventory.methods(class, false, None)?;

        if metadata.methods.is_none() && !declared.is_empty() {
            metadata.methods = Some(declared.iter().cloned().map(MethodDescriptor::new).collect());
        }

        if metadata.properties.is_none() {
            let instance: Vec<_> = declared.iter().filter(|m| !m.is_static()).cloned().collect();
            if !instance.is_empty() {
                let bound_scope = inventory.methods(class, true, stop_class)?;
                let resolver = PropertyResolver::new(stub, config);
                metadata.properties = Some(resolver.resolve(&instance, &bound_scope));
            }
        }

        if metadata.events.is_none() && !declared.is_empty() {
            let resolver = EventResolver::new(provider, config);
            metadata.events = Some(resolver.resolve(&declared));
        }

        Ok(metadata)
    }

    /// Fold an ancestor's (or an additional bean info's) metadata into this
    /// one. Aspects supplied explicitly are left alone unless `force` is set.
    pub fn merge_bean_info(&mut self, ancestor: &dyn BeanInfo, force: bool) {
        if force || !self.explicit.properties {
            if let Some(ancestor_props) = ancestor.properties() {
                match self.properties.take() {
                    Some(current) => {
                        let default_name =
                            name_at(&current, self.default_property_index, |p| &p.name).or_else(
                                || name_at(ancestor_props, ancestor.default_property_index(), |p| &p.name),
                            );
                        let ctx = MergeContext {
                            class: &self.class,
                            superclass: self.superclass.as_ref(),
                        };
                        let merged = merge_properties(current, ancestor_props, &ctx);
                        if !self.explicit.properties {
                            if let Some(index) = default_name
                                .and_then(|name| merged.iter().position(|p| p.name == name))
                            {
                                self.default_property_index = Some(index);
                            }
                        }
                        self.properties = Some(merged);
                    }
                    None => {
                        self.properties = Some(ancestor_props.to_vec());
                        self.default_property_index =
                            normalize_index(ancestor.default_property_index(), Some(ancestor_props));
                    }
                }
            }
        } else {
            tracing::trace!(target: "nova.beans", class = %self.class.binary_name, "explicit properties kept");
        }

        if force || !self.explicit.methods {
            if let Some(ancestor_methods) = ancestor.methods() {
                self.methods = Some(match self.methods.take() {
                    Some(current) => merge_methods(current, ancestor_methods),
                    None => ancestor_methods.to_vec(),
                });
            }
        } else {
            tracing::trace!(target: "nova.beans", class = %self.class.binary_name, "explicit methods kept");
        }

        if force || !self.explicit.events {
            if let Some(ancestor_events) = ancestor.events() {
                match self.events.take() {
                    Some(current) => {
                        let default_name = name_at(&current, self.default_event_index, |e| &e.name)
                            .or_else(|| name_at(ancestor_events, ancestor.default_event_index(), |e| &e.name));
                        let merged = merge_events(current, ancestor_events);
                        if !self.explicit.events {
                            if let Some(index) = default_name
                                .and_then(|name| merged.iter().position(|e| e.name == name))
                            {
                                self.default_event_index = Some(index);
                            }
                        }
                        self.events = Some(merged);
                    }
                    None => {
                        self.events = Some(ancestor_events.to_vec());
                        self.default_event_index =
                            normalize_index(ancestor.default_event_index(), Some(ancestor_events));
                    }
                }
            }
        } else {
            tracing::trace!(target: "nova.beans", class = %self.class.binary_name, "explicit events kept");
        }
    }

    /// Replace missing property/event lists with empty ones, sort properties
    /// by name, and keep the default property pointing at the same name.
    pub fn finalize(&mut self) {
        self.events.get_or_insert_with(Vec::new);
        let properties = self.properties.get_or_insert_with(Vec::new);
        let default_name = name_at(properties.as_slice(), self.default_property_index, |p| &p.name);
        properties.sort_by(compare_by_name);
        self.default_property_index =
            default_name.and_then(|name| properties.iter().position(|p| p.name == name));
    }

    pub fn bean(&self) -> &BeanDescriptor {
        &self.bean_descriptor
    }

    pub fn bean_class(&self) -> &str {
        &self.class.binary_name
    }

    pub fn property_descriptors(&self) -> &[PropertyDescriptor] {
        self.properties.as_deref().unwrap_or_default()
    }

    pub fn method_descriptors(&self) -> &[MethodDescriptor] {
        self.methods.as_deref().unwrap_or_default()
    }

    pub fn event_set_descriptors(&self) -> &[EventSetDescriptor] {
        self.events.as_deref().unwrap_or_default()
    }

    pub fn property(&self, name: &str) -> Option<&PropertyDescriptor> {
        self.property_descriptors().iter().find(|p| p.name == name)
    }

    pub fn event(&self, name: &str) -> Option<&EventSetDescriptor> {
        self.event_set_descriptors().iter().find(|e| e.name == name)
    }

    /// Method lookup by name and parameter types.
    pub fn method(&self, name: &str, params: &[JavaType]) -> Option<&MethodDescriptor> {
        self.method_descriptors()
            .iter()
            .find(|m| m.method.name == name && m.method.params == params)
    }

    pub fn default_property(&self) -> Option<&PropertyDescriptor> {
        self.property_descriptors().get(self.default_property_index?)
    }

    pub fn default_event(&self) -> Option<&EventSetDescriptor> {
        self.event_set_descriptors().get(self.default_event_index?)
    }
}

impl BeanInfo for BeanMetadata {
    fn bean_descriptor(&self) -> Option<&BeanDescriptor> {
        Some(&self.bean_descriptor)
    }

    fn properties(&self) -> Option<&[PropertyDescriptor]> {
        self.properties.as_deref()
    }

    fn methods(&self) -> Option<&[MethodDescriptor]> {
        self.methods.as_deref()
    }

    fn events(&self) -> Option<&[EventSetDescriptor]> {
        self.events.as_deref()
    }

    fn default_property_index(&self) -> Option<usize> {
        self.default_property_index
    }

    fn default_event_index(&self) -> Option<usize> {
        self.default_event_index
    }
}

fn normalize_index<T>(index: Option<usize>, items: Option<&[T]>) -> Option<usize> {
    index.filter(|idx| items.is_some_and(|items| *idx < items.len()))
}

fn name_at<T>(items: &[T], index: Option<usize>, name_of: impl Fn(&T) -> &String) -> Option<String> {
    index.and_then(|idx| items.get(idx)).map(|item| name_of(item).clone())
}
