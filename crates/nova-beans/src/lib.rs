//! JavaBeans-style metadata synthesis.
//!
//! Given a class's method table, [`BeanMetadata`] infers the class's
//! properties (plain and indexed), event sets, and public methods, then
//! reconciles them with explicit overrides and with metadata inherited from
//! ancestor classes. [`Introspector`] drives the whole inheritance chain and
//! caches the results.
//!
//! Nothing here touches a live type system: classes are described by
//! [`nova_beans_types::ClassStub`]s obtained from a
//! [`nova_beans_types::ClassProvider`].

#![forbid(unsafe_code)]

mod bean_info;
mod config;
mod descriptor;
mod error;
mod events;
mod introspector;
mod inventory;
mod merge;
mod names;
mod properties;

pub use crate::bean_info::{BeanInfo, BeanMetadata, ExplicitBeanInfo};
pub use crate::config::{init_tracing, BeansConfig, ConfigError, IntrospectionConfig, LoggingConfig};
pub use crate::descriptor::{
    BeanDescriptor, EventSetDescriptor, FeatureAttributes, IndexedAccessors, MethodDescriptor,
    PropertyDescriptor,
};
pub use crate::error::{IntrospectionError, Result};
pub use crate::events::EventResolver;
pub use crate::introspector::{BeanInfoFlags, Introspector};
pub use crate::inventory::MethodInventory;
pub use crate::names::{capitalize, compare_by_name, decapitalize};
pub use crate::properties::PropertyResolver;
