use std::collections::{HashMap, HashSet};

use nova_beans_types::ClassProvider;

use crate::bean_info::{BeanInfo, BeanMetadata, ExplicitBeanInfo};
use crate::config::IntrospectionConfig;
use crate::error::{IntrospectionError, Result};
use crate::inventory::MethodInventory;

/// How explicit bean infos registered with the [`Introspector`] are used.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum BeanInfoFlags {
    /// Honour explicit bean infos for the class and all its ancestors.
    #[default]
    UseAll,
    /// Ignore the explicit bean info of the class itself only.
    IgnoreImmediate,
    /// Ignore every explicit bean info in the chain.
    IgnoreAll,
}

/// Builds [`BeanMetadata`] for a class and its whole super class chain.
///
/// Plain [`Introspector::bean_info`] results are cached per class. Every
/// call hands out an owned copy.
pub struct Introspector<'a> {
    provider: &'a dyn ClassProvider,
    config: IntrospectionConfig,
    explicit: HashMap<String, ExplicitBeanInfo>,
    cache: HashMap<String, BeanMetadata>,
}

impl<'a> Introspector<'a> {
    pub fn new(provider: &'a dyn ClassProvider, config: IntrospectionConfig) -> Self {
        Self {
            provider,
            config,
            explicit: HashMap::new(),
            cache: HashMap::new(),
        }
    }

    pub fn config(&self) -> &IntrospectionConfig {
        &self.config
    }

    /// Attach overrides to `class`. Cached results are dropped since any
    /// subclass may have absorbed the previous metadata.
    pub fn register_explicit(&mut self, class: impl Into<String>, info: ExplicitBeanInfo) {
        self.explicit.insert(class.into(), info);
        self.flush_caches();
    }

    pub fn bean_info(&mut self, class: &str) -> Result<BeanMetadata> {
        if let Some(cached) = self.cache.get(class) {
            tracing::trace!(target: "nova.beans", class, "bean info cache hit");
            return Ok(cached.clone());
        }
        let metadata = self.introspect(class, None, BeanInfoFlags::UseAll)?;
        self.cache.insert(class.to_string(), metadata.clone());
        Ok(metadata)
    }

    /// Like [`Introspector::bean_info`], but ancestors from `stop_class`
    /// upwards are left out. `stop_class` must be a super class of `class`.
    pub fn bean_info_with_stop(&self, class: &str, stop_class: &str) -> Result<BeanMetadata> {
        self.check_superclass(class, stop_class)?;
        self.introspect(class, Some(stop_class), BeanInfoFlags::UseAll)
    }

    pub fn bean_info_with_flags(&mut self, class: &str, flags: BeanInfoFlags) -> Result<BeanMetadata> {
        match flags {
            BeanInfoFlags::UseAll => self.bean_info(class),
            _ => self.introspect(class, None, flags),
        }
    }

    pub fn flush_caches(&mut self) {
        self.cache.clear();
    }

    pub fn flush_from_caches(&mut self, class: &str) {
        self.cache.remove(class);
    }

    fn introspect(
        &self,
        class: &str,
        stop_class: Option<&str>,
        flags: BeanInfoFlags,
    ) -> Result<BeanMetadata> {
        let mut chain = Vec::new();
        let mut metadata = self.collect(class, stop_class, flags, &mut chain)?;
        metadata.finalize();
        tracing::debug!(
            target: "nova.beans",
            class,
            ancestors = chain.len().saturating_sub(1),
            properties = metadata.property_descriptors().len(),
            events = metadata.event_set_descriptors().len(),
            "bean info built"
        );
        Ok(metadata)
    }

    /// Metadata for `class` with every ancestor below `stop_class` merged in,
    /// not yet finalized.
    fn collect(
        &self,
        class: &str,
        stop_class: Option<&str>,
        flags: BeanInfoFlags,
        chain: &mut Vec<String>,
    ) -> Result<BeanMetadata> {
        chain.push(class.to_string());
        let stub = MethodInventory::new(self.provider).class(class)?;

        let explicit = match flags {
            BeanInfoFlags::UseAll => self.explicit.get(class).map(|info| info as &dyn BeanInfo),
            BeanInfoFlags::IgnoreImmediate | BeanInfoFlags::IgnoreAll => None,
        };
        let mut metadata =
            BeanMetadata::build(self.provider, class, explicit, stop_class, &self.config)?;
        if let Some(info) = explicit {
            for additional in info.additional_bean_info() {
                metadata.merge_bean_info(additional, true);
            }
        }

        let Some(super_class) = stub.super_class.as_deref() else {
            return Ok(metadata);
        };
        if stop_class == Some(super_class) {
            return Ok(metadata);
        }
        if chain.iter().any(|seen| seen == super_class) {
            tracing::debug!(target: "nova.beans", class, super_class, "cyclic super class chain");
            return Ok(metadata);
        }
        if self.provider.lookup_class(super_class).is_none() {
            tracing::debug!(target: "nova.beans", class, super_class, "super class not found; chain ends here");
            return Ok(metadata);
        }

        let super_flags = match flags {
            BeanInfoFlags::IgnoreImmediate => BeanInfoFlags::UseAll,
            other => other,
        };
        let ancestor = self.collect(super_class, stop_class, super_flags, chain)?;
        metadata.merge_bean_info(&ancestor, false);
        Ok(metadata)
    }

    fn check_superclass(&self, class: &str, stop_class: &str) -> Result<()> {
        let mut current = MethodInventory::new(self.provider).class(class)?;
        let mut seen = HashSet::from([current.binary_name.as_str()]);
        while let Some(super_class) = current.super_class.as_deref() {
            if super_class == stop_class {
                return Ok(());
            }
            match self.provider.lookup_class(super_class) {
                Some(next) if seen.insert(next.binary_name.as_str()) => current = next,
                _ => break,
            }
        }
        Err(IntrospectionError::NotASuperclass {
            class: class.to_string(),
            stop_class: stop_class.to_string(),
        })
    }
}
