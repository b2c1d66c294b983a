use std::collections::{HashSet, VecDeque};

use nova_beans_types::{ClassProvider, ClassStub, MethodSignature};

use crate::error::{IntrospectionError, Result};

/// Public method lookup over a [`ClassProvider`].
#[derive(Clone, Copy)]
pub struct MethodInventory<'a> {
    provider: &'a dyn ClassProvider,
}

impl<'a> MethodInventory<'a> {
    pub fn new(provider: &'a dyn ClassProvider) -> Self {
        Self { provider }
    }

    pub fn class(&self, binary_name: &str) -> Result<&'a ClassStub> {
        self.provider
            .lookup_class(binary_name)
            .ok_or_else(|| IntrospectionError::UnknownClass(binary_name.to_string()))
    }

    /// Public methods of `class`.
    ///
    /// With `include_ancestors` the result also holds the public methods
    /// inherited from super classes and interfaces (a method hides inherited
    /// ones with the same name and parameters). `stop_class` then removes
    /// every method that also belongs to the stop class's own inventory.
    pub fn methods(
        &self,
        class: &str,
        include_ancestors: bool,
        stop_class: Option<&str>,
    ) -> Result<Vec<MethodSignature>> {
        let stub = self.class(class)?;
        if !include_ancestors {
            return Ok(stub.methods.iter().filter(|m| m.is_public()).cloned().collect());
        }

        let mut methods = self.all_public_methods(stub);
        if let Some(stop_class) = stop_class {
            match self.provider.lookup_class(stop_class) {
                Some(stop) => {
                    let excluded = self.all_public_methods(stop);
                    methods.retain(|m| !excluded.contains(m));
                }
                None => {
                    tracing::debug!(
                        target: "nova.beans",
                        class,
                        stop_class,
                        "stop class not found; inventory left unbounded"
                    );
                }
            }
        }
        Ok(methods)
    }

    fn all_public_methods(&self, stub: &'a ClassStub) -> Vec<MethodSignature> {
        let mut out: Vec<MethodSignature> = Vec::new();
        for class in self.supertypes(stub) {
            for method in class.methods.iter().filter(|m| m.is_public()) {
                if !out.iter().any(|seen| seen.same_signature(method)) {
                    out.push(method.clone());
                }
            }
        }
        out
    }

    /// `stub`, then its super class chain, then interfaces breadth-first.
    fn supertypes(&self, stub: &'a ClassStub) -> Vec<&'a ClassStub> {
        let mut chain = vec![stub];
        let mut seen: HashSet<&str> = HashSet::from([stub.binary_name.as_str()]);
        let mut current = stub;
        while let Some(super_class) = current.super_class.as_deref() {
            let Some(next) = self.provider.lookup_class(super_class) else {
                break;
            };
            if !seen.insert(next.binary_name.as_str()) {
                break;
            }
            chain.push(next);
            current = next;
        }

        let mut queue: VecDeque<&str> = chain
            .iter()
            .flat_map(|c| c.interfaces.iter().map(String::as_str))
            .collect();
        while let Some(name) = queue.pop_front() {
            let Some(iface) = self.provider.lookup_class(name) else {
                continue;
            };
            if !seen.insert(iface.binary_name.as_str()) {
                continue;
            }
            chain.push(iface);
            queue.extend(iface.interfaces.iter().map(String::as_str));
        }
        chain
    }
}
