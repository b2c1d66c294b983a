use std::collections::{HashMap, HashSet, VecDeque};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::descriptor::JavaType;
use crate::error::{Error, Result};
use crate::method::{MethodSignature, ACC_PUBLIC};

pub const ACC_INTERFACE: u16 = 0x0200;

/// Everything introspection needs to know about one class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassStub {
    pub binary_name: String,
    pub access_flags: u16,
    pub super_class: Option<String>,
    pub interfaces: Vec<String>,
    pub methods: Vec<MethodSignature>,
}

impl ClassStub {
    pub fn builder(binary_name: impl Into<String>) -> ClassStubBuilder {
        ClassStubBuilder::new(binary_name)
    }

    pub fn is_interface(&self) -> bool {
        self.access_flags & ACC_INTERFACE != 0
    }

    /// Name after the last package separator.
    pub fn simple_name(&self) -> &str {
        simple_name(&self.binary_name)
    }

    /// Exact lookup among the declared methods, regardless of modifiers.
    pub fn declared_method(&self, name: &str, params: &[JavaType]) -> Option<&MethodSignature> {
        self.methods
            .iter()
            .find(|m| m.name == name && m.params == params)
    }
}

/// Name after the last package separator of a binary class name.
pub fn simple_name(binary_name: &str) -> &str {
    binary_name
        .rsplit_once('.')
        .map_or(binary_name, |(_, simple)| simple)
}

/// Assembles a [`ClassStub`] from JVM method descriptors.
#[derive(Debug, Clone)]
pub struct ClassStubBuilder {
    binary_name: String,
    access_flags: u16,
    super_class: Option<String>,
    interfaces: Vec<String>,
    methods: Vec<RawMethod>,
}

impl ClassStubBuilder {
    pub fn new(binary_name: impl Into<String>) -> Self {
        Self {
            binary_name: binary_name.into(),
            access_flags: ACC_PUBLIC,
            super_class: None,
            interfaces: Vec::new(),
            methods: Vec::new(),
        }
    }

    pub fn extends(mut self, super_class: impl Into<String>) -> Self {
        self.super_class = Some(super_class.into());
        self
    }

    pub fn implements(mut self, interface: impl Into<String>) -> Self {
        self.interfaces.push(interface.into());
        self
    }

    pub fn interface(mut self) -> Self {
        self.access_flags |= ACC_INTERFACE;
        self
    }

    /// Add a public instance method.
    pub fn method(self, name: &str, descriptor: &str) -> Self {
        self.method_with_flags(name, descriptor, ACC_PUBLIC)
    }

    pub fn method_with_flags(self, name: &str, descriptor: &str, access_flags: u16) -> Self {
        self.method_throwing(name, descriptor, access_flags, &[])
    }

    pub fn method_throwing(
        mut self,
        name: &str,
        descriptor: &str,
        access_flags: u16,
        exceptions: &[&str],
    ) -> Self {
        self.methods.push(RawMethod {
            name: name.to_string(),
            descriptor: descriptor.to_string(),
            access_flags,
            exceptions: exceptions.iter().map(|e| e.to_string()).collect(),
        });
        self
    }

    pub fn build(self) -> Result<ClassStub> {
        RawClass {
            name: self.binary_name,
            access_flags: self.access_flags,
            super_class: self.super_class,
            interfaces: self.interfaces,
            methods: self.methods,
        }
        .into_stub()
    }
}

/// Lookup of class stubs by binary name.
pub trait ClassProvider {
    fn lookup_class(&self, binary_name: &str) -> Option<&ClassStub>;
}

#[derive(Debug, Clone, Default)]
pub struct ClassTable {
    classes: HashMap<String, ClassStub>,
}

impl ClassTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, stub: ClassStub) -> Result<()> {
        if self.classes.contains_key(&stub.binary_name) {
            return Err(Error::DuplicateClass(stub.binary_name));
        }
        self.classes.insert(stub.binary_name.clone(), stub);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        let raw: RawTable = serde_json::from_str(text)?;
        let mut table = ClassTable::new();
        for class in raw.classes {
            table.insert(class.into_stub()?)?;
        }
        Ok(table)
    }

    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }
}

impl ClassProvider for ClassTable {
    fn lookup_class(&self, binary_name: &str) -> Option<&ClassStub> {
        self.classes.get(binary_name)
    }
}

/// Whether a value of class `from` can be assigned to `to`.
///
/// Walks super classes and interfaces transitively. Classes unknown to the
/// provider have no supertypes.
pub fn is_assignable(provider: &dyn ClassProvider, from: &str, to: &str) -> bool {
    let mut seen = HashSet::new();
    let mut queue = VecDeque::from([from]);
    while let Some(current) = queue.pop_front() {
        if current == to {
            return true;
        }
        if !seen.insert(current) {
            continue;
        }
        let Some(stub) = provider.lookup_class(current) else {
            continue;
        };
        queue.extend(stub.super_class.as_deref());
        queue.extend(stub.interfaces.iter().map(String::as_str));
    }
    false
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawTable {
    #[serde(default)]
    classes: Vec<RawClass>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawClass {
    name: String,
    #[serde(default = "default_access_flags")]
    access_flags: u16,
    #[serde(default)]
    super_class: Option<String>,
    #[serde(default)]
    interfaces: Vec<String>,
    #[serde(default)]
    methods: Vec<RawMethod>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawMethod {
    name: String,
    descriptor: String,
    #[serde(default = "default_access_flags")]
    access_flags: u16,
    #[serde(default)]
    exceptions: Vec<String>,
}

fn default_access_flags() -> u16 {
    ACC_PUBLIC
}

impl RawClass {
    fn into_stub(self) -> Result<ClassStub> {
        let methods = self
            .methods
            .into_iter()
            .map(|m| {
                MethodSignature::from_descriptor(
                    self.name.clone(),
                    m.name.clone(),
                    &m.descriptor,
                    m.access_flags,
                )
                .map(|sig| sig.with_exceptions(m.exceptions))
                .map_err(|source| Error::InvalidMethod {
                    class: self.name.clone(),
                    name: m.name,
                    source: Box::new(source),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(ClassStub {
            binary_name: self.name,
            access_flags: self.access_flags,
            super_class: self.super_class,
            interfaces: self.interfaces,
            methods,
        })
    }
}
