use std::fmt;

use serde::Serialize;

use crate::descriptor::{parse_method_descriptor, JavaType, ReturnType};
use crate::error::Result;

pub const ACC_PUBLIC: u16 = 0x0001;
pub const ACC_PRIVATE: u16 = 0x0002;
pub const ACC_STATIC: u16 = 0x0008;

/// One method of a class, as seen by introspection.
///
/// Equality is identity: two signatures are equal only when they come from
/// the same declaring class and agree on name, parameters, return type,
/// modifiers, and declared exceptions. Use [`MethodSignature::same_signature`]
/// to compare by `(name, params)` only.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct MethodSignature {
    pub declaring_class: String,
    pub name: String,
    pub params: Vec<JavaType>,
    pub return_type: ReturnType,
    pub access_flags: u16,
    pub exceptions: Vec<String>,
}

impl MethodSignature {
    pub fn new(
        declaring_class: impl Into<String>,
        name: impl Into<String>,
        params: Vec<JavaType>,
        return_type: ReturnType,
        access_flags: u16,
    ) -> Self {
        Self {
            declaring_class: declaring_class.into(),
            name: name.into(),
            params,
            return_type,
            access_flags,
            exceptions: Vec::new(),
        }
    }

    /// Build a signature from a JVM method descriptor such as `(I)Ljava/lang/String;`.
    pub fn from_descriptor(
        declaring_class: impl Into<String>,
        name: impl Into<String>,
        descriptor: &str,
        access_flags: u16,
    ) -> Result<Self> {
        let parsed = parse_method_descriptor(descriptor)?;
        Ok(Self::new(
            declaring_class,
            name,
            parsed.params,
            parsed.return_type,
            access_flags,
        ))
    }

    pub fn with_exceptions<I, S>(mut self, exceptions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exceptions = exceptions.into_iter().map(Into::into).collect();
        self
    }

    pub fn is_public(&self) -> bool {
        self.access_flags & ACC_PUBLIC != 0
    }

    pub fn is_static(&self) -> bool {
        self.access_flags & ACC_STATIC != 0
    }

    pub fn returns(&self) -> Option<&JavaType> {
        self.return_type.as_type()
    }

    pub fn throws(&self, exception: &str) -> bool {
        self.exceptions.iter().any(|e| e == exception)
    }

    pub fn same_signature(&self, other: &MethodSignature) -> bool {
        self.name == other.name && self.params == other.params
    }

    /// `name` followed by `_<binary name>` for each parameter; unique within a
    /// class's method set.
    pub fn qualified_name(&self) -> String {
        let mut out = self.name.clone();
        for param in &self.params {
            out.push('_');
            out.push_str(&param.binary_name());
        }
        out
    }
}

impl fmt::Display for MethodSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}.{}(", self.return_type, self.declaring_class, self.name)?;
        for (idx, param) in self.params.iter().enumerate() {
            if idx > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{param}")?;
        }
        f.write_str(")")
    }
}
