use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BaseType {
    Byte,
    Char,
    Double,
    Float,
    Int,
    Long,
    Short,
    Boolean,
}

impl BaseType {
    pub fn keyword(self) -> &'static str {
        match self {
            BaseType::Byte => "byte",
            BaseType::Char => "char",
            BaseType::Double => "double",
            BaseType::Float => "float",
            BaseType::Int => "int",
            BaseType::Long => "long",
            BaseType::Short => "short",
            BaseType::Boolean => "boolean",
        }
    }

    fn descriptor_char(self) -> char {
        match self {
            BaseType::Byte => 'B',
            BaseType::Char => 'C',
            BaseType::Double => 'D',
            BaseType::Float => 'F',
            BaseType::Int => 'I',
            BaseType::Long => 'J',
            BaseType::Short => 'S',
            BaseType::Boolean => 'Z',
        }
    }
}

/// A non-void Java type. Class names are stored in binary form with dots
/// (`java.lang.String`, `com.example.Outer$Inner`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum JavaType {
    Base(BaseType),
    Object(String),
    Array(Box<JavaType>),
}

impl JavaType {
    pub const INT: JavaType = JavaType::Base(BaseType::Int);
    pub const BOOLEAN: JavaType = JavaType::Base(BaseType::Boolean);

    pub fn object(binary_name: impl Into<String>) -> Self {
        JavaType::Object(binary_name.into())
    }

    pub fn array_of(component: JavaType) -> Self {
        JavaType::Array(Box::new(component))
    }

    pub fn is_boolean(&self) -> bool {
        matches!(self, JavaType::Base(BaseType::Boolean))
    }

    pub fn is_int(&self) -> bool {
        matches!(self, JavaType::Base(BaseType::Int))
    }

    pub fn component_type(&self) -> Option<&JavaType> {
        match self {
            JavaType::Array(component) => Some(component),
            _ => None,
        }
    }

    /// The name reflection reports for this type: `int`, `java.lang.String`,
    /// `[I`, `[Ljava.lang.String;`.
    pub fn binary_name(&self) -> String {
        match self {
            JavaType::Base(base) => base.keyword().to_string(),
            JavaType::Object(name) => name.clone(),
            JavaType::Array(_) => self.descriptor().replace('/', "."),
        }
    }

    /// JVM descriptor form (`I`, `Ljava/lang/String;`, `[[I`).
    pub fn descriptor(&self) -> String {
        let mut out = String::new();
        self.write_descriptor(&mut out);
        out
    }

    fn write_descriptor(&self, out: &mut String) {
        match self {
            JavaType::Base(base) => out.push(base.descriptor_char()),
            JavaType::Object(name) => {
                out.push('L');
                out.extend(name.chars().map(|c| if c == '.' { '/' } else { c }));
                out.push(';');
            }
            JavaType::Array(component) => {
                out.push('[');
                component.write_descriptor(out);
            }
        }
    }
}

impl fmt::Display for JavaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JavaType::Base(base) => f.write_str(base.keyword()),
            JavaType::Object(name) => f.write_str(name),
            JavaType::Array(component) => write!(f, "{component}[]"),
        }
    }
}

impl From<JavaType> for String {
    fn from(ty: JavaType) -> Self {
        ty.descriptor()
    }
}

impl TryFrom<String> for JavaType {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        parse_field_descriptor(&value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReturnType {
    Void,
    Type(JavaType),
}

impl ReturnType {
    pub fn is_void(&self) -> bool {
        matches!(self, ReturnType::Void)
    }

    pub fn as_type(&self) -> Option<&JavaType> {
        match self {
            ReturnType::Void => None,
            ReturnType::Type(ty) => Some(ty),
        }
    }
}

impl fmt::Display for ReturnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReturnType::Void => f.write_str("void"),
            ReturnType::Type(ty) => ty.fmt(f),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDescriptor {
    pub params: Vec<JavaType>,
    pub return_type: ReturnType,
}

pub fn parse_field_descriptor(desc: &str) -> Result<JavaType> {
    let (ty, rest) = parse_field_type(desc)?;
    if !rest.is_empty() {
        return Err(Error::InvalidDescriptor(desc.to_string()));
    }
    Ok(ty)
}

pub fn parse_method_descriptor(desc: &str) -> Result<MethodDescriptor> {
    let Some(mut rest) = desc.strip_prefix('(') else {
        return Err(Error::InvalidDescriptor(desc.to_string()));
    };

    let mut params = Vec::new();
    loop {
        if let Some(after) = rest.strip_prefix(')') {
            rest = after;
            break;
        }
        if rest.is_empty() {
            return Err(Error::InvalidDescriptor(desc.to_string()));
        }
        let (param, after) = parse_field_type(rest)?;
        params.push(param);
        rest = after;
    }

    if rest.is_empty() {
        return Err(Error::InvalidDescriptor(desc.to_string()));
    }

    let (return_type, rest) = if let Some(rest) = rest.strip_prefix('V') {
        (ReturnType::Void, rest)
    } else {
        let (ty, rest) = parse_field_type(rest)?;
        (ReturnType::Type(ty), rest)
    };

    if !rest.is_empty() {
        return Err(Error::InvalidDescriptor(desc.to_string()));
    }

    Ok(MethodDescriptor {
        params,
        return_type,
    })
}

fn parse_field_type(input: &str) -> Result<(JavaType, &str)> {
    let Some(first) = input.chars().next() else {
        return Err(Error::InvalidDescriptor(input.to_string()));
    };
    let rest = &input[first.len_utf8()..];
    let base = match first {
        'B' => BaseType::Byte,
        'C' => BaseType::Char,
        'D' => BaseType::Double,
        'F' => BaseType::Float,
        'I' => BaseType::Int,
        'J' => BaseType::Long,
        'S' => BaseType::Short,
        'Z' => BaseType::Boolean,
        'L' => {
            let Some(end) = rest.find(';') else {
                return Err(Error::InvalidDescriptor(input.to_string()));
            };
            let name = &rest[..end];
            if name.is_empty() {
                return Err(Error::InvalidDescriptor(input.to_string()));
            }
            return Ok((JavaType::Object(name.replace('/', ".")), &rest[end + 1..]));
        }
        '[' => {
            let (component, rest) = parse_field_type(rest)?;
            return Ok((JavaType::Array(Box::new(component)), rest));
        }
        _ => return Err(Error::InvalidDescriptor(input.to_string())),
    };
    Ok((JavaType::Base(base), rest))
}
