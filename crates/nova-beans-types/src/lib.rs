//! Pre-extracted class and method signature tables.
//!
//! The bean introspection engine never looks at live classes. Instead it works
//! on [`ClassStub`]s handed out by a [`ClassProvider`], usually a
//! [`ClassTable`] loaded from JSON or assembled in code.

#![forbid(unsafe_code)]

mod class;
mod descriptor;
mod error;
mod method;

pub use crate::class::{
    is_assignable, simple_name, ClassProvider, ClassStub, ClassStubBuilder, ClassTable,
    ACC_INTERFACE,
};
pub use crate::descriptor::{parse_field_descriptor, parse_method_descriptor};
pub use crate::descriptor::{BaseType, JavaType, MethodDescriptor, ReturnType};
pub use crate::error::{Error, Result};
pub use crate::method::{MethodSignature, ACC_PRIVATE, ACC_PUBLIC, ACC_STATIC};
