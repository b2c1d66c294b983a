use thiserror::Error;

pub type Result<T, E = IntrospectionError> = std::result::Result<T, E>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntrospectionError {
    #[error("class not found: {0}")]
    UnknownClass(String),
    #[error("{stop_class} is not a superclass of {class}")]
    NotASuperclass { class: String, stop_class: String },
    #[error("property name must not be empty")]
    EmptyPropertyName,
    #[error("invalid {role} `{method}` for property `{property}`: {reason}")]
    InvalidAccessor {
        property: String,
        role: &'static str,
        method: String,
        reason: &'static str,
    },
    #[error("type mismatch for property `{property}`: expected {expected}, found {found}")]
    TypeMismatch {
        property: String,
        expected: String,
        found: String,
    },
    #[error("indexed property `{0}` needs an indexed read or write method")]
    MissingIndexedAccessor(String),
}
