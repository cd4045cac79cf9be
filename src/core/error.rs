use serde::Serialize;
use thiserror::Error;

/// Errors that can occur while building, validating, or rendering a document.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FacturaError {
    /// One or more validation rules failed.
    #[error("validation failed with {} error(s): {}", .0.len(), summarize(.0))]
    Validation(Vec<ValidationError>),

    /// Builder encountered invalid or missing configuration.
    #[error("builder error: {0}")]
    Builder(String),

    /// Clave could not be parsed or encoded.
    #[error("clave error: {0}")]
    Key(#[from] super::key::KeyError),

    /// Consecutivo could not be parsed or encoded.
    #[error("consecutivo error: {0}")]
    Consecutive(#[from] super::consecutive::ConsecutiveError),

    /// Catalog configuration could not be loaded.
    #[error("catalog error: {0}")]
    Catalog(String),

    /// XML generation error.
    #[error("XML error: {0}")]
    Xml(String),

    /// Submission payload could not be encoded or decoded.
    #[error("payload error: {0}")]
    Payload(String),
}

impl FacturaError {
    /// The collected validation errors, if this is a validation failure.
    pub fn validation_errors(&self) -> &[ValidationError] {
        match self {
            Self::Validation(errors) => errors,
            _ => &[],
        }
    }
}

fn summarize(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Classification of a validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ErrorKind {
    /// Wrong length, charset, or range for a field.
    Format,
    /// A code is not a member of its catalog.
    Catalog,
    /// Two fields that must agree disagree.
    Consistency,
    /// A field required (or forbidden) by another field's value is missing (or present).
    ConditionalField,
    /// A pre-computed amount disagrees with its operands beyond tolerance.
    ArithmeticMismatch,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Format => "FormatError",
            Self::Catalog => "CatalogError",
            Self::Consistency => "ConsistencyError",
            Self::ConditionalField => "ConditionalFieldError",
            Self::ArithmeticMismatch => "ArithmeticMismatchError",
        };
        f.write_str(name)
    }
}

/// A single validation error with field path, kind, and message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    /// Dot-separated path to the invalid field (e.g. "emisor.identificacion.numero").
    pub field: String,
    pub kind: ErrorKind,
    /// Human-readable error description.
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}: {}", self.kind, self.field, self.message)
    }
}

impl ValidationError {
    pub fn new(field: impl Into<String>, kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            kind,
            message: message.into(),
        }
    }

    pub fn format(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(field, ErrorKind::Format, message)
    }

    pub fn catalog(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(field, ErrorKind::Catalog, message)
    }

    pub fn consistency(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(field, ErrorKind::Consistency, message)
    }

    pub fn conditional(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(field, ErrorKind::ConditionalField, message)
    }

    pub fn arithmetic(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(field, ErrorKind::ArithmeticMismatch, message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_kind_and_path() {
        let err = ValidationError::arithmetic("resumen.total_comprobante", "off by 1.00");
        assert_eq!(
            err.to_string(),
            "[ArithmeticMismatchError] resumen.total_comprobante: off by 1.00"
        );
    }

    #[test]
    fn validation_variant_exposes_errors() {
        let err = FacturaError::Validation(vec![
            ValidationError::format("clave", "bad"),
            ValidationError::catalog("codigo_actividad", "unknown"),
        ]);
        assert_eq!(err.validation_errors().len(), 2);
        assert!(err.to_string().starts_with("validation failed with 2 error(s)"));
        assert!(FacturaError::Builder("x".into()).validation_errors().is_empty());
    }
}
