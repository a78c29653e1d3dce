//! Container error types

use morph_mutation::ContainerKind;
use serde_json::Value as JsonValue;

/// Errors converting between native containers and the canonical form
#[derive(Debug, thiserror::Error)]
pub enum ContainerError {
    /// Input is not one of the four supported shapes
    #[error("unsupported container type: {found}")]
    UnsupportedType { found: String },

    /// Reconstructed record does not satisfy its field constraints
    #[error("record validation failed: {reason}")]
    Validation { reason: String },

    /// Record schema could not be compiled
    #[error("invalid record schema: {0}")]
    InvalidSchema(String),

    /// Canonical form belongs to a different container kind
    #[error("canonical form is a {found}, expected a {expected}")]
    KindMismatch {
        expected: ContainerKind,
        found: ContainerKind,
    },

    /// JSON (de)serialization failed
    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ContainerError {
    /// Create unsupported type error from the offending JSON value
    #[inline]
    #[must_use]
    pub fn unsupported(value: &JsonValue) -> Self {
        Self::UnsupportedType {
            found: json_type_name(value).to_string(),
        }
    }

    /// Check if this is a record validation failure
    #[inline]
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }
}

/// JSON type name, for diagnostics
pub(crate) fn json_type_name(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn unsupported_names_json_type() {
        let err = ContainerError::unsupported(&json!(42));
        assert_eq!(err.to_string(), "unsupported container type: number");
        assert!(!err.is_validation());
    }

    #[test]
    fn kind_mismatch_display() {
        let err = ContainerError::KindMismatch {
            expected: ContainerKind::Set,
            found: ContainerKind::Mapping,
        };
        assert!(err.to_string().contains("expected a set"));
    }
}
