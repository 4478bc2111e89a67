//! Schema validation.
//!
//! Validates structural invariants of configuration schemas, catching empty
//! names, duplicate fields and unusable alias lists before any row is
//! produced.
//!
//! # Examples
//!
//! ```
//! use envdoc_core::*;
//!
//! let schema = Schema::new("Settings").with_field(Field::scalar("port", "int"));
//! assert!(validate_schema(&schema).is_empty());
//!
//! // Invalid: alias list declared but empty
//! let bad = Schema::new("Settings")
//!     .with_field(Field::scalar("port", "int").with_aliases(Vec::<String>::new()));
//! assert!(!validate_schema(&bad).is_empty());
//! ```

use std::collections::HashSet;

use thiserror::Error;

use crate::{FieldKind, Schema};

/// Schema validation and resolution errors.
///
/// Each variant describes a specific structural problem. The `Display`
/// impl provides a human-readable message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// A field has an empty or whitespace-only name.
    #[error("field in schema '{0}' has an empty name")]
    EmptyFieldName(String),
    /// Two fields in the same schema share a name.
    #[error("duplicate field in schema '{schema}': {field}")]
    DuplicateField {
        /// Schema declaring the field twice.
        schema: String,
        /// Repeated field name.
        field: String,
    },
    /// A field declares an alias list with no entries.
    #[error("field '{0}' declares an empty alias list")]
    EmptyAliasList(String),
    /// A field declares an empty or whitespace-only alias.
    #[error("field '{0}' declares a blank alias")]
    BlankAlias(String),
    /// A nested field refers to a schema that is not declared.
    #[error("unknown schema reference: {0}")]
    UnknownSchema(String),
    /// Two schemas in one document share a name.
    #[error("duplicate schema in document: {0}")]
    DuplicateSchema(String),
    /// Nested schema references form a cycle.
    #[error("schema cycle detected at path: {0}")]
    SchemaCycle(String),
    /// A field is neither a scalar nor a nested schema, or claims to be both.
    #[error("field '{0}' must declare exactly one of a type or a nested schema")]
    InconsistentFieldKind(String),
    /// A default names a member the enumerated type does not have.
    #[error("enum {enum_name} has no member {member}")]
    UnknownEnumMember {
        /// Enumerated type name.
        enum_name: String,
        /// Member name that was not found.
        member: String,
    },
}

/// Validates a schema and all schemas nested in it.
///
/// Stops at the first problem found, like the other validators in this
/// crate, so the returned list holds at most one error.
///
/// # Examples
///
/// ```
/// use envdoc_core::*;
///
/// let schema = Schema::new("Settings")
///     .with_field(Field::scalar("a", "str"))
///     .with_field(Field::scalar("a", "int"));
/// let errors = validate_schema(&schema);
/// assert!(matches!(errors[0], SchemaError::DuplicateField { .. }));
/// ```
pub fn validate_schema(schema: &Schema) -> Vec<SchemaError> {
    let mut errors = Vec::new();
    let mut seen: HashSet<&str> = HashSet::new();

    for field in &schema.fields {
        let name = field.name.trim();
        if name.is_empty() {
            errors.push(SchemaError::EmptyFieldName(schema_label(schema)));
            return errors;
        }

        if !seen.insert(name) {
            errors.push(SchemaError::DuplicateField {
                schema: schema.name.clone(),
                field: name.to_string(),
            });
            return errors;
        }

        if let Some(aliases) = &field.metadata.env_aliases {
            if aliases.is_empty() {
                errors.push(SchemaError::EmptyAliasList(name.to_string()));
                return errors;
            }
            if aliases.iter().any(|alias| alias.trim().is_empty()) {
                errors.push(SchemaError::BlankAlias(name.to_string()));
                return errors;
            }
        }

        if let FieldKind::Nested(child) = &field.kind {
            errors.extend(validate_schema(child));
            if !errors.is_empty() {
                return errors;
            }
        }
    }

    errors
}

fn schema_label(schema: &Schema) -> String {
    if schema.name.trim().is_empty() {
        "<unnamed>".to_string()
    } else {
        schema.name.clone()
    }
}
