//! Flattening schemas into documentation rows.
//!
//! [`walk`] visits fields in declaration order, descends into nested
//! schemas in place and resolves every field's aliases into environment
//! variable names according to the [`NamingConfig`] of its level.
//!
//! # Example
//!
//! ```
//! use envdoc_core::*;
//!
//! let database = Schema::new("Database").with_field(Field::scalar("url", "str").required());
//! let settings = Schema::new("Settings")
//!     .with_field(Field::scalar("port", "int").with_default(8080))
//!     .with_field(Field::nested("db", database));
//!
//! let config = NamingConfig::default().with_prefix("APP_").with_delimiter("__");
//! let rows = walk(&settings, &config).unwrap();
//! let names: Vec<_> = rows.iter().map(|r| r.name.as_str()).collect();
//! assert_eq!(names, vec!["APP_PORT", "APP_DB__URL"]);
//! ```

use tracing::{debug, trace};

use crate::error::{DocError, Result};
use crate::naming::NamingConfig;
use crate::row::{Cell, Row};
use crate::types::{Field, FieldKind, Schema, TypeInfo, Value};
use crate::validate::validate_schema;

/// Default cell shown for required fields.
pub const REQUIRED_MARKER: &str = "-";

const MERGED_LABEL: &str = "Any of ";
const MERGED_SEPARATOR: &str = "; ";
const CHOICE_SEPARATOR: &str = "; ";

/// Flattens `schema` into rows, starting from the config's top-level prefix.
///
/// The schema's own [`NamingOverride`](crate::NamingOverride) applies to
/// the root level.
///
/// # Errors
///
/// Returns [`DocError::Schema`] if the schema fails validation and
/// [`DocError::ValueConversion`] if a default or example cannot be shown as
/// text. No rows are returned on failure.
pub fn walk(schema: &Schema, config: &NamingConfig) -> Result<Vec<Row>> {
    walk_with_prefix(schema, config, &config.env_prefix)
}

/// Flattens `schema` into rows with an explicit name prefix.
///
/// # Errors
///
/// Same as [`walk`].
pub fn walk_with_prefix(schema: &Schema, config: &NamingConfig, prefix: &str) -> Result<Vec<Row>> {
    if let Some(err) = validate_schema(schema).into_iter().next() {
        return Err(err.into());
    }

    let config = config.apply(&schema.naming);
    let mut rows = Vec::new();
    collect_rows(schema, &config, prefix, &mut rows)?;

    debug!(schema = %schema.name, rows = rows.len(), "Flattened schema");
    Ok(rows)
}

fn collect_rows(
    schema: &Schema,
    config: &NamingConfig,
    prefix: &str,
    rows: &mut Vec<Row>,
) -> Result<()> {
    for field in &schema.fields {
        match &field.kind {
            FieldKind::Nested(child) => {
                let child_config = config.apply(&child.naming);
                for alias in field.aliases() {
                    let child_prefix = match &config.nested_delimiter {
                        Some(delimiter) => config.apply_case(&format!("{prefix}{alias}{delimiter}")),
                        None => String::new(),
                    };
                    trace!(
                        field = %field.name,
                        schema = %child.name,
                        prefix = %child_prefix,
                        "Descending into nested schema"
                    );
                    collect_rows(child, &child_config, &child_prefix, rows)?;
                }
            }
            FieldKind::Scalar(type_info) => {
                emit_scalar(field, type_info, config, prefix, rows)?;
            }
        }
    }
    Ok(())
}

fn emit_scalar(
    field: &Field,
    type_info: &TypeInfo,
    config: &NamingConfig,
    prefix: &str,
    rows: &mut Vec<Row>,
) -> Result<()> {
    let full_names: Vec<String> = field
        .aliases()
        .into_iter()
        .map(|alias| config.apply_case(&format!("{prefix}{alias}")))
        .collect();

    let names = if config.merge_aliases {
        vec![merged_name(&full_names)]
    } else {
        full_names
    };

    // Errors name the first resolved row name; validation guarantees one exists.
    let label = names.first().map(String::as_str).unwrap_or(field.name.as_str());
    let example = example_cell(field, type_info, label)?;
    let default = default_cell(field, label)?;
    let description = field.metadata.description.clone().unwrap_or_default();

    trace!(field = %field.name, rows = names.len(), "Emitting scalar field");
    for name in names {
        rows.push(Row {
            name,
            description: description.clone(),
            type_name: type_info.name.clone(),
            example: example.clone(),
            default: default.clone(),
        });
    }
    Ok(())
}

fn merged_name(full_names: &[String]) -> String {
    match full_names {
        [single] => single.clone(),
        many => format!("{MERGED_LABEL}{}", many.join(MERGED_SEPARATOR)),
    }
}

fn default_cell(field: &Field, label: &str) -> Result<Option<Cell>> {
    if field.required {
        return Ok(Some(Cell::from(REQUIRED_MARKER)));
    }
    field
        .default
        .as_ref()
        .map(|value| display(value.resolved(), label).map(Cell::Text))
        .transpose()
}

fn example_cell(field: &Field, type_info: &TypeInfo, label: &str) -> Result<Cell> {
    if let Some(example) = &field.metadata.example {
        return value_cell(example, label);
    }

    match field.default.as_ref().map(Value::resolved) {
        Some(Value::None) | None => {}
        Some(default) => return value_cell(default, label),
    }

    if type_info.is_enumerated() {
        let choices = type_info
            .choices
            .iter()
            .map(|choice| display(choice.resolved(), label))
            .collect::<Result<Vec<_>>>()?;
        return Ok(Cell::Text(choices.join(CHOICE_SEPARATOR)));
    }

    Ok(Cell::default())
}

fn value_cell(value: &Value, label: &str) -> Result<Cell> {
    match value.items() {
        Some(items) => items
            .iter()
            .map(|item| display(item, label))
            .collect::<Result<Vec<_>>>()
            .map(Cell::List),
        None => display(value.resolved(), label).map(Cell::Text),
    }
}

fn display(value: &Value, label: &str) -> Result<String> {
    value
        .to_display()
        .map_err(|source| DocError::ValueConversion {
            field: label.to_string(),
            source,
        })
}
