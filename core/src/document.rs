//! Serializable schema documents.
//!
//! A [`SchemaDocument`] describes a set of named schemas, the enumerated
//! types their fields use and the naming configuration, in a form that can
//! be loaded from JSON or YAML. [`SchemaDocument::resolve`] turns it into a
//! [`Schema`] tree, rejecting unknown references and reference cycles.
//!
//! # Example
//!
//! ```
//! use envdoc_core::*;
//!
//! let doc = SchemaDocument::from_json_str(r#"{
//!     "root": "Settings",
//!     "naming": { "nested_delimiter": "_" },
//!     "schemas": [
//!         { "name": "Settings", "fields": [
//!             { "name": "port", "type": "int", "default": 8080 },
//!             { "name": "db", "nested": "Database" }
//!         ]},
//!         { "name": "Database", "fields": [
//!             { "name": "url", "type": "str", "required": true }
//!         ]}
//!     ]
//! }"#).unwrap();
//!
//! let (schema, config) = doc.resolve().unwrap();
//! let rows = walk(&schema, &config).unwrap();
//! assert_eq!(rows[1].name, "DB_URL");
//! ```

use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize};

use crate::naming::{NamingConfig, NamingOverride};
use crate::types::{EnumMember, Field, FieldKind, FieldMetadata, Schema, TypeInfo, Value};
use crate::validate::SchemaError;

/// Field type whose array values are read as tuples.
const TUPLE_TYPE: &str = "tuple";

/// A set of schemas with one designated root.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaDocument {
    /// Name of the schema to document.
    pub root: String,
    /// Naming configuration for the walk.
    #[serde(default)]
    pub naming: NamingConfig,
    /// Enumerated types referenced by field types.
    #[serde(default)]
    pub enums: Vec<EnumDef>,
    /// Schema definitions, referenced by name.
    pub schemas: Vec<SchemaDef>,
}

/// An enumerated type and its members.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnumDef {
    /// Type name, used as a field `type`.
    pub name: String,
    /// Members in declaration order.
    pub members: Vec<EnumMemberDef>,
}

/// One enum member.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnumMemberDef {
    /// Symbolic member name.
    pub name: String,
    /// Underlying value.
    pub value: serde_json::Value,
}

/// A named schema definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaDef {
    /// Schema name.
    pub name: String,
    /// Naming settings for this schema and its children.
    #[serde(default, skip_serializing_if = "NamingOverride::is_empty")]
    pub naming: NamingOverride,
    /// Fields in declaration order.
    #[serde(default)]
    pub fields: Vec<FieldDef>,
}

/// A field definition.
///
/// Exactly one of `type` and `nested` must be set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldDef {
    /// Declared identifier.
    pub name: String,
    /// Scalar type name, or the name of an enum in the document.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,
    /// Name of the nested schema.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nested: Option<String>,
    /// Whether the field must be set.
    #[serde(default)]
    pub required: bool,
    /// Default value; an explicit `null` is kept as a null default.
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub default: Option<serde_json::Value>,
    /// Description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Example value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<serde_json::Value>,
    /// Environment variable aliases.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub env: Option<Vec<String>>,
}

fn present<'de, D>(deserializer: D) -> Result<Option<serde_json::Value>, D::Error>
where
    D: Deserializer<'de>,
{
    serde_json::Value::deserialize(deserializer).map(Some)
}

impl SchemaDocument {
    /// Parses a document from JSON.
    ///
    /// # Errors
    ///
    /// Returns the [`serde_json::Error`] if the text is not a valid document.
    pub fn from_json_str(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Builds the root schema tree and returns it with the naming config.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::DuplicateSchema`], [`SchemaError::UnknownSchema`],
    /// [`SchemaError::SchemaCycle`], [`SchemaError::InconsistentFieldKind`]
    /// or [`SchemaError::UnknownEnumMember`] for malformed documents.
    pub fn resolve(&self) -> Result<(Schema, NamingConfig), SchemaError> {
        let mut schemas: HashMap<&str, &SchemaDef> = HashMap::new();
        for def in &self.schemas {
            if schemas.insert(def.name.as_str(), def).is_some() {
                return Err(SchemaError::DuplicateSchema(def.name.clone()));
            }
        }
        let enums: HashMap<&str, &EnumDef> =
            self.enums.iter().map(|e| (e.name.as_str(), e)).collect();

        let resolver = Resolver { schemas, enums };
        let mut path = Vec::new();
        let root = resolver.build_schema(&self.root, &mut path)?;
        Ok((root, self.naming.clone()))
    }
}

struct Resolver<'a> {
    schemas: HashMap<&'a str, &'a SchemaDef>,
    enums: HashMap<&'a str, &'a EnumDef>,
}

impl Resolver<'_> {
    fn build_schema(&self, name: &str, path: &mut Vec<String>) -> Result<Schema, SchemaError> {
        if path.iter().any(|segment| segment == name) {
            let cycle_path = path
                .iter()
                .map(String::as_str)
                .chain(std::iter::once(name))
                .collect::<Vec<_>>()
                .join(" -> ");
            return Err(SchemaError::SchemaCycle(cycle_path));
        }

        let def = self
            .schemas
            .get(name)
            .ok_or_else(|| SchemaError::UnknownSchema(name.to_string()))?;

        path.push(name.to_string());
        let fields = def
            .fields
            .iter()
            .map(|field| self.build_field(field, path))
            .collect::<Result<Vec<_>, _>>();
        path.pop();

        Ok(Schema {
            name: def.name.clone(),
            fields: fields?,
            naming: def.naming.clone(),
        })
    }

    fn build_field(&self, def: &FieldDef, path: &mut Vec<String>) -> Result<Field, SchemaError> {
        let metadata = FieldMetadata {
            description: def.description.clone(),
            example: None,
            env_aliases: def.env.clone(),
        };

        let (kind, default, example) = match (&def.type_name, &def.nested) {
            (Some(type_name), None) => {
                let tuple = type_name == TUPLE_TYPE;
                match self.enums.get(type_name.as_str()) {
                    Some(enum_def) => (
                        FieldKind::Scalar(enum_type(enum_def)),
                        def.default
                            .as_ref()
                            .map(|raw| enum_default(enum_def, raw))
                            .transpose()?,
                        def.example.as_ref().map(|raw| json_to_value(raw, false)),
                    ),
                    None => (
                        FieldKind::Scalar(TypeInfo::new(type_name)),
                        def.default.as_ref().map(|raw| json_to_value(raw, tuple)),
                        def.example.as_ref().map(|raw| json_to_value(raw, tuple)),
                    ),
                }
            }
            (None, Some(nested)) => (
                FieldKind::Nested(self.build_schema(nested, path)?),
                None,
                None,
            ),
            _ => return Err(SchemaError::InconsistentFieldKind(def.name.clone())),
        };

        Ok(Field {
            name: def.name.clone(),
            kind,
            required: def.required,
            default,
            metadata: FieldMetadata { example, ..metadata },
        })
    }
}

fn enum_type(def: &EnumDef) -> TypeInfo {
    TypeInfo {
        name: def.name.clone(),
        choices: def
            .members
            .iter()
            .map(|member| json_to_value(&member.value, false))
            .collect(),
    }
}

/// Resolves an enum default given as a member name or an underlying value.
fn enum_default(def: &EnumDef, raw: &serde_json::Value) -> Result<Value, SchemaError> {
    if raw.is_null() {
        return Ok(Value::None);
    }
    def.members
        .iter()
        .find(|member| raw.as_str() == Some(member.name.as_str()))
        .or_else(|| def.members.iter().find(|member| &member.value == raw))
        .map(|member| {
            Value::Enum(EnumMember::new(
                &def.name,
                &member.name,
                json_to_value(&member.value, false),
            ))
        })
        .ok_or_else(|| SchemaError::UnknownEnumMember {
            enum_name: def.name.clone(),
            member: raw.to_string(),
        })
}

/// Converts a JSON value; top-level arrays become tuples when `tuple` is set.
fn json_to_value(raw: &serde_json::Value, tuple: bool) -> Value {
    match raw {
        serde_json::Value::Null => Value::None,
        serde_json::Value::Bool(b) => Value::Bool(*b),
        serde_json::Value::Number(n) => match n.as_i64() {
            Some(int) => Value::Int(int),
            None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
        },
        serde_json::Value::String(s) => Value::Str(s.clone()),
        serde_json::Value::Array(items) => {
            let items = items.iter().map(|item| json_to_value(item, false)).collect();
            if tuple {
                Value::Tuple(items)
            } else {
                Value::List(items)
            }
        }
        serde_json::Value::Object(map) => Value::Map(
            map.iter()
                .map(|(key, value)| (key.clone(), json_to_value(value, false)))
                .collect(),
        ),
    }
}
