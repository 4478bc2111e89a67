//! Schema type definitions for configuration structure modeling.
//!
//! This module defines the data model handed to the walker by whatever
//! framework owns the configuration: [`Schema`]s made of [`Field`]s, the
//! [`Value`]s used for defaults and examples, and the [`Enumerated`] trait
//! through which enum-typed fields expose their underlying values.

use std::fmt::Write as _;

use crate::error::DisplayError;
use crate::naming::NamingOverride;

/// A configuration value used as a default or an example.
///
/// Values carry enough structure to be displayed the way a deployer would
/// write them: scalars verbatim, containers in bracketed form, and enum
/// members as their underlying value.
///
/// # Examples
///
/// ```
/// use envdoc_core::Value;
///
/// assert_eq!(Value::from(1).to_display().unwrap(), "1");
/// assert_eq!(Value::tuple([1, 2]).to_display().unwrap(), "(1, 2)");
/// assert_eq!(Value::list(["a", "b"]).to_display().unwrap(), "['a', 'b']");
/// assert_eq!(Value::None.to_display().unwrap(), "None");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Explicit null.
    None,
    /// Boolean.
    Bool(bool),
    /// Signed integer.
    Int(i64),
    /// Floating point number.
    Float(f64),
    /// Text.
    Str(String),
    /// Ordered, variable-length collection.
    List(Vec<Value>),
    /// Ordered, fixed-length collection.
    Tuple(Vec<Value>),
    /// Key/value pairs in declaration order.
    Map(Vec<(String, Value)>),
    /// A member of an enumerated type.
    Enum(EnumMember),
    /// A value of an external type that has no textual form.
    Opaque(String),
}

impl Value {
    /// Builds a [`Value::List`] from anything convertible into values.
    pub fn list<I, V>(items: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self::List(items.into_iter().map(Into::into).collect())
    }

    /// Builds a [`Value::Tuple`] from anything convertible into values.
    pub fn tuple<I, V>(items: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self::Tuple(items.into_iter().map(Into::into).collect())
    }

    /// Wraps a member of an [`Enumerated`] type.
    ///
    /// # Examples
    ///
    /// ```
    /// use envdoc_core::{Enumerated, Value};
    ///
    /// #[derive(Clone, Copy)]
    /// enum Mode { Fast, Safe }
    ///
    /// impl Enumerated for Mode {
    ///     fn type_name() -> &'static str { "Mode" }
    ///     fn variants() -> &'static [Self] { &[Mode::Fast, Mode::Safe] }
    ///     fn member_name(&self) -> &'static str {
    ///         match self { Mode::Fast => "FAST", Mode::Safe => "SAFE" }
    ///     }
    ///     fn underlying(&self) -> Value {
    ///         match self { Mode::Fast => "fast".into(), Mode::Safe => "safe".into() }
    ///     }
    /// }
    ///
    /// let value = Value::from_enum(&Mode::Safe);
    /// assert_eq!(value.resolved(), &Value::from("safe"));
    /// ```
    pub fn from_enum<E: Enumerated>(member: &E) -> Self {
        Self::Enum(EnumMember::new(
            E::type_name(),
            member.member_name(),
            member.underlying(),
        ))
    }

    /// Returns the value with enum members replaced by their underlying value.
    pub fn resolved(&self) -> &Value {
        match self {
            Self::Enum(member) => member.value.resolved(),
            other => other,
        }
    }

    /// Returns the items of a list or tuple, after enum resolution.
    pub fn items(&self) -> Option<&[Value]> {
        match self.resolved() {
            Self::List(items) | Self::Tuple(items) => Some(items),
            _ => None,
        }
    }

    /// Renders the value in its display form.
    ///
    /// # Errors
    ///
    /// Returns [`DisplayError`] for [`Value::Opaque`] values and non-finite
    /// floats, at any nesting depth.
    pub fn to_display(&self) -> Result<String, DisplayError> {
        let mut out = String::new();
        self.write_display(&mut out, false)?;
        Ok(out)
    }

    fn write_display(&self, out: &mut String, quoted: bool) -> Result<(), DisplayError> {
        match self {
            Self::None => out.push_str("None"),
            Self::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
            Self::Int(n) => {
                let _ = write!(out, "{n}");
            }
            Self::Float(f) => {
                if !f.is_finite() {
                    return Err(DisplayError::NonFinite(*f));
                }
                let _ = write!(out, "{f:?}");
            }
            Self::Str(s) if quoted => {
                let _ = write!(out, "'{s}'");
            }
            Self::Str(s) => out.push_str(s),
            Self::List(items) => {
                out.push('[');
                write_items(out, items)?;
                out.push(']');
            }
            Self::Tuple(items) => {
                out.push('(');
                write_items(out, items)?;
                if items.len() == 1 {
                    out.push(',');
                }
                out.push(')');
            }
            Self::Map(entries) => {
                out.push('{');
                for (idx, (key, value)) in entries.iter().enumerate() {
                    if idx > 0 {
                        out.push_str(", ");
                    }
                    let _ = write!(out, "'{key}': ");
                    value.write_display(out, true)?;
                }
                out.push('}');
            }
            Self::Enum(member) => member.value.write_display(out, quoted)?,
            Self::Opaque(type_name) => return Err(DisplayError::Opaque(type_name.clone())),
        }
        Ok(())
    }
}

fn write_items(out: &mut String, items: &[Value]) -> Result<(), DisplayError> {
    for (idx, item) in items.iter().enumerate() {
        if idx > 0 {
            out.push_str(", ");
        }
        item.write_display(out, true)?;
    }
    Ok(())
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

/// One member of an enumerated type together with its underlying value.
#[derive(Debug, Clone, PartialEq)]
pub struct EnumMember {
    /// Name of the enumerated type (e.g. "LogLevel").
    pub type_name: String,
    /// Symbolic member name (e.g. "INFO").
    pub name: String,
    /// Underlying value the member stands for (e.g. "info").
    pub value: Box<Value>,
}

impl EnumMember {
    /// Creates a member of `type_name` named `name` standing for `value`.
    pub fn new(type_name: &str, name: &str, value: impl Into<Value>) -> Self {
        Self {
            type_name: type_name.to_string(),
            name: name.to_string(),
            value: Box::new(value.into()),
        }
    }
}

/// Enumerated types whose members stand for an underlying value.
///
/// Implemented by Rust enums that appear as field types so that defaults
/// are documented by the value a deployer writes, not by the member name.
pub trait Enumerated: Sized + 'static {
    /// Display name of the type.
    fn type_name() -> &'static str;
    /// All members in declaration order.
    fn variants() -> &'static [Self];
    /// Symbolic name of this member.
    fn member_name(&self) -> &'static str;
    /// Underlying value of this member.
    fn underlying(&self) -> Value;
}

/// Declared type of a scalar field.
///
/// # Examples
///
/// ```
/// use envdoc_core::TypeInfo;
///
/// let ty = TypeInfo::from("int");
/// assert_eq!(ty.name, "int");
/// assert!(!ty.is_enumerated());
///
/// let level = TypeInfo::choice("Level", ["low", "high"]);
/// assert!(level.is_enumerated());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TypeInfo {
    /// Display name of the type.
    pub name: String,
    /// Underlying values of the members, for enumerated types.
    pub choices: Vec<Value>,
}

impl TypeInfo {
    /// Creates a plain scalar type.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            choices: Vec::new(),
        }
    }

    /// Creates an enumerated type from its member values.
    pub fn choice<I, V>(name: &str, choices: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self {
            name: name.to_string(),
            choices: choices.into_iter().map(Into::into).collect(),
        }
    }

    /// Describes an [`Enumerated`] Rust type.
    pub fn of_enum<E: Enumerated>() -> Self {
        Self {
            name: E::type_name().to_string(),
            choices: E::variants().iter().map(Enumerated::underlying).collect(),
        }
    }

    /// Returns `true` if the type lists member values.
    pub fn is_enumerated(&self) -> bool {
        !self.choices.is_empty()
    }
}

impl From<&str> for TypeInfo {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// Whether a field holds a value or a nested schema.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    /// A leaf value of the given type.
    Scalar(TypeInfo),
    /// A sub-schema whose fields are flattened into the parent.
    Nested(Schema),
}

/// Documentation metadata attached to a field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldMetadata {
    /// Human-readable description.
    pub description: Option<String>,
    /// Explicit example value, preferred over the default.
    pub example: Option<Value>,
    /// Environment variable names bound to the field, in order.
    pub env_aliases: Option<Vec<String>>,
}

/// A named, typed configuration entry.
///
/// Use [`scalar`](Field::scalar) or [`nested`](Field::nested) to create
/// fields, then chain builder methods.
///
/// # Examples
///
/// ```
/// use envdoc_core::{Field, Value};
///
/// let field = Field::scalar("port", "int")
///     .with_default(8080)
///     .with_description("Port to listen on");
/// assert!(!field.required);
/// assert_eq!(field.default, Some(Value::Int(8080)));
/// assert_eq!(field.aliases(), vec!["port"]);
///
/// let token = Field::scalar("token", "str")
///     .required()
///     .with_aliases(["api_token", "token"]);
/// assert_eq!(token.aliases(), vec!["api_token", "token"]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    /// Declared identifier.
    pub name: String,
    /// Scalar type or nested schema.
    pub kind: FieldKind,
    /// Whether the program refuses to start without a value.
    pub required: bool,
    /// Default value, if one was declared.
    pub default: Option<Value>,
    /// Description, example and aliases.
    pub metadata: FieldMetadata,
}

impl Field {
    /// Creates an optional scalar field with no default.
    pub fn scalar(name: &str, type_info: impl Into<TypeInfo>) -> Self {
        Self {
            name: name.to_string(),
            kind: FieldKind::Scalar(type_info.into()),
            required: false,
            default: None,
            metadata: FieldMetadata::default(),
        }
    }

    /// Creates a field holding a nested schema.
    pub fn nested(name: &str, schema: Schema) -> Self {
        Self {
            name: name.to_string(),
            kind: FieldKind::Nested(schema),
            required: false,
            default: None,
            metadata: FieldMetadata::default(),
        }
    }

    /// Marks the field as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Sets the default value.
    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Adds a description.
    pub fn with_description(mut self, desc: &str) -> Self {
        self.metadata.description = Some(desc.to_string());
        self
    }

    /// Sets an explicit example value.
    pub fn with_example(mut self, value: impl Into<Value>) -> Self {
        self.metadata.example = Some(value.into());
        self
    }

    /// Binds the field to the given environment variable names.
    pub fn with_aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.metadata.env_aliases = Some(aliases.into_iter().map(Into::into).collect());
        self
    }

    /// Returns the environment variable names bound to this field.
    ///
    /// Falls back to the field name when no aliases were declared.
    pub fn aliases(&self) -> Vec<&str> {
        match &self.metadata.env_aliases {
            Some(aliases) => aliases.iter().map(String::as_str).collect(),
            None => vec![self.name.as_str()],
        }
    }
}

/// An ordered set of fields.
///
/// # Examples
///
/// ```
/// use envdoc_core::{Field, Schema};
///
/// let database = Schema::new("Database").with_field(Field::scalar("url", "str").required());
/// let settings = Schema::new("Settings")
///     .with_field(Field::scalar("debug", "bool").with_default(false))
///     .with_field(Field::nested("db", database));
///
/// assert_eq!(settings.fields.len(), 2);
/// assert!(settings.find_field("db").is_some());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schema {
    /// Name of the schema (e.g. the settings struct name).
    pub name: String,
    /// Fields in declaration order.
    pub fields: Vec<Field>,
    /// Naming settings this schema changes for itself and its children.
    pub naming: NamingOverride,
}

impl Schema {
    /// Creates an empty schema.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }

    /// Appends a field.
    pub fn with_field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    /// Sets the naming override.
    pub fn with_naming(mut self, naming: NamingOverride) -> Self {
        self.naming = naming;
        self
    }

    /// Finds a field by declared name.
    pub fn find_field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }
}
