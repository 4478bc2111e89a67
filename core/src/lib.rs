//! Core schema types and environment variable naming for envdoc.
//!
//! This crate defines the model a configuration framework hands over and
//! the walk that flattens it into documentation rows:
//!
//! - [`Schema`]: an ordered set of [`Field`]s, possibly nesting other
//!   schemas through [`FieldKind::Nested`].
//! - [`Value`]: defaults and examples, including enum members that stand
//!   for an underlying value ([`Enumerated`]).
//! - [`NamingConfig`]: prefix, nested delimiter, case sensitivity and alias
//!   merging; a schema may adjust it with a [`NamingOverride`].
//! - [`Row`]: one line of the reference table.
//!
//! [`walk`] produces the rows, [`validate_schema`] catches malformed
//! metadata, and [`SchemaDocument`] loads schemas from JSON or YAML.
//!
//! # Example
//!
//! ```
//! use envdoc_core::*;
//!
//! let schema = Schema::new("Settings")
//!     .with_field(Field::scalar("token", "str").required().with_aliases(["api_token", "token"]))
//!     .with_field(Field::scalar("port", "int").with_default(8080));
//!
//! let rows = walk(&schema, &NamingConfig::default()).unwrap();
//! assert_eq!(rows[0].name, "Any of API_TOKEN; TOKEN");
//! assert_eq!(rows[0].default_text(), "-");
//! assert_eq!(rows[1].name, "PORT");
//! assert_eq!(rows[1].example.to_string(), "8080");
//! ```

mod document;
mod error;
mod naming;
mod row;
mod types;
mod validate;
mod walk;

pub use document::{EnumDef, EnumMemberDef, FieldDef, SchemaDef, SchemaDocument};
pub use error::{DisplayError, DocError, Result};
pub use naming::{NamingConfig, NamingOverride};
pub use row::{Cell, Row};
pub use types::*;
pub use validate::{SchemaError, validate_schema};
pub use walk::{REQUIRED_MARKER, walk, walk_with_prefix};
