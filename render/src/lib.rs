//! Rendering of envdoc rows.
//!
//! [`render_table`] lays [`Row`](envdoc_core::Row)s out as an aligned
//! markdown table whose column widths fit the content; [`format_rows`] and
//! [`write_rows`] add JSON and YAML output.
//!
//! # Example
//!
//! ```
//! use envdoc_core::{Field, NamingConfig, Schema, walk};
//! use envdoc_render::{DEFAULT_COLUMNS, render_to_string};
//!
//! let schema = Schema::new("Settings")
//!     .with_field(Field::scalar("a", "str").required())
//!     .with_field(Field::scalar("b", "int").with_default(1));
//! let rows = walk(&schema, &NamingConfig::default()).unwrap();
//!
//! let table = render_to_string(&rows, &DEFAULT_COLUMNS).unwrap();
//! assert_eq!(table, "\
//! | Name | Description | Type | Example | Default |
//! | ---- | ----------- | ---- | ------- | ------- |
//! | A    |             | str  |         | -       |
//! | B    |             | int  | 1       | 1       |
//! ");
//! ```

mod error;
mod output;
mod table;

pub use error::{RenderError, Result};
pub use output::{OutputFormat, format_rows, write_rows};
pub use table::{Column, DEFAULT_COLUMNS, render_table, render_to_string};
