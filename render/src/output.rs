//! Output formats for documentation rows.

use std::io::Write;

use envdoc_core::Row;

use crate::error::Result;
use crate::table::{DEFAULT_COLUMNS, render_table};

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum OutputFormat {
    /// Aligned markdown table.
    #[default]
    Markdown,
    /// Pretty-printed JSON array of rows.
    Json,
    /// YAML sequence of rows.
    Yaml,
}

impl OutputFormat {
    /// Conventional file extension for the format.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Markdown => "md",
            Self::Json => "json",
            Self::Yaml => "yaml",
        }
    }
}

/// Writes `rows` to `sink` in the requested format.
///
/// Markdown uses [`DEFAULT_COLUMNS`]; JSON and YAML serialize the rows with
/// list cells kept as arrays.
///
/// # Errors
///
/// Returns [`RenderError`](crate::RenderError) if writing or serialization
/// fails.
pub fn write_rows<W: Write>(rows: &[Row], format: OutputFormat, sink: &mut W) -> Result<()> {
    match format {
        OutputFormat::Markdown => render_table(rows, &DEFAULT_COLUMNS, sink)?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *sink, rows)?;
            writeln!(sink)?;
        }
        OutputFormat::Yaml => serde_yaml::to_writer(&mut *sink, rows)?,
    }
    Ok(())
}

/// Formats `rows` in the requested format.
///
/// # Errors
///
/// Same as [`write_rows`].
///
/// # Examples
///
/// ```
/// use envdoc_core::{Field, NamingConfig, Schema, walk};
/// use envdoc_render::{OutputFormat, format_rows};
///
/// let schema = Schema::new("Settings").with_field(Field::scalar("port", "int").with_default(80));
/// let rows = walk(&schema, &NamingConfig::default()).unwrap();
///
/// let json = format_rows(&rows, OutputFormat::Json).unwrap();
/// assert!(json.contains("\"name\": \"PORT\""));
/// ```
pub fn format_rows(rows: &[Row], format: OutputFormat) -> Result<String> {
    let mut out = Vec::new();
    write_rows(rows, format, &mut out)?;
    Ok(String::from_utf8(out)?)
}
