//! Fixed-width table rendering.
//!
//! Column widths grow to fit the longest cell, header label included.
//! Rows are never sorted or truncated, so the output is fully determined by
//! the row sequence and the column order.

use std::borrow::Cow;
use std::fmt::Write as _;
use std::io::Write;

use envdoc_core::Row;
use tracing::debug;

use crate::error::{RenderError, Result};

/// A column of the reference table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    /// Environment variable name.
    Name,
    /// Field description.
    Description,
    /// Declared type.
    Type,
    /// Example value.
    Example,
    /// Default value.
    Default,
}

/// Column order used by [`render_table`] callers that do not choose one.
pub const DEFAULT_COLUMNS: [Column; 5] = [
    Column::Name,
    Column::Description,
    Column::Type,
    Column::Example,
    Column::Default,
];

impl Column {
    /// Header label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Description => "Description",
            Self::Type => "Type",
            Self::Example => "Example",
            Self::Default => "Default",
        }
    }

    /// Cell text of `row` in this column; list cells are comma-joined.
    pub fn cell(self, row: &Row) -> Cow<'_, str> {
        match self {
            Self::Name => Cow::Borrowed(&row.name),
            Self::Description => Cow::Borrowed(&row.description),
            Self::Type => Cow::Borrowed(&row.type_name),
            Self::Example => row.example.flatten(),
            Self::Default => row.default_text(),
        }
    }
}

/// Writes `rows` as an aligned table to `sink`.
///
/// Emits a header line, a dash separator and one line per row. Each line is
/// written as soon as it is formatted.
///
/// # Errors
///
/// Returns [`RenderError::Io`] if writing to the sink fails.
///
/// # Examples
///
/// ```
/// use envdoc_core::{Cell, Row};
/// use envdoc_render::{DEFAULT_COLUMNS, render_table};
///
/// let rows = vec![Row {
///     name: "PORT".into(),
///     description: "Port to listen on".into(),
///     type_name: "int".into(),
///     example: Cell::from("8080"),
///     default: Some(Cell::from("8080")),
/// }];
///
/// let mut out = Vec::new();
/// render_table(&rows, &DEFAULT_COLUMNS, &mut out).unwrap();
/// let text = String::from_utf8(out).unwrap();
/// assert!(text.starts_with("| Name | Description       | Type |"));
/// ```
pub fn render_table<W: Write>(rows: &[Row], columns: &[Column], sink: &mut W) -> Result<()> {
    let cells: Vec<Vec<Cow<'_, str>>> = rows
        .iter()
        .map(|row| columns.iter().map(|column| column.cell(row)).collect())
        .collect();

    let widths: Vec<usize> = columns
        .iter()
        .enumerate()
        .map(|(idx, column)| {
            cells
                .iter()
                .map(|row| text_width(&row[idx]))
                .fold(text_width(column.label()), usize::max)
        })
        .collect();

    debug!(rows = rows.len(), widths = ?widths, "Rendering table");

    write_line(sink, columns.iter().map(|column| column.label()), &widths)?;
    let dashes: Vec<String> = widths.iter().map(|width| "-".repeat(*width)).collect();
    write_line(sink, dashes.iter().map(String::as_str), &widths)?;
    for row in &cells {
        write_line(sink, row.iter().map(|cell| &**cell), &widths)?;
    }

    Ok(())
}

/// Renders `rows` into a string.
///
/// # Errors
///
/// Returns [`RenderError::Utf8`] only if the rendered bytes are not valid
/// UTF-8, which cannot happen for rows built from Rust strings.
pub fn render_to_string(rows: &[Row], columns: &[Column]) -> Result<String> {
    let mut out = Vec::new();
    render_table(rows, columns, &mut out)?;
    String::from_utf8(out).map_err(RenderError::Utf8)
}

fn text_width(text: &str) -> usize {
    text.chars().count()
}

fn write_line<'a, W, I>(sink: &mut W, cells: I, widths: &[usize]) -> Result<()>
where
    W: Write,
    I: Iterator<Item = &'a str>,
{
    let mut line = String::from("|");
    for (cell, width) in cells.zip(widths) {
        let _ = write!(line, " {cell:<width$} |");
    }
    writeln!(sink, "{line}")?;
    Ok(())
}
