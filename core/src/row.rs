//! Documentation rows produced by the walker.

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A table cell that is either text or a list of item texts.
///
/// Lists are flattened to a comma-joined string when displayed.
///
/// # Examples
///
/// ```
/// use envdoc_core::Cell;
///
/// assert_eq!(Cell::from("abc").flatten(), "abc");
/// let list = Cell::List(vec!["1".into(), "2".into(), "3".into()]);
/// assert_eq!(list.flatten(), "1,2,3");
/// assert_eq!(list.to_string(), "1,2,3");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    /// Plain text.
    Text(String),
    /// Ordered item texts.
    List(Vec<String>),
}

impl Cell {
    /// Returns the cell as a single string.
    pub fn flatten(&self) -> Cow<'_, str> {
        match self {
            Self::Text(text) => Cow::Borrowed(text),
            Self::List(items) => Cow::Owned(items.join(",")),
        }
    }

    /// Returns `true` for empty text and empty lists.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Text(text) => text.is_empty(),
            Self::List(items) => items.is_empty(),
        }
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.flatten())
    }
}

impl From<&str> for Cell {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for Cell {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

/// One line of the reference table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    /// Environment variable name, or an "Any of" list of names.
    pub name: String,
    /// Field description.
    pub description: String,
    /// Declared type name.
    #[serde(rename = "type")]
    pub type_name: String,
    /// Example value.
    pub example: Cell,
    /// Default value; `"-"` for required fields, absent when undeclared.
    pub default: Option<Cell>,
}

impl Row {
    /// Returns the default as text, empty when absent.
    pub fn default_text(&self) -> Cow<'_, str> {
        self.default
            .as_ref()
            .map(Cell::flatten)
            .unwrap_or(Cow::Borrowed(""))
    }
}
