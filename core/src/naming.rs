//! Environment variable naming policy.
//!
//! A [`NamingConfig`] is threaded through the walk; a schema may carry a
//! [`NamingOverride`] that changes case sensitivity or the nested delimiter
//! for itself and everything below it.

use serde::{Deserialize, Serialize};

/// How field aliases turn into environment variable names.
///
/// # Examples
///
/// ```
/// use envdoc_core::NamingConfig;
///
/// let config = NamingConfig::default();
/// assert!(!config.case_sensitive);
/// assert!(config.merge_aliases);
/// assert_eq!(config.apply_case("db_url"), "DB_URL");
///
/// let config = NamingConfig::default()
///     .with_prefix("APP_")
///     .with_delimiter("__");
/// assert_eq!(config.env_prefix, "APP_");
/// assert_eq!(config.nested_delimiter.as_deref(), Some("__"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NamingConfig {
    /// Keep alias case as declared instead of upper-casing.
    pub case_sensitive: bool,
    /// Prepended to every top-level alias.
    pub env_prefix: String,
    /// Joins a nested field's alias to its children's aliases.
    ///
    /// Without a delimiter nested fields are flattened with no prefix.
    pub nested_delimiter: Option<String>,
    /// Collapse a multi-alias field into a single "Any of" row.
    pub merge_aliases: bool,
}

impl Default for NamingConfig {
    fn default() -> Self {
        Self {
            case_sensitive: false,
            env_prefix: String::new(),
            nested_delimiter: None,
            merge_aliases: true,
        }
    }
}

impl NamingConfig {
    /// Sets the top-level prefix.
    pub fn with_prefix(mut self, prefix: &str) -> Self {
        self.env_prefix = prefix.to_string();
        self
    }

    /// Sets the nested delimiter.
    pub fn with_delimiter(mut self, delimiter: &str) -> Self {
        self.nested_delimiter = Some(delimiter.to_string());
        self
    }

    /// Sets case sensitivity.
    pub fn case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    /// Sets alias merging.
    pub fn merge_aliases(mut self, merge: bool) -> Self {
        self.merge_aliases = merge;
        self
    }

    /// Upper-cases `name` unless this config is case sensitive.
    pub fn apply_case(&self, name: &str) -> String {
        if self.case_sensitive {
            name.to_string()
        } else {
            name.to_uppercase()
        }
    }

    /// Returns the config in effect for a schema carrying `naming`.
    ///
    /// # Examples
    ///
    /// ```
    /// use envdoc_core::{NamingConfig, NamingOverride};
    ///
    /// let parent = NamingConfig::default().with_prefix("APP_");
    /// let child = parent.apply(&NamingOverride {
    ///     case_sensitive: Some(true),
    ///     nested_delimiter: None,
    /// });
    /// assert!(child.case_sensitive);
    /// assert_eq!(child.env_prefix, "APP_");
    /// ```
    pub fn apply(&self, naming: &NamingOverride) -> NamingConfig {
        let mut config = self.clone();
        if let Some(case_sensitive) = naming.case_sensitive {
            config.case_sensitive = case_sensitive;
        }
        if let Some(delimiter) = &naming.nested_delimiter {
            config.nested_delimiter = Some(delimiter.clone());
        }
        config
    }
}

/// Per-schema naming settings that replace the inherited ones.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NamingOverride {
    /// Replaces the inherited case sensitivity.
    pub case_sensitive: Option<bool>,
    /// Replaces the inherited nested delimiter.
    pub nested_delimiter: Option<String>,
}

impl NamingOverride {
    /// Returns `true` if the override changes nothing.
    pub fn is_empty(&self) -> bool {
        self.case_sensitive.is_none() && self.nested_delimiter.is_none()
    }
}
