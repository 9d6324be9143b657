use std::any::Any;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::value::Value;

/// Parsed tag annotations for one field, keyed by upper-cased setting name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagSettings(BTreeMap<String, String>);

impl TagSettings {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Parse a raw annotation string such as `primaryKey;next:snowflake;column:id`.
    ///
    /// Entries are separated by `;` and split on the first `:`. Setting names
    /// are upper-cased; values keep their written case. Flag-style entries
    /// without a value store the upper-cased name as their value.
    pub fn parse(raw: &str) -> Self {
        let mut settings = BTreeMap::new();
        for entry in raw.split(';') {
            let entry = entry.trim();
            if entry.is_empty() {
                continue;
            }
            match entry.split_once(':') {
                Some((name, value)) => {
                    settings.insert(name.trim().to_uppercase(), value.trim().to_string());
                }
                None => {
                    let name = entry.to_uppercase();
                    settings.insert(name.clone(), name);
                }
            }
        }
        Self(settings)
    }

    /// Look up a setting by name. Names match case-insensitively.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(&name.to_uppercase()).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(&name.to_uppercase())
    }

    pub fn insert(&mut self, name: &str, value: impl Into<String>) {
        self.0.insert(name.to_uppercase(), value.into());
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Per-field accessor contract exported by the schema layer.
///
/// Entity instances are passed type-erased; implementations downcast to the
/// entity type the descriptor was built for.
pub trait Field: Send + Sync {
    /// Field name as declared on the entity.
    fn name(&self) -> &str;

    /// Parsed tag annotations for this field.
    fn tags(&self) -> &TagSettings;

    /// Whether the schema declares a database-level default for this field.
    fn has_default_value(&self) -> bool;

    /// Current value of the field on `entity` and whether it is the zero value.
    fn value_of(&self, entity: &dyn Any) -> (Value, bool);

    /// Write `value` into the field on `entity`.
    fn set(&self, entity: &mut dyn Any, value: Value) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_settings_and_flags() {
        let tags = TagSettings::parse("primaryKey;next:snowflake;column:id");
        assert_eq!(tags.get("next"), Some("snowflake"));
        assert_eq!(tags.get("NEXT"), Some("snowflake"));
        assert_eq!(tags.get("column"), Some("id"));
        assert_eq!(tags.get("primaryKey"), Some("PRIMARYKEY"));
        assert!(tags.contains("PRIMARYKEY"));
        assert_eq!(tags.len(), 3);
    }

    #[test]
    fn values_keep_written_case() {
        let tags = TagSettings::parse("n:Display_Id");
        assert_eq!(tags.get("N"), Some("Display_Id"));
    }

    #[test]
    fn skips_empty_entries_and_trims_whitespace() {
        let tags = TagSettings::parse(" column : name ;; next : seq ;");
        assert_eq!(tags.get("column"), Some("name"));
        assert_eq!(tags.get("next"), Some("seq"));
        assert_eq!(tags.len(), 2);
    }

    #[test]
    fn missing_settings_are_none() {
        let tags = TagSettings::parse("column:name");
        assert_eq!(tags.get("next"), None);
        assert!(!tags.contains("next"));
    }
}
