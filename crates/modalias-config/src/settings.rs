//! The structured settings document.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ConfigError, Result};

/// Alias and search-directory definitions read from the settings file.
///
/// Unknown keys are ignored, so the default settings file (`package.json`)
/// can carry these next to its usual fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AliasSettings {
    /// Alias name to target directory, in declaration order. `None` when the
    /// document has no `aliases` key; aliasing stays inert in that case.
    #[serde(default)]
    pub aliases: Option<IndexMap<String, String>>,

    /// Extra module directories relative to the root.
    #[serde(default, alias = "modules_dir")]
    pub modules_dir: Vec<String>,
}

impl AliasSettings {
    /// Build settings from an already-parsed document.
    pub fn from_value(value: Value) -> Result<Self> {
        serde_json::from_value(value).map_err(|e| ConfigError::InvalidValue {
            field: "settings".to_string(),
            hint: Some(e.to_string()),
        })
    }

    /// Iterate aliases in declaration order.
    pub fn aliases(&self) -> impl Iterator<Item = (&str, &str)> {
        self.aliases
            .iter()
            .flatten()
            .map(|(name, target)| (name.as_str(), target.as_str()))
    }

    pub fn has_aliases(&self) -> bool {
        self.aliases.as_ref().is_some_and(|a| !a.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn keeps_declaration_order() {
        let settings = AliasSettings::from_value(json!({
            "name": "demo",
            "aliases": { "@z": "z", "@a": "a", "@m": "m" }
        }))
        .unwrap();

        let names: Vec<_> = settings.aliases().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["@z", "@a", "@m"]);
    }

    #[test]
    fn missing_aliases_is_none() {
        let settings = AliasSettings::from_value(json!({ "name": "demo" })).unwrap();
        assert!(settings.aliases.is_none());
        assert!(!settings.has_aliases());
        assert_eq!(settings.aliases().count(), 0);
    }

    #[test]
    fn wrong_alias_type_is_rejected() {
        let err = AliasSettings::from_value(json!({ "aliases": "src" })).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }
}
