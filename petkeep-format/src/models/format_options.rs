//! Format run options

use petkeep_common::config::FormatDefaults;
use serde::{Deserialize, Serialize};

/// Controls how aggressively reconciliation fills record fields
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FormatOptions {
    /// Create a cell for every schema property, even ones the record never
    /// carried
    pub create_missing_fields: bool,

    /// Synthesize a value for cells that end the pass with none
    pub populate_empty_fields: bool,
}

impl From<FormatDefaults> for FormatOptions {
    fn from(defaults: FormatDefaults) -> Self {
        Self {
            create_missing_fields: defaults.create_missing_fields,
            populate_empty_fields: defaults.populate_empty_fields,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn options_default_to_conservative() {
        let options = FormatOptions::default();
        assert!(!options.create_missing_fields);
        assert!(!options.populate_empty_fields);
    }

    #[test]
    fn options_deserialize_from_camel_case() {
        let options: FormatOptions =
            serde_json::from_str(r#"{"createMissingFields": true}"#).unwrap();
        assert!(options.create_missing_fields);
        assert!(!options.populate_empty_fields);
    }
}
