use serde::{Deserialize, Serialize};

use crate::definition::ArgType;

/// Parser-wide policy, frozen for the duration of a parse.
///
/// Defaults are the permissive baseline: string values, nothing required,
/// unknown keys dropped, duplicate fields rejected, and boolean flags that
/// mean `true` by presence alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParseOptions {
    pub default_type: ArgType,
    pub default_required: bool,
    pub ignore_unknown_args: bool,
    pub prevent_duplicate_args: bool,
    pub explicit_boolean_values: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            default_type: ArgType::String,
            default_required: false,
            ignore_unknown_args: true,
            prevent_duplicate_args: true,
            explicit_boolean_values: false,
        }
    }
}

impl ParseOptions {
    /// Override only the fields that `patch` sets.
    pub fn merge(&mut self, patch: &OptionsPatch) {
        if let Some(v) = patch.default_type {
            self.default_type = v;
        }
        if let Some(v) = patch.default_required {
            self.default_required = v;
        }
        if let Some(v) = patch.ignore_unknown_args {
            self.ignore_unknown_args = v;
        }
        if let Some(v) = patch.prevent_duplicate_args {
            self.prevent_duplicate_args = v;
        }
        if let Some(v) = patch.explicit_boolean_values {
            self.explicit_boolean_values = v;
        }
    }

    pub fn merged(mut self, patch: &OptionsPatch) -> Self {
        self.merge(patch);
        self
    }
}

/// Partial [`ParseOptions`]; unset fields keep their current value on merge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionsPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_type: Option<ArgType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_required: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ignore_unknown_args: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prevent_duplicate_args: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explicit_boolean_values: Option<bool>,
}

impl OptionsPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn default_type(mut self, v: ArgType) -> Self {
        self.default_type = Some(v);
        self
    }

    pub fn default_required(mut self, v: bool) -> Self {
        self.default_required = Some(v);
        self
    }

    pub fn ignore_unknown_args(mut self, v: bool) -> Self {
        self.ignore_unknown_args = Some(v);
        self
    }

    pub fn prevent_duplicate_args(mut self, v: bool) -> Self {
        self.prevent_duplicate_args = Some(v);
        self
    }

    pub fn explicit_boolean_values(mut self, v: bool) -> Self {
        self.explicit_boolean_values = Some(v);
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_permissive() {
        let o = ParseOptions::default();
        assert_eq!(o.default_type, ArgType::String);
        assert!(!o.default_required);
        assert!(o.ignore_unknown_args);
        assert!(o.prevent_duplicate_args);
        assert!(!o.explicit_boolean_values);
    }

    #[test]
    fn merge_only_overrides_set_fields() {
        let mut o = ParseOptions::default();
        o.merge(&OptionsPatch::new().default_required(true));
        o.merge(&OptionsPatch::new().default_type(ArgType::Number));

        assert_eq!(o.default_type, ArgType::Number);
        assert!(o.default_required);
        assert!(o.ignore_unknown_args);

        o.merge(&OptionsPatch::new());
        assert_eq!(o.default_type, ArgType::Number);
        assert!(o.default_required);
    }

    #[test]
    fn patch_deserializes_camel_case_and_skips_missing() {
        let patch: OptionsPatch =
            serde_json::from_str(r#"{ "defaultType": "boolean", "ignoreUnknownArgs": false }"#)
                .unwrap();
        assert_eq!(patch.default_type, Some(ArgType::Boolean));
        assert_eq!(patch.ignore_unknown_args, Some(false));
        assert_eq!(patch.default_required, None);
        assert!(!patch.is_empty());
        assert!(OptionsPatch::default().is_empty());

        let o = ParseOptions::default().merged(&patch);
        assert_eq!(o.default_type, ArgType::Boolean);
        assert!(!o.ignore_unknown_args);
        assert!(o.prevent_duplicate_args);
    }

    #[test]
    fn options_deserialize_with_defaults_for_missing_fields() {
        let o: ParseOptions = serde_json::from_str(r#"{ "explicitBooleanValues": true }"#).unwrap();
        assert!(o.explicit_boolean_values);
        assert!(o.prevent_duplicate_args);
        assert_eq!(o.default_type, ArgType::String);
    }
}
