use std::collections::{HashMap, HashSet};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SchemaError;
use crate::options::ParseOptions;

/// Value type an argument is coerced into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArgType {
    #[default]
    String,
    Number,
    Boolean,
}

impl ArgType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
        }
    }
}

impl fmt::Display for ArgType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ArgType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "string" => Ok(Self::String),
            "number" => Ok(Self::Number),
            "boolean" => Ok(Self::Boolean),
            other => Err(format!(
                "unknown argument type '{other}' (expected string, number, or boolean)"
            )),
        }
    }
}

/// One logical field and the cli keys that refer to it.
///
/// `value_type` and `required` fall back to the parser's [`ParseOptions`] when unset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArgDef {
    #[serde(rename = "cliKeys", alias = "aliases")]
    pub aliases: Vec<String>,
    #[serde(rename = "jsonKey", alias = "fieldName")]
    pub field: String,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub value_type: Option<ArgType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
}

impl ArgDef {
    pub fn new<F, I, A>(field: F, aliases: I) -> Self
    where
        F: Into<String>,
        I: IntoIterator<Item = A>,
        A: Into<String>,
    {
        Self {
            aliases: aliases.into_iter().map(Into::into).collect(),
            field: field.into(),
            value_type: None,
            required: None,
        }
    }

    pub fn value_type(mut self, value_type: ArgType) -> Self {
        self.value_type = Some(value_type);
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = Some(required);
        self
    }

    /// The first declared cli key; used when reporting a missing argument.
    pub fn primary_alias(&self) -> &str {
        self.aliases.first().map(String::as_str).unwrap_or_default()
    }

    pub fn matches(&self, key: &str) -> bool {
        self.aliases.iter().any(|a| a == key)
    }

    pub fn effective_type(&self, options: &ParseOptions) -> ArgType {
        self.value_type.unwrap_or(options.default_type)
    }

    pub fn is_required(&self, options: &ParseOptions) -> bool {
        self.required.unwrap_or(options.default_required)
    }
}

fn valid_alias(alias: &str) -> bool {
    alias.starts_with('-') && !alias.contains('=') && !alias.trim_start_matches('-').is_empty()
}

/// Ordered set of argument definitions with unique cli keys and json keys.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    defs: Vec<ArgDef>,
    by_alias: HashMap<String, usize>,
    fields: HashSet<String>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate `def` against itself and every earlier definition, then append it.
    pub fn insert(&mut self, def: ArgDef) -> Result<(), SchemaError> {
        if def.field.trim().is_empty() {
            return Err(SchemaError::EmptyField);
        }
        if def.aliases.is_empty() {
            return Err(SchemaError::EmptyAliases { field: def.field });
        }
        if self.fields.contains(&def.field) {
            return Err(SchemaError::DuplicateField { field: def.field });
        }

        let mut seen: HashSet<&str> = HashSet::new();
        for alias in &def.aliases {
            if !valid_alias(alias) {
                return Err(SchemaError::InvalidAlias {
                    field: def.field.clone(),
                    alias: alias.clone(),
                });
            }
            let first = if let Some(&idx) = self.by_alias.get(alias) {
                Some(self.defs[idx].field.clone())
            } else if !seen.insert(alias.as_str()) {
                Some(def.field.clone())
            } else {
                None
            };
            if let Some(first) = first {
                return Err(SchemaError::DuplicateAlias {
                    alias: alias.clone(),
                    first,
                    second: def.field.clone(),
                });
            }
        }

        let idx = self.defs.len();
        for alias in &def.aliases {
            self.by_alias.insert(alias.clone(), idx);
        }
        self.fields.insert(def.field.clone());
        self.defs.push(def);
        Ok(())
    }

    pub fn lookup(&self, key: &str) -> Option<&ArgDef> {
        self.by_alias.get(key).map(|&idx| &self.defs[idx])
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ArgDef> {
        self.defs.iter()
    }

    pub fn as_slice(&self) -> &[ArgDef] {
        &self.defs
    }

    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }
}
