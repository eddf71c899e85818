use anyhow::{Context, Result, bail};
use argfold::{ArgDef, ArgParser, OptionsPatch};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const DEFAULT_MANIFEST_NAME: &str = "argfold.json";

const SUPPORTED_SCHEMA_VERSION: u32 = 1;

/// Definition file: parser options plus the ordered argument definitions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_version: Option<u32>,

    #[serde(default, skip_serializing_if = "OptionsPatch::is_empty")]
    pub options: OptionsPatch,

    #[serde(default)]
    pub args: Vec<ArgDef>,
}

impl Manifest {
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read definitions: {}", path.display()))?;
        let manifest: Manifest = serde_json::from_str(&contents)
            .with_context(|| format!("failed to parse definitions JSON: {}", path.display()))?;

        if let Some(v) = manifest.schema_version {
            if v != SUPPORTED_SCHEMA_VERSION {
                bail!(
                    "unsupported schemaVersion {v} in {} (expected {SUPPORTED_SCHEMA_VERSION})",
                    path.display()
                );
            }
        }

        Ok(manifest)
    }

    /// Build a parser from the file's options, then `overrides`, then every definition.
    pub fn build_parser(&self, overrides: &OptionsPatch) -> Result<ArgParser> {
        let parser = ArgParser::new()
            .with_options(self.options)
            .with_options(*overrides);

        self.args.iter().cloned().try_fold(parser, |parser, def| {
            let field = def.field.clone();
            parser
                .add_arg(def)
                .with_context(|| format!("invalid definition for '{field}'"))
        })
    }
}
