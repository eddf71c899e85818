use serde::de::DeserializeOwned;

use crate::coerce::coerce_pair;
use crate::definition::{ArgDef, Registry};
use crate::error::{ParseError, SchemaError};
use crate::options::{OptionsPatch, ParseOptions};
use crate::policy::{Assembler, check_required};
use crate::tokenizer::tokenize;
use crate::value::ParsedArgs;

/// Declarative argument parser.
///
/// Definitions and options are fixed before parsing; `parse` itself is a pure
/// function of (definitions, options, tokens).
#[derive(Debug, Clone, Default)]
pub struct ArgParser {
    options: ParseOptions,
    registry: Registry,
}

impl ArgParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge `patch` into the current options. Unset fields keep their value.
    pub fn with_options(mut self, patch: OptionsPatch) -> Self {
        self.options.merge(&patch);
        self
    }

    /// Register a definition. Cli keys and json keys must be unique.
    pub fn add_arg(mut self, def: ArgDef) -> Result<Self, SchemaError> {
        self.registry.insert(def)?;
        Ok(self)
    }

    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    pub fn defs(&self) -> &[ArgDef] {
        self.registry.as_slice()
    }

    /// Parse `tokens` (program name excluded) into a typed mapping.
    ///
    /// Order of checks:
    /// 1) tokenize (malformed tokens, missing values)
    /// 2) required arguments
    /// 3) coerce every pair (unknown keys, type mismatches)
    /// 4) fold into the result (duplicates)
    pub fn parse<I, T>(&self, tokens: I) -> Result<ParsedArgs, ParseError>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let pairs = tokenize(tokens, &self.registry, &self.options)?;
        tracing::debug!(
            pairs = pairs.len(),
            defs = self.registry.len(),
            "tokenized arguments"
        );

        check_required(&self.registry, &pairs, &self.options)?;

        let coerced = pairs
            .iter()
            .map(|pair| coerce_pair(pair, &self.registry, &self.options))
            .collect::<Result<Vec<_>, _>>()?;

        let mut assembler = Assembler::new(&self.options);
        for (def, value) in coerced.into_iter().flatten() {
            assembler.push(&def.field, value)?;
        }

        let parsed = assembler.finish();
        tracing::debug!(fields = parsed.len(), "parsed arguments");
        Ok(parsed)
    }

    /// Parse the current process arguments, skipping the program name.
    ///
    /// Arguments that are not valid UTF-8 are converted lossily.
    pub fn parse_env(&self) -> Result<ParsedArgs, ParseError> {
        self.parse(
            std::env::args_os()
                .skip(1)
                .map(|arg| arg.to_string_lossy().into_owned()),
        )
    }

    /// Parse `tokens` and shape the result into `R`.
    pub fn parse_into<R, I, T>(&self, tokens: I) -> Result<R, ParseError>
    where
        R: DeserializeOwned,
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        self.parse(tokens)?.deserialize()
    }
}
