use crate::definition::Registry;
use crate::error::ParseError;
use crate::options::ParseOptions;
use crate::tokenizer::RawPair;
use crate::value::{ArgValue, ParsedArgs};

/// Fail on the first required definition none of whose cli keys appear in `pairs`.
///
/// Runs before any value is coerced, so a missing argument is reported ahead
/// of a malformed one.
pub(crate) fn check_required(
    registry: &Registry,
    pairs: &[RawPair],
    options: &ParseOptions,
) -> Result<(), ParseError> {
    let missing = registry
        .iter()
        .filter(|def| def.is_required(options))
        .find(|def| !pairs.iter().any(|p| def.matches(&p.key)));

    match missing {
        Some(def) => Err(ParseError::MissingRequired {
            alias: def.primary_alias().to_string(),
        }),
        None => Ok(()),
    }
}

/// Folds coerced values into a [`ParsedArgs`], applying the duplicate policy.
pub(crate) struct Assembler<'o> {
    options: &'o ParseOptions,
    out: ParsedArgs,
}

impl<'o> Assembler<'o> {
    pub(crate) fn new(options: &'o ParseOptions) -> Self {
        Self {
            options,
            out: ParsedArgs::default(),
        }
    }

    /// Store `value` under `field`; a second write either fails or overwrites.
    pub(crate) fn push(&mut self, field: &str, value: ArgValue) -> Result<(), ParseError> {
        if self.options.prevent_duplicate_args && self.out.contains(field) {
            return Err(ParseError::Duplicate {
                field: field.to_string(),
            });
        }
        if self.out.insert(field.to_string(), value).is_some() {
            tracing::trace!(field, "overwrote earlier value");
        }
        Ok(())
    }

    pub(crate) fn finish(self) -> ParsedArgs {
        self.out
    }
}
