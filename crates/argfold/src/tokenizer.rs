use crate::definition::{ArgType, Registry};
use crate::error::ParseError;
use crate::options::ParseOptions;

/// An untyped `(key, value)` split out of the token stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawPair {
    pub key: String,
    pub value: String,
}

impl RawPair {
    fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Split `tokens` into raw pairs, left to right.
///
/// Accepted forms:
/// - `--key=value` (split at the first `=`)
/// - `--key value`
/// - `--flag` for boolean-typed keys when explicit boolean values are off
///
/// Whether a bare key consumes the next token is decided by the effective type
/// of the definition it resolves to, not by its spelling. Keys with no
/// definition use `default_type`.
pub fn tokenize<I, T>(
    tokens: I,
    registry: &Registry,
    options: &ParseOptions,
) -> Result<Vec<RawPair>, ParseError>
where
    I: IntoIterator<Item = T>,
    T: AsRef<str>,
{
    let mut tokens = tokens.into_iter();
    let mut pairs = Vec::new();

    while let Some(token) = tokens.next() {
        let token = token.as_ref();

        if !token.starts_with('-') {
            return Err(ParseError::Malformed {
                token: token.to_string(),
            });
        }

        if let Some((key, value)) = token.split_once('=') {
            pairs.push(RawPair::new(key, value));
            continue;
        }

        let value_type = registry
            .lookup(token)
            .map_or(options.default_type, |def| def.effective_type(options));

        if value_type == ArgType::Boolean && !options.explicit_boolean_values {
            pairs.push(RawPair::new(token, "true"));
            continue;
        }

        let Some(value) = tokens.next() else {
            return Err(ParseError::MissingValue {
                key: token.to_string(),
            });
        };
        pairs.push(RawPair::new(token, value.as_ref()));
    }

    Ok(pairs)
}
