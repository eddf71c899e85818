use crate::definition::{ArgDef, ArgType, Registry};
use crate::error::ParseError;
use crate::options::ParseOptions;
use crate::tokenizer::RawPair;
use crate::value::ArgValue;

/// Convert a literal into `expected`, or fail naming `key`.
pub fn coerce(key: &str, literal: &str, expected: ArgType) -> Result<ArgValue, ParseError> {
    let value = match expected {
        ArgType::String => Some(ArgValue::String(literal.to_string())),
        ArgType::Number => parse_number(literal).map(ArgValue::Number),
        ArgType::Boolean => match literal {
            "true" => Some(ArgValue::Boolean(true)),
            "false" => Some(ArgValue::Boolean(false)),
            _ => None,
        },
    };
    value.ok_or_else(|| ParseError::TypeMismatch {
        key: key.to_string(),
        expected,
        literal: literal.to_string(),
    })
}

/// Parse a finite numeric literal.
///
/// Accepts decimal integers and floats (sign, fraction and exponent allowed)
/// and unsigned `0x`/`0o`/`0b` integers. Surrounding ASCII whitespace is ignored.
pub fn parse_number(literal: &str) -> Option<f64> {
    let text = literal.trim_ascii();
    if text.is_empty() {
        return None;
    }

    let radix = match text.get(..2).map(str::to_ascii_lowercase).as_deref() {
        Some("0x") => Some(16),
        Some("0o") => Some(8),
        Some("0b") => Some(2),
        _ => None,
    };

    let n = match radix {
        Some(radix) => parse_radix(&text[2..], radix)?,
        None => {
            // `f64::from_str` also takes "inf"/"nan" spellings; only digits may lead.
            let body = text.strip_prefix(|c: char| c == '+' || c == '-').unwrap_or(text);
            if !body.starts_with(|c: char| c.is_ascii_digit() || c == '.') {
                return None;
            }
            text.parse::<f64>().ok()?
        }
    };
    n.is_finite().then_some(n)
}

fn parse_radix(digits: &str, radix: u32) -> Option<f64> {
    if digits.is_empty() {
        return None;
    }
    digits.chars().try_fold(0f64, |acc, c| {
        c.to_digit(radix)
            .map(|d| acc * f64::from(radix) + f64::from(d))
    })
}

/// Resolve a raw pair against the registry and coerce its value.
///
/// Returns `Ok(None)` for unknown keys when they are being ignored.
pub(crate) fn coerce_pair<'r>(
    pair: &RawPair,
    registry: &'r Registry,
    options: &ParseOptions,
) -> Result<Option<(&'r ArgDef, ArgValue)>, ParseError> {
    let Some(def) = registry.lookup(&pair.key) else {
        if options.ignore_unknown_args {
            tracing::trace!(key = %pair.key, "ignoring unknown argument");
            return Ok(None);
        }
        return Err(ParseError::Unknown {
            key: pair.key.clone(),
        });
    };

    let value = coerce(&pair.key, &pair.value, def.effective_type(options))?;
    Ok(Some((def, value)))
}
