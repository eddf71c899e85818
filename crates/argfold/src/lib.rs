//! Declarative extraction of command-line flags into typed records.
//!
//! A parser is a list of argument definitions (cli keys, json key, value type,
//! requiredness) plus a handful of policy options. Parsing walks the tokens
//! once and produces either a fully populated [`ParsedArgs`] or exactly one
//! [`ParseError`]:
//! - `--key=value`, `--key value`, and bare `--flag` for boolean arguments
//! - string / number / boolean coercion
//! - required, duplicate, and unknown-argument policies
//!
//! ```
//! use argfold::{ArgDef, ArgParser, ArgType, ArgValue};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let parser = ArgParser::new()
//!     .add_arg(ArgDef::new("port", ["--port", "-p"]).value_type(ArgType::Number))?
//!     .add_arg(ArgDef::new("verbose", ["--verbose"]).value_type(ArgType::Boolean))?;
//!
//! let parsed = parser.parse(["-p", "3000", "--verbose"])?;
//! assert_eq!(parsed.get("port"), Some(&ArgValue::Number(3000.0)));
//! assert_eq!(parsed.get_bool("verbose"), Some(true));
//! # Ok(())
//! # }
//! ```

mod coerce;
mod definition;
mod error;
mod options;
mod parser;
mod policy;
mod tokenizer;
mod value;

pub use coerce::{coerce, parse_number};
pub use definition::{ArgDef, ArgType, Registry};
pub use error::{ErrorKind, ParseError, SchemaError};
pub use options::{OptionsPatch, ParseOptions};
pub use parser::ArgParser;
pub use tokenizer::{RawPair, tokenize};
pub use value::{ArgValue, ParsedArgs};
