use std::fmt;

use thiserror::Error;

use crate::definition::ArgType;

/// Failure of a single parse call.
///
/// Every variant aborts the whole parse; there is never a partial result.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("malformed argument '{token}': arguments must start with '-' or '--'")]
    Malformed { token: String },

    #[error("argument {key} was provided without a value")]
    MissingValue { key: String },

    #[error("missing required argument: {alias}")]
    MissingRequired { alias: String },

    #[error("unknown argument: {key}")]
    Unknown { key: String },

    #[error("argument '{field}' was provided more than once")]
    Duplicate { field: String },

    #[error("argument {key} expects a {expected}, but '{literal}' was provided")]
    TypeMismatch {
        key: String,
        expected: ArgType,
        literal: String,
    },

    #[error("parsed arguments do not fit the requested type: {0}")]
    Extract(#[source] serde_json::Error),
}

impl ParseError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Malformed { .. } => ErrorKind::Malformed,
            Self::MissingValue { .. } => ErrorKind::MissingValue,
            Self::MissingRequired { .. } => ErrorKind::MissingRequired,
            Self::Unknown { .. } => ErrorKind::Unknown,
            Self::Duplicate { .. } => ErrorKind::Duplicate,
            Self::TypeMismatch { .. } => ErrorKind::TypeMismatch,
            Self::Extract(_) => ErrorKind::Extract,
        }
    }
}

/// Fieldless tag of a [`ParseError`], comparable across runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Malformed,
    MissingValue,
    MissingRequired,
    Unknown,
    Duplicate,
    TypeMismatch,
    Extract,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Malformed => "malformed-argument",
            Self::MissingValue => "missing-value",
            Self::MissingRequired => "missing-required-argument",
            Self::Unknown => "unknown-argument",
            Self::Duplicate => "duplicate-argument",
            Self::TypeMismatch => "type-mismatch",
            Self::Extract => "extract",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Invalid argument definition, rejected when it is registered.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("argument definition has an empty json key")]
    EmptyField,

    #[error("argument '{field}' declares no cli keys")]
    EmptyAliases { field: String },

    #[error(
        "invalid cli key '{alias}' for '{field}': keys must start with '-' or '--' and must not contain '='"
    )]
    InvalidAlias { field: String, alias: String },

    #[error("cli key {alias} maps to both '{first}' and '{second}'")]
    DuplicateAlias {
        alias: String,
        first: String,
        second: String,
    },

    #[error("json key '{field}' is declared more than once")]
    DuplicateField { field: String },
}
