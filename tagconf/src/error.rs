//! Error types for configuration resolution and source loading

use std::num::{ParseFloatError, ParseIntError};
use std::path::PathBuf;

use crate::duration::DurationError;

/// Errors returned by [`Loader::resolve`](crate::Loader::resolve).
///
/// Resolution stops at the first error. Errors raised inside a nested config
/// are wrapped in [`ResolveError::Nested`] once per enclosing field, so the
/// chain spells out the path to the failing field.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    /// No source produced a value, the field does not allow empty values and
    /// no usable default exists.
    #[error("{key} cannot be empty")]
    EmptyValue {
        /// Lookup key of the field
        key: String,
    },

    /// None of the configured coercer providers handles the field's type.
    #[error("failed to get parser for {key}: unsupported type {type_name}")]
    UnsupportedType {
        /// Lookup key of the field
        key: String,
        /// Fully qualified Rust type of the field
        type_name: &'static str,
    },

    /// The chosen string does not match the lexical form of the field's type.
    #[error("failed to parse {key}: {source}")]
    ParseFailure {
        /// Lookup key of the field
        key: String,
        /// Underlying coercion error
        source: ParseError,
    },

    /// An error raised while resolving a nested config field.
    #[error("failed to parse {field}: {source}")]
    Nested {
        /// Name of the struct field holding the nested config
        field: String,
        /// Error raised inside the nested config
        source: Box<ResolveError>,
    },
}

impl ResolveError {
    /// Wrap an error raised inside a nested config (used by macro-generated code)
    #[doc(hidden)]
    pub fn nested(field: impl Into<String>, source: ResolveError) -> Self {
        Self::Nested {
            field: field.into(),
            source: Box::new(source),
        }
    }

    /// Dotted path from the outermost nested field down to the failing key,
    /// e.g. `database.pool.DB_POOL_SIZE`.
    pub fn path(&self) -> String {
        match self {
            Self::EmptyValue { key }
            | Self::UnsupportedType { key, .. }
            | Self::ParseFailure { key, .. } => key.clone(),
            Self::Nested { field, source } => format!("{field}.{}", source.path()),
        }
    }

    /// The innermost error, with every `Nested` layer peeled off.
    pub fn root(&self) -> &ResolveError {
        match self {
            Self::Nested { source, .. } => source.root(),
            other => other,
        }
    }
}

/// Errors produced by a coercer when a raw string cannot be converted.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseError {
    /// Not one of the accepted boolean spellings.
    #[error("invalid syntax for bool: {0:?}")]
    Bool(String),

    /// Malformed or out-of-range integer.
    #[error("invalid integer: {0}")]
    Int(#[from] ParseIntError),

    /// Malformed floating point number.
    #[error("invalid float: {0}")]
    Float(#[from] ParseFloatError),

    /// Malformed duration literal.
    #[error(transparent)]
    Duration(#[from] DurationError),

    /// The coerced value does not fit the field's exact type.
    #[error("value {value} out of range for {type_name}")]
    OutOfRange {
        /// Display form of the coerced value
        value: String,
        /// Target Rust type
        type_name: &'static str,
    },

    /// The coercer produced a value of a different shape than the field.
    #[error("cannot store {found} value in {expected}")]
    Mismatch {
        /// Shape of the coerced value
        found: &'static str,
        /// Target Rust type
        expected: &'static str,
    },

    /// Failure reported by a user-supplied coercer.
    #[error("{0}")]
    Custom(String),
}

impl ParseError {
    /// Create a custom error from any message (for user-supplied coercers)
    pub fn custom(message: impl std::fmt::Display) -> Self {
        Self::Custom(message.to_string())
    }
}

/// Errors that can occur while building a value source.
///
/// These surface before any resolution starts.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// A dotenv file could not be opened.
    #[error("failed to open {path}: {source}")]
    Io {
        /// Path that failed to open
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// A dotenv file or blob is not valid `KEY=value` content.
    #[error("failed to parse {origin}: {source}")]
    Dotenv {
        /// File path, or `<reader>` for in-memory content
        origin: String,
        /// Underlying dotenv parse error
        source: dotenvy::Error,
    },
}
