//! Error types for the Contour core library
//!
//! Two very different kinds of failure live in this crate. Configuration
//! mistakes made while a schema is being built are reported through
//! [`Error`] and stop construction. Problems with the *data* being checked
//! are never errors in this sense; they are ordinary [`Issue`] values
//! returned by `validate`.
//!
//! Copyright (c) 2025 Contour Team
//! Licensed under the Apache-2.0 license

use crate::issue::Issue;
use thiserror::Error;

/// Main error type for schema construction and loading
#[derive(Error, Debug)]
pub enum Error {
    /// A one-time builder setting was applied a second time
    #[error("Duplicate configuration: '{setting}' is already set on {schema} schema")]
    DuplicateConfiguration {
        schema: &'static str,
        setting: &'static str,
    },

    /// A string pattern failed to compile
    #[error("Invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// Union or intersection built with fewer than two children
    #[error("{combinator} needs at least 2 schemas, got {found}")]
    TooFewBranches {
        combinator: &'static str,
        found: usize,
    },

    /// Declarative schema description could not be turned into a schema
    #[error("Invalid schema descriptor: {message}")]
    Descriptor { message: String },

    /// JSON parsing errors
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// YAML parsing errors
    #[error("YAML error: {message}")]
    Yaml {
        message: String,
        #[source]
        source: serde_yaml::Error,
    },

    /// IO errors
    #[error("IO error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience type alias for Results using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn duplicate(schema: &'static str, setting: &'static str) -> Self {
        Error::DuplicateConfiguration { schema, setting }
    }

    pub(crate) fn descriptor(message: impl Into<String>) -> Self {
        Error::Descriptor {
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(err: serde_yaml::Error) -> Self {
        Error::Yaml {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io {
            message: err.to_string(),
            source: err,
        }
    }
}

/// Failure of a typed parse: the data was invalid, or it was valid but did
/// not fit the requested Rust type
#[derive(Error, Debug)]
pub enum ParseError {
    /// Validation rejected the input
    #[error("Validation failed: {0}")]
    Invalid(Issue),

    /// The transformed value could not be deserialized
    #[error("Typed conversion failed: {0}")]
    Typed(#[from] serde_json::Error),
}
