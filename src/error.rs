//! Typed errors for the synthesis engine.
//!
//! The pipeline stages themselves are total: normalization, classification,
//! extraction and sanitization never fail. Errors only come from loading
//! configuration and from synthesis lookups against that configuration.

use crate::{EntityKind, StatusToken};
use thiserror::Error;

/// Errors raised while loading or validating `SchemaKnowledge` / `AliasDictionary`.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// JSON parsing error
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Config file could not be read
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The same canonical key appears twice in an alias table
    #[error("duplicate canonical key `{key}` in {table} aliases")]
    DuplicateCanonical { table: &'static str, key: String },

    /// An entity or status has no surface forms at all
    #[error("canonical key `{key}` in {table} aliases has no variants")]
    EmptyVariants { table: &'static str, key: String },

    /// Structural problem in the schema description
    #[error("invalid schema: {reason}")]
    InvalidSchema { reason: String },
}

/// Errors raised by the query synthesizer.
///
/// These indicate a gap in the configured schema rather than bad input. The
/// arbitrator masks them by falling back to the classic generator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SynthesisError {
    /// A detected status has no column value in the schema
    #[error("no schema value configured for status {0:?}")]
    UnmappedStatus(StatusToken),

    /// Neither the entity projection nor the quote fallback has columns
    #[error("no projection configured for {0:?} and no quote fallback")]
    EmptyProjection(EntityKind),
}

/// Crate-level error.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Synthesis(#[from] SynthesisError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
