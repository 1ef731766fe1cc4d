//! Error types for the mapper.
//!
//! Only input and output failures are errors. Paths without an attribute
//! segment and devices that cannot be mapped are ordinary outcomes, reported
//! through [`crate::openapi::Extraction`] and [`crate::pipeline::SkipReason`].

use thiserror::Error;

/// Fatal errors raised while reading inputs.
#[derive(Debug, Error)]
pub enum MapperError {
    /// An input file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// Path that failed.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// An input file is not valid JSON.
    #[error("failed to parse JSON from {path}: {source}")]
    Json {
        /// Path or label of the document.
        path: String,
        /// Underlying parser error.
        #[source]
        source: serde_json::Error,
    },
    /// The configuration file does not parse.
    #[error("invalid configuration in {path}: {source}")]
    Config {
        /// Path or label of the document.
        path: String,
        /// Underlying parser error.
        #[source]
        source: toml::de::Error,
    },
}
