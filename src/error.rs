//! Error types for apigen.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Two or more endpoints share a path. Raised before any artifact is written.
    #[error("Duplicate endpoints: {}", paths.join(", "))]
    DuplicatePaths { paths: Vec<String> },

    /// An artifact could not be serialized.
    #[error("Failed to serialize {artifact}: {source}")]
    Serialize {
        artifact: &'static str,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Failed to write output file '{}': {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read definition file '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A definition file parsed, but a field failed to deserialize or validate.
    #[error("Invalid definition file '{}': {message}", path.display())]
    Definition { path: PathBuf, message: String },

    #[error("An enum needs at least one value")]
    EmptyEnum,

    #[error("minItems {0} exceeds the limit of {max}", max = crate::types::MAX_MIN_ITEMS)]
    MinItemsTooLarge(u32),

    #[error("Endpoint path '{0}' must start with '/'")]
    InvalidPath(String),

    #[error("Error code '{0}' must be a non-empty uppercase string")]
    InvalidErrorCode(String),

    #[error("Version '{0}' must look like MAJOR.MINOR.PATCH")]
    InvalidVersion(String),
}

impl Error {
    pub(crate) fn serialize<E>(artifact: &'static str, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Error::Serialize { artifact, source: Box::new(source) }
    }
}
