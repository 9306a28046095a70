//! Unified error types.

use thiserror::Error;

/// The error type returned by the crate's fallible setup and serving
/// operations.
///
/// Application-level outcomes (404, 500, etc.) are expressed as HTTP
/// [`Response`](crate::Response) values, not as `Error`s. This type surfaces
/// infrastructure failures (binding a port, accepting a connection) and a
/// manifest that cannot be served.
#[derive(Debug, Error)]
pub enum Error {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid addon description: {0}")]
    Invalid(#[from] ValidationError),
}

/// A value from [`model`](crate::model) breaks a protocol invariant.
///
/// These are caller errors: the producer of the document built something
/// the platform would reject or misread.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum ValidationError {
    #[error("manifest must declare at least one resource")]
    NoResources,

    #[error("manifest must declare at least one type")]
    NoTypes,

    #[error("catalog (type `{kind}`, id `{id}`) is declared more than once")]
    DuplicateCatalog { kind: String, id: String },

    #[error("meta id `{0}` appears more than once in the catalog")]
    DuplicateMeta(String),

    #[error("stream has no source (url, ytId, infoHash or externalUrl)")]
    StreamWithoutSource,

    #[error("stream must have exactly one source, found: {0}")]
    AmbiguousStream(String),
}
