//! Library error types. The CLI wraps these with `anyhow` context.

use thiserror::Error;

/// Input the inferencer cannot type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InferError {
    #[error("top-level JSON value must be an object, found {found}")]
    NotAnObject { found: &'static str },

    #[error("cannot infer an element type for the empty array at {path}")]
    EmptyArray { path: String },

    #[error("invalid root class name {name:?}: must not be empty")]
    EmptyRootName { name: String },
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Infer(#[from] InferError),

    #[error("malformed JSON at path {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("JSON pointer {pointer:?} does not match any value")]
    PointerNotFound { pointer: String },

    #[error("failed to render JSON payload: {0}")]
    Render(#[from] serde_json::Error),

    #[error("rendered JSON payload is not UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
