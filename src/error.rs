// Error kinds shared by the library modules. The binary and the UI flow
// wrap these in `anyhow` with extra context; the store and the record
// shaping code keep them typed so the publish pipeline can decide what
// to swallow and what to surface.

use std::path::PathBuf;
use thiserror::Error;

/// Failures of the JSON array store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Creating, reading or writing the backing file failed.
    #[error("file system error on {path}: {source}")]
    FileSystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The existing content is not a JSON array.
    #[error("could not parse {path} as a JSON array: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The new record could not be turned into JSON.
    #[error("could not serialize record: {0}")]
    Serialize(#[source] serde_json::Error),
}

impl StoreError {
    pub(crate) fn fs(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StoreError::FileSystem {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn parse(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        StoreError::Parse {
            path: path.into(),
            source,
        }
    }
}

/// Failures while turning user input into a record.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum PostError {
    #[error("invalid published date {0:?}, expected YYYY-MM-DD")]
    InvalidDate(String),
}

/// Failures of the external summarizer.
#[derive(Error, Debug)]
pub enum SummarizeError {
    #[error("summarizer request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("summarizer returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    /// SMMRY reports its own errors inside a 200 response.
    #[error("summarizer error {code}: {message}")]
    Api { code: i64, message: String },

    #[error("summarizer response has no excerpt")]
    MissingContent,
}
