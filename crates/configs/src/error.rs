use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures while reading configuration into a [`Store`](crate::Store).
///
/// Sections captured before the failure stay in the store.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot open file {path:?}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("load error: read failed: {0}")]
    Read(#[source] io::Error),
    #[error("load error: {0}")]
    Parse(#[source] serde_json::Error),
}

// serde_json folds reader failures into its own error type; split them back out
// so callers see the original io::Error.
impl From<serde_json::Error> for LoadError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_io() {
            LoadError::Read(io::Error::from(err))
        } else {
            LoadError::Parse(err)
        }
    }
}

/// Failures while decoding a section out of a [`Store`](crate::Store).
#[derive(Debug, Error)]
pub enum GetError {
    #[error("{0} key not found")]
    NotFound(String),
    #[error("config format error in {key}: {source}")]
    Decode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

impl GetError {
    /// True when the section is absent, as opposed to present but malformed.
    pub fn is_not_found(&self) -> bool {
        matches!(self, GetError::NotFound(_))
    }

    /// Section name the failed lookup was for.
    pub fn key(&self) -> &str {
        match self {
            GetError::NotFound(key) => key,
            GetError::Decode { key, .. } => key,
        }
    }
}
