//! Error types for orbat-core.
//!
//! The filter engine itself cannot fail. Errors only arise while loading a
//! catalogue document from disk.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
#[non_exhaustive]
pub enum CatalogueError {
    #[error("failed to read catalogue {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("catalogue {path} is not a valid unit list: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("unknown catalogue side '{0}' (expected 'ua' or 'ru')")]
    UnknownSide(String),
}
