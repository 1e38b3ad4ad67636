use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures reading or writing label/buffer files. All of them are fatal to a session.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("read {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("write {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },

    #[error("remove {}: {source}", path.display())]
    Remove { path: PathBuf, source: io::Error },

    /// Line is not `<label> |<identifier>`.
    #[error("{}:{line}: malformed label line {content:?}", path.display())]
    Malformed {
        path: PathBuf,
        line: usize,
        content: String,
    },

    #[error("{}:{line}: unknown label {label:?} (expected 0 or 1)", path.display())]
    UnknownLabel {
        path: PathBuf,
        line: usize,
        label: String,
    },
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;
