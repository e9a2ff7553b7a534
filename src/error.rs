use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures of a create action. None of them are retried.
#[derive(Debug, Error)]
pub enum ScriptError {
    /// A file with the same stem already exists somewhere under the project root.
    #[error("a script named `{name}` already exists, be sure you named it correctly")]
    DuplicateName { name: String },

    #[error("the parent folder {path:?} does not exist")]
    MissingParentFolder { path: PathBuf },

    #[error("{path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ScriptError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        ScriptError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, ScriptError>;
