use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by rule parsing, dictionary sampling and generation.
#[derive(Error, Debug)]
pub enum RandwordError {
    /// A stream could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A named file could not be opened or mapped.
    #[error("could not open {path}: {source}")]
    FileAccess {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Only produced by the strict affix parser.
    #[error("malformed affix file at line {line}: {reason}")]
    MalformedAffixFile { line: usize, reason: String },

    /// The dictionary does not look like a hunspell `.dic` file.
    #[error("invalid dictionary format: {0}")]
    InvalidDictionaryFormat(String),
}

impl RandwordError {
    pub fn file_access(path: impl Into<PathBuf>, source: io::Error) -> Self {
        RandwordError::FileAccess {
            path: path.into(),
            source,
        }
    }

    pub fn invalid_dictionary<S: Into<String>>(msg: S) -> Self {
        RandwordError::InvalidDictionaryFormat(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, RandwordError>;
