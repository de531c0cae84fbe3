use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DiffcountError {
    /// An input file could not be opened for reading
    #[error("cannot open {}: {source}", path.display())]
    SourceOpen {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The starting offset could not be applied to a source
    #[error("cannot seek {name} to offset {offset}: {source}")]
    Seek {
        name: String,
        offset: u64,
        #[source]
        source: io::Error,
    },

    /// A read failed for a reason other than end-of-data
    #[error("read error on {name}: {source}")]
    IoRead {
        name: String,
        #[source]
        source: io::Error,
    },

    #[error("invalid constant byte {literal:?}: {reason}")]
    InvalidConstantLiteral { literal: String, reason: String },

    #[error("invalid {what} {literal:?}: expected a decimal, 0x-hex or 0-octal integer")]
    InvalidNumber { what: &'static str, literal: String },
}

pub type Result<T> = std::result::Result<T, DiffcountError>;
