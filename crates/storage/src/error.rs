use schema::{ConsensusId, RunId};
use thiserror::Error;

/// Errors raised by the filesystem persistence layer.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("failed to create directory {path}: {source}")]
    CreateDir {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("run {0} has no file in the runs directory")]
    RunNotFound(RunId),

    #[error("consensus {0} has no file in the analysis directory")]
    ConsensusNotFound(ConsensusId),

    #[error("no golden dataset has been frozen for this season")]
    GoldenNotFound,

    #[error("failed to decode {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: bincode::Error,
    },

    #[error("failed to encode payload for {path}: {source}")]
    Encode {
        path: String,
        #[source]
        source: bincode::Error,
    },
}
