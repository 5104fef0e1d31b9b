use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Everything that can abort a listing. The policy is fail-fast with no
/// partial output: the first error wins and the whole invocation is
/// abandoned. An unrecognized oracle return code is the one tolerated
/// anomaly; it never reaches this type and degrades to
/// `StorageState::Unknown` inside the classifier instead.
#[derive(Debug, Error)]
pub enum ListError {
    #[error("cannot stat {path}: {source}")]
    Stat {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot read directory {path}: {source}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("no user name for uid {0}")]
    UnknownUser(u32),

    #[error("no group name for gid {0}")]
    UnknownGroup(u32),

    #[error("cannot resolve symlink {path}: {source}")]
    Symlink {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("unparseable modification time {value:?}: {source}")]
    TimeParse {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("writing listing output: {0}")]
    Io(#[from] io::Error),
}
