use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Which worker operation a remote failure came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskKind {
    Map,
    Reduce,
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskKind::Map => write!(f, "map"),
            TaskKind::Reduce => write!(f, "reduce"),
        }
    }
}

/// First failure observed while running a job.
///
/// Every phase is all-or-nothing: whichever of these shows up first aborts
/// the job, cleanup of the intermediate artifacts is attempted, and no
/// task is ever retried.
#[derive(Debug, Error)]
pub enum JobError {
    /// A configured worker endpoint could not be reached.
    #[error("failed to connect to worker at {addr}: {reason}")]
    Connection { addr: String, reason: String },

    /// An intermediate or output artifact could not be created or removed.
    #[error("failed to {op} artifact `{}`: {source}", .path.display())]
    Storage {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A file could not be opened, read or written inside a task.
    #[error("failed to {op} `{}`: {source}", .path.display())]
    Io {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A dispatched map or reduce call reported a failure.
    #[error("{task} task at {addr} failed: {message}")]
    RemoteTask {
        task: TaskKind,
        addr: String,
        message: String,
    },
}

impl JobError {
    pub fn io(op: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        JobError::Io {
            op,
            path: path.into(),
            source,
        }
    }

    pub fn storage(op: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        JobError::Storage {
            op,
            path: path.into(),
            source,
        }
    }
}
