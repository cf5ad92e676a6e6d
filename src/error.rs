use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Everything that can abort an injection run. No variant is recoverable:
/// callers propagate and the process exits non-zero.
#[derive(Error, Debug)]
pub enum InjectError {
    #[error("failed to run `{command}`: {reason}")]
    ProcessInvocation { command: String, reason: String },

    #[error("failed to {action} {path}: {source}")]
    FileAccess {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl InjectError {
    pub fn process(command: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ProcessInvocation {
            command: command.into(),
            reason: reason.into(),
        }
    }

    pub fn read(path: &Path, source: io::Error) -> Self {
        Self::FileAccess {
            action: "read",
            path: path.to_path_buf(),
            source,
        }
    }

    pub fn write(path: &Path, source: io::Error) -> Self {
        Self::FileAccess {
            action: "write",
            path: path.to_path_buf(),
            source,
        }
    }
}
