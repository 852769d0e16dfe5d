use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReconError {
    #[error("i/o error on {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to spawn command interpreter for {stage}: {source}")]
    Spawn {
        stage: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{stage} failed with return code {code}")]
    NonZeroExit {
        stage: String,
        code: i32,
        stderr: String,
    },
}

impl ReconError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }
}

pub type Result<T> = std::result::Result<T, ReconError>;
