use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CabinetError {
    #[error("Object already exists: {}", .0.display())]
    AlreadyExists(PathBuf),

    #[error("Object does not exist: {}", .0.display())]
    DoesNotExist(PathBuf),

    #[error("Strategy error: {0}")]
    Strategy(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Coarse classification callers can match on without caring whether a
/// strategy failure came from the file system or from malformed input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    AlreadyExists,
    DoesNotExist,
    Strategy,
}

impl CabinetError {
    pub fn strategy(msg: impl Into<String>) -> Self {
        CabinetError::Strategy(msg.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            CabinetError::AlreadyExists(_) => ErrorKind::AlreadyExists,
            CabinetError::DoesNotExist(_) => ErrorKind::DoesNotExist,
            CabinetError::Strategy(_) | CabinetError::Io(_) | CabinetError::Serialization(_) => {
                ErrorKind::Strategy
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, CabinetError>;
