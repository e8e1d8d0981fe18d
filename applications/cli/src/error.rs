/// Application error types
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Core(#[from] puff_core::PuffError),

    #[error(transparent)]
    Storage(#[from] puff_storage::StorageError),

    #[error(transparent)]
    Acquire(#[from] puff_downloader::AcquireError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, AppError>;
