use thiserror::Error;

#[derive(Error, Debug)]
pub enum CacheError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("snapshot version mismatch: found {found}, expected {expected}")]
    Version { found: u32, expected: u32 },
}

pub type Result<T> = std::result::Result<T, CacheError>;
