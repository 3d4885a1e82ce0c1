use thiserror::Error;

/// Faults that end the network path of an ingestion cycle. Every variant is
/// unrecoverable for the cycle and degrades it to the built-in fallback
/// data; none escape the orchestrator.
#[derive(Error, Debug)]
pub enum IngestError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("archive download failed with status {0}")]
    Status(reqwest::StatusCode),

    #[error(transparent)]
    Archive(#[from] tldrkit_archive::ArchiveError),
}

pub type Result<T> = std::result::Result<T, IngestError>;
