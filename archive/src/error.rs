use thiserror::Error;

#[derive(Error, Debug)]
pub enum ArchiveError {
    #[error("failed to open archive: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("no command pages could be decoded from the archive")]
    NoEntries,
}

pub type Result<T> = std::result::Result<T, ArchiveError>;
