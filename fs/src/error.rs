use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FsError {
    #[error("invalid argument")]
    InvalidArgument,
    #[error("file name too long")]
    NameTooLong,
    #[error("file data too large")]
    DataTooLarge,
    #[error("no free file slot")]
    NoFreeSlot,
    #[error("file not found")]
    NotFound,
    #[error("buffer too small")]
    BufferTooSmall,
}
