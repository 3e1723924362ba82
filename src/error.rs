use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionError {
    #[error("Output buffer smaller than the worst-case expansion bound")]
    BufferTooSmall,
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecompressionError {
    #[error("Unexpected end of compressed stream")]
    UnexpectedEof,

    #[error("Copy distance exceeds bytes already produced")]
    InvalidDistance,

    #[error("Item would write past the declared original size")]
    OutputOverflow,
}
