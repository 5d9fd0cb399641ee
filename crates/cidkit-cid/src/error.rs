use std::io;

/// Errors produced while building or decoding a CID.
#[derive(Debug, thiserror::Error)]
pub enum CidError {
    #[error("invalid CID format: {0}")]
    InvalidFormat(String),

    #[error("content length {0} exceeds the 6-byte length prefix")]
    LengthOverflow(u64),

    #[error("I/O error while reading content: {0}")]
    Io(#[from] io::Error),
}

/// Convenience alias used throughout this crate.
pub type Result<T> = std::result::Result<T, CidError>;
