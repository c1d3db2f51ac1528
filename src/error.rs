use thiserror::Error;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by buffer, cursor and file-digest operations.
#[derive(Error, Debug)]
pub enum Error {
    /// A byte range does not fit inside the buffer.
    #[error("range {pos}..{pos}+{len} is out of bounds for buffer of size {size}")]
    OutOfRange {
        /// Start of the requested range.
        pos: usize,
        /// Length of the requested range.
        len: usize,
        /// Size of the buffer at the time of the call.
        size: usize,
    },
    /// Fewer bytes remain in the reader than the requested value needs.
    #[error("short read: needed {needed} bytes, {available} available")]
    ShortRead {
        /// Width of the value being read.
        needed: usize,
        /// Bytes left in the reader.
        available: usize,
    },
    /// No NUL terminator was found before the end of the buffer.
    #[error("string is not NUL terminated")]
    Unterminated,
    /// A string read produced invalid UTF-8.
    #[error("invalid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),
    /// Opening or reading a file failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// Failure reported by an external collaborator, such as a cipher.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl Error {
    pub(crate) fn out_of_range(pos: usize, len: usize, size: usize) -> Self {
        Error::OutOfRange { pos, len, size }
    }
}
