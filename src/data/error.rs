//! Error types for reading and writing data files.

use thiserror::Error;

/// Largest input file accepted by [`crate::data::parser::read_file`].
pub const MAX_FILE_SIZE_MB: u64 = 100;

/// The input could not be read as text at all.
///
/// Individual malformed lines never produce this; they are skipped.
#[derive(Error, Debug)]
pub enum ParseFailure {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File is not valid UTF-8 text (invalid byte at offset {valid_up_to})")]
    Encoding { valid_up_to: usize },

    #[error("File too large: {size_mb}MB (max {max_mb}MB)")]
    TooLarge { size_mb: u64, max_mb: u64 },
}

/// Errors writing a series out as CSV.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    #[error("CSV output was not valid UTF-8")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("CSV writer could not be flushed: {0}")]
    IntoInner(String),
}
