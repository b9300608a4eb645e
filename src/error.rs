use std::io;
use std::num::ParseIntError;
use std::path::PathBuf;

/// All errors produced by the dataset adapters.
///
/// Nothing is caught or recovered internally: every failure propagates
/// synchronously to the caller of `get` or of a constructor, which decides
/// whether to skip, abort, or retry.
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    /// A constructor was pointed at a missing or non-directory path.
    #[error("not a directory: {}", .path.display())]
    NotADirectory { path: PathBuf },

    /// Directory listing or label-file read failed.
    #[error("i/o error on {}: {source}", .path.display())]
    Io { path: PathBuf, source: io::Error },

    /// `get` was called with an index outside `[0, len)`.
    #[error("index {index} out of range for dataset of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// The image file is missing, truncated, or not a decodable image.
    #[error("failed to decode image {}: {source}", .path.display())]
    ImageDecode {
        path: PathBuf,
        source: image::ImageError,
    },

    /// A label-file line did not parse as an integer.
    #[error("invalid label on line {line} of {}: {source}", .path.display())]
    LabelParse {
        path: PathBuf,
        line: usize,
        source: ParseIntError,
    },

    /// A parsed label fell outside the class range.
    #[error("label {label} out of range for {num_classes} classes in {}", .path.display())]
    LabelOutOfRange {
        label: usize,
        num_classes: usize,
        path: PathBuf,
    },
}

/// Convenience Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, DataError>;
