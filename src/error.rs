use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by loading, feature extraction and rendering.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid half-open `[start, end)` selection.
    #[error("invalid range [{start}, {end}) for a dataset of {count} images")]
    Range { start: usize, end: usize, count: usize },

    /// An explicitly selected index lies outside the dataset.
    #[error("index {index} is out of bounds for a dataset of {count} images")]
    IndexOutOfBounds { index: usize, count: usize },

    #[error("failed to decode image {index} ({})", path.display())]
    Decode {
        index: usize,
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("no samples loaded; load samples first")]
    EmptyInput,

    #[error("histogram needs at least one bin")]
    InvalidBins,

    /// A grid cell references a position the sample set does not have.
    #[error("cell ({row}, {col}) references sample {id}, but only {len} samples are loaded")]
    UnknownSample {
        row: usize,
        col: usize,
        id: usize,
        len: usize,
    },

    #[error("i/o error on {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
