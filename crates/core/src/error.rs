//! Error types for Imagery

use thiserror::Error;

/// Main error type for Imagery operations.
///
/// GDAL-native errors propagate unchanged; the only degradation applied
/// anywhere is a missing spatial reference lowering a dataset's
/// `projected` flag instead of failing the open.
#[derive(Error, Debug)]
pub enum Error {
    #[error("GDAL error: {0}")]
    Gdal(#[from] gdal::errors::GdalError),

    #[error("band index {index} out of range for dataset with {count} bands")]
    BandIndex { index: usize, count: usize },

    #[error("index out of bounds: ({row}, {col}) in raster of size ({rows}, {cols})")]
    IndexOutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    #[error("invalid raster dimensions: {rows}x{cols}")]
    InvalidDimensions { rows: usize, cols: usize },

    #[error("band size mismatch: dataset is ({er}, {ec}), band is ({ar}, {ac})")]
    SizeMismatch { er: usize, ec: usize, ar: usize, ac: usize },

    #[error("no coordinate reference system definition available")]
    MissingCrs,

    #[error("geometry has no coordinates")]
    EmptyGeometry,

    #[error("{0}")]
    Other(String),
}

/// Result type alias for Imagery operations
pub type Result<T> = std::result::Result<T, Error>;
