//! # Imagery Core
//!
//! A thin object-oriented façade over GDAL rasters.
//!
//! This crate provides:
//! - [`Dataset`]: an open raster handle with projection metadata
//! - [`Band`]: a non-owning view of one raster band
//! - [`GeoTransform`]: the affine pixel/map coordinate mapping
//! - [`Crs`] / [`Transformation`]: coordinate reference system handles
//! - [`Raster`]: an in-memory grid produced by band reads
//!
//! All decoding and reprojection is delegated to GDAL; the logic here is
//! affine arithmetic, attribute forwarding and no-data masking.

pub mod band;
pub mod crs;
pub mod dataset;
pub mod error;
pub mod raster;

pub use band::Band;
pub use crs::{Crs, Transformation};
pub use dataset::Dataset;
pub use error::{Error, Result};
pub use raster::{GeoTransform, PixelValue, Raster, RasterStats};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::band::Band;
    pub use crate::crs::{Crs, Transformation};
    pub use crate::dataset::Dataset;
    pub use crate::error::{Error, Result};
    pub use crate::raster::{GeoTransform, PixelValue, Raster};
}
