//! Raster grid, pixel value and geotransform types

mod element;
mod geotransform;
mod grid;

pub use element::PixelValue;
pub use geotransform::GeoTransform;
pub use grid::{Raster, RasterStats};
