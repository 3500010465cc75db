//! In-memory raster grid

use crate::crs::Crs;
use crate::error::{Error, Result};
use crate::raster::{GeoTransform, PixelValue};
use ndarray::{Array2, ArrayView2};

/// A georeferenced 2-D grid of pixel values.
///
/// Produced by band reads; carries the affine transform, the CRS and the
/// declared no-data value alongside the data so that extraction code can
/// convert coordinates and mask missing measurements without going back
/// to the dataset.
#[derive(Debug, Clone)]
pub struct Raster<T: PixelValue> {
    /// Row-major cell values, indexed as (row, col)
    data: Array2<T>,
    transform: GeoTransform,
    crs: Option<Crs>,
    nodata: Option<T>,
}

impl<T: PixelValue> Raster<T> {
    /// Create a zero-filled raster with default georeferencing
    pub fn new(rows: usize, cols: usize) -> Self {
        Self::from_array(Array2::zeros((rows, cols)))
    }

    /// Create a raster filled with a single value
    pub fn filled(rows: usize, cols: usize, value: T) -> Self {
        Self::from_array(Array2::from_elem((rows, cols), value))
    }

    /// Create a raster from a row-major vector
    pub fn from_vec(data: Vec<T>, rows: usize, cols: usize) -> Result<Self> {
        if data.len() != rows * cols {
            return Err(Error::InvalidDimensions { rows, cols });
        }

        let array = Array2::from_shape_vec((rows, cols), data)
            .map_err(|e| Error::Other(e.to_string()))?;

        Ok(Self::from_array(array))
    }

    /// Wrap an existing array with default georeferencing
    pub fn from_array(data: Array2<T>) -> Self {
        Self {
            data,
            transform: GeoTransform::default(),
            crs: None,
            nodata: None,
        }
    }

    /// Number of rows
    pub fn rows(&self) -> usize {
        self.data.nrows()
    }

    /// Number of columns
    pub fn cols(&self) -> usize {
        self.data.ncols()
    }

    /// Dimensions as (rows, cols)
    pub fn shape(&self) -> (usize, usize) {
        self.data.dim()
    }

    /// Total number of cells
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the raster has no cells
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Get the value at (row, col)
    pub fn get(&self, row: usize, col: usize) -> Result<T> {
        self.data
            .get((row, col))
            .copied()
            .ok_or(Error::IndexOutOfBounds {
                row,
                col,
                rows: self.rows(),
                cols: self.cols(),
            })
    }

    /// Set the value at (row, col)
    pub fn set(&mut self, row: usize, col: usize, value: T) -> Result<()> {
        let (rows, cols) = self.shape();
        match self.data.get_mut((row, col)) {
            Some(cell) => {
                *cell = value;
                Ok(())
            }
            None => Err(Error::IndexOutOfBounds { row, col, rows, cols }),
        }
    }

    /// View of the underlying data
    pub fn view(&self) -> ArrayView2<'_, T> {
        self.data.view()
    }

    /// Reference to the underlying array
    pub fn data(&self) -> &Array2<T> {
        &self.data
    }

    /// Consume the raster and return the underlying array
    pub fn into_array(self) -> Array2<T> {
        self.data
    }

    /// The affine transform
    pub fn transform(&self) -> &GeoTransform {
        &self.transform
    }

    /// Replace the affine transform
    pub fn set_transform(&mut self, transform: GeoTransform) {
        self.transform = transform;
    }

    /// The coordinate reference system, if known
    pub fn crs(&self) -> Option<&Crs> {
        self.crs.as_ref()
    }

    /// Replace the coordinate reference system
    pub fn set_crs(&mut self, crs: Option<Crs>) {
        self.crs = crs;
    }

    /// The declared no-data value
    pub fn nodata(&self) -> Option<T> {
        self.nodata
    }

    /// Replace the declared no-data value
    pub fn set_nodata(&mut self, nodata: Option<T>) {
        self.nodata = nodata;
    }

    /// Geographic bounds as (min_x, min_y, max_x, max_y)
    pub fn bounds(&self) -> (f64, f64, f64, f64) {
        self.transform.bounds(self.cols(), self.rows())
    }

    /// Map coordinate of the center of the pixel at (col, row)
    pub fn pixel_to_map(&self, col: usize, row: usize) -> (f64, f64) {
        self.transform.pixel_center(col, row)
    }

    /// Fractional pixel coordinate of a map coordinate
    pub fn map_to_pixel(&self, x: f64, y: f64) -> (f64, f64) {
        self.transform.invert(x, y)
    }

    /// Whether a value counts as no-data for this raster
    pub fn is_nodata(&self, value: T) -> bool {
        value.is_nodata(self.nodata)
    }

    /// Convert to `f64` cells with every no-data value replaced by NaN.
    ///
    /// The returned raster keeps the transform and CRS and declares NaN
    /// as its no-data sentinel, so downstream masking stays consistent.
    pub fn masked(&self) -> Raster<f64> {
        let nodata = self.nodata;
        let data = self.data.mapv(|v| {
            if v.is_nodata(nodata) {
                f64::NAN
            } else {
                v.to_f64().unwrap_or(f64::NAN)
            }
        });

        Raster {
            data,
            transform: self.transform,
            crs: self.crs.clone(),
            nodata: Some(f64::NAN),
        }
    }

    /// Min, max, mean and cell counts over the valid (non-no-data) cells
    pub fn statistics(&self) -> RasterStats<T> {
        let mut min: Option<T> = None;
        let mut max: Option<T> = None;
        let mut sum = 0.0;
        let mut valid = 0usize;

        for &value in self.data.iter() {
            if self.is_nodata(value) {
                continue;
            }

            if min.map_or(true, |m| value < m) {
                min = Some(value);
            }
            if max.map_or(true, |m| value > m) {
                max = Some(value);
            }

            if let Some(v) = value.to_f64() {
                sum += v;
                valid += 1;
            }
        }

        RasterStats {
            min,
            max,
            mean: (valid > 0).then(|| sum / valid as f64),
            valid_count: valid,
            nodata_count: self.len() - valid,
        }
    }
}

/// Summary statistics for a raster
#[derive(Debug, Clone)]
pub struct RasterStats<T> {
    pub min: Option<T>,
    pub max: Option<T>,
    pub mean: Option<f64>,
    pub valid_count: usize,
    pub nodata_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_creation_and_access() {
        let mut raster: Raster<f32> = Raster::new(10, 20);
        assert_eq!(raster.shape(), (10, 20));

        raster.set(5, 5, 42.0).unwrap();
        assert_eq!(raster.get(5, 5).unwrap(), 42.0);

        assert!(raster.get(10, 0).is_err());
        assert!(raster.set(0, 20, 1.0).is_err());
    }

    #[test]
    fn test_from_vec_dimension_check() {
        let result: Result<Raster<u8>> = Raster::from_vec(vec![0; 7], 2, 4);
        assert!(result.is_err());
    }

    #[test]
    fn test_masked_replaces_nodata() {
        let mut raster: Raster<i32> = Raster::from_vec(vec![1, -9999, 3, -9999], 2, 2).unwrap();
        raster.set_nodata(Some(-9999));

        let masked = raster.masked();
        assert_eq!(masked.get(0, 0).unwrap(), 1.0);
        assert!(masked.get(0, 1).unwrap().is_nan());
        assert_eq!(masked.get(1, 0).unwrap(), 3.0);
        assert!(masked.get(1, 1).unwrap().is_nan());
        assert!(masked.nodata().unwrap().is_nan());
    }

    #[test]
    fn test_masked_without_declared_nodata() {
        let mut raster: Raster<f64> = Raster::from_vec(vec![1.0, f64::NAN, 3.0, 4.0], 2, 2).unwrap();
        raster.set_nodata(None);

        // NaN cells are still masked for float rasters
        let masked = raster.masked();
        assert!(masked.get(0, 1).unwrap().is_nan());
        assert_eq!(masked.get(1, 1).unwrap(), 4.0);
    }

    #[test]
    fn test_statistics_skip_nodata() {
        let mut raster: Raster<f64> = Raster::from_vec(vec![2.0, 4.0, -1.0, 6.0], 2, 2).unwrap();
        raster.set_nodata(Some(-1.0));

        let stats = raster.statistics();
        assert_eq!(stats.min, Some(2.0));
        assert_eq!(stats.max, Some(6.0));
        assert_eq!(stats.mean, Some(4.0));
        assert_eq!(stats.valid_count, 3);
        assert_eq!(stats.nodata_count, 1);
    }

    #[test]
    fn test_coordinate_forwarding() {
        let mut raster: Raster<u16> = Raster::new(4, 4);
        raster.set_transform(GeoTransform::new(100.0, 200.0, 10.0, -10.0));

        assert_eq!(raster.pixel_to_map(0, 0), (105.0, 195.0));
        let (col, row) = raster.map_to_pixel(105.0, 195.0);
        assert!((col - 0.5).abs() < 1e-10 && (row - 0.5).abs() < 1e-10);
    }
}
