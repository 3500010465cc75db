//! Non-owning band view into an open dataset

use crate::dataset::Dataset;
use crate::error::{Error, Result};
use crate::raster::{GeoTransform, PixelValue, Raster};
use gdal::raster::{GdalDataType, GdalType, RasterBand};
use gdal::Metadata;
use geo_types::Geometry;

/// A single raster band, borrowed from an open [`Dataset`].
///
/// The band is a view at a fixed 0-based index; its dimensions are
/// checked against the dataset's declared raster size at construction.
pub struct Band<'d> {
    dataset: &'d Dataset,
    band: RasterBand<'d>,
    index: usize,
    nodata: Option<f64>,
}

impl<'d> Band<'d> {
    pub(crate) fn new(dataset: &'d Dataset, index: usize) -> Result<Self> {
        let count = dataset.band_count();
        if index >= count {
            return Err(Error::BandIndex { index, count });
        }

        // GDAL band numbering is 1-based
        let band = dataset.as_gdal().rasterband(index + 1)?;

        let (rows, cols) = (band.y_size(), band.x_size());
        let (drows, dcols) = dataset.shape();
        if (rows, cols) != (drows, dcols) {
            return Err(Error::SizeMismatch {
                er: drows,
                ec: dcols,
                ar: rows,
                ac: cols,
            });
        }

        let nodata = band.no_data_value();
        Ok(Self {
            dataset,
            band,
            index,
            nodata,
        })
    }

    /// 0-based band index
    pub fn index(&self) -> usize {
        self.index
    }

    /// The dataset this band belongs to
    pub fn dataset(&self) -> &'d Dataset {
        self.dataset
    }

    /// Band dimensions as (rows, cols); equal to the dataset shape
    pub fn shape(&self) -> (usize, usize) {
        self.dataset.shape()
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.shape().0
    }

    /// Whether the band has no rows
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Declared no-data value
    pub fn nodata(&self) -> Option<f64> {
        self.nodata
    }

    /// GDAL description of the band
    pub fn description(&self) -> Result<String> {
        Ok(self.band.description()?)
    }

    /// Name of the band's native pixel type
    pub fn dtype(&self) -> &'static str {
        match self.band.band_type() {
            GdalDataType::UInt8 => "Byte",
            GdalDataType::UInt16 => "UInt16",
            GdalDataType::Int16 => "Int16",
            GdalDataType::UInt32 => "UInt32",
            GdalDataType::Int32 => "Int32",
            GdalDataType::Float32 => "Float32",
            GdalDataType::Float64 => "Float64",
            _ => "Unknown",
        }
    }

    /// Read the whole band into a raster of the requested type.
    ///
    /// The raster inherits the dataset's transform, CRS and the band's
    /// no-data value.
    pub fn read<T: PixelValue + GdalType>(&self) -> Result<Raster<T>> {
        let (rows, cols) = self.shape();
        let buffer = self.band.read_as::<T>((0, 0), (cols, rows), (cols, rows), None)?;

        tracing::debug!(band = self.index, rows, cols, "read band array");

        let mut raster = Raster::from_vec(buffer.data().to_vec(), rows, cols)?;
        raster.set_transform(self.dataset.geo_transform().unwrap_or_default());
        raster.set_crs(self.dataset.crs().cloned());
        if let Some(declared) = self.nodata {
            raster.set_nodata(num_traits::cast(declared));
        }

        Ok(raster)
    }

    /// Read the whole band as `f64` with no-data values replaced by NaN
    pub fn read_masked(&self) -> Result<Raster<f64>> {
        Ok(self.read::<f64>()?.masked())
    }

    /// Value of a single pixel, in the band's native type widened to f64
    pub fn value_at(&self, col: usize, row: usize) -> Result<f64> {
        let (rows, cols) = self.shape();
        if row >= rows || col >= cols {
            return Err(Error::IndexOutOfBounds { row, col, rows, cols });
        }

        let buffer = self
            .band
            .read_as::<f64>((col as isize, row as isize), (1, 1), (1, 1), None)?;
        Ok(buffer.data()[0])
    }

    /// Mean of a window, skipping no-data cells; NaN when fully masked
    pub(crate) fn window_mean(
        &self,
        x0: usize,
        y0: usize,
        xsize: usize,
        ysize: usize,
    ) -> Result<f64> {
        let buffer = self
            .band
            .read_as::<f64>((x0 as isize, y0 as isize), (xsize, ysize), (xsize, ysize), None)?;

        let mut sum = 0.0;
        let mut count = 0usize;
        for &value in buffer.data() {
            if value.is_nan() || self.nodata.map_or(false, |nd| value == nd) {
                continue;
            }
            sum += value;
            count += 1;
        }

        Ok(if count == 0 { f64::NAN } else { sum / count as f64 })
    }

    /// Convert a geometry from map to continuous pixel coordinates
    pub fn pixel_coordinates(&self, geometry: &Geometry<f64>, snap: bool) -> Result<Geometry<f64>> {
        Ok(self.transform()?.pixel_coordinates(geometry, snap))
    }

    /// Convert a geometry from pixel to map coordinates
    pub fn map_coordinates(&self, geometry: &Geometry<f64>) -> Result<Geometry<f64>> {
        Ok(self.transform()?.map_coordinates(geometry))
    }

    fn transform(&self) -> Result<GeoTransform> {
        self.dataset.geo_transform()
    }
}
