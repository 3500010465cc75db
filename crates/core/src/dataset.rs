//! Read-only dataset handle over a GDAL raster source

use crate::band::Band;
use crate::crs::{Crs, Transformation};
use crate::error::{Error, Result};
use crate::raster::GeoTransform;
use gdal::Metadata;
use std::path::Path;

/// Spatial reference metadata captured when a dataset is opened.
///
/// When the source carries no usable spatial reference the whole block
/// degrades to `projected = false` rather than failing the open.
#[derive(Debug, Clone, Default)]
struct Projection {
    wkt: Option<String>,
    crs: Option<Crs>,
    geographic: Option<Crs>,
    projected: bool,
}

impl Projection {
    fn capture(gdal: &gdal::Dataset) -> Self {
        let Ok(srs) = gdal.spatial_ref() else {
            return Self::default();
        };

        let crs = Crs::from_spatial_ref(&srs).ok();
        let geographic = srs
            .geog_cs()
            .ok()
            .and_then(|geog| Crs::from_spatial_ref(&geog).ok());

        Self {
            wkt: srs.to_wkt().ok(),
            projected: crs.is_some(),
            crs,
            geographic,
        }
    }
}

/// An open raster dataset.
///
/// Owns the underlying GDAL handle for its whole lifetime; the handle is
/// released on [`Dataset::close`] or drop. Opens are always read-only.
///
/// # Example
///
/// ```ignore
/// use imagery_core::Dataset;
///
/// let dataset = Dataset::open("scene.tif")?;
/// let transform = dataset.geo_transform()?;
/// let band = dataset.band(0)?;
/// let values = band.read_masked()?;
/// dataset.close();
/// ```
pub struct Dataset {
    gdal: gdal::Dataset,
    /// Raster dimensions as (rows, cols)
    shape: (usize, usize),
    projection: Projection,
}

impl Dataset {
    /// Open a raster file read-only
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let gdal = gdal::Dataset::open(path)?;
        let (cols, rows) = gdal.raster_size();
        let projection = Projection::capture(&gdal);

        tracing::debug!(
            path = %path.display(),
            rows,
            cols,
            bands = gdal.raster_count(),
            projected = projection.projected,
            "opened dataset"
        );

        Ok(Self {
            gdal,
            shape: (rows, cols),
            projection,
        })
    }

    /// Raster dimensions as (rows, cols)
    pub fn shape(&self) -> (usize, usize) {
        self.shape
    }

    /// Number of raster bands
    pub fn band_count(&self) -> usize {
        self.gdal.raster_count()
    }

    /// GDAL description of the dataset (usually the source path)
    pub fn description(&self) -> Result<String> {
        Ok(self.gdal.description()?)
    }

    /// The affine transform between pixel and map coordinates
    pub fn geo_transform(&self) -> Result<GeoTransform> {
        Ok(GeoTransform::from_gdal(self.gdal.geo_transform()?))
    }

    /// Projection WKT, if the dataset carries one
    pub fn wkt(&self) -> Option<&str> {
        self.projection.wkt.as_deref()
    }

    /// The dataset's CRS, if one could be read
    pub fn crs(&self) -> Option<&Crs> {
        self.projection.crs.as_ref()
    }

    /// The geographic (unprojected) CRS underlying the dataset's CRS
    pub fn geographic_crs(&self) -> Option<&Crs> {
        self.projection.geographic.as_ref()
    }

    /// Whether a usable spatial reference was found at open time
    pub fn is_projected(&self) -> bool {
        self.projection.projected
    }

    /// Access a band by 0-based index
    pub fn band(&self, index: usize) -> Result<Band<'_>> {
        Band::new(self, index)
    }

    /// Iterate over all bands in index order
    pub fn bands(&self) -> impl Iterator<Item = Result<Band<'_>>> + '_ {
        (0..self.band_count()).map(move |index| self.band(index))
    }

    /// No-data value of the first band
    pub fn nodata(&self) -> Result<Option<f64>> {
        Ok(self.band(0)?.nodata())
    }

    /// Data type name of the first band
    pub fn dtype(&self) -> Result<&'static str> {
        Ok(self.band(0)?.dtype())
    }

    /// Reprojection from `source` into this dataset's CRS
    pub fn transformation(&self, source: &Crs) -> Result<Transformation> {
        let target = self.crs().ok_or(Error::MissingCrs)?;
        Transformation::new(source, target)
    }

    /// Per-band mean over a square window centered on a pixel.
    ///
    /// Reads a `window`×`window` block around `(col, row)` for each of the
    /// selected bands (all bands when `bands` is `None`), masks no-data
    /// values and averages the rest. Bands whose window is entirely
    /// no-data yield NaN. The window is clamped to the raster extent.
    pub fn profile(
        &self,
        col: usize,
        row: usize,
        bands: Option<&[usize]>,
        window: usize,
    ) -> Result<Vec<f64>> {
        let (rows, cols) = self.shape;
        if row >= rows || col >= cols {
            return Err(Error::IndexOutOfBounds { row, col, rows, cols });
        }

        let window = window.clamp(1, rows.min(cols));
        let half = window / 2;
        let x0 = col.saturating_sub(half).min(cols - window);
        let y0 = row.saturating_sub(half).min(rows - window);

        let indices: Vec<usize> = match bands {
            Some(selection) => selection.to_vec(),
            None => (0..self.band_count()).collect(),
        };

        let mut means = Vec::with_capacity(indices.len());
        for index in indices {
            let band = self.band(index)?;
            means.push(band.window_mean(x0, y0, window, window)?);
        }

        Ok(means)
    }

    /// The wrapped GDAL dataset
    pub fn as_gdal(&self) -> &gdal::Dataset {
        &self.gdal
    }

    /// Release the underlying raster handle
    pub fn close(self) {
        tracing::debug!("closing dataset");
    }
}
