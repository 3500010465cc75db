//! Area masks and area value extraction

use crate::strategy::Sample;
use geo::{BoundingRect, Contains};
use geo_types::{Geometry, Point};
use imagery_core::{Raster, Result};
use ndarray::Array2;

/// Boolean containment mask for an area geometry in pixel coordinates.
///
/// A cell is set when its center falls inside the geometry, matching the
/// pixel-center convention of the geotransform. Only cells within the
/// geometry's bounding box are tested.
pub fn create_mask(pixel_geometry: &Geometry<f64>, rows: usize, cols: usize) -> Array2<bool> {
    let mut mask = Array2::from_elem((rows, cols), false);

    let Some(rect) = pixel_geometry.bounding_rect() else {
        return mask;
    };

    let col0 = rect.min().x.floor().max(0.0) as usize;
    let row0 = rect.min().y.floor().max(0.0) as usize;
    let col1 = (rect.max().x.ceil().max(0.0) as usize).min(cols);
    let row1 = (rect.max().y.ceil().max(0.0) as usize).min(rows);

    for row in row0..row1 {
        for col in col0..col1 {
            let center = Point::new(col as f64 + 0.5, row as f64 + 0.5);
            if pixel_geometry.contains(&center) {
                mask[(row, col)] = true;
            }
        }
    }

    mask
}

/// Values of all in-mask, non-masked cells with their pixel-center
/// coordinates.
pub(crate) fn extract_samples(
    raster: &Raster<f64>,
    pixel_geometry: &Geometry<f64>,
) -> Result<Vec<Sample>> {
    let (rows, cols) = raster.shape();
    let mask = create_mask(pixel_geometry, rows, cols);

    let mut samples = Vec::new();
    for row in 0..rows {
        for col in 0..cols {
            if !mask[(row, col)] {
                continue;
            }
            let value = raster.get(row, col)?;
            if value.is_nan() {
                continue;
            }
            samples.push(Sample {
                x: col as f64 + 0.5,
                y: row as f64 + 0.5,
                value,
            });
        }
    }

    tracing::debug!(cells = samples.len(), "extracted area samples");
    Ok(samples)
}

/// Extract an area as an n×3 matrix of (pixel x, pixel y, value) rows.
///
/// No-data cells (NaN in a masked raster) are dropped from the output.
pub fn extract_area(raster: &Raster<f64>, pixel_geometry: &Geometry<f64>) -> Result<Array2<f64>> {
    let samples = extract_samples(raster, pixel_geometry)?;

    let mut out = Array2::zeros((samples.len(), 3));
    for (i, sample) in samples.iter().enumerate() {
        out[(i, 0)] = sample.x;
        out[(i, 1)] = sample.y;
        out[(i, 2)] = sample.value;
    }

    Ok(out)
}
