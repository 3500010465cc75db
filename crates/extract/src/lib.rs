//! # Imagery Extract
//!
//! Point and area value extraction over [`imagery_core`] rasters.
//!
//! The entry point is [`extract`], which projects a map-coordinate
//! geometry into a band's pixel space, samples it and reports the
//! results back in map coordinates:
//!
//! - zero-area geometries (points, lines) are sampled vertex by vertex
//!   with a [`PointStrategy`],
//! - area geometries are rasterized to a containment mask and every
//!   covered, non-no-data cell is extracted.

pub mod area;
pub mod strategy;

pub use area::{create_mask, extract_area};
pub use strategy::{extract_points, PointStrategy, Sample};

use geo::Area;
use geo_types::Geometry;
use imagery_core::{Band, Result};

/// Extract raster values under a geometry given in map coordinates.
///
/// Returns one [`Sample`] per vertex for zero-area geometries, or one
/// per covered pixel for area geometries; sample coordinates are map
/// coordinates in the dataset's CRS.
pub fn extract(
    band: &Band<'_>,
    geometry: &Geometry<f64>,
    strategy: PointStrategy,
) -> Result<Vec<Sample>> {
    let transform = band.dataset().geo_transform()?;
    let pixel_geometry = transform.pixel_coordinates(geometry, false);
    let raster = band.read_masked()?;

    let samples = if pixel_geometry.unsigned_area() == 0.0 {
        strategy::extract_points(&raster, &pixel_geometry, strategy)?
    } else {
        area::extract_samples(&raster, &pixel_geometry)?
    };

    Ok(samples
        .into_iter()
        .map(|sample| {
            let (x, y) = transform.apply(sample.x, sample.y);
            Sample {
                x,
                y,
                value: sample.value,
            }
        })
        .collect())
}
