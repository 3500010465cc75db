//! Point sampling strategies

use geo::CoordsIter;
use geo_types::Geometry;
use imagery_core::{Error, Raster, Result};
use serde::{Deserialize, Serialize};

/// How a raster is sampled at a fractional pixel coordinate
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointStrategy {
    /// Value of the pixel containing the coordinate
    #[default]
    Nearest,
}

impl PointStrategy {
    /// Sample a masked raster at a fractional pixel coordinate.
    ///
    /// Returns `None` for coordinates outside the raster.
    pub fn sample(&self, raster: &Raster<f64>, col: f64, row: f64) -> Option<f64> {
        match self {
            PointStrategy::Nearest => {
                if col < 0.0 || row < 0.0 {
                    return None;
                }
                raster.get(row.floor() as usize, col.floor() as usize).ok()
            }
        }
    }
}

/// An extracted value with the coordinate it was sampled at.
///
/// Coordinates are in whatever space the producing call documents:
/// pixel space for the low-level helpers, map space for
/// [`crate::extract`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub x: f64,
    pub y: f64,
    pub value: f64,
}

/// Sample a raster at every vertex of a geometry in pixel coordinates.
///
/// Vertices outside the raster (or over masked cells) yield NaN values,
/// so the output always has one sample per input vertex.
pub fn extract_points(
    raster: &Raster<f64>,
    pixel_geometry: &Geometry<f64>,
    strategy: PointStrategy,
) -> Result<Vec<Sample>> {
    let samples: Vec<Sample> = pixel_geometry
        .coords_iter()
        .map(|coord| Sample {
            x: coord.x,
            y: coord.y,
            value: strategy.sample(raster, coord.x, coord.y).unwrap_or(f64::NAN),
        })
        .collect();

    if samples.is_empty() {
        return Err(Error::EmptyGeometry);
    }

    Ok(samples)
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo_types::{line_string, Point};

    fn raster_3x3() -> Raster<f64> {
        // 0 1 2
        // 3 4 5
        // 6 7 8
        Raster::from_vec((0..9).map(f64::from).collect(), 3, 3).unwrap()
    }

    #[test]
    fn test_nearest_picks_containing_pixel() {
        let raster = raster_3x3();
        let strategy = PointStrategy::Nearest;

        assert_eq!(strategy.sample(&raster, 0.5, 0.5), Some(0.0));
        assert_eq!(strategy.sample(&raster, 2.9, 1.1), Some(5.0));
        assert_eq!(strategy.sample(&raster, -0.1, 0.5), None);
        assert_eq!(strategy.sample(&raster, 0.5, 3.0), None);
    }

    #[test]
    fn test_extract_points_per_vertex() {
        let raster = raster_3x3();
        let line: Geometry<f64> = line_string![
            (x: 0.5, y: 0.5),
            (x: 1.5, y: 1.5),
            (x: 2.5, y: 2.5),
        ]
        .into();

        let samples = extract_points(&raster, &line, PointStrategy::Nearest).unwrap();
        let values: Vec<f64> = samples.iter().map(|s| s.value).collect();
        assert_eq!(values, vec![0.0, 4.0, 8.0]);
    }

    #[test]
    fn test_extract_points_outside_is_nan() {
        let raster = raster_3x3();
        let point: Geometry<f64> = Point::new(10.0, 10.0).into();

        let samples = extract_points(&raster, &point, PointStrategy::Nearest).unwrap();
        assert_eq!(samples.len(), 1);
        assert!(samples[0].value.is_nan());
    }
}
