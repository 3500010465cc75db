//! Point and geometry reprojection between two CRS

use crate::crs::Crs;
use crate::error::Result;
use gdal::spatial_ref::{AxisMappingStrategy, CoordTransform};
use geo::MapCoords;
use geo_types::{Coord, Geometry};
use std::fmt;

/// Reprojection between a source and a target CRS.
///
/// Wraps a GDAL coordinate transformation; both spatial references are
/// forced to traditional GIS x/y axis order so coordinates keep the
/// (x, y) convention regardless of the authority definition.
pub struct Transformation {
    transform: CoordTransform,
    source: Crs,
    target: Crs,
}

impl Transformation {
    /// Create a transformation from `source` into `target`
    pub fn new(source: &Crs, target: &Crs) -> Result<Self> {
        let mut src = source.to_spatial_ref()?;
        let mut dst = target.to_spatial_ref()?;
        src.set_axis_mapping_strategy(AxisMappingStrategy::TraditionalGisOrder);
        dst.set_axis_mapping_strategy(AxisMappingStrategy::TraditionalGisOrder);

        Ok(Self {
            transform: CoordTransform::new(&src, &dst)?,
            source: source.clone(),
            target: target.clone(),
        })
    }

    /// The source CRS
    pub fn source(&self) -> &Crs {
        &self.source
    }

    /// The target CRS
    pub fn target(&self) -> &Crs {
        &self.target
    }

    /// Transform a single (x, y) coordinate
    pub fn apply(&self, x: f64, y: f64) -> Result<(f64, f64)> {
        let mut xs = [x];
        let mut ys = [y];
        let mut zs = [0.0];
        self.transform.transform_coords(&mut xs, &mut ys, &mut zs)?;
        Ok((xs[0], ys[0]))
    }

    /// Transform every vertex of a geometry
    pub fn apply_geometry(&self, geometry: &Geometry<f64>) -> Result<Geometry<f64>> {
        geometry.try_map_coords(|Coord { x, y }| {
            let (tx, ty) = self.apply(x, y)?;
            Ok(Coord { x: tx, y: ty })
        })
    }
}

impl fmt::Debug for Transformation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transformation")
            .field("source", &self.source.identifier())
            .field("target", &self.target.identifier())
            .finish()
    }
}
