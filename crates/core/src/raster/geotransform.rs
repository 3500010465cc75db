//! Affine pixel/map coordinate mapping

use geo::MapCoords;
use geo_types::{Coord, Geometry};
use serde::{Deserialize, Serialize};

/// Six-coefficient affine mapping between pixel and map coordinates.
///
/// Coefficients are kept in GDAL order `[x0, dx, rx, y0, ry, dy]`, so that
/// for a pixel coordinate `(col, row)`:
///
/// ```text
/// x = x0 + dx * col + rx * row
/// y = y0 + ry * col + dy * row
/// ```
///
/// Pixel coordinates are continuous: the corner of the image is `(0, 0)`
/// and the center of the top-left pixel is `(0.5, 0.5)`. For north-up
/// images `rx` and `ry` are zero and `dy` is negative.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoTransform {
    coeffs: [f64; 6],
}

impl GeoTransform {
    /// Create a north-up transform (no rotation terms)
    pub fn new(origin_x: f64, origin_y: f64, pixel_width: f64, pixel_height: f64) -> Self {
        Self {
            coeffs: [origin_x, pixel_width, 0.0, origin_y, 0.0, pixel_height],
        }
    }

    /// Wrap a GDAL-order coefficient array
    pub fn from_gdal(coeffs: [f64; 6]) -> Self {
        Self { coeffs }
    }

    /// The GDAL-order coefficient array
    pub fn to_gdal(&self) -> [f64; 6] {
        self.coeffs
    }

    /// Map coordinates of the image corner (pixel `(0, 0)`)
    pub fn origin(&self) -> (f64, f64) {
        (self.coeffs[0], self.coeffs[3])
    }

    /// Pixel size as (width, height); height is negative for north-up images
    pub fn pixel_size(&self) -> (f64, f64) {
        (self.coeffs[1], self.coeffs[5])
    }

    /// Cell size, assuming square pixels
    pub fn cell_size(&self) -> f64 {
        self.coeffs[1].abs()
    }

    /// Whether the transform has no rotation terms and a negative pixel height
    pub fn is_north_up(&self) -> bool {
        self.coeffs[2].abs() < 1e-10 && self.coeffs[4].abs() < 1e-10 && self.coeffs[5] < 0.0
    }

    /// Convert a continuous pixel coordinate to a map coordinate
    pub fn apply(&self, col: f64, row: f64) -> (f64, f64) {
        let [x0, dx, rx, y0, ry, dy] = self.coeffs;
        let x = x0 + dx * col + rx * row;
        let y = y0 + ry * col + dy * row;
        (x, y)
    }

    /// Convert a map coordinate to a continuous pixel coordinate.
    ///
    /// Solves the full six-coefficient inverse; a degenerate transform
    /// (zero determinant) yields NaN coordinates.
    pub fn invert(&self, x: f64, y: f64) -> (f64, f64) {
        let [x0, dx, rx, y0, ry, dy] = self.coeffs;
        let det = dx * dy - rx * ry;

        if det.abs() < 1e-12 {
            return (f64::NAN, f64::NAN);
        }

        let ox = x - x0;
        let oy = y - y0;

        let col = (dy * ox - rx * oy) / det;
        let row = (dx * oy - ry * ox) / det;

        (col, row)
    }

    /// Map coordinate of the center of the pixel at (col, row)
    pub fn pixel_center(&self, col: usize, row: usize) -> (f64, f64) {
        self.apply(col as f64 + 0.5, row as f64 + 0.5)
    }

    /// Bounding box (min_x, min_y, max_x, max_y) for a raster of the given size
    pub fn bounds(&self, cols: usize, rows: usize) -> (f64, f64, f64, f64) {
        let corners = [
            self.apply(0.0, 0.0),
            self.apply(cols as f64, 0.0),
            self.apply(0.0, rows as f64),
            self.apply(cols as f64, rows as f64),
        ];

        let mut min_x = f64::INFINITY;
        let mut min_y = f64::INFINITY;
        let mut max_x = f64::NEG_INFINITY;
        let mut max_y = f64::NEG_INFINITY;

        for (x, y) in corners {
            min_x = min_x.min(x);
            min_y = min_y.min(y);
            max_x = max_x.max(x);
            max_y = max_y.max(y);
        }

        (min_x, min_y, max_x, max_y)
    }

    /// Apply the forward transform to every vertex of a geometry,
    /// converting pixel coordinates to map coordinates.
    pub fn map_coordinates(&self, geometry: &Geometry<f64>) -> Geometry<f64> {
        geometry.map_coords(|Coord { x, y }| {
            let (mx, my) = self.apply(x, y);
            Coord { x: mx, y: my }
        })
    }

    /// Apply the inverse transform to every vertex of a geometry,
    /// converting map coordinates to continuous pixel coordinates.
    ///
    /// With `snap` the fractional coordinates are truncated to whole
    /// pixel indices.
    pub fn pixel_coordinates(&self, geometry: &Geometry<f64>, snap: bool) -> Geometry<f64> {
        geometry.map_coords(|Coord { x, y }| {
            let (col, row) = self.invert(x, y);
            if snap {
                Coord {
                    x: col.trunc(),
                    y: row.trunc(),
                }
            } else {
                Coord { x: col, y: row }
            }
        })
    }
}

impl Default for GeoTransform {
    fn default() -> Self {
        Self::new(0.0, 0.0, 1.0, -1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use geo_types::{polygon, Point};

    #[test]
    fn test_apply_pixel_center_convention() {
        let gt = GeoTransform::new(100.0, 200.0, 10.0, -10.0);

        // Image corner maps to the origin
        assert_eq!(gt.apply(0.0, 0.0), (100.0, 200.0));
        // Center of the top-left pixel is half a cell in
        assert_eq!(gt.apply(0.5, 0.5), (105.0, 195.0));
        assert_eq!(gt.pixel_center(0, 0), (105.0, 195.0));
    }

    #[test]
    fn test_invert_roundtrip() {
        let gt = GeoTransform::new(100.0, 200.0, 10.0, -10.0);

        let (x, y) = gt.apply(5.5, 10.5);
        let (col, row) = gt.invert(x, y);

        assert_relative_eq!(col, 5.5, epsilon = 1e-10);
        assert_relative_eq!(row, 10.5, epsilon = 1e-10);
    }

    #[test]
    fn test_invert_roundtrip_with_rotation() {
        let gt = GeoTransform::from_gdal([500.0, 2.0, 0.3, 900.0, -0.1, -2.5]);

        for (col, row) in [(0.0, 0.0), (12.25, 3.75), (99.0, 41.5)] {
            let (x, y) = gt.apply(col, row);
            let (c, r) = gt.invert(x, y);
            assert_relative_eq!(c, col, epsilon = 1e-9);
            assert_relative_eq!(r, row, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_invert_degenerate() {
        let gt = GeoTransform::from_gdal([0.0, 0.0, 0.0, 0.0, 0.0, 0.0]);
        let (col, row) = gt.invert(10.0, 10.0);
        assert!(col.is_nan() && row.is_nan());
    }

    #[test]
    fn test_bounds() {
        let gt = GeoTransform::new(0.0, 100.0, 1.0, -1.0);
        let (min_x, min_y, max_x, max_y) = gt.bounds(100, 100);

        assert_relative_eq!(min_x, 0.0);
        assert_relative_eq!(min_y, 0.0);
        assert_relative_eq!(max_x, 100.0);
        assert_relative_eq!(max_y, 100.0);
    }

    #[test]
    fn test_geometry_roundtrip() {
        let gt = GeoTransform::new(1000.0, 2000.0, 30.0, -30.0);
        let poly: Geometry<f64> = polygon![
            (x: 1030.0, y: 1970.0),
            (x: 1150.0, y: 1970.0),
            (x: 1150.0, y: 1850.0),
            (x: 1030.0, y: 1970.0),
        ]
        .into();

        let pixels = gt.pixel_coordinates(&poly, false);
        let back = gt.map_coordinates(&pixels);

        if let (Geometry::Polygon(a), Geometry::Polygon(b)) = (&poly, &back) {
            let orig = a.exterior();
            let round = b.exterior();
            assert_eq!(orig.0.len(), round.0.len());
            for (p, q) in orig.0.iter().zip(round.0.iter()) {
                assert_relative_eq!(p.x, q.x, epsilon = 1e-9);
                assert_relative_eq!(p.y, q.y, epsilon = 1e-9);
            }
        } else {
            panic!("geometry type changed during transform");
        }
    }

    #[test]
    fn test_snap_truncates() {
        let gt = GeoTransform::new(0.0, 10.0, 1.0, -1.0);
        let point: Geometry<f64> = Point::new(3.7, 7.2).into();

        let snapped = gt.pixel_coordinates(&point, true);
        if let Geometry::Point(p) = snapped {
            assert_eq!(p.x(), 3.0);
            assert_eq!(p.y(), 2.0);
        } else {
            panic!("expected a point");
        }
    }

    #[test]
    fn test_north_up() {
        assert!(GeoTransform::new(0.0, 0.0, 1.0, -1.0).is_north_up());
        assert!(!GeoTransform::from_gdal([0.0, 1.0, 0.5, 0.0, 0.0, -1.0]).is_north_up());
    }
}
