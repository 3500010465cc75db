//! Integration tests driving the façade against freshly written GeoTIFFs

use approx::assert_relative_eq;
use gdal::raster::Buffer;
use gdal::spatial_ref::SpatialRef;
use gdal::DriverManager;
use imagery_core::{Dataset, Error};
use std::path::Path;
use tempfile::NamedTempFile;

const ROWS: usize = 8;
const COLS: usize = 10;
const NODATA: f64 = -9999.0;

/// Two-band Float32 GeoTIFF in EPSG:32633. Band 0 counts up from zero
/// with a no-data cell at (row 1, col 2); band 1 is constant 5.0 with a
/// no-data top row.
fn write_test_tiff(path: &Path) {
    let driver = DriverManager::get_driver_by_name("GTiff").unwrap();
    let mut ds = driver
        .create_with_band_type::<f32, _>(path, COLS, ROWS, 2)
        .unwrap();

    ds.set_geo_transform(&[1000.0, 10.0, 0.0, 2000.0, 0.0, -10.0])
        .unwrap();
    ds.set_spatial_ref(&SpatialRef::from_epsg(32633).unwrap())
        .unwrap();

    let mut first: Vec<f32> = (0..ROWS * COLS).map(|i| i as f32).collect();
    first[COLS + 2] = NODATA as f32;

    let mut second = vec![5.0_f32; ROWS * COLS];
    for cell in second.iter_mut().take(COLS) {
        *cell = NODATA as f32;
    }

    for (number, data) in [(1, first), (2, second)] {
        let mut band = ds.rasterband(number).unwrap();
        band.set_no_data_value(Some(NODATA)).unwrap();
        let mut buffer = Buffer::new((COLS, ROWS), data);
        band.write((0, 0), (COLS, ROWS), &mut buffer).unwrap();
    }
}

fn open_test_dataset() -> (NamedTempFile, Dataset) {
    let tmp = NamedTempFile::with_suffix(".tif").unwrap();
    write_test_tiff(tmp.path());
    let dataset = Dataset::open(tmp.path()).unwrap();
    (tmp, dataset)
}

#[test]
fn test_open_metadata() {
    let (_tmp, dataset) = open_test_dataset();

    assert_eq!(dataset.shape(), (ROWS, COLS));
    assert_eq!(dataset.band_count(), 2);
    assert!(dataset.is_projected());
    assert_eq!(dataset.crs().and_then(|crs| crs.epsg()), Some(32633));
    assert!(dataset.geographic_crs().is_some());
    assert!(dataset.wkt().is_some());
    assert_eq!(dataset.dtype().unwrap(), "Float32");
    assert_eq!(dataset.nodata().unwrap(), Some(NODATA));

    dataset.close();
}

#[test]
fn test_geotransform_survives_roundtrip() {
    let (_tmp, dataset) = open_test_dataset();
    let gt = dataset.geo_transform().unwrap();

    assert_eq!(gt.to_gdal(), [1000.0, 10.0, 0.0, 2000.0, 0.0, -10.0]);
    assert!(gt.is_north_up());

    // pixel -> map -> pixel identity
    let (x, y) = gt.apply(3.5, 2.5);
    let (col, row) = gt.invert(x, y);
    assert_relative_eq!(col, 3.5, epsilon = 1e-10);
    assert_relative_eq!(row, 2.5, epsilon = 1e-10);
}

#[test]
fn test_band_shape_invariant_and_index() {
    let (_tmp, dataset) = open_test_dataset();

    let band = dataset.band(1).unwrap();
    assert_eq!(band.index(), 1);
    assert_eq!(band.shape(), dataset.shape());
    assert_eq!(band.len(), ROWS);
    assert!(!band.is_empty());

    match dataset.band(2).err() {
        Some(Error::BandIndex { index: 2, count: 2 }) => {}
        other => panic!("expected band index error, got {other:?}"),
    }
}

#[test]
fn test_bands_iterator() {
    let (_tmp, dataset) = open_test_dataset();
    let indices: Vec<usize> = dataset
        .bands()
        .map(|band| band.unwrap().index())
        .collect();
    assert_eq!(indices, vec![0, 1]);
}

#[test]
fn test_read_masked_replaces_nodata() {
    let (_tmp, dataset) = open_test_dataset();
    let raster = dataset.band(0).unwrap().read_masked().unwrap();

    assert_eq!(raster.shape(), (ROWS, COLS));
    assert!(raster.get(1, 2).unwrap().is_nan());
    assert_eq!(raster.get(0, 0).unwrap(), 0.0);
    assert_eq!(raster.get(2, 3).unwrap(), (2 * COLS + 3) as f64);

    // metadata carried over from the dataset
    assert_eq!(raster.transform().to_gdal()[0], 1000.0);
    assert_eq!(raster.crs().and_then(|crs| crs.epsg()), Some(32633));
}

#[test]
fn test_value_at() {
    let (_tmp, dataset) = open_test_dataset();
    let band = dataset.band(0).unwrap();

    assert_eq!(band.value_at(3, 2).unwrap(), (2 * COLS + 3) as f64);
    assert!(band.value_at(COLS, ROWS).is_err());
}

#[test]
fn test_profile_masks_and_averages() {
    let (_tmp, dataset) = open_test_dataset();

    // single pixel window
    let single = dataset.profile(3, 2, None, 1).unwrap();
    assert_eq!(single.len(), 2);
    assert_relative_eq!(single[0], (2 * COLS + 3) as f64);
    assert_relative_eq!(single[1], 5.0);

    // band 1's top row is entirely no-data
    let top = dataset.profile(4, 0, Some(&[1]), 1).unwrap();
    assert_eq!(top.len(), 1);
    assert!(top[0].is_nan());

    // 3x3 window around the no-data cell of band 0 skips that cell
    let windowed = dataset.profile(2, 1, Some(&[0]), 3).unwrap();
    let mut sum = 0.0;
    let mut count = 0;
    for row in 0..3 {
        for col in 1..4 {
            if (row, col) == (1, 2) {
                continue;
            }
            sum += (row * COLS + col) as f64;
            count += 1;
        }
    }
    assert_relative_eq!(windowed[0], sum / count as f64, epsilon = 1e-10);
}

#[test]
fn test_missing_projection_degrades_flag() {
    let tmp = NamedTempFile::with_suffix(".tif").unwrap();
    let driver = DriverManager::get_driver_by_name("GTiff").unwrap();
    let mut ds = driver
        .create_with_band_type::<u8, _>(tmp.path(), 4, 4, 1)
        .unwrap();
    let mut buffer = Buffer::new((4, 4), vec![0u8; 16]);
    ds.rasterband(1)
        .unwrap()
        .write((0, 0), (4, 4), &mut buffer)
        .unwrap();
    drop(ds);

    let dataset = Dataset::open(tmp.path()).unwrap();
    assert!(!dataset.is_projected());
    assert!(dataset.crs().is_none());
    assert!(dataset.geographic_crs().is_none());
    assert_eq!(dataset.dtype().unwrap(), "Byte");
}

#[test]
fn test_transformation_into_dataset_crs() {
    let (_tmp, dataset) = open_test_dataset();

    let wgs84 = imagery_core::Crs::wgs84();
    let transformation = dataset.transformation(&wgs84).unwrap();

    // 15°E lies in UTM zone 33; the central meridian maps to easting 500km
    let (x, _y) = transformation.apply(15.0, 0.0).unwrap();
    assert_relative_eq!(x, 500_000.0, epsilon = 1.0);
}
