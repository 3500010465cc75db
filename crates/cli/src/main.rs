//! Imagery CLI - inspect and sample georeferenced rasters

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use geo_types::{Geometry, Point};
use std::path::{Path, PathBuf};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use imagery_core::Dataset;
use imagery_extract::{extract, PointStrategy};

#[derive(Parser)]
#[command(name = "imagery")]
#[command(author, version, about = "Inspect and sample georeferenced rasters", long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show metadata and per-band statistics for a raster file
    Info {
        /// Input raster file
        input: PathBuf,
    },
    /// Sample band values at a map coordinate
    Sample {
        /// Input raster file
        input: PathBuf,
        /// Map x coordinate (easting / longitude)
        x: f64,
        /// Map y coordinate (northing / latitude)
        y: f64,
        /// Restrict to a single 0-based band
        #[arg(short, long)]
        band: Option<usize>,
    },
    /// Windowed per-band means around a pixel
    Profile {
        /// Input raster file
        input: PathBuf,
        /// Pixel column
        col: usize,
        /// Pixel row
        row: usize,
        /// Window size in pixels
        #[arg(short, long, default_value_t = 1)]
        window: usize,
        /// 0-based band indices (defaults to all bands)
        #[arg(short, long, value_delimiter = ',')]
        bands: Option<Vec<usize>>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Info { input } => info(&input),
        Commands::Sample { input, x, y, band } => sample(&input, x, y, band),
        Commands::Profile {
            input,
            col,
            row,
            window,
            bands,
        } => profile(&input, col, row, window, bands.as_deref()),
    }
}

fn open(input: &Path) -> Result<Dataset> {
    Dataset::open(input).with_context(|| format!("failed to open {}", input.display()))
}

fn info(input: &Path) -> Result<()> {
    let dataset = open(input)?;
    let (rows, cols) = dataset.shape();

    println!("File:       {}", input.display());
    println!("Size:       {cols} x {rows} pixels");
    println!("Bands:      {}", dataset.band_count());

    match dataset.crs() {
        Some(crs) => println!("CRS:        {crs}"),
        None => println!("CRS:        not georeferenced"),
    }
    if let Some(geographic) = dataset.geographic_crs() {
        println!("Geographic: {geographic}");
    }

    if let Ok(gt) = dataset.geo_transform() {
        let (x0, y0) = gt.origin();
        let (dx, dy) = gt.pixel_size();
        println!("Origin:     ({x0}, {y0})");
        println!("Pixel size: ({dx}, {dy})");
    }

    for band in dataset.bands() {
        let band = band?;
        let raster = band.read_masked()?;
        let stats = raster.statistics();

        println!("Band {} [{}]", band.index(), band.dtype());
        match band.nodata() {
            Some(nodata) => println!("  nodata: {nodata}"),
            None => println!("  nodata: none"),
        }
        if let (Some(min), Some(max), Some(mean)) = (stats.min, stats.max, stats.mean) {
            println!("  min: {min}  max: {max}  mean: {mean:.3}");
        }
        println!(
            "  valid cells: {}  masked cells: {}",
            stats.valid_count, stats.nodata_count
        );
    }

    Ok(())
}

fn sample(input: &Path, x: f64, y: f64, band: Option<usize>) -> Result<()> {
    let dataset = open(input)?;
    let point: Geometry<f64> = Point::new(x, y).into();

    let indices: Vec<usize> = match band {
        Some(index) => vec![index],
        None => (0..dataset.band_count()).collect(),
    };

    for index in indices {
        let band = dataset.band(index)?;
        let samples = extract(&band, &point, PointStrategy::Nearest)?;
        for sample in samples {
            println!("band {index}: {} at ({}, {})", sample.value, sample.x, sample.y);
        }
    }

    Ok(())
}

fn profile(
    input: &Path,
    col: usize,
    row: usize,
    window: usize,
    bands: Option<&[usize]>,
) -> Result<()> {
    let dataset = open(input)?;
    let means = dataset
        .profile(col, row, bands, window)
        .context("profile failed")?;

    let indices: Vec<usize> = match bands {
        Some(selection) => selection.to_vec(),
        None => (0..dataset.band_count()).collect(),
    };

    for (index, mean) in indices.iter().zip(means) {
        println!("band {index}: {mean}");
    }

    Ok(())
}
