//! Coordinate reference system handles

mod transformation;

pub use transformation::Transformation;

use crate::error::{Error, Result};
use gdal::spatial_ref::SpatialRef;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Coordinate reference system described by whichever of WKT, PROJ.4 and
/// EPSG are known.
///
/// A `Crs` is a plain value; all interpretation is delegated to GDAL's
/// spatial reference machinery via [`Crs::to_spatial_ref`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Crs {
    wkt: Option<String>,
    proj4: Option<String>,
    epsg: Option<u32>,
}

impl Crs {
    /// Create a CRS from an EPSG code
    pub fn from_epsg(code: u32) -> Self {
        Self {
            wkt: None,
            proj4: None,
            epsg: Some(code),
        }
    }

    /// Create a CRS from a WKT string
    pub fn from_wkt(wkt: impl Into<String>) -> Self {
        Self {
            wkt: Some(wkt.into()),
            proj4: None,
            epsg: None,
        }
    }

    /// Create a CRS from a PROJ.4 string
    pub fn from_proj4(proj4: impl Into<String>) -> Self {
        Self {
            wkt: None,
            proj4: Some(proj4.into()),
            epsg: None,
        }
    }

    /// WGS84 geographic CRS (EPSG:4326)
    pub fn wgs84() -> Self {
        Self::from_epsg(4326)
    }

    /// Capture every representation a GDAL spatial reference can export
    pub fn from_spatial_ref(srs: &SpatialRef) -> Result<Self> {
        let wkt = srs.to_wkt().ok().filter(|s| !s.is_empty());
        let proj4 = srs.to_proj4().ok().filter(|s| !s.is_empty());
        let epsg = srs.auth_code().ok().map(|code| code as u32);

        if wkt.is_none() && proj4.is_none() && epsg.is_none() {
            return Err(Error::MissingCrs);
        }

        Ok(Self { wkt, proj4, epsg })
    }

    /// Build a GDAL spatial reference from the strongest definition held
    pub fn to_spatial_ref(&self) -> Result<SpatialRef> {
        if let Some(code) = self.epsg {
            return Ok(SpatialRef::from_epsg(code)?);
        }
        if let Some(wkt) = &self.wkt {
            return Ok(SpatialRef::from_wkt(wkt)?);
        }
        if let Some(proj4) = &self.proj4 {
            return Ok(SpatialRef::from_proj4(proj4)?);
        }
        Err(Error::MissingCrs)
    }

    /// EPSG code, if known
    pub fn epsg(&self) -> Option<u32> {
        self.epsg
    }

    /// WKT definition, if known
    pub fn wkt(&self) -> Option<&str> {
        self.wkt.as_deref()
    }

    /// PROJ.4 definition, if known
    pub fn proj4(&self) -> Option<&str> {
        self.proj4.as_deref()
    }

    /// Compare two CRS by their strongest shared representation
    pub fn is_equivalent(&self, other: &Crs) -> bool {
        if let (Some(a), Some(b)) = (self.epsg, other.epsg) {
            return a == b;
        }
        if let (Some(a), Some(b)) = (&self.wkt, &other.wkt) {
            return a == b;
        }
        if let (Some(a), Some(b)) = (&self.proj4, &other.proj4) {
            return a == b;
        }
        false
    }

    /// Short identifier for display
    pub fn identifier(&self) -> String {
        if let Some(code) = self.epsg {
            return format!("EPSG:{code}");
        }
        if let Some(proj4) = &self.proj4 {
            return proj4.clone();
        }
        if let Some(wkt) = &self.wkt {
            let head: String = wkt.chars().take(50).collect();
            return format!("WKT:{head}");
        }
        "Unknown".to_string()
    }
}

impl fmt::Display for Crs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.identifier())
    }
}

impl Default for Crs {
    fn default() -> Self {
        Self::wgs84()
    }
}
