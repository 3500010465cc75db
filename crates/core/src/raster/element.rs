//! Pixel value trait for generic band reads

use num_traits::{NumCast, Zero};
use std::fmt::Debug;

/// Trait for types that can live in a raster cell.
///
/// Covers the GDAL-native integer and floating point pixel types and the
/// no-data handling each of them needs: integers compare exactly against a
/// declared sentinel, floats additionally treat NaN as missing.
pub trait PixelValue:
    Copy + Clone + Debug + PartialOrd + PartialEq + NumCast + Zero + Send + Sync + 'static
{
    /// Sentinel used when no explicit no-data value is declared
    fn nodata_default() -> Self;

    /// Check whether this value counts as no-data
    fn is_nodata(&self, nodata: Option<Self>) -> bool;

    /// Whether this type is floating point
    fn is_float() -> bool;

    /// Lossy conversion to f64
    fn to_f64(self) -> Option<f64> {
        NumCast::from(self)
    }
}

macro_rules! impl_pixel_value_int {
    ($t:ty) => {
        impl PixelValue for $t {
            fn nodata_default() -> Self {
                <$t>::MIN
            }

            fn is_nodata(&self, nodata: Option<Self>) -> bool {
                match nodata {
                    Some(nd) => *self == nd,
                    None => false,
                }
            }

            fn is_float() -> bool {
                false
            }
        }
    };
}

macro_rules! impl_pixel_value_float {
    ($t:ty) => {
        impl PixelValue for $t {
            fn nodata_default() -> Self {
                <$t>::NAN
            }

            fn is_nodata(&self, nodata: Option<Self>) -> bool {
                if self.is_nan() {
                    return true;
                }
                match nodata {
                    Some(nd) => *self == nd,
                    None => false,
                }
            }

            fn is_float() -> bool {
                true
            }
        }
    };
}

impl_pixel_value_int!(i8);
impl_pixel_value_int!(i16);
impl_pixel_value_int!(i32);
impl_pixel_value_int!(i64);
impl_pixel_value_int!(u8);
impl_pixel_value_int!(u16);
impl_pixel_value_int!(u32);
impl_pixel_value_int!(u64);
impl_pixel_value_float!(f32);
impl_pixel_value_float!(f64);
