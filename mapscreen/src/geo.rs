//! Geographic points of the screen configuration.

use galileo_types::geo::{GeoPoint, NewGeoPoint};
use serde::{Deserialize, Serialize};

/// 2d point on the surface of the Earth, in degrees.
///
/// Unlike the map engine point, it can be created in constant context, so fixed places can be
/// declared as constants.
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd, Deserialize, Serialize)]
pub struct GeoPoint2d {
    lat: f64,
    lon: f64,
}

impl GeoPoint2d {
    /// Creates a point from latitude and longitude in degrees.
    pub const fn latlon(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Latitude in degrees.
    pub fn lat(&self) -> f64 {
        self.lat
    }

    /// Longitude in degrees.
    pub fn lon(&self) -> f64 {
        self.lon
    }
}

impl From<GeoPoint2d> for galileo_types::geo::impls::GeoPoint2d {
    fn from(value: GeoPoint2d) -> Self {
        NewGeoPoint::latlon(value.lat, value.lon)
    }
}

impl From<galileo_types::geo::impls::GeoPoint2d> for GeoPoint2d {
    fn from(value: galileo_types::geo::impls::GeoPoint2d) -> Self {
        Self::latlon(value.lat(), value.lon())
    }
}

/// Creates a new [`GeoPoint2d`] from latitude and longitude values (in degrees).
///
/// ```
/// use mapscreen::latlon;
///
/// let point = latlon!(-33.4493141, -70.6624069);
/// assert_eq!(point.lat(), -33.4493141);
/// ```
#[macro_export]
macro_rules! latlon {
    ($lat:expr, $lon:expr) => {
        $crate::geo::GeoPoint2d::latlon($lat, $lon)
    };
}
