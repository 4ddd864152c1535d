use itertools::Itertools;
use std::{cmp::Ordering, fmt, str::FromStr};
use thiserror::Error;

pub type RawCoord = i32;

// Assumption: 2-complement binary representation
const RAW_COORD_INVALID: RawCoord = i32::MIN;
const RAW_COORD_MAX: RawCoord = i32::MAX;
const RAW_COORD_MIN: RawCoord = -RAW_COORD_MAX;

const RAW_COORD_RANGE: f64 = RAW_COORD_MAX as f64 - RAW_COORD_MIN as f64;

/// Compact fixed-point integer representation of a geographical coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct GeoCoord(RawCoord);

impl GeoCoord {
    const INVALID: Self = Self(RAW_COORD_INVALID);

    fn is_valid(self) -> bool {
        self != Self::INVALID
    }

    // `deg_max` is the upper bound of a symmetric degree range
    fn to_deg(self, deg_max: f64) -> f64 {
        if self.is_valid() {
            f64::from(self.0) * (2.0 * deg_max / RAW_COORD_RANGE)
        } else {
            f64::NAN
        }
    }

    fn from_deg(deg: f64, deg_max: f64) -> Option<Self> {
        if !(-deg_max..=deg_max).contains(&deg) {
            return None;
        }
        let raw = f64::round(deg * (RAW_COORD_RANGE / (2.0 * deg_max))) as RawCoord;
        let res = Self(raw);
        debug_assert!(res.is_valid());
        Some(res)
    }
}

impl Default for GeoCoord {
    fn default() -> Self {
        Self::INVALID
    }
}

impl PartialOrd for GeoCoord {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self == other {
            Some(Ordering::Equal)
        } else if self.is_valid() && other.is_valid() {
            Some(self.0.cmp(&other.0))
        } else {
            None
        }
    }
}

/// Latitude in the range of [-90, 90] degrees.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, PartialOrd)]
pub struct LatCoord(GeoCoord);

impl LatCoord {
    const DEG_MAX: f64 = 90.0;

    pub fn is_valid(self) -> bool {
        self.0.is_valid()
    }

    pub fn to_deg(self) -> f64 {
        self.0.to_deg(Self::DEG_MAX)
    }

    pub fn to_rad(self) -> f64 {
        self.to_deg().to_radians()
    }

    pub fn try_from_deg<T: Into<f64>>(deg: T) -> Option<Self> {
        GeoCoord::from_deg(deg.into(), Self::DEG_MAX).map(Self)
    }
}

impl fmt::Display for LatCoord {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.to_deg())
    }
}

/// Longitude in the range of [-180, 180] degrees.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, PartialOrd)]
pub struct LngCoord(GeoCoord);

impl LngCoord {
    const DEG_MAX: f64 = 180.0;

    pub fn is_valid(self) -> bool {
        self.0.is_valid()
    }

    pub fn to_deg(self) -> f64 {
        self.0.to_deg(Self::DEG_MAX)
    }

    pub fn to_rad(self) -> f64 {
        self.to_deg().to_radians()
    }

    pub fn try_from_deg<T: Into<f64>>(deg: T) -> Option<Self> {
        GeoCoord::from_deg(deg.into(), Self::DEG_MAX).map(Self)
    }
}

impl fmt::Display for LngCoord {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.to_deg())
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum MapPointParseError {
    #[error("Invalid latitude degrees: {0}")]
    LatitudeRange(f64),
    #[error("Invalid longitude degrees: {0}")]
    LongitudeRange(f64),
    #[error("Invalid number '{0}'")]
    Number(String),
    #[error("Expected 'lat,lng' but got '{0}'")]
    Format(String),
}

/// A position on the earth's surface (WGS-84).
///
/// Once created the position never changes. Positions that are
/// produced by a geocoding provider are always valid, an invalid
/// position only results from [`MapPoint::default`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MapPoint {
    lat: LatCoord,
    lng: LngCoord,
}

impl MapPoint {
    pub const fn new(lat: LatCoord, lng: LngCoord) -> Self {
        Self { lat, lng }
    }

    pub const fn lat(self) -> LatCoord {
        self.lat
    }

    pub const fn lng(self) -> LngCoord {
        self.lng
    }

    pub fn is_valid(self) -> bool {
        self.lat.is_valid() && self.lng.is_valid()
    }

    pub fn to_lat_lng_rad(self) -> (f64, f64) {
        (self.lat.to_rad(), self.lng.to_rad())
    }

    pub fn to_lat_lng_deg(self) -> (f64, f64) {
        (self.lat.to_deg(), self.lng.to_deg())
    }

    /// Panics (in debug builds) if the degrees are out of range.
    pub fn from_lat_lng_deg<LAT: Into<f64>, LNG: Into<f64>>(lat: LAT, lng: LNG) -> Self {
        let res = Self::try_from_lat_lng_deg(lat, lng);
        debug_assert!(res.is_some());
        res.unwrap_or_default()
    }

    pub fn try_from_lat_lng_deg<LAT: Into<f64>, LNG: Into<f64>>(
        lat: LAT,
        lng: LNG,
    ) -> Option<Self> {
        match (LatCoord::try_from_deg(lat), LngCoord::try_from_deg(lng)) {
            (Some(lat), Some(lng)) => Some(Self::new(lat, lng)),
            _ => None,
        }
    }

    pub fn parse_lat_lng_deg(lat_deg: f64, lng_deg: f64) -> Result<Self, MapPointParseError> {
        let lat =
            LatCoord::try_from_deg(lat_deg).ok_or(MapPointParseError::LatitudeRange(lat_deg))?;
        let lng =
            LngCoord::try_from_deg(lng_deg).ok_or(MapPointParseError::LongitudeRange(lng_deg))?;
        Ok(Self::new(lat, lng))
    }
}

impl fmt::Display for MapPoint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{},{}", self.lat, self.lng)
    }
}

impl FromStr for MapPoint {
    type Err = MapPointParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some((lat, lng)) = s.split(',').map(str::trim).collect_tuple() else {
            return Err(MapPointParseError::Format(s.to_owned()));
        };
        let parse = |x: &str| {
            x.parse::<f64>()
                .map_err(|_| MapPointParseError::Number(x.to_owned()))
        };
        Self::parse_lat_lng_deg(parse(lat)?, parse(lng)?)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
pub struct Distance(f64);

impl Distance {
    pub const fn infinite() -> Self {
        Self(f64::INFINITY)
    }

    pub const fn from_meters(meters: f64) -> Self {
        Self(meters)
    }

    pub fn from_km(km: f64) -> Self {
        Self(km * 1_000.0)
    }

    pub const fn to_meters(self) -> f64 {
        self.0
    }

    pub fn to_km(self) -> f64 {
        self.0 / 1_000.0
    }

    pub fn is_valid(self) -> bool {
        self.0 >= 0.0
    }
}

const MEAN_EARTH_RADIUS: Distance = Distance::from_meters(6_371_200.0);

impl MapPoint {
    /// Calculate the great-circle distance on the surface
    /// of the earth using a special case of the Vincenty
    /// formula for numerical accuracy.
    /// Reference: https://en.wikipedia.org/wiki/Great-circle_distance
    pub fn distance(p1: MapPoint, p2: MapPoint) -> Option<Distance> {
        if !p1.is_valid() || !p2.is_valid() {
            return None;
        }

        let (lat1_rad, lng1_rad) = p1.to_lat_lng_rad();
        let (lat2_rad, lng2_rad) = p2.to_lat_lng_rad();

        let (lat1_sin, lat1_cos) = (lat1_rad.sin(), lat1_rad.cos());
        let (lat2_sin, lat2_cos) = (lat2_rad.sin(), lat2_rad.cos());

        let dlng = (lng1_rad - lng2_rad).abs();
        let (dlng_sin, dlng_cos) = (dlng.sin(), dlng.cos());

        let nom1 = lat2_cos * dlng_sin;
        let nom2 = lat1_cos * lat2_sin - lat1_sin * lat2_cos * dlng_cos;

        let nom = (nom1 * nom1 + nom2 * nom2).sqrt();
        let denom = lat1_sin * lat2_sin + lat1_cos * lat2_cos * dlng_cos;

        Some(Distance::from_meters(
            MEAN_EARTH_RADIUS.to_meters() * nom.atan2(denom),
        ))
    }
}
