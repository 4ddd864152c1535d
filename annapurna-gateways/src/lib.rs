pub mod nominatim;
pub mod opencage;
pub mod throttle;
