use crate::entities::MapPoint;

/// Great-circle distance between two positions in kilometers,
/// rounded to 2 decimal places.
///
/// Invalid positions are treated as infinitely far away from
/// everything so that they never pass a radius filter.
pub fn distance_km(a: MapPoint, b: MapPoint) -> f64 {
    MapPoint::distance(a, b)
        .map(|d| round_to_cents(d.to_km()))
        .unwrap_or(f64::INFINITY)
}

fn round_to_cents(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}
