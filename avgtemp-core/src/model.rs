use std::ops::RangeInclusive;

/// Accepted range for both latitude and longitude, enforced by the
/// caller-side boundary (CLI, HTTP front end). The core forwards
/// whatever it is given.
pub const COORDINATE_RANGE: RangeInclusive<f64> = -180.0..=180.0;

/// Geographic point forwarded to every provider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}
