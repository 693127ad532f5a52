use serde::{Deserialize, Serialize};

/// Mean Earth radius in meters, as used by the haversine formula.
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// A WGS84 coordinate pair in decimal degrees.
///
/// The wire shape is `{"lat": .., "lon": ..}`, matching what the mobile
/// clients send.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// True when both components are finite numbers. Non-finite input makes
    /// `distance_meters` return NaN, so callers must check this before
    /// comparing a distance against a radius.
    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lon.is_finite()
    }
}

/// Great-circle distance between two coordinates in meters (haversine).
///
/// Pure and deterministic. NaN in either input propagates to the result.
pub fn distance_meters(a: Coordinate, b: Coordinate) -> f64 {
    let phi1 = a.lat.to_radians();
    let phi2 = b.lat.to_radians();
    let d_phi = (b.lat - a.lat).to_radians();
    let d_lambda = (b.lon - a.lon).to_radians();

    let h = (d_phi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);

    2.0 * EARTH_RADIUS_METERS * h.sqrt().atan2((1.0 - h).sqrt())
}
