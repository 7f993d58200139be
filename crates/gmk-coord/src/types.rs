use serde::{Deserialize, Serialize};

/// A latitude/longitude pair in decimal degrees (WGS84).
///
/// The type itself does not enforce range validity; see
/// [`in_range`][GeoPoint::in_range] and
/// [`parse_wire_strict`][crate::parse_wire_strict] for callers that want
/// the check.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// `true` when either component is exactly `0.0`.
    ///
    /// Location providers in this system report `(0,0)` for "no fix
    /// yet", and a reading is only usable when both components are
    /// non-zero; boundaries use this to map such readings to an
    /// explicit absent value.
    pub fn has_zero_component(&self) -> bool {
        self.latitude == 0.0 || self.longitude == 0.0
    }

    /// `true` when both components are finite and within WGS84 bounds
    /// (latitude in [-90, 90], longitude in [-180, 180]).
    pub fn in_range(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }

    /// Encode as the `"lat,lon"` wire string.
    ///
    /// `f64` display is shortest-round-trip, so
    /// `parse_wire(&p.to_wire()) == p` holds for any finite point.
    pub fn to_wire(&self) -> String {
        format!("{},{}", self.latitude, self.longitude)
    }
}
