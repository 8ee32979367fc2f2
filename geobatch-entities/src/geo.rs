use std::fmt;

/// A geographic position in decimal degrees (WGS 84).
///
/// Latitude and longitude always travel together: an unresolved
/// position is modelled as `Option<Coordinates>`, never as a half-filled pair.
#[rustfmt::skip]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub lat : f64,
    pub lng : f64,
}

impl Coordinates {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl From<(f64, f64)> for Coordinates {
    fn from((lat, lng): (f64, f64)) -> Self {
        Self::new(lat, lng)
    }
}

impl From<Coordinates> for (f64, f64) {
    fn from(from: Coordinates) -> Self {
        (from.lat, from.lng)
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{},{}", self.lat, self.lng)
    }
}
