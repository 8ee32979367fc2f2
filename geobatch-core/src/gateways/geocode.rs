use crate::entities::Coordinates;
use thiserror::Error;

/// One match returned by a geocoding service for a query.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub location: Coordinates,
    pub formatted_address: Option<String>,
}

impl From<Coordinates> for Candidate {
    fn from(location: Coordinates) -> Self {
        Self {
            location,
            formatted_address: None,
        }
    }
}

#[derive(Debug, Error)]
pub enum GeocodingError {
    #[error("Request failed: {0}")]
    Request(String),
    #[error("Geocoding service responded with {status}: {message}")]
    Service { status: String, message: String },
    #[error("Unexpected response: {0}")]
    Response(String),
}

pub trait GeoCodingGateway {
    /// Resolve a free-text address.
    ///
    /// The candidates are returned in the order of the service;
    /// an empty list means that the address could not be found.
    fn geocode(&self, query: &str) -> Result<Vec<Candidate>, GeocodingError>;
}

impl<G> GeoCodingGateway for &G
where
    G: GeoCodingGateway + ?Sized,
{
    fn geocode(&self, query: &str) -> Result<Vec<Candidate>, GeocodingError> {
        (**self).geocode(query)
    }
}
