use crate::ClientError;
use ::geocoding::{Forward, Opencage as OpencageClient, Point};
use geobatch_core::{
    entities::Coordinates,
    gateways::geocode::{Candidate, GeoCodingGateway, GeocodingError},
};
use std::fmt;

/// A geocoding gateway based on opencagedata.com.
pub struct OpenCage {
    api_key: String,
    client: OpencageClient<'static>,
}

impl fmt::Debug for OpenCage {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("OpenCage").finish_non_exhaustive()
    }
}

impl OpenCage {
    pub fn new(api_key: String) -> Result<Self, ClientError> {
        if api_key.trim().is_empty() {
            return Err(ClientError::InvalidApiKey);
        }
        let client = OpencageClient::new(api_key.clone());
        Ok(Self { api_key, client })
    }

    fn hide_api_key(&self, msg: &str) -> String {
        msg.replace(&self.api_key, "***")
    }
}

impl GeoCodingGateway for OpenCage {
    fn geocode(&self, query: &str) -> Result<Vec<Candidate>, GeocodingError> {
        let points: Vec<Point<f64>> = self
            .client
            .forward(query)
            .map_err(|err| GeocodingError::Request(self.hide_api_key(&err.to_string())))?;
        Ok(points
            .into_iter()
            .map(|p| point_to_coordinates(p).into())
            .collect())
    }
}

// Points are stored as (x = longitude, y = latitude)
fn point_to_coordinates(p: Point<f64>) -> Coordinates {
    Coordinates::new(p.y(), p.x())
}
