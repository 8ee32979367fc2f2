use crate::ClientError;
use geobatch_core::{
    entities::Coordinates,
    gateways::geocode::{Candidate, GeoCodingGateway, GeocodingError},
};
use reqwest::blocking::Client;
use serde::Deserialize;
use std::fmt;

pub const DEFAULT_API_BASE_URL: &str = "https://maps.googleapis.com";

const GEOCODE_PATH: &str = "/maps/api/geocode/json";

// Google API keys always carry this prefix.
const API_KEY_PREFIX: &str = "AIza";

/// A geocoding gateway based on the Google Maps Geocoding API.
#[derive(Clone)]
pub struct GoogleMaps {
    api_key: String,
    api_base_url: String,
    client: Client,
}

impl fmt::Debug for GoogleMaps {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("GoogleMaps")
            .field("api_base_url", &self.api_base_url)
            .finish_non_exhaustive()
    }
}

impl GoogleMaps {
    pub fn new(api_key: String) -> Result<Self, ClientError> {
        Self::with_api_base_url(api_key, DEFAULT_API_BASE_URL.to_string())
    }

    pub fn with_api_base_url(api_key: String, api_base_url: String) -> Result<Self, ClientError> {
        if !api_key.starts_with(API_KEY_PREFIX) {
            return Err(ClientError::InvalidApiKey);
        }
        let client = Client::builder().build()?;
        Ok(Self {
            api_key,
            api_base_url,
            client,
        })
    }

    fn url(&self) -> String {
        format!("{}{GEOCODE_PATH}", self.api_base_url.trim_end_matches('/'))
    }
}

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    status: String,
    #[serde(default)]
    results: Vec<GeocodeResult>,
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    formatted_address: Option<String>,
    geometry: Geometry,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: LatLng,
}

#[derive(Debug, Deserialize)]
struct LatLng {
    lat: f64,
    lng: f64,
}

impl From<GeocodeResult> for Candidate {
    fn from(from: GeocodeResult) -> Self {
        let GeocodeResult {
            formatted_address,
            geometry: Geometry {
                location: LatLng { lat, lng },
            },
        } = from;
        Self {
            location: Coordinates::new(lat, lng),
            formatted_address,
        }
    }
}

// The URL contains the API key so it must not end up in any message.
fn request_error(err: reqwest::Error) -> GeocodingError {
    GeocodingError::Request(err.without_url().to_string())
}

impl GeoCodingGateway for GoogleMaps {
    fn geocode(&self, query: &str) -> Result<Vec<Candidate>, GeocodingError> {
        let response = self
            .client
            .get(self.url())
            .query(&[("address", query), ("key", self.api_key.as_str())])
            .send()
            .map_err(request_error)?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().unwrap_or_default();
            return Err(GeocodingError::Service {
                status: status.to_string(),
                message,
            });
        }

        let GeocodeResponse {
            status,
            results,
            error_message,
        } = response
            .json()
            .map_err(|err| GeocodingError::Response(err.without_url().to_string()))?;

        log::debug!(
            "Google Maps responded with {status} ({} results)",
            results.len()
        );
        match status.as_str() {
            "OK" => Ok(results.into_iter().map(Candidate::from).collect()),
            "ZERO_RESULTS" => Ok(vec![]),
            _ => Err(GeocodingError::Service {
                status,
                message: error_message.unwrap_or_default(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};
    use serde_json::json;

    const API_KEY: &str = "AIzaTestKey";

    fn gateway(server: &Server) -> GoogleMaps {
        GoogleMaps::with_api_base_url(API_KEY.into(), server.url()).unwrap()
    }

    fn mock_geocode(server: &mut Server, address: &str, body: serde_json::Value) -> mockito::Mock {
        server
            .mock("GET", GEOCODE_PATH)
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("address".into(), address.into()),
                Matcher::UrlEncoded("key".into(), API_KEY.into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body.to_string())
            .create()
    }

    #[test]
    fn reject_invalid_api_key() {
        let err = GoogleMaps::new("not-a-google-key".into()).unwrap_err();
        assert!(matches!(err, ClientError::InvalidApiKey));
    }

    #[test]
    fn debug_output_hides_api_key() {
        let gw = GoogleMaps::new(API_KEY.into()).unwrap();
        assert!(!format!("{gw:?}").contains(API_KEY));
    }

    #[test]
    fn geocode_address() {
        let mut server = Server::new();
        let mock = mock_geocode(
            &mut server,
            "Av. Paulista, 1000, São Paulo",
            json!({
                "status": "OK",
                "results": [
                    {
                        "formatted_address": "Av. Paulista, 1000 - Bela Vista, São Paulo - SP, Brasil",
                        "geometry": { "location": { "lat": -23.5, "lng": -46.6 } }
                    },
                    {
                        "formatted_address": "Av. Paulista, Recife - PE, Brasil",
                        "geometry": { "location": { "lat": -8.0, "lng": -34.9 } }
                    }
                ]
            }),
        );

        let candidates = gateway(&server)
            .geocode("Av. Paulista, 1000, São Paulo")
            .unwrap();

        mock.assert();
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].location, Coordinates::new(-23.5, -46.6));
        assert_eq!(
            candidates[0].formatted_address.as_deref(),
            Some("Av. Paulista, 1000 - Bela Vista, São Paulo - SP, Brasil")
        );
        assert_eq!(candidates[1].location, Coordinates::new(-8.0, -34.9));
    }

    #[test]
    fn zero_results() {
        let mut server = Server::new();
        let mock = mock_geocode(
            &mut server,
            "Atlantis",
            json!({ "status": "ZERO_RESULTS", "results": [] }),
        );
        let candidates = gateway(&server).geocode("Atlantis").unwrap();
        mock.assert();
        assert!(candidates.is_empty());
    }

    #[test]
    fn error_status() {
        let mut server = Server::new();
        let mock = mock_geocode(
            &mut server,
            "Rua X",
            json!({
                "status": "OVER_QUERY_LIMIT",
                "results": [],
                "error_message": "You have exceeded your daily request quota for this API."
            }),
        );
        let err = gateway(&server).geocode("Rua X").unwrap_err();
        mock.assert();
        match err {
            GeocodingError::Service { status, message } => {
                assert_eq!(status, "OVER_QUERY_LIMIT");
                assert!(message.contains("quota"));
            }
            _ => panic!("unexpected error: {err}"),
        }
    }

    #[test]
    fn http_error() {
        let mut server = Server::new();
        let mock = server
            .mock("GET", GEOCODE_PATH)
            .match_query(Matcher::Any)
            .with_status(500)
            .with_body("internal error")
            .create();
        let err = gateway(&server).geocode("Rua X").unwrap_err();
        mock.assert();
        assert!(matches!(err, GeocodingError::Service { ref status, .. } if status.starts_with("500")));
    }

    #[test]
    fn malformed_response() {
        let mut server = Server::new();
        let mock = server
            .mock("GET", GEOCODE_PATH)
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("<html></html>")
            .create();
        let err = gateway(&server).geocode("Rua X").unwrap_err();
        mock.assert();
        assert!(matches!(err, GeocodingError::Response(_)));
    }

    #[test]
    fn unreachable_service_does_not_leak_the_api_key() {
        let gw = GoogleMaps::with_api_base_url(API_KEY.into(), "http://127.0.0.1:1".into()).unwrap();
        let err = gw.geocode("Rua X").unwrap_err();
        assert!(matches!(err, GeocodingError::Request(_)));
        assert!(!err.to_string().contains(API_KEY));
    }
}
