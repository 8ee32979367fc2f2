use crate::config::{Geocoding, GeocodingGateway};
use geobatch_core::gateways::geocode::{Candidate, GeoCodingGateway, GeocodingError};
use geobatch_gateways::{google_maps::GoogleMaps, opencage::OpenCage, ClientError};
use std::env;

/// Create the geocoding client once at startup.
///
/// Returns `None` if no gateway is configured, the API key is not
/// available or the client could not be constructed.
pub fn geocoding_gateway(cfg: &Geocoding) -> Option<GeocodingGw> {
    let Some(gw_cfg) = &cfg.gateway else {
        log::warn!("No geocoding gateway configured");
        return None;
    };
    let api_key = env::var(gw_cfg.api_key_env())
        .ok()
        .filter(|key| !key.is_empty());
    init_geocoding_gateway(gw_cfg, api_key)
}

pub fn init_geocoding_gateway(
    cfg: &GeocodingGateway,
    api_key: Option<String>,
) -> Option<GeocodingGw> {
    let Some(api_key) = api_key else {
        log::warn!(
            "The environment variable {} is not set: addresses will not be geocoded",
            cfg.api_key_env()
        );
        return None;
    };
    let gw: Result<GeocodingGw, ClientError> = match cfg {
        GeocodingGateway::GoogleMaps { api_base_url, .. } => {
            GoogleMaps::with_api_base_url(api_key, api_base_url.clone()).map(GeocodingGw::new)
        }
        GeocodingGateway::OpenCage { .. } => OpenCage::new(api_key).map(GeocodingGw::new),
    };
    match gw {
        Ok(gw) => {
            log::info!("Use {} geocoding gateway", cfg.name());
            Some(gw)
        }
        Err(err) => {
            log::error!("Could not initialize the {} client: {err}", cfg.name());
            None
        }
    }
}

pub struct GeocodingGw(Box<dyn GeoCodingGateway + 'static>);

impl GeocodingGw {
    pub fn new<G>(gw: G) -> Self
    where
        G: GeoCodingGateway + 'static,
    {
        Self(Box::new(gw))
    }
}

impl GeoCodingGateway for GeocodingGw {
    fn geocode(&self, query: &str) -> Result<Vec<Candidate>, GeocodingError> {
        self.0.geocode(query)
    }
}
