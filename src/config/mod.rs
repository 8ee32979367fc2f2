use anyhow::{anyhow, Result};
use std::{fs, io::ErrorKind, path::Path};

mod raw;

pub use raw::GeocodingGateway as GeocodingGatewayKind;

const DEFAULT_CONFIG_FILE_NAME: &str = "geobatch.toml";

pub struct Config {
    pub geocoding: Geocoding,
    pub table: Table,
}

/// Values given on the command line that take precedence over the file.
#[derive(Debug, Default)]
pub struct Overrides {
    pub gateway: Option<GeocodingGatewayKind>,
    pub address_column: Option<String>,
    pub delimiter: Option<String>,
}

impl Config {
    pub fn try_load_from_file_or_default<P: AsRef<Path>>(
        file_path: Option<P>,
        overrides: Overrides,
    ) -> Result<Self> {
        let raw_config = match file_path {
            Some(file_path) => {
                let file_path = file_path.as_ref();
                let cfg_string = fs::read_to_string(file_path).map_err(|err| {
                    anyhow!("Unable to read configuration {}: {err}", file_path.display())
                })?;
                toml::from_str(&cfg_string)?
            }
            None => match fs::read_to_string(DEFAULT_CONFIG_FILE_NAME) {
                Ok(cfg_string) => {
                    log::info!("Load configuration from {DEFAULT_CONFIG_FILE_NAME}");
                    toml::from_str(&cfg_string)?
                }
                Err(err) if err.kind() == ErrorKind::NotFound => {
                    log::debug!(
                        "{DEFAULT_CONFIG_FILE_NAME} not found => load default configuration."
                    );
                    raw::Config::default()
                }
                Err(err) => return Err(err.into()),
            },
        };
        Self::try_from((raw_config, overrides))
    }
}

pub struct Geocoding {
    pub gateway: Option<GeocodingGateway>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeocodingGateway {
    GoogleMaps {
        api_key_env: String,
        api_base_url: String,
    },
    OpenCage {
        api_key_env: String,
    },
}

impl GeocodingGateway {
    pub fn name(&self) -> &'static str {
        match self {
            Self::GoogleMaps { .. } => "Google Maps",
            Self::OpenCage { .. } => "OpenCage",
        }
    }

    /// Name of the environment variable that holds the API key.
    pub fn api_key_env(&self) -> &str {
        match self {
            Self::GoogleMaps { api_key_env, .. } | Self::OpenCage { api_key_env } => api_key_env,
        }
    }
}

pub struct Table {
    pub address_column: String,
    pub delimiter: u8,
}

fn parse_delimiter(s: &str) -> Result<u8> {
    match s.as_bytes() {
        [d] if d.is_ascii() => Ok(*d),
        _ => Err(anyhow!(
            "Invalid delimiter '{s}': expected a single ASCII character"
        )),
    }
}

fn check_api_key_env(name: String) -> Result<String> {
    if name.trim().is_empty() {
        return Err(anyhow!("Missing name of the API key environment variable"));
    }
    Ok(name)
}

impl TryFrom<(raw::Config, Overrides)> for Config {
    type Error = anyhow::Error;
    fn try_from((from, overrides): (raw::Config, Overrides)) -> Result<Self> {
        let raw::Config {
            geocoding,
            gateway,
            table,
        } = from;
        let Overrides {
            gateway: gateway_override,
            address_column,
            delimiter,
        } = overrides;

        let gateway_name = gateway_override.or(geocoding.unwrap_or_default().gateway);

        let geo_gateway = match gateway_name {
            Some(gw_name) => {
                let toml_name = gw_name.toml_name();
                let gateway = gateway.unwrap_or_default();
                let gw = match gw_name {
                    raw::GeocodingGateway::GoogleMaps => {
                        let raw::GoogleMaps {
                            api_key_env,
                            api_base_url,
                        } = gateway.google_maps.ok_or_else(|| {
                            anyhow!("Missing '{toml_name}' gateway configuration")
                        })?;
                        let api_base_url = api_base_url.unwrap_or_else(|| {
                            geobatch_gateways::google_maps::DEFAULT_API_BASE_URL.to_string()
                        });
                        GeocodingGateway::GoogleMaps {
                            api_key_env: check_api_key_env(api_key_env)?,
                            api_base_url,
                        }
                    }
                    raw::GeocodingGateway::Opencage => {
                        let raw::OpenCage { api_key_env } =
                            gateway.opencage.ok_or_else(|| {
                                anyhow!("Missing '{toml_name}' gateway configuration")
                            })?;
                        GeocodingGateway::OpenCage {
                            api_key_env: check_api_key_env(api_key_env)?,
                        }
                    }
                };
                Some(gw)
            }
            None => None,
        };
        let geocoding = Geocoding {
            gateway: geo_gateway,
        };

        let raw::Table {
            address_column: raw_address_column,
            delimiter: raw_delimiter,
        } = table.unwrap_or_default();

        let address_column = address_column.unwrap_or(raw_address_column);
        if address_column.is_empty() {
            return Err(anyhow!("The address column name must not be empty"));
        }
        let delimiter = parse_delimiter(&delimiter.unwrap_or(raw_delimiter))?;

        let table = Table {
            address_column,
            delimiter,
        };

        Ok(Self { geocoding, table })
    }
}
