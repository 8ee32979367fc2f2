use thiserror::Error;

pub mod google_maps;
pub mod opencage;

/// The client of a geocoding service could not be constructed.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Invalid API key provided")]
    InvalidApiKey,
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}
