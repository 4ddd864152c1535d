use crate::entities::{MapPoint, MapPointParseError};
use thiserror::Error;

/// A single candidate returned by a geocoding provider.
#[derive(Debug, Clone, PartialEq)]
pub struct GeocodeMatch {
    pub formatted_address: Option<String>,
    pub pos: MapPoint,
}

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("The geocoding gateway has not been configured")]
    NotConfigured,
    #[error("Invalid position in provider response: {0}")]
    Position(#[from] MapPointParseError),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub trait GeoCodingGateway {
    /// Forward geocoding of a free-text query.
    ///
    /// The matches are ranked by the provider, most relevant first.
    /// An empty result is not an error.
    fn forward(
        &self,
        query: &str,
        country_bias: Option<&str>,
    ) -> Result<Vec<GeocodeMatch>, GatewayError>;
}

impl<G> GeoCodingGateway for Box<G>
where
    G: GeoCodingGateway + ?Sized,
{
    fn forward(
        &self,
        query: &str,
        country_bias: Option<&str>,
    ) -> Result<Vec<GeocodeMatch>, GatewayError> {
        (**self).forward(query, country_bias)
    }
}

impl<G> GeoCodingGateway for &G
where
    G: GeoCodingGateway + ?Sized,
{
    fn forward(
        &self,
        query: &str,
        country_bias: Option<&str>,
    ) -> Result<Vec<GeocodeMatch>, GatewayError> {
        (**self).forward(query, country_bias)
    }
}
