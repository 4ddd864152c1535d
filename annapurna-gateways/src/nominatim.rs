use std::time::Duration;

use annapurna_core::{
    entities::MapPoint,
    gateways::geocode::{GatewayError, GeoCodingGateway, GeocodeMatch},
};
use anyhow::anyhow;
use reqwest::blocking::Client;
use serde::Deserialize;

pub const DEFAULT_BASE_URL: &str = "https://nominatim.openstreetmap.org";

/// Geocoding with the search API of a Nominatim server.
///
/// The public OpenStreetMap instance requires an identifying
/// user agent and allows at most one request per second, so
/// wrap this gateway with [`crate::throttle::Throttled`].
#[derive(Debug, Clone)]
pub struct Nominatim {
    client: Client,
    search_url: String,
}

impl Nominatim {
    pub fn try_new(base_url: &str, user_agent: &str, timeout: Duration) -> anyhow::Result<Self> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()?;
        let search_url = format!("{}/search", base_url.trim_end_matches('/'));
        Ok(Self { client, search_url })
    }
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    lat: String,
    lon: String,
    display_name: Option<String>,
}

#[derive(Debug, Deserialize, thiserror::Error)]
#[error("{error}")]
struct JsonError {
    error: String,
}

impl TryFrom<SearchResult> for GeocodeMatch {
    type Error = GatewayError;

    fn try_from(from: SearchResult) -> Result<Self, Self::Error> {
        let SearchResult {
            lat,
            lon,
            display_name,
        } = from;
        let parse = |x: &str| {
            x.trim()
                .parse::<f64>()
                .map_err(|_| anyhow!("Invalid coordinate '{x}' in Nominatim response"))
        };
        let pos = MapPoint::parse_lat_lng_deg(parse(&lat)?, parse(&lon)?)?;
        Ok(GeocodeMatch {
            formatted_address: display_name,
            pos,
        })
    }
}

impl GeoCodingGateway for Nominatim {
    fn forward(
        &self,
        query: &str,
        country_bias: Option<&str>,
    ) -> Result<Vec<GeocodeMatch>, GatewayError> {
        let mut params = vec![("q", query), ("format", "jsonv2"), ("limit", "1")];
        if let Some(country_code) = country_bias {
            params.push(("countrycodes", country_code));
        }
        let response = self
            .client
            .get(&self.search_url)
            .query(&params)
            .send()
            .map_err(anyhow::Error::from)?;
        if !response.status().is_success() {
            let status = response.status();
            let err = match response.json::<JsonError>() {
                Ok(json_error) => anyhow!("{status}: {json_error}"),
                Err(_) => anyhow!("{status}"),
            };
            return Err(err.into());
        }
        let results: Vec<SearchResult> = response.json().map_err(anyhow::Error::from)?;
        log::debug!("Nominatim found {} matches for '{query}'", results.len());
        results.into_iter().map(TryFrom::try_from).collect()
    }
}
