use annapurna_core::{
    entities::MapPoint,
    gateways::geocode::{GatewayError, GeoCodingGateway, GeocodeMatch},
};
use geocoding::{Forward, Opencage, Point};

/// Geocoding with the OpenCage API (https://opencagedata.com).
#[derive(Debug, Clone)]
pub struct OpenCage {
    api_key: Option<String>,
}

impl OpenCage {
    pub fn new(api_key: Option<String>) -> Self {
        if api_key.is_none() {
            log::warn!("No OpenCage API key found");
        }
        Self { api_key }
    }
}

fn to_geocode_match(point: &Point<f64>) -> Result<GeocodeMatch, GatewayError> {
    // x = longitude, y = latitude
    let pos = MapPoint::parse_lat_lng_deg(point.y(), point.x())?;
    Ok(GeocodeMatch {
        formatted_address: None,
        pos,
    })
}

impl GeoCodingGateway for OpenCage {
    fn forward(
        &self,
        query: &str,
        country_bias: Option<&str>,
    ) -> Result<Vec<GeocodeMatch>, GatewayError> {
        let Some(api_key) = &self.api_key else {
            return Err(GatewayError::NotConfigured);
        };
        let mut oc_req = Opencage::new(api_key.clone());
        oc_req.parameters.countrycode = country_bias;
        let points: Vec<Point<f64>> = oc_req
            .forward(query)
            .map_err(|err| GatewayError::Other(err.into()))?;
        log::debug!("OpenCage found {} matches for '{query}'", points.len());
        points.iter().map(to_geocode_match).collect()
    }
}
