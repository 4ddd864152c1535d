//! Resolution of free-text addresses into map positions.
//!
//! The [`Geocoder`] asks the configured provider at most twice per
//! address: first with the address as it is and, if nothing was found,
//! once more with a country qualifier appended. Provider failures are
//! logged and reported as [`Resolution::NotFound`], they never abort
//! the caller.

use crate::{
    entities::*,
    gateways::geocode::{GeoCodingGateway, GeocodeMatch},
};

mod cache;

pub use self::cache::GeocodeCache;

/// Restricts the provider to a country and describes
/// how to qualify addresses that lack a country.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionBias {
    /// ISO 3166-1 alpha-2 code, e.g. `in`
    pub country_code: String,
    /// Appended to addresses without a country marker, e.g. `India`
    pub country_qualifier: String,
    /// Lower-case words that indicate the country is already mentioned
    pub country_markers: Vec<String>,
}

impl Default for RegionBias {
    fn default() -> Self {
        Self {
            country_code: "in".into(),
            country_qualifier: "India".into(),
            country_markers: vec!["india".into(), "bharat".into()],
        }
    }
}

impl RegionBias {
    fn country_code(&self) -> Option<&str> {
        let code = self.country_code.trim();
        (!code.is_empty()).then_some(code)
    }

    fn qualify(&self, address: &Address) -> Option<String> {
        let qualifier = self.country_qualifier.trim();
        if qualifier.is_empty() || address.contains_any(&self.country_markers) {
            return None;
        }
        Some(format!("{}, {qualifier}", address.trimmed()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Found(MapPoint),
    NotFound,
}

impl Resolution {
    pub fn found(self) -> Option<MapPoint> {
        match self {
            Self::Found(pos) => Some(pos),
            Self::NotFound => None,
        }
    }
}

/// A geocoding session.
///
/// Owns the cache of all addresses that have been resolved
/// successfully during its lifetime. Create one per user session
/// and drop it (or take the cache with [`Geocoder::into_cache`])
/// when the session ends.
#[derive(Debug)]
pub struct Geocoder<G> {
    gateway: G,
    bias: RegionBias,
    cache: GeocodeCache,
    provider_calls: usize,
}

impl<G> Geocoder<G>
where
    G: GeoCodingGateway,
{
    pub fn new(gateway: G, bias: RegionBias) -> Self {
        Self::with_cache(gateway, bias, GeocodeCache::new())
    }

    pub fn with_cache(gateway: G, bias: RegionBias, cache: GeocodeCache) -> Self {
        Self {
            gateway,
            bias,
            cache,
            provider_calls: 0,
        }
    }

    pub fn resolve(&mut self, address: &str) -> Resolution {
        let addr = Address::from(address);
        if addr.is_empty() {
            return Resolution::NotFound;
        }
        if let Some(pos) = self.cache.get(address) {
            log::debug!("Use cached position of '{address}': {pos}");
            return Resolution::Found(pos);
        }
        let mut pos = self.query(addr.trimmed());
        if pos.is_none() {
            if let Some(qualified) = self.bias.qualify(&addr) {
                pos = self.query(&qualified);
            }
        }
        match pos {
            Some(pos) => {
                self.cache.insert(address, pos);
                Resolution::Found(pos)
            }
            None => {
                log::info!("Unable to resolve the position of '{address}'");
                Resolution::NotFound
            }
        }
    }

    /// Number of requests that have been sent to the provider.
    pub fn provider_calls(&self) -> usize {
        self.provider_calls
    }

    pub fn cache(&self) -> &GeocodeCache {
        &self.cache
    }

    pub fn into_cache(self) -> GeocodeCache {
        self.cache
    }

    fn query(&mut self, query: &str) -> Option<MapPoint> {
        self.provider_calls += 1;
        match self.gateway.forward(query, self.bias.country_code()) {
            Ok(matches) => {
                let GeocodeMatch {
                    formatted_address,
                    pos,
                } = matches.into_iter().next()?;
                log::debug!(
                    "Resolved '{query}' ({}): {pos}",
                    formatted_address.as_deref().unwrap_or("-")
                );
                Some(pos)
            }
            Err(err) => {
                log::warn!("Failed to resolve '{query}': {err}");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::MockGeoCodingGateway;

    fn adhartal() -> MapPoint {
        MapPoint::from_lat_lng_deg(23.1981, 79.9542)
    }

    fn geocoder(gw: &MockGeoCodingGateway) -> Geocoder<&MockGeoCodingGateway> {
        Geocoder::new(gw, RegionBias::default())
    }

    #[test]
    fn empty_address_is_never_sent_to_the_provider() {
        let gw = MockGeoCodingGateway::default();
        let mut geocoder = geocoder(&gw);
        assert_eq!(Resolution::NotFound, geocoder.resolve(""));
        assert_eq!(Resolution::NotFound, geocoder.resolve("  \t "));
        assert_eq!(0, gw.calls().len());
        assert_eq!(0, geocoder.provider_calls());
    }

    #[test]
    fn resolve_on_first_attempt() {
        let gw = MockGeoCodingGateway::default().with("Adhartal", adhartal());
        let mut geocoder = geocoder(&gw);
        assert_eq!(Resolution::Found(adhartal()), geocoder.resolve("Adhartal"));
        assert_eq!(vec!["Adhartal".to_string()], gw.calls());
        assert_eq!(vec![Some("in".to_string())], gw.country_biases());
    }

    #[test]
    fn second_resolution_is_served_from_cache() {
        let gw = MockGeoCodingGateway::default().with("Adhartal", adhartal());
        let mut geocoder = geocoder(&gw);
        let first = geocoder.resolve("Adhartal");
        let second = geocoder.resolve("Adhartal");
        assert_eq!(first, second);
        assert_eq!(1, gw.calls().len());
        assert_eq!(1, geocoder.provider_calls());
    }

    #[test]
    fn address_is_trimmed_but_cached_as_given() {
        let gw = MockGeoCodingGateway::default().with("Adhartal", adhartal());
        let mut geocoder = geocoder(&gw);
        assert_eq!(Resolution::Found(adhartal()), geocoder.resolve(" Adhartal "));
        assert_eq!(Some(adhartal()), geocoder.cache().get(" Adhartal "));
        assert_eq!(None, geocoder.cache().get("Adhartal"));
    }

    #[test]
    fn retry_with_country_qualifier() {
        let gw = MockGeoCodingGateway::default().with("Gorakhpur Market, India", adhartal());
        let mut geocoder = geocoder(&gw);
        assert_eq!(
            Resolution::Found(adhartal()),
            geocoder.resolve("Gorakhpur Market")
        );
        assert_eq!(
            vec![
                "Gorakhpur Market".to_string(),
                "Gorakhpur Market, India".to_string()
            ],
            gw.calls()
        );
        let cache = geocoder.into_cache();
        assert_eq!(Some(adhartal()), cache.get("Gorakhpur Market"));
        assert_eq!(None, cache.get("Gorakhpur Market, India"));
    }

    #[test]
    fn no_retry_if_country_is_already_mentioned() {
        let gw = MockGeoCodingGateway::default();
        let mut geocoder = geocoder(&gw);
        assert_eq!(Resolution::NotFound, geocoder.resolve("Nowhere, Bharat"));
        assert_eq!(Resolution::NotFound, geocoder.resolve("Nowhere, INDIA"));
        assert_eq!(2, gw.calls().len());
    }

    #[test]
    fn unresolvable_address_is_not_cached() {
        let gw = MockGeoCodingGateway::default();
        let mut geocoder = geocoder(&gw);
        assert_eq!(Resolution::NotFound, geocoder.resolve("XyzNowhereTown123"));
        assert_eq!(
            vec![
                "XyzNowhereTown123".to_string(),
                "XyzNowhereTown123, India".to_string()
            ],
            gw.calls()
        );
        assert!(geocoder.cache().is_empty());
        assert_eq!(Resolution::NotFound, geocoder.resolve("XyzNowhereTown123"));
        assert_eq!(4, geocoder.provider_calls());
    }

    #[test]
    fn provider_errors_are_swallowed() {
        let gw = MockGeoCodingGateway::default()
            .with("Ranjhi, India", adhartal())
            .failing("Ranjhi");
        let mut fallback = geocoder(&gw);
        assert_eq!(Resolution::Found(adhartal()), fallback.resolve("Ranjhi"));

        let gw = MockGeoCodingGateway::default()
            .failing("Ranjhi")
            .failing("Ranjhi, India");
        let mut failing = geocoder(&gw);
        assert_eq!(Resolution::NotFound, failing.resolve("Ranjhi"));
        assert_eq!(2, failing.provider_calls());
    }

    #[test]
    fn only_the_first_match_is_used() {
        let other = MapPoint::from_lat_lng_deg(28.6139, 77.2090);
        let gw = MockGeoCodingGateway::default()
            .with("Sadar", adhartal())
            .with("Sadar", other);
        let mut geocoder = geocoder(&gw);
        assert_eq!(Resolution::Found(adhartal()), geocoder.resolve("Sadar"));
    }

    #[test]
    fn empty_country_bias_and_qualifier() {
        let gw = MockGeoCodingGateway::default();
        let bias = RegionBias {
            country_code: "".into(),
            country_qualifier: " ".into(),
            country_markers: vec![],
        };
        let mut geocoder = Geocoder::new(&gw, bias);
        assert_eq!(Resolution::NotFound, geocoder.resolve("Sadar"));
        assert_eq!(vec!["Sadar".to_string()], gw.calls());
        assert_eq!(vec![None], gw.country_biases());
    }

    #[test]
    fn reuse_cache_of_previous_session() {
        let gw = MockGeoCodingGateway::default().with("Adhartal", adhartal());
        let mut geocoder = geocoder(&gw);
        geocoder.resolve("Adhartal");
        let cache = geocoder.into_cache();

        let gw = MockGeoCodingGateway::default();
        let mut geocoder = Geocoder::with_cache(&gw, RegionBias::default(), cache);
        assert_eq!(Resolution::Found(adhartal()), geocoder.resolve("Adhartal"));
        assert!(gw.calls().is_empty());
    }
}
