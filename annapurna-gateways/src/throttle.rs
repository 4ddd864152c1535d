use std::{
    thread,
    time::{Duration, Instant},
};

use annapurna_core::gateways::geocode::{GatewayError, GeoCodingGateway, GeocodeMatch};
use parking_lot::Mutex;

/// Enforces a minimum interval between two consecutive provider requests.
///
/// Requests that arrive too early block the calling thread.
#[derive(Debug)]
pub struct Throttled<G> {
    inner: G,
    min_interval: Duration,
    last_request: Mutex<Option<Instant>>,
}

impl<G> Throttled<G> {
    pub fn new(inner: G, min_interval: Duration) -> Self {
        Self {
            inner,
            min_interval,
            last_request: Mutex::new(None),
        }
    }

    fn wait_for_slot(&self) {
        let mut last_request = self.last_request.lock();
        if let Some(last) = *last_request {
            let elapsed = last.elapsed();
            if elapsed < self.min_interval {
                let delay = self.min_interval - elapsed;
                log::debug!("Delay geocoding request by {} ms", delay.as_millis());
                thread::sleep(delay);
            }
        }
        *last_request = Some(Instant::now());
    }
}

impl<G> GeoCodingGateway for Throttled<G>
where
    G: GeoCodingGateway,
{
    fn forward(
        &self,
        query: &str,
        country_bias: Option<&str>,
    ) -> Result<Vec<GeocodeMatch>, GatewayError> {
        if !self.min_interval.is_zero() {
            self.wait_for_slot();
        }
        self.inner.forward(query, country_bias)
    }
}
