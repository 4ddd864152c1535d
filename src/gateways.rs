use crate::config::{Geocoding, GeocodingGateway};
use annapurna_core::gateways::geocode::GeoCodingGateway;
use annapurna_gateways::{nominatim::Nominatim, opencage::OpenCage, throttle::Throttled};
use anyhow::Result;

pub fn geocoding_gateway(cfg: &Geocoding) -> Result<Box<dyn GeoCodingGateway>> {
    let Geocoding {
        gateway,
        timeout,
        min_interval,
        ..
    } = cfg;
    let gw: Box<dyn GeoCodingGateway> = match gateway {
        GeocodingGateway::OpenCage { api_key } => {
            log::info!("Use OpenCage geocoding gateway");
            Box::new(Throttled::new(OpenCage::new(api_key.clone()), *min_interval))
        }
        GeocodingGateway::Nominatim {
            base_url,
            user_agent,
        } => {
            log::info!("Use Nominatim geocoding gateway ({base_url})");
            let nominatim = Nominatim::try_new(base_url, user_agent, *timeout)?;
            Box::new(Throttled::new(nominatim, *min_interval))
        }
    };
    Ok(gw)
}
