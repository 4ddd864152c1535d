use annapurna_core::geocoding::RegionBias;
use anyhow::{anyhow, Result};
use std::{env, fs, io::ErrorKind, path::Path, path::PathBuf, time::Duration};

mod raw;

const DEFAULT_CONFIG_FILE_NAME: &str = "annapurna.toml";

const ENV_NAME_NGO_STORE: &str = "ANNAPURNA_NGO_STORE";
const ENV_NAME_OPENCAGE_API_KEY: &str = "OPENCAGE_API_KEY";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

// https://operations.osmfoundation.org/policies/nominatim/
const NOMINATIM_MIN_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Debug)]
pub struct Config {
    pub db: Db,
    pub geocoding: Geocoding,
    pub matching: Matching,
}

impl Config {
    pub fn try_load_from_file_or_default<P: AsRef<Path>>(file_path: Option<P>) -> Result<Self> {
        let file_path: &Path = file_path.as_ref().map(|p| p.as_ref()).unwrap_or_else(|| {
            log::debug!("No configuration file specified. load {DEFAULT_CONFIG_FILE_NAME}");
            Path::new(DEFAULT_CONFIG_FILE_NAME)
        });

        let raw_config = match fs::read_to_string(file_path) {
            Ok(cfg_string) => toml::from_str(&cfg_string)?,
            Err(err) => match err.kind() {
                ErrorKind::NotFound => {
                    log::info!(
                        "{} not found => load default configuration.",
                        file_path.display()
                    );
                    Ok(raw::Config::default())
                }
                _ => Err(err),
            }?,
        };
        let mut cfg = Self::try_from(raw_config)?;
        if let Ok(ngo_store) = env::var(ENV_NAME_NGO_STORE) {
            cfg.db.ngo_store = ngo_store.into();
        }
        if let Ok(api_key) = env::var(ENV_NAME_OPENCAGE_API_KEY) {
            if let GeocodingGateway::OpenCage { api_key: key } = &mut cfg.geocoding.gateway {
                *key = Some(api_key);
            }
        }
        Ok(cfg)
    }
}

#[derive(Debug)]
pub struct Db {
    /// JSON file with all registered NGOs
    pub ngo_store: PathBuf,
}

#[derive(Debug)]
pub struct Geocoding {
    pub gateway: GeocodingGateway,
    pub region: RegionBias,
    pub timeout: Duration,
    pub min_interval: Duration,
}

#[derive(Debug, Clone)]
pub enum GeocodingGateway {
    OpenCage { api_key: Option<String> },
    Nominatim { base_url: String, user_agent: String },
}

#[derive(Debug)]
pub struct Matching {
    pub default_radius_km: f64,
    pub max_radius_km: f64,
}

impl Matching {
    pub fn check_radius(&self, radius_km: f64) -> Result<()> {
        if !(radius_km > 0.0 && radius_km <= self.max_radius_km) {
            return Err(anyhow!(
                "The maximum distance must be between 0 and {} km",
                self.max_radius_km
            ));
        }
        Ok(())
    }
}

impl TryFrom<raw::Config> for Config {
    type Error = anyhow::Error;
    fn try_from(from: raw::Config) -> Result<Self> {
        let raw::Config {
            db,
            geocoding,
            gateway,
            matching,
        } = from;

        let raw::Db { ngo_store } = db.unwrap_or_default();
        let db = Db { ngo_store };

        let raw::Geocoding {
            gateway: gw_name,
            country_code,
            country_qualifier,
            country_markers,
            timeout,
            min_interval,
        } = geocoding.unwrap_or_default();

        let gw_name = gw_name.unwrap_or(raw::GeocodingGateway::Nominatim);
        let raw::Gateway {
            opencage,
            nominatim,
        } = gateway.unwrap_or_default();
        let (gateway, default_min_interval) = match gw_name {
            raw::GeocodingGateway::Opencage => {
                let raw::OpenCage { api_key } =
                    opencage.ok_or_else(|| anyhow!("Missing [gateway.opencage] configuration"))?;
                log::debug!("Use OpenCage geocoding gateway");
                (GeocodingGateway::OpenCage { api_key }, Duration::ZERO)
            }
            raw::GeocodingGateway::Nominatim => {
                let raw::Nominatim {
                    base_url,
                    user_agent,
                } = nominatim.unwrap_or_default();
                if user_agent.trim().is_empty() {
                    return Err(anyhow!("Nominatim requires a user agent"));
                }
                log::debug!("Use Nominatim geocoding gateway ({base_url})");
                (
                    GeocodingGateway::Nominatim {
                        base_url,
                        user_agent,
                    },
                    NOMINATIM_MIN_INTERVAL,
                )
            }
        };

        let default_region = RegionBias::default();
        let region = RegionBias {
            country_code: country_code.unwrap_or(default_region.country_code),
            country_qualifier: country_qualifier.unwrap_or(default_region.country_qualifier),
            country_markers: country_markers
                .map(|markers| markers.into_iter().map(|m| m.to_lowercase()).collect())
                .unwrap_or(default_region.country_markers),
        };

        let geocoding = Geocoding {
            gateway,
            region,
            timeout: timeout.unwrap_or(DEFAULT_TIMEOUT),
            min_interval: min_interval.unwrap_or(default_min_interval),
        };

        let raw::Matching {
            default_radius_km,
            max_radius_km,
        } = matching.unwrap_or_default();
        if !(max_radius_km.is_finite() && max_radius_km > 0.0) {
            return Err(anyhow!("Invalid maximum radius: {max_radius_km} km"));
        }
        let matching = Matching {
            default_radius_km,
            max_radius_km,
        };
        matching
            .check_radius(default_radius_km)
            .map_err(|err| anyhow!("Invalid default radius: {err}"))?;

        Ok(Self {
            db,
            geocoding,
            matching,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(toml_str: &str) -> Result<Config> {
        let raw: raw::Config = toml::from_str(toml_str)?;
        Config::try_from(raw)
    }

    #[test]
    fn load_default_config() {
        let file: Option<&Path> = Some(Path::new("does-not-exist.toml"));
        let cfg = Config::try_load_from_file_or_default(file).unwrap();
        assert!(matches!(
            cfg.geocoding.gateway,
            GeocodingGateway::Nominatim { .. }
        ));
        assert_eq!(NOMINATIM_MIN_INTERVAL, cfg.geocoding.min_interval);
        assert_eq!(RegionBias::default(), cfg.geocoding.region);
        assert_eq!(15.0, cfg.matching.default_radius_km);
        assert_eq!(50.0, cfg.matching.max_radius_km);
    }

    #[test]
    fn convert_embedded_default_config() {
        let cfg = Config::try_from(raw::Config::default()).unwrap();
        let GeocodingGateway::Nominatim {
            base_url,
            user_agent,
        } = cfg.geocoding.gateway
        else {
            panic!("unexpected gateway");
        };
        assert_eq!("https://nominatim.openstreetmap.org", base_url);
        assert_eq!("annapurna-foodbridge", user_agent);
        assert_eq!(PathBuf::from("ngos.json"), cfg.db.ngo_store);
    }

    #[test]
    fn empty_config_falls_back_to_defaults() {
        let cfg = parse("").unwrap();
        assert_eq!(PathBuf::from("ngos.json"), cfg.db.ngo_store);
        assert_eq!(DEFAULT_TIMEOUT, cfg.geocoding.timeout);
    }

    #[test]
    fn opencage_without_delay() {
        let cfg = parse(
            r#"
            [geocoding]
            gateway = "opencage"
            country-markers = ["India", "Bharat", "Hindustan"]

            [gateway.opencage]
            api-key = "secret"
            "#,
        )
        .unwrap();
        let GeocodingGateway::OpenCage { api_key } = cfg.geocoding.gateway else {
            panic!("unexpected gateway");
        };
        assert_eq!(Some("secret".to_string()), api_key);
        assert_eq!(Duration::ZERO, cfg.geocoding.min_interval);
        assert_eq!(
            vec!["india", "bharat", "hindustan"],
            cfg.geocoding.region.country_markers
        );
    }

    #[test]
    fn opencage_requires_gateway_section() {
        assert!(parse(
            r#"
            [geocoding]
            gateway = "opencage"
            [gateway.nominatim]
            base-url = "http://localhost"
            user-agent = "test"
            "#
        )
        .is_err());
    }

    #[test]
    fn reject_invalid_radius_settings() {
        assert!(parse(
            r#"
            [matching]
            default-radius-km = 60.0
            max-radius-km = 50.0
            "#
        )
        .is_err());
        assert!(parse(
            r#"
            [matching]
            default-radius-km = 0.0
            max-radius-km = 50.0
            "#
        )
        .is_err());
    }

    #[test]
    fn check_radius() {
        let matching = Matching {
            default_radius_km: 15.0,
            max_radius_km: 50.0,
        };
        assert!(matching.check_radius(1.0).is_ok());
        assert!(matching.check_radius(50.0).is_ok());
        assert!(matching.check_radius(50.1).is_err());
        assert!(matching.check_radius(0.0).is_err());
        assert!(matching.check_radius(f64::NAN).is_err());
    }
}
