use std::path::PathBuf;

use annapurna_core::{
    geocoding::{Geocoder, Resolution},
    repositories::NgoRepo,
    usecases::{self, NewNgo},
};
use annapurna_db_jfs::JsonFileStore;
use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

use crate::{config::Config, gateways, render};

#[derive(Debug, Parser)]
#[command(
    name = "annapurna",
    version,
    about = "Find NGOs near a food donor"
)]
pub struct Args {
    /// Configuration file (default: annapurna.toml)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List all NGOs within a radius around the donor
    Search {
        /// Pickup address of the donor
        #[arg(short, long)]
        address: String,

        /// Maximum distance in kilometers
        #[arg(short, long, value_name = "KM")]
        radius: Option<f64>,

        #[arg(short, long, value_enum, default_value_t = render::Format::List)]
        format: render::Format,
    },

    /// Resolve an address into coordinates
    Geocode { address: String },

    /// Manage registered NGOs
    #[command(subcommand)]
    Ngo(NgoCommand),
}

#[derive(Debug, Subcommand)]
pub enum NgoCommand {
    /// Register a new NGO or update an existing one with the same email
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        address: String,
        #[arg(long)]
        contact_person: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        phone: Option<String>,
    },
    /// Show all registered NGOs
    List,
}

pub fn run(cmd: Command, cfg: Config) -> Result<()> {
    match cmd {
        Command::Search {
            address,
            radius,
            format,
        } => {
            let radius_km = radius.unwrap_or(cfg.matching.default_radius_km);
            cfg.matching.check_radius(radius_km)?;
            let repo = ngo_store(&cfg)?;
            let gw = gateways::geocoding_gateway(&cfg.geocoding)?;
            let mut geocoder = Geocoder::new(gw, cfg.geocoding.region.clone());
            let result =
                match usecases::find_nearby_ngos(&repo, &mut geocoder, &address, radius_km) {
                    Ok(result) => result,
                    Err(usecases::Error::NoOrigin) => {
                        bail!(
                            "Could not locate '{address}'. Try to\n\
                             - add the city name (e.g. 'Adhartal, Jabalpur')\n\
                             - be more specific (street, area or landmark)\n\
                             - check the spelling"
                        );
                    }
                    Err(err) => return Err(err.into()),
                };
            log::debug!(
                "Sent {} requests to the geocoding provider",
                geocoder.provider_calls()
            );
            print!("{}", render::render(&result, radius_km, format)?);
        }
        Command::Geocode { address } => {
            let gw = gateways::geocoding_gateway(&cfg.geocoding)?;
            let mut geocoder = Geocoder::new(gw, cfg.geocoding.region.clone());
            match geocoder.resolve(&address) {
                Resolution::Found(pos) => {
                    let (lat, lng) = pos.to_lat_lng_deg();
                    println!("{lat:.6}, {lng:.6}");
                }
                Resolution::NotFound => bail!("Could not locate '{address}'"),
            }
        }
        Command::Ngo(NgoCommand::Add {
            name,
            address,
            contact_person,
            email,
            phone,
        }) => {
            let repo = ngo_store(&cfg)?;
            let new_ngo = NewNgo {
                org_name: name,
                contact_person,
                email,
                phone,
                address,
            };
            let id = usecases::store_ngo(&repo, new_ngo)?;
            log::info!("Stored NGO {id} in {}", repo.path().display());
            println!("{id}");
        }
        Command::Ngo(NgoCommand::List) => {
            let repo = ngo_store(&cfg)?;
            let ngos = repo.all_ngos()?;
            print!("{}", render::ngo_list(&ngos));
        }
    }
    Ok(())
}

fn ngo_store(cfg: &Config) -> Result<JsonFileStore> {
    let path = &cfg.db.ngo_store;
    JsonFileStore::try_new(path)
        .with_context(|| format!("Unable to open NGO store {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Args, clap::Error> {
        Args::try_parse_from(std::iter::once("annapurna").chain(args.iter().copied()))
    }

    #[test]
    fn parse_search_with_defaults() {
        let args = parse(&["search", "--address", "Adhartal, Jabalpur"]).unwrap();
        assert!(args.config.is_none());
        let Command::Search {
            address,
            radius,
            format,
        } = args.command
        else {
            panic!("unexpected command");
        };
        assert_eq!("Adhartal, Jabalpur", address);
        assert!(radius.is_none());
        assert_eq!(render::Format::List, format);
    }

    #[test]
    fn parse_search_with_options() {
        let args = parse(&[
            "search",
            "-a",
            "Ranjhi",
            "--radius",
            "7.5",
            "--format",
            "geojson",
            "--config",
            "custom.toml",
        ])
        .unwrap();
        assert_eq!(Some(PathBuf::from("custom.toml")), args.config);
        assert!(matches!(
            args.command,
            Command::Search {
                radius: Some(r),
                format: render::Format::GeoJson,
                ..
            } if r == 7.5
        ));
    }

    #[test]
    fn search_requires_address() {
        assert!(parse(&["search"]).is_err());
        assert!(parse(&["search", "-a", "Ranjhi", "-r", "far"]).is_err());
    }

    #[test]
    fn parse_ngo_commands() {
        let args = parse(&[
            "ngo",
            "add",
            "--name",
            "Roti Bank",
            "--address",
            "Napier Town, Jabalpur",
            "--email",
            "info@rotibank.org",
        ])
        .unwrap();
        let Command::Ngo(NgoCommand::Add {
            name, email, phone, ..
        }) = args.command
        else {
            panic!("unexpected command");
        };
        assert_eq!("Roti Bank", name);
        assert_eq!(Some("info@rotibank.org".to_string()), email);
        assert!(phone.is_none());

        let args = parse(&["ngo", "list"]).unwrap();
        assert!(matches!(args.command, Command::Ngo(NgoCommand::List)));
    }
}
