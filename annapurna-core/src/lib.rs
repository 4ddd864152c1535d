pub mod gateways;
pub mod geocoding;
pub mod repositories;
pub mod usecases;
pub mod util;

pub mod entities {
    pub use annapurna_entities::{address::*, geo::*, id::*, ngo::*};
}
