use super::prelude::*;
use crate::{
    gateways::geocode::GeoCodingGateway,
    geocoding::{Geocoder, Resolution},
    util::geo::distance_km,
};

/// An NGO together with its resolved position and
/// the distance to the donor.
#[derive(Debug, Clone, PartialEq)]
pub struct NearbyNgo {
    pub ngo: Ngo,
    pub pos: MapPoint,
    pub distance_km: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MatchResult {
    /// Position of the donor
    pub origin: MapPoint,
    /// Sorted by distance, nearest first
    pub ngos: Vec<NearbyNgo>,
}

impl MatchResult {
    pub fn is_empty(&self) -> bool {
        self.ngos.is_empty()
    }
}

/// Find all NGOs within `radius_km` of the donor's address.
///
/// NGOs without an address or with an address that cannot
/// be resolved are silently skipped. Only an unresolvable
/// donor address fails the whole search.
pub fn find_nearby_ngos<R, G>(
    repo: &R,
    geocoder: &mut Geocoder<G>,
    donor_address: &str,
    radius_km: f64,
) -> Result<MatchResult>
where
    R: NgoRepo,
    G: GeoCodingGateway,
{
    if !radius_km.is_finite() || radius_km <= 0.0 {
        return Err(Error::InvalidRadius(radius_km));
    }
    log::debug!("Searching for NGOs within {radius_km} km of '{donor_address}'");

    let Resolution::Found(origin) = geocoder.resolve(donor_address) else {
        return Err(Error::NoOrigin);
    };

    let ngos = repo.all_ngos()?;
    let total_count = ngos.len();

    let mut nearby: Vec<(usize, NearbyNgo)> = ngos
        .into_iter()
        .enumerate()
        .filter_map(|(index, ngo)| {
            if !ngo.has_address() {
                log::debug!("NGO {} has no address", ngo.id);
                return None;
            }
            let pos = geocoder.resolve(ngo.address.as_str()).found()?;
            let distance_km = distance_km(origin, pos);
            log::debug!("NGO {} is {distance_km} km away", ngo.id);
            Some((
                index,
                NearbyNgo {
                    ngo,
                    pos,
                    distance_km,
                },
            ))
        })
        .filter(|(_, x)| x.distance_km <= radius_km)
        .collect();

    nearby.sort_by(|(lhs_index, lhs), (rhs_index, rhs)| {
        lhs.distance_km
            .total_cmp(&rhs.distance_km)
            .then(lhs_index.cmp(rhs_index))
    });

    let ngos: Vec<_> = nearby.into_iter().map(|(_, x)| x).collect();
    log::info!(
        "Found {} of {total_count} NGOs within {radius_km} km",
        ngos.len()
    );
    Ok(MatchResult { origin, ngos })
}
