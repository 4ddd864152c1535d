//! Presentation of match results.

use annapurna_core::{
    entities::{MapPoint, Ngo},
    usecases::{MatchResult, NearbyNgo},
};
use anyhow::Result;
use clap::ValueEnum;
use serde::Serialize;
use serde_json::{json, Value};

const NOT_AVAILABLE: &str = "N/A";
const DONOR_LABEL: &str = "Your Location";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// Numbered plain text list
    List,
    Json,
    /// GeoJSON feature collection with map markers
    #[value(name = "geojson")]
    GeoJson,
}

pub fn render(result: &MatchResult, radius_km: f64, format: Format) -> Result<String> {
    let output = match format {
        Format::List => list(result, radius_km),
        Format::Json => {
            let mut json = serde_json::to_string_pretty(&MatchView::new(result, radius_km))?;
            json.push('\n');
            json
        }
        Format::GeoJson => {
            let mut json = serde_json::to_string_pretty(&geojson(result))?;
            json.push('\n');
            json
        }
    };
    Ok(output)
}

fn or_na(value: Option<&str>) -> &str {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(NOT_AVAILABLE)
}

pub fn list(result: &MatchResult, radius_km: f64) -> String {
    if result.is_empty() {
        return format!("No NGOs found within {radius_km} km of your location.\n");
    }
    let mut out = format!(
        "Found {} NGO(s) within {radius_km} km:\n",
        result.ngos.len()
    );
    for (i, nearby) in result.ngos.iter().enumerate() {
        let NearbyNgo {
            ngo, distance_km, ..
        } = nearby;
        out.push_str(&format!(
            "\n{}. {} ({distance_km} km away)\n   Contact: {}\n   Phone: {}\n   Email: {}\n   Address: {}\n",
            i + 1,
            ngo.display_name(),
            or_na(ngo.contact_person.as_deref()),
            or_na(ngo.phone.as_deref()),
            or_na(ngo.email.as_deref()),
            or_na(Some(ngo.address.as_str())),
        ));
    }
    out
}

pub fn ngo_list(ngos: &[Ngo]) -> String {
    if ngos.is_empty() {
        return "No NGOs registered.\n".to_string();
    }
    ngos.iter()
        .map(|ngo| {
            format!(
                "{}\t{}\t{}\n",
                ngo.id,
                ngo.display_name(),
                or_na(Some(ngo.address.as_str()))
            )
        })
        .collect()
}

#[derive(Debug, Serialize)]
struct Position {
    lat: f64,
    lng: f64,
}

impl From<MapPoint> for Position {
    fn from(from: MapPoint) -> Self {
        let (lat, lng) = from.to_lat_lng_deg();
        Self { lat, lng }
    }
}

#[derive(Debug, Serialize)]
struct NgoView<'a> {
    id: &'a str,
    name: &'a str,
    distance_km: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    contact_person: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    phone: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    email: Option<&'a str>,
    address: &'a str,
    pos: Position,
}

impl<'a> From<&'a NearbyNgo> for NgoView<'a> {
    fn from(from: &'a NearbyNgo) -> Self {
        let NearbyNgo {
            ngo,
            pos,
            distance_km,
        } = from;
        Self {
            id: ngo.id.as_str(),
            name: ngo.display_name(),
            distance_km: *distance_km,
            contact_person: ngo.contact_person.as_deref(),
            phone: ngo.phone.as_deref(),
            email: ngo.email.as_deref(),
            address: ngo.address.as_str(),
            pos: (*pos).into(),
        }
    }
}

#[derive(Debug, Serialize)]
struct MatchView<'a> {
    origin: Position,
    radius_km: f64,
    ngos: Vec<NgoView<'a>>,
}

impl<'a> MatchView<'a> {
    fn new(result: &'a MatchResult, radius_km: f64) -> Self {
        Self {
            origin: result.origin.into(),
            radius_km,
            ngos: result.ngos.iter().map(NgoView::from).collect(),
        }
    }
}

fn point(pos: MapPoint) -> Value {
    let (lat, lng) = pos.to_lat_lng_deg();
    // GeoJSON expects [longitude, latitude]
    json!({ "type": "Point", "coordinates": [lng, lat] })
}

fn geojson(result: &MatchResult) -> Value {
    let donor = json!({
        "type": "Feature",
        "geometry": point(result.origin),
        "properties": {
            "name": DONOR_LABEL,
            "kind": "donor",
        }
    });
    let ngos = result.ngos.iter().map(|nearby| {
        let NearbyNgo {
            ngo,
            pos,
            distance_km,
        } = nearby;
        json!({
            "type": "Feature",
            "geometry": point(*pos),
            "properties": {
                "kind": "ngo",
                "id": ngo.id.as_str(),
                "name": ngo.display_name(),
                "distance_km": distance_km,
                "contact": or_na(ngo.contact_person.as_deref()),
                "phone": or_na(ngo.phone.as_deref()),
                "email": or_na(ngo.email.as_deref()),
                "address": ngo.address.as_str(),
            }
        })
    });
    json!({
        "type": "FeatureCollection",
        "features": std::iter::once(donor).chain(ngos).collect::<Vec<_>>(),
    })
}
