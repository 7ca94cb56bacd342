//! # Gazetteer
//!
//! Static reference table of Nepali places with coordinates and
//! administrative metadata. Loaded once, never mutated. Backs the
//! location-search convenience in the admin forms: picking a result copies
//! only the coordinates into the form, nothing else.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaceKind {
    ProvincialCapital,
    MajorCity,
    DistrictHeadquarters,
    Municipality,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaceRecord {
    pub name: &'static str,
    pub latitude: f64,
    pub longitude: f64,
    pub kind: PlaceKind,
    pub district: Option<&'static str>,
    pub province: Option<&'static str>,
}

fn place(
    name: &'static str,
    latitude: f64,
    longitude: f64,
    kind: PlaceKind,
    district: Option<&'static str>,
    province: Option<&'static str>,
) -> PlaceRecord {
    PlaceRecord { name, latitude, longitude, kind, district, province }
}

/// The full place table. Entries are unique by (name, district).
pub static PLACES: Lazy<Vec<PlaceRecord>> = Lazy::new(|| {
    use PlaceKind::*;
    vec![
        // Provincial capitals
        place("Kathmandu", 27.7172, 85.3240, ProvincialCapital, Some("Kathmandu"), Some("Bagmati")),
        place("Pokhara", 28.2096, 83.9856, ProvincialCapital, Some("Kaski"), Some("Gandaki")),
        place("Biratnagar", 26.4525, 87.2718, ProvincialCapital, Some("Morang"), Some("Koshi")),
        place("Janakpur", 26.7288, 85.9256, ProvincialCapital, Some("Dhanusha"), Some("Madhesh")),
        place("Butwal", 27.7000, 83.4486, ProvincialCapital, Some("Rupandehi"), Some("Lumbini")),
        place("Birendranagar", 28.2096, 81.6167, ProvincialCapital, Some("Surkhet"), Some("Karnali")),
        place("Dhangadhi", 28.6833, 80.6000, ProvincialCapital, Some("Kailali"), Some("Sudurpashchim")),
        // Major cities
        place("Lalitpur", 27.6588, 85.3247, MajorCity, Some("Lalitpur"), Some("Bagmati")),
        place("Bhaktapur", 27.6710, 85.4298, MajorCity, Some("Bhaktapur"), Some("Bagmati")),
        place("Bharatpur", 27.6747, 84.4339, MajorCity, Some("Chitwan"), Some("Bagmati")),
        place("Hetauda", 27.4280, 85.0323, MajorCity, Some("Makwanpur"), Some("Bagmati")),
        place("Dharan", 26.8147, 87.2789, MajorCity, Some("Sunsari"), Some("Koshi")),
        place("Itahari", 26.6518, 87.2847, MajorCity, Some("Sunsari"), Some("Koshi")),
        place("Damak", 26.6586, 87.7006, MajorCity, Some("Jhapa"), Some("Koshi")),
        place("Birtamod", 26.6667, 88.0833, MajorCity, Some("Jhapa"), Some("Koshi")),
        place("Siddharthanagar", 27.5031, 83.4614, MajorCity, Some("Rupandehi"), Some("Lumbini")),
        place("Ghorahi", 28.0333, 82.5167, MajorCity, Some("Dang"), Some("Lumbini")),
        place("Tulsipur", 28.1333, 82.3000, MajorCity, Some("Dang"), Some("Lumbini")),
        place("Nepalgunj", 28.0500, 81.6167, MajorCity, Some("Banke"), Some("Lumbini")),
        // District headquarters
        place("Taplejung", 27.3500, 87.6667, DistrictHeadquarters, Some("Taplejung"), Some("Koshi")),
        place("Phidim", 27.1500, 87.7500, DistrictHeadquarters, Some("Panchthar"), Some("Koshi")),
        place("Ilam", 26.9083, 87.9250, DistrictHeadquarters, Some("Ilam"), Some("Koshi")),
        place("Khandbari", 27.3833, 87.2000, DistrictHeadquarters, Some("Sankhuwasabha"), Some("Koshi")),
        place("Bhojpur", 27.1667, 87.0500, DistrictHeadquarters, Some("Bhojpur"), Some("Koshi")),
        place("Okhaldhunga", 27.3167, 86.5000, DistrictHeadquarters, Some("Okhaldhunga"), Some("Koshi")),
        place("Siraha", 26.6500, 86.2000, DistrictHeadquarters, Some("Siraha"), Some("Madhesh")),
        place("Sarlahi", 27.0000, 85.5500, DistrictHeadquarters, Some("Sarlahi"), Some("Madhesh")),
        place("Sindhuli", 27.2500, 85.9667, DistrictHeadquarters, Some("Sindhuli"), Some("Bagmati")),
        place("Dolakha", 27.6700, 86.1667, DistrictHeadquarters, Some("Dolakha"), Some("Bagmati")),
        place("Dhading", 27.8667, 84.9000, DistrictHeadquarters, Some("Dhading"), Some("Bagmati")),
        place("Gorkha", 28.0000, 84.6333, DistrictHeadquarters, Some("Gorkha"), Some("Gandaki")),
        place("Baglung", 28.2667, 83.5833, DistrictHeadquarters, Some("Baglung"), Some("Gandaki")),
        place("Mustang", 28.9833, 83.8833, DistrictHeadquarters, Some("Mustang"), Some("Gandaki")),
        place("Palpa", 27.8667, 83.5500, DistrictHeadquarters, Some("Palpa"), Some("Lumbini")),
        place("Gulmi", 28.0833, 83.2167, DistrictHeadquarters, Some("Gulmi"), Some("Lumbini")),
        place("Jumla", 29.2747, 82.1838, DistrictHeadquarters, Some("Jumla"), Some("Karnali")),
        place("Dolpa", 29.0333, 82.9000, DistrictHeadquarters, Some("Dolpa"), Some("Karnali")),
        place("Bajhang", 29.5500, 81.2000, DistrictHeadquarters, Some("Bajhang"), Some("Sudurpashchim")),
        place("Darchula", 29.8500, 80.5333, DistrictHeadquarters, Some("Darchula"), Some("Sudurpashchim")),
        // Municipalities
        place("Kirtipur", 27.6667, 85.2833, Municipality, Some("Kathmandu"), Some("Bagmati")),
        place("Banepa", 27.6333, 85.5167, Municipality, Some("Kavrepalanchok"), Some("Bagmati")),
        place("Dhulikhel", 27.6167, 85.5500, Municipality, Some("Kavrepalanchok"), Some("Bagmati")),
        place("Lekhnath", 28.2000, 84.0833, Municipality, Some("Kaski"), Some("Gandaki")),
        place("Tikapur", 28.5000, 81.1167, Municipality, Some("Kailali"), Some("Sudurpashchim")),
    ]
});

fn field_matches(field: Option<&str>, needle: &str) -> bool {
    field.is_some_and(|f| f.to_lowercase().contains(needle))
}

/// Case-insensitive substring search over name OR district OR province.
///
/// An empty query returns the whole table (the form renders it as the
/// browse list). Missing district/province simply never match.
pub fn search(query: &str) -> Vec<&'static PlaceRecord> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return PLACES.iter().collect();
    }
    PLACES
        .iter()
        .filter(|p| {
            p.name.to_lowercase().contains(&needle)
                || field_matches(p.district, &needle)
                || field_matches(p.province, &needle)
        })
        .collect()
}
