//! Core data models for roamy
//!
//! This module contains the location types exchanged with the REST API, the
//! filter criteria that parameterise a query, and the client and service
//! built on top of them.

pub mod client;
pub mod query;
pub mod service;

pub use client::{ApiError, HttpClient, Transport};
pub use query::{FilterCriteria, QueryParams};
pub use service::LocationService;

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lowest rating the API accepts
pub const MIN_RATING: f64 = 0.0;

/// Highest rating the API accepts
pub const MAX_RATING: f64 = 5.0;

/// Kind of place a location describes
///
/// The server sends free-form strings. The known names are matched
/// case-insensitively; anything else is kept verbatim in `Other` so it
/// round-trips to the server unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    Museum,
    Monument,
    Park,
    Restaurant,
    Attraction,
    Other(String),
}

impl Category {
    /// The named categories in display order
    pub const KNOWN: [Category; 5] = [
        Category::Museum,
        Category::Monument,
        Category::Park,
        Category::Restaurant,
        Category::Attraction,
    ];

    /// Parses a category string case-insensitively
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "museum" => Category::Museum,
            "monument" => Category::Monument,
            "park" => Category::Park,
            "restaurant" => Category::Restaurant,
            "attraction" => Category::Attraction,
            _ => Category::Other(s.to_string()),
        }
    }

    /// Wire name; lowercase for the named categories, verbatim otherwise
    pub fn as_str(&self) -> &str {
        match self {
            Category::Museum => "museum",
            Category::Monument => "monument",
            Category::Park => "park",
            Category::Restaurant => "restaurant",
            Category::Attraction => "attraction",
            Category::Other(raw) => raw,
        }
    }

    /// Label for display; unknown categories show the server's value
    pub fn label(&self) -> &str {
        match self {
            Category::Museum => "Museum",
            Category::Monument => "Monument",
            Category::Park => "Park",
            Category::Restaurant => "Restaurant",
            Category::Attraction => "Attraction",
            Category::Other(raw) if raw.trim().is_empty() => "Other",
            Category::Other(raw) => raw,
        }
    }
}

impl From<String> for Category {
    fn from(s: String) -> Self {
        Category::parse(&s)
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        match category {
            Category::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Geographic position of a location
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    /// Whether both values are finite and within the valid degree ranges
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

/// External link attached to a location (tourism board, tickets, ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TourismLink {
    pub title: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A travel destination as served by the API
///
/// `id` is assigned by the server and never changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: u64,
    pub name: String,
    pub description: String,
    pub category: Category,
    pub city: String,
    pub country: String,
    pub coordinates: Coordinates,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub price_range: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub opening_hours: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub tourism_links: Vec<TourismLink>,
}

impl Location {
    /// Whether the price range is the special value "free"
    pub fn is_free(&self) -> bool {
        self.price_range
            .as_deref()
            .is_some_and(|p| p.trim().eq_ignore_ascii_case("free"))
    }

    /// Case-insensitive substring match on name, description, city or country
    ///
    /// `needle_lower` must already be lowercase.
    pub fn matches_search(&self, needle_lower: &str) -> bool {
        [&self.name, &self.description, &self.city, &self.country]
            .iter()
            .any(|field| field.to_lowercase().contains(needle_lower))
    }
}

/// Payload for creating a location; the server assigns the id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewLocation {
    pub name: String,
    pub description: String,
    pub category: Category,
    pub city: String,
    pub country: String,
    pub coordinates: Coordinates,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_range: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opening_hours: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default)]
    pub tourism_links: Vec<TourismLink>,
}

impl NewLocation {
    /// Checks the fields the server would reject
    ///
    /// Returns a human-readable reason for the first problem found.
    pub fn validate(&self) -> Result<(), String> {
        for (field, value) in [
            ("name", &self.name),
            ("city", &self.city),
            ("country", &self.country),
        ] {
            if value.trim().is_empty() {
                return Err(format!("{} must not be empty", field));
            }
        }

        if let Some(rating) = self.rating {
            if !(MIN_RATING..=MAX_RATING).contains(&rating) {
                return Err(format!(
                    "rating must be between {:.1} and {:.1}, got {}",
                    MIN_RATING, MAX_RATING, rating
                ));
            }
        }

        if !self.coordinates.is_valid() {
            return Err(format!(
                "coordinates out of range: ({}, {})",
                self.coordinates.latitude, self.coordinates.longitude
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED_FORT_JSON: &str = r#"{
        "id": 1,
        "name": "Red Fort",
        "description": "Historic fort in the city of Delhi",
        "city": "Delhi",
        "country": "India",
        "coordinates": { "latitude": 28.6562, "longitude": 77.2410 },
        "category": "Monument",
        "rating": 4.5,
        "image_url": null,
        "tourism_links": [
            { "title": "ASI", "url": "https://asi.nic.in" }
        ],
        "price_range": "$"
    }"#;

    fn sample_new_location() -> NewLocation {
        NewLocation {
            name: "Lodhi Garden".to_string(),
            description: "City park".to_string(),
            category: Category::Park,
            city: "Delhi".to_string(),
            country: "India".to_string(),
            coordinates: Coordinates {
                latitude: 28.5931,
                longitude: 77.2197,
            },
            rating: Some(4.6),
            price_range: Some("Free".to_string()),
            image_url: None,
            opening_hours: None,
            address: None,
            tourism_links: Vec::new(),
        }
    }

    #[test]
    fn test_location_deserializes_with_missing_optionals() {
        let location: Location = serde_json::from_str(RED_FORT_JSON).unwrap();

        assert_eq!(location.id, 1);
        assert_eq!(location.category, Category::Monument);
        assert_eq!(location.rating, Some(4.5));
        assert!(location.image_url.is_none());
        assert!(location.opening_hours.is_none());
        assert!(location.address.is_none());
        assert_eq!(location.tourism_links.len(), 1);
        assert!(location.tourism_links[0].description.is_none());
    }

    #[test]
    fn test_location_without_links_field_has_empty_links() {
        let json = r#"{
            "id": 7, "name": "Louvre", "description": "Museum",
            "city": "Paris", "country": "France",
            "coordinates": { "latitude": 48.8606, "longitude": 2.3376 },
            "category": "museum"
        }"#;
        let location: Location = serde_json::from_str(json).unwrap();

        assert!(location.tourism_links.is_empty());
        assert!(location.rating.is_none());
        assert!(location.price_range.is_none());
    }

    #[test]
    fn test_category_parse_is_case_insensitive() {
        assert_eq!(Category::parse("MUSEUM"), Category::Museum);
        assert_eq!(Category::parse(" park "), Category::Park);
        assert_eq!(Category::parse("Restaurant"), Category::Restaurant);
    }

    #[test]
    fn test_unknown_category_keeps_server_value() {
        assert_eq!(Category::parse("beach"), Category::Other("beach".to_string()));
        assert_eq!(Category::parse("Hindu Temple").label(), "Hindu Temple");
        assert_eq!(Category::parse("").label(), "Other");
    }

    #[test]
    fn test_unknown_category_round_trips_unchanged() {
        let json = r#"{
            "name": "Akshardham", "description": "Temple complex", "category": "temple",
            "city": "Delhi", "country": "India",
            "coordinates": {"latitude": 28.6127, "longitude": 77.2773}
        }"#;
        let new_location: NewLocation = serde_json::from_str(json).unwrap();
        let body = serde_json::to_value(&new_location).unwrap();

        assert_eq!(body["category"], "temple");
    }

    #[test]
    fn test_category_serializes_lowercase() {
        let json = serde_json::to_string(&Category::Attraction).unwrap();
        assert_eq!(json, "\"attraction\"");
    }

    #[test]
    fn test_is_free_matches_case_insensitively() {
        let mut location: Location = serde_json::from_str(RED_FORT_JSON).unwrap();
        assert!(!location.is_free());

        location.price_range = Some("FREE".to_string());
        assert!(location.is_free());

        location.price_range = None;
        assert!(!location.is_free());
    }

    #[test]
    fn test_matches_search_checks_all_text_fields() {
        let location: Location = serde_json::from_str(RED_FORT_JSON).unwrap();

        assert!(location.matches_search("fort"));
        assert!(location.matches_search("historic"));
        assert!(location.matches_search("delhi"));
        assert!(location.matches_search("india"));
        assert!(!location.matches_search("agra"));
    }

    #[test]
    fn test_new_location_validates() {
        assert!(sample_new_location().validate().is_ok());
    }

    #[test]
    fn test_new_location_rejects_empty_name() {
        let mut new_location = sample_new_location();
        new_location.name = "  ".to_string();

        let err = new_location.validate().unwrap_err();
        assert!(err.contains("name"));
    }

    #[test]
    fn test_new_location_rejects_rating_out_of_range() {
        let mut new_location = sample_new_location();
        new_location.rating = Some(5.5);

        let err = new_location.validate().unwrap_err();
        assert!(err.contains("rating"));
    }

    #[test]
    fn test_new_location_rejects_bad_coordinates() {
        let mut new_location = sample_new_location();
        new_location.coordinates.latitude = 123.0;

        assert!(new_location.validate().is_err());
    }

    #[test]
    fn test_new_location_omits_absent_optionals() {
        let mut new_location = sample_new_location();
        new_location.rating = None;
        let json = serde_json::to_value(&new_location).unwrap();

        assert!(json.get("rating").is_none());
        assert!(json.get("id").is_none());
        assert_eq!(json["category"], "park");
    }
}
