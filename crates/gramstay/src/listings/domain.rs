use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Image reference used when a submission arrives without any staged photo.
pub const PLACEHOLDER_IMAGE_URL: &str = "/placeholder.svg";

/// Opaque identifier assigned by the record store at insert time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ListingId(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyType {
    Room,
    Pg,
    Apartment,
    House,
}

impl PropertyType {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Room => "Single Room",
            Self::Pg => "PG Accommodation",
            Self::Apartment => "Apartment",
            Self::House => "House",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListingStatus {
    Available,
    Soon,
    Reserved,
}

impl ListingStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Available => "Available Now",
            Self::Soon => "Available Soon",
            Self::Reserved => "Reserved",
        }
    }
}

impl Default for ListingStatus {
    fn default() -> Self {
        Self::Available
    }
}

/// Immutable owner sub-record supplied at listing-creation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OwnerProfile {
    pub name: String,
    pub phone: String,
    pub is_verified: bool,
    pub rating: f32,
}

/// Coordinates for external map hand-off. Never computed on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accuracy: Option<f64>,
}

/// Append-only from this subsystem's perspective; no authoring flow here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub reviewer: String,
    pub rating: f32,
    pub comment: String,
    pub date: NaiveDate,
}

/// A single rentable property record. Nested structures may arrive
/// partially populated from the record store; serde defaults keep the
/// mandatory fields as the only hard requirement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub id: ListingId,
    pub title: String,
    pub description: String,
    pub location: String,
    pub property_type: PropertyType,
    pub price: u32,
    #[serde(default)]
    pub status: ListingStatus,
    #[serde(default)]
    pub rating: f32,
    pub image_url: String,
    #[serde(default)]
    pub images: Vec<String>,
    pub is_verified: bool,
    #[serde(default)]
    pub amenities: BTreeSet<String>,
    #[serde(default)]
    pub owner: Option<OwnerProfile>,
    #[serde(default)]
    pub geo: Option<GeoPoint>,
    #[serde(default)]
    pub reviews: Vec<Review>,
    pub user_id: String,
}

impl Listing {
    /// Gallery for the detail view. Falls back to a singleton of the
    /// primary image so a listing always exposes at least one reference.
    pub fn gallery(&self) -> Vec<&str> {
        if self.images.is_empty() {
            vec![self.image_url.as_str()]
        } else {
            self.images.iter().map(String::as_str).collect()
        }
    }

    pub fn card(&self) -> ListingCard {
        ListingCard {
            id: self.id.clone(),
            title: self.title.clone(),
            location: self.location.clone(),
            price: self.price,
            rating: self.rating,
            image_url: self.image_url.clone(),
            is_verified: self.is_verified,
        }
    }
}

/// Summary projection rendered on search result cards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListingCard {
    pub id: ListingId,
    pub title: String,
    pub location: String,
    pub price: u32,
    pub rating: f32,
    pub image_url: String,
    pub is_verified: bool,
}

/// Row shape for the single record-store insert performed by the
/// submission committer. `is_verified` is always false here; only the
/// out-of-band moderation process may flip it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewListing {
    pub title: String,
    pub property_type: PropertyType,
    pub location: String,
    pub price: u32,
    pub description: String,
    pub amenities: BTreeSet<String>,
    pub status: ListingStatus,
    pub image_url: String,
    pub owner_name: String,
    pub owner_phone: String,
    pub user_id: String,
    pub is_verified: bool,
}
