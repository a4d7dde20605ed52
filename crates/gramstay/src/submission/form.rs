use std::collections::BTreeSet;

use crate::listings::domain::{ListingStatus, PropertyType};

/// Accumulated form state carried through every submission step.
///
/// Field values survive forward and backward navigation; only a successful
/// commit resets them. Price is kept as the raw input string and validated
/// to a whole non-negative number before the step-1 gate opens.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListingForm {
    pub title: String,
    pub property_type: Option<PropertyType>,
    pub location: String,
    pub price: String,
    pub description: String,
    pub amenities: BTreeSet<String>,
    pub status: ListingStatus,
    pub owner_name: String,
    pub owner_phone: String,
    pub authorization_acknowledged: bool,
}

impl ListingForm {
    /// Set-membership toggle: staging the same amenity twice returns the
    /// set to its original contents.
    pub fn toggle_amenity(&mut self, amenity: &str) {
        if !self.amenities.remove(amenity) {
            self.amenities.insert(amenity.to_string());
        }
    }

    pub(crate) fn parsed_price(&self) -> Option<u32> {
        self.price.trim().parse().ok()
    }
}

/// Form snapshot that passed every local validation gate. Produced only by
/// the state machine's submit transition, consumed by the committer.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedSubmission {
    pub title: String,
    pub property_type: PropertyType,
    pub location: String,
    pub price: u32,
    pub description: String,
    pub amenities: BTreeSet<String>,
    pub status: ListingStatus,
    pub owner_name: String,
    pub owner_phone: String,
}
