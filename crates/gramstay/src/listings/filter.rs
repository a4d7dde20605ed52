use serde::{Deserialize, Serialize};

use super::domain::Listing;

/// Search/price/verification constraints driving discovery.
///
/// Evaluation is a pure, stable filter: listings keep their input order and
/// no re-sort happens. An inverted price range simply matches nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterConfig {
    pub text_query: String,
    pub min_price: u32,
    pub max_price: u32,
    pub verified_only: bool,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            text_query: String::new(),
            min_price: 0,
            max_price: u32::MAX,
            verified_only: false,
        }
    }
}

impl FilterConfig {
    /// All predicates must hold: inclusive price bounds, the verified gate,
    /// and a case-insensitive substring match on location OR title when the
    /// query is non-empty.
    pub fn matches(&self, listing: &Listing) -> bool {
        if listing.price < self.min_price || listing.price > self.max_price {
            return false;
        }

        if self.verified_only && !listing.is_verified {
            return false;
        }

        if !self.text_query.is_empty() {
            let needle = self.text_query.to_lowercase();
            if !listing.location.to_lowercase().contains(&needle)
                && !listing.title.to_lowercase().contains(&needle)
            {
                return false;
            }
        }

        true
    }

    pub fn apply<'a>(&self, listings: &'a [Listing]) -> Vec<&'a Listing> {
        listings.iter().filter(|listing| self.matches(listing)).collect()
    }
}
