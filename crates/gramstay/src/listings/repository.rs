use async_trait::async_trait;

use super::domain::{Listing, ListingId, NewListing};

/// Record store boundary for the `rooms` table.
///
/// Reads are a full-table fetch; the filter evaluator runs entirely
/// client-side on the returned rows. No filter pushdown exists at this
/// boundary.
#[async_trait]
pub trait ListingRepository: Send + Sync {
    async fn fetch_all(&self) -> Result<Vec<Listing>, RepositoryError>;

    async fn fetch(&self, id: &ListingId) -> Result<Option<Listing>, RepositoryError>;

    /// Insert one row; the store assigns the id and returns the stored row.
    async fn insert(&self, row: NewListing) -> Result<Listing, RepositoryError>;
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum RepositoryError {
    #[error("record store unavailable: {0}")]
    Unavailable(String),
    #[error("insert rejected: {0}")]
    Rejected(String),
}
