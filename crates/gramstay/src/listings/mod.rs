//! Listing vocabulary shared by the discovery read path and the
//! submission write path, plus the collaborator boundaries and the HTTP
//! surface built on them.

pub mod domain;
pub mod filter;
pub mod repository;
pub mod router;
pub mod storage;

pub use domain::{
    GeoPoint, Listing, ListingCard, ListingId, ListingStatus, NewListing, OwnerProfile,
    PropertyType, Review, PLACEHOLDER_IMAGE_URL,
};
pub use filter::FilterConfig;
pub use repository::{ListingRepository, RepositoryError};
pub use router::{listing_router, ListingApi};
pub use storage::{object_key, StorageError, StorageGateway};
