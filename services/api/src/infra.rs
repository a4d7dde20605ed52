use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use metrics_exporter_prometheus::PrometheusHandle;

use gramstay::listings::domain::{Listing, ListingId, NewListing, OwnerProfile};
use gramstay::listings::repository::{ListingRepository, RepositoryError};
use gramstay::listings::storage::{StorageError, StorageGateway};
use gramstay::submission::{PreviewAllocator, StagedImage};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Record-store stand-in backing the `rooms` table.
#[derive(Default)]
pub(crate) struct InMemoryListingRepository {
    rows: Mutex<Vec<Listing>>,
    sequence: AtomicU64,
}

impl InMemoryListingRepository {
    pub(crate) fn seeded(rows: Vec<Listing>) -> Self {
        let sequence = AtomicU64::new(rows.len() as u64);
        Self {
            rows: Mutex::new(rows),
            sequence,
        }
    }
}

#[async_trait::async_trait]
impl ListingRepository for InMemoryListingRepository {
    async fn fetch_all(&self) -> Result<Vec<Listing>, RepositoryError> {
        Ok(self.rows.lock().expect("repository mutex poisoned").clone())
    }

    async fn fetch(&self, id: &ListingId) -> Result<Option<Listing>, RepositoryError> {
        let guard = self.rows.lock().expect("repository mutex poisoned");
        Ok(guard.iter().find(|row| &row.id == id).cloned())
    }

    async fn insert(&self, row: NewListing) -> Result<Listing, RepositoryError> {
        let id = self.sequence.fetch_add(1, Ordering::Relaxed) + 1;
        let listing = Listing {
            id: ListingId(format!("room-{id:04}")),
            title: row.title,
            description: row.description,
            location: row.location,
            property_type: row.property_type,
            price: row.price,
            status: row.status,
            rating: 0.0,
            image_url: row.image_url.clone(),
            images: vec![row.image_url],
            is_verified: row.is_verified,
            amenities: row.amenities,
            owner: Some(OwnerProfile {
                name: row.owner_name,
                phone: row.owner_phone,
                is_verified: false,
                rating: 0.0,
            }),
            geo: None,
            reviews: Vec::new(),
            user_id: row.user_id,
        };

        let mut guard = self.rows.lock().expect("repository mutex poisoned");
        guard.push(listing.clone());
        Ok(listing)
    }
}

/// Object-storage stand-in returning public URLs under a configured base.
pub(crate) struct InMemoryStorageGateway {
    objects: Mutex<HashMap<String, Vec<u8>>>,
    public_base: String,
}

impl InMemoryStorageGateway {
    pub(crate) fn new(public_base: impl Into<String>) -> Self {
        Self {
            objects: Mutex::new(HashMap::new()),
            public_base: public_base.into(),
        }
    }
}

#[async_trait::async_trait]
impl StorageGateway for InMemoryStorageGateway {
    async fn upload(&self, key: &str, bytes: &[u8]) -> Result<String, StorageError> {
        let mut guard = self.objects.lock().expect("storage mutex poisoned");
        guard.insert(key.to_string(), bytes.to_vec());
        Ok(format!("{}/{key}", self.public_base))
    }
}

/// Preview allocator handing out short-lived `preview://` handles.
#[derive(Default)]
pub(crate) struct InMemoryPreviewAllocator {
    sequence: AtomicU64,
    live: Mutex<HashSet<String>>,
}

impl PreviewAllocator for InMemoryPreviewAllocator {
    fn acquire(&self, image: &StagedImage) -> String {
        let id = self.sequence.fetch_add(1, Ordering::Relaxed);
        let handle = format!("preview://{id}/{}", image.file_name);
        self.live
            .lock()
            .expect("preview mutex poisoned")
            .insert(handle.clone());
        handle
    }

    fn release(&self, handle: &str) {
        self.live.lock().expect("preview mutex poisoned").remove(handle);
    }
}
