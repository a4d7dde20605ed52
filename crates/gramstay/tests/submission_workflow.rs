//! End-to-end coverage for the listing submission workflow: the step
//! machine, image staging, the authorization gate, and the committer's
//! upload-then-insert ordering, exercised through the public session facade
//! with in-memory collaborators.

mod common {
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;

    use gramstay::auth::{IdentityProvider, Principal};
    use gramstay::listings::domain::{
        Listing, ListingId, NewListing, OwnerProfile, PropertyType,
    };
    use gramstay::listings::repository::{ListingRepository, RepositoryError};
    use gramstay::listings::storage::{StorageError, StorageGateway};
    use gramstay::submission::{
        PreviewAllocator, StagedImage, SubmissionCommitter, SubmissionSession,
    };

    pub(super) fn owner_principal() -> Principal {
        Principal {
            id: "owner-42".to_string(),
            email: "owner-42@example.com".to_string(),
        }
    }

    pub(super) struct StaticIdentity {
        principal: Option<Principal>,
    }

    impl StaticIdentity {
        pub(super) fn signed_in() -> Arc<Self> {
            Arc::new(Self {
                principal: Some(owner_principal()),
            })
        }

        pub(super) fn anonymous() -> Arc<Self> {
            Arc::new(Self { principal: None })
        }
    }

    impl IdentityProvider for StaticIdentity {
        fn current_principal(&self) -> Option<Principal> {
            self.principal.clone()
        }
    }

    #[derive(Default)]
    pub(super) struct RecordingStorage {
        pub(super) objects: Mutex<Vec<(String, usize)>>,
        pub(super) fail_uploads: bool,
    }

    impl RecordingStorage {
        pub(super) fn failing() -> Self {
            Self {
                objects: Mutex::new(Vec::new()),
                fail_uploads: true,
            }
        }

        pub(super) fn upload_count(&self) -> usize {
            self.objects.lock().expect("storage mutex poisoned").len()
        }
    }

    #[async_trait]
    impl StorageGateway for RecordingStorage {
        async fn upload(&self, key: &str, bytes: &[u8]) -> Result<String, StorageError> {
            if self.fail_uploads {
                return Err(StorageError::Upload("bucket unreachable".to_string()));
            }
            let mut guard = self.objects.lock().expect("storage mutex poisoned");
            guard.push((key.to_string(), bytes.len()));
            Ok(format!("https://storage.test/room_images/{key}"))
        }
    }

    #[derive(Default)]
    pub(super) struct RecordingRepository {
        pub(super) rows: Mutex<Vec<Listing>>,
        sequence: AtomicU64,
        pub(super) fail_inserts: bool,
    }

    impl RecordingRepository {
        pub(super) fn failing() -> Self {
            Self {
                rows: Mutex::new(Vec::new()),
                sequence: AtomicU64::new(0),
                fail_inserts: true,
            }
        }

        pub(super) fn insert_count(&self) -> usize {
            self.rows.lock().expect("repository mutex poisoned").len()
        }
    }

    #[async_trait]
    impl ListingRepository for RecordingRepository {
        async fn fetch_all(&self) -> Result<Vec<Listing>, RepositoryError> {
            Ok(self.rows.lock().expect("repository mutex poisoned").clone())
        }

        async fn fetch(&self, id: &ListingId) -> Result<Option<Listing>, RepositoryError> {
            let guard = self.rows.lock().expect("repository mutex poisoned");
            Ok(guard.iter().find(|row| &row.id == id).cloned())
        }

        async fn insert(&self, row: NewListing) -> Result<Listing, RepositoryError> {
            if self.fail_inserts {
                return Err(RepositoryError::Unavailable(
                    "rooms table unreachable".to_string(),
                ));
            }
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

    #[derive(Default)]
    pub(super) struct TrackingPreviews {
        sequence: AtomicU64,
        live: Mutex<HashSet<String>>,
    }

    impl TrackingPreviews {
        pub(super) fn live_count(&self) -> usize {
            self.live.lock().expect("preview mutex poisoned").len()
        }
    }

    impl PreviewAllocator for TrackingPreviews {
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

    pub(super) fn staged_photo(name: &str) -> StagedImage {
        StagedImage {
            file_name: name.to_string(),
            bytes: vec![0x89, 0x50, 0x4E, 0x47],
        }
    }

    pub(super) fn session_with(
        storage: Arc<RecordingStorage>,
        repository: Arc<RecordingRepository>,
        identity: Arc<StaticIdentity>,
        previews: Arc<TrackingPreviews>,
    ) -> SubmissionSession<RecordingStorage, RecordingRepository> {
        let committer = SubmissionCommitter::new(storage, repository);
        SubmissionSession::new(committer, identity, previews)
    }

    pub(super) fn fill_to_verification(
        session: &mut SubmissionSession<RecordingStorage, RecordingRepository>,
    ) {
        session
            .update_form(|form| {
                form.title = "Traditional Rural Cottage".to_string();
                form.property_type = Some(PropertyType::House);
                form.location = "Palakkad, Kerala".to_string();
                form.price = "7500".to_string();
                form.description = "Cottage surrounded by farmland.".to_string();
            })
            .expect("form editable");
        session.advance().expect("basic details complete");

        session
            .update_form(|form| {
                form.toggle_amenity("WiFi");
                form.toggle_amenity("Garden");
            })
            .expect("form editable");
        session.advance().expect("media step has no hard gate");

        session
            .update_form(|form| {
                form.owner_name = "Lakshmi Nair".to_string();
                form.owner_phone = "7654321890".to_string();
                form.authorization_acknowledged = true;
            })
            .expect("form editable");
    }
}

use std::sync::Arc;

use common::*;
use gramstay::listings::domain::PLACEHOLDER_IMAGE_URL;
use gramstay::submission::{
    CommitError, NavigationTarget, SubmissionError, SubmissionStep, SubmitOutcome,
};

#[tokio::test]
async fn staged_image_is_uploaded_then_inserted() {
    let storage = Arc::new(RecordingStorage::default());
    let repository = Arc::new(RecordingRepository::default());
    let previews = Arc::new(TrackingPreviews::default());
    let mut session = session_with(
        storage.clone(),
        repository.clone(),
        StaticIdentity::signed_in(),
        previews.clone(),
    );

    fill_to_verification(&mut session);
    session.stage_images(vec![staged_photo("front.jpg"), staged_photo("kitchen.jpg")]);

    let outcome = session.submit().await.expect("submission succeeds");
    let receipt = match outcome {
        SubmitOutcome::Completed(receipt) => receipt,
        SubmitOutcome::Ignored => panic!("first submit must not be ignored"),
    };

    // Exactly the first staged image is promoted, under the principal's key
    // namespace and with its extension preserved.
    assert_eq!(storage.upload_count(), 1);
    let (key, _) = storage.objects.lock().expect("storage mutex poisoned")[0].clone();
    assert!(key.starts_with("owner-42/"));
    assert!(key.ends_with(".jpg"));

    assert_eq!(repository.insert_count(), 1);
    assert!(receipt.listing.image_url.contains(&key));
    assert!(!receipt.listing.is_verified);
    assert_eq!(receipt.listing.user_id, "owner-42");
    assert!(receipt.listing.amenities.contains("WiFi"));
    assert_eq!(receipt.navigate, NavigationTarget::Discovery);

    // Session reset: pristine first step, staging emptied, previews released.
    assert_eq!(session.step(), Some(SubmissionStep::BasicDetails));
    assert!(session.form().title.is_empty());
    assert!(session.staged().is_empty());
    assert_eq!(previews.live_count(), 0);
}

#[tokio::test]
async fn zero_staged_images_uses_placeholder_and_skips_upload() {
    let storage = Arc::new(RecordingStorage::default());
    let repository = Arc::new(RecordingRepository::default());
    let mut session = session_with(
        storage.clone(),
        repository.clone(),
        StaticIdentity::signed_in(),
        Arc::new(TrackingPreviews::default()),
    );

    fill_to_verification(&mut session);

    let outcome = session.submit().await.expect("submission succeeds");
    let SubmitOutcome::Completed(receipt) = outcome else {
        panic!("first submit must not be ignored");
    };

    assert_eq!(storage.upload_count(), 0);
    assert_eq!(receipt.listing.image_url, PLACEHOLDER_IMAGE_URL);
    assert_eq!(receipt.listing.gallery(), vec![PLACEHOLDER_IMAGE_URL]);
}

#[tokio::test]
async fn upload_failure_aborts_before_insert_and_keeps_step3() {
    let storage = Arc::new(RecordingStorage::failing());
    let repository = Arc::new(RecordingRepository::default());
    let mut session = session_with(
        storage,
        repository.clone(),
        StaticIdentity::signed_in(),
        Arc::new(TrackingPreviews::default()),
    );

    fill_to_verification(&mut session);
    session.stage_images(vec![staged_photo("front.jpg")]);

    let err = session.submit().await.expect_err("upload failure surfaces");
    match err {
        SubmissionError::Commit(CommitError::Upload(upload)) => {
            assert!(upload.to_string().contains("bucket unreachable"));
        }
        other => panic!("unexpected error: {other}"),
    }

    assert_eq!(repository.insert_count(), 0);
    assert_eq!(session.step(), Some(SubmissionStep::Verification));
    assert_eq!(session.form().owner_name, "Lakshmi Nair");
    assert_eq!(session.staged().len(), 1);
}

#[tokio::test]
async fn insert_failure_after_upload_leaves_the_object_orphaned() {
    let storage = Arc::new(RecordingStorage::default());
    let repository = Arc::new(RecordingRepository::failing());
    let mut session = session_with(
        storage.clone(),
        repository,
        StaticIdentity::signed_in(),
        Arc::new(TrackingPreviews::default()),
    );

    fill_to_verification(&mut session);
    session.stage_images(vec![staged_photo("front.jpg")]);

    let err = session.submit().await.expect_err("insert failure surfaces");
    assert!(matches!(
        err,
        SubmissionError::Commit(CommitError::Insert(_))
    ));

    // No compensating delete: the uploaded object stays behind.
    assert_eq!(storage.upload_count(), 1);
    assert_eq!(session.step(), Some(SubmissionStep::Verification));
}

#[tokio::test]
async fn missing_principal_is_refused_before_any_collaborator_call() {
    let storage = Arc::new(RecordingStorage::default());
    let repository = Arc::new(RecordingRepository::default());
    let mut session = session_with(
        storage.clone(),
        repository.clone(),
        StaticIdentity::anonymous(),
        Arc::new(TrackingPreviews::default()),
    );

    fill_to_verification(&mut session);
    session.stage_images(vec![staged_photo("front.jpg")]);

    let err = session.submit().await.expect_err("anonymous submit refused");
    assert!(matches!(err, SubmissionError::Unauthorized));

    assert_eq!(storage.upload_count(), 0);
    assert_eq!(repository.insert_count(), 0);
    assert_eq!(session.step(), Some(SubmissionStep::Verification));
}

#[tokio::test]
async fn retry_after_failure_needs_no_re_entry_of_earlier_steps() {
    let storage = Arc::new(RecordingStorage::default());
    let failing_repository = Arc::new(RecordingRepository::failing());
    let mut session = session_with(
        storage.clone(),
        failing_repository,
        StaticIdentity::signed_in(),
        Arc::new(TrackingPreviews::default()),
    );

    fill_to_verification(&mut session);
    session.submit().await.expect_err("first attempt fails");

    // Nothing was re-entered; the same session simply retries. Swap in a
    // healthy committer path by building a new session carrying the same
    // form is unnecessary -- the flow still holds every field.
    assert_eq!(session.step(), Some(SubmissionStep::Verification));
    assert_eq!(session.form().title, "Traditional Rural Cottage");
    assert!(session.form().authorization_acknowledged);
}

#[tokio::test]
async fn removed_image_never_reaches_storage() {
    let storage = Arc::new(RecordingStorage::default());
    let repository = Arc::new(RecordingRepository::default());
    let mut session = session_with(
        storage.clone(),
        repository,
        StaticIdentity::signed_in(),
        Arc::new(TrackingPreviews::default()),
    );

    fill_to_verification(&mut session);
    let blurry = gramstay::submission::StagedImage {
        file_name: "blurry.png".to_string(),
        bytes: vec![0; 16],
    };
    session.stage_images(vec![blurry, staged_photo("front.jpg")]);
    session.remove_image(0).expect("index in range");

    let outcome = session.submit().await.expect("submission succeeds");
    let SubmitOutcome::Completed(_) = outcome else {
        panic!("first submit must not be ignored");
    };

    let objects = storage.objects.lock().expect("storage mutex poisoned");
    assert_eq!(objects.len(), 1);
    assert!(objects[0].0.ends_with(".jpg"), "the remaining image was promoted");
    assert_eq!(objects[0].1, staged_photo("front.jpg").bytes.len());
}
