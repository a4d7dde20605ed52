use std::sync::Arc;

use tracing::{info, warn};

use crate::auth::Principal;
use crate::listings::domain::{Listing, NewListing, PLACEHOLDER_IMAGE_URL};
use crate::listings::repository::{ListingRepository, RepositoryError};
use crate::listings::storage::{object_key, StorageError, StorageGateway};

use super::form::ValidatedSubmission;
use super::staging::StagedImage;

#[derive(Debug, Clone, thiserror::Error)]
pub enum CommitError {
    #[error(transparent)]
    Upload(StorageError),
    #[error(transparent)]
    Insert(RepositoryError),
}

/// Runs the ordered side effects of a validated submit: optional upload of
/// the first staged image, then exactly one record insert. Upload always
/// precedes insert, and an upload failure aborts the sequence before the
/// insert is attempted.
pub struct SubmissionCommitter<S, R> {
    storage: Arc<S>,
    repository: Arc<R>,
    placeholder_image_url: String,
}

impl<S, R> SubmissionCommitter<S, R>
where
    S: StorageGateway,
    R: ListingRepository,
{
    pub fn new(storage: Arc<S>, repository: Arc<R>) -> Self {
        Self {
            storage,
            repository,
            placeholder_image_url: PLACEHOLDER_IMAGE_URL.to_string(),
        }
    }

    pub fn with_placeholder(mut self, url: impl Into<String>) -> Self {
        self.placeholder_image_url = url.into();
        self
    }

    pub async fn commit(
        &self,
        principal: &Principal,
        submission: &ValidatedSubmission,
        image: Option<&StagedImage>,
    ) -> Result<Listing, CommitError> {
        let image_url = match image {
            Some(image) => {
                let key = object_key(&principal.id, &image.file_name);
                match self.storage.upload(&key, &image.bytes).await {
                    Ok(url) => url,
                    Err(err) => {
                        warn!(error = %err, "image upload failed, aborting before insert");
                        return Err(CommitError::Upload(err));
                    }
                }
            }
            // Zero staged images: the placeholder stands in and no upload
            // request is issued at all.
            None => self.placeholder_image_url.clone(),
        };

        let row = NewListing {
            title: submission.title.clone(),
            property_type: submission.property_type,
            location: submission.location.clone(),
            price: submission.price,
            description: submission.description.clone(),
            amenities: submission.amenities.clone(),
            status: submission.status,
            image_url,
            owner_name: submission.owner_name.clone(),
            owner_phone: submission.owner_phone.clone(),
            user_id: principal.id.clone(),
            is_verified: false,
        };

        // An insert failure here leaves the uploaded object orphaned in
        // storage; there is no compensating delete.
        let listing = self.repository.insert(row).await.map_err(CommitError::Insert)?;
        info!(listing_id = %listing.id.0, "listing stored, pending verification");
        Ok(listing)
    }
}
