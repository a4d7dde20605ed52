use std::sync::Arc;

use tracing::warn;

use crate::auth::IdentityProvider;
use crate::listings::domain::Listing;
use crate::listings::repository::ListingRepository;
use crate::listings::storage::StorageGateway;

use super::committer::{CommitError, SubmissionCommitter};
use super::form::ListingForm;
use super::staging::{ImageStaging, PreviewAllocator, StagedImage, StagingError};
use super::state::{FlowError, NavigationTarget, SubmissionFlow, SubmissionStep, SubmitGate};

/// Terminal result of one submit attempt.
#[derive(Debug)]
pub enum SubmitOutcome {
    Completed(SubmissionReceipt),
    /// A request was already outstanding; nothing happened.
    Ignored,
}

#[derive(Debug)]
pub struct SubmissionReceipt {
    pub listing: Listing,
    pub navigate: NavigationTarget,
}

#[derive(Debug, thiserror::Error)]
pub enum SubmissionError {
    #[error(transparent)]
    Flow(#[from] FlowError),
    #[error("authentication required")]
    Unauthorized,
    #[error(transparent)]
    Commit(#[from] CommitError),
}

/// One owner's submission attempt: the state machine, the staged images,
/// the committer, and a read handle on the identity collaborator.
///
/// All mutable state is owned exclusively by this session; independent
/// sessions share nothing and need no coordination.
pub struct SubmissionSession<S, R> {
    flow: SubmissionFlow,
    staging: ImageStaging,
    committer: SubmissionCommitter<S, R>,
    identity: Arc<dyn IdentityProvider>,
}

impl<S, R> SubmissionSession<S, R>
where
    S: StorageGateway,
    R: ListingRepository,
{
    pub fn new(
        committer: SubmissionCommitter<S, R>,
        identity: Arc<dyn IdentityProvider>,
        previews: Arc<dyn PreviewAllocator>,
    ) -> Self {
        Self {
            flow: SubmissionFlow::new(),
            staging: ImageStaging::new(previews),
            committer,
            identity,
        }
    }

    pub fn step(&self) -> Option<SubmissionStep> {
        self.flow.step()
    }

    pub fn form(&self) -> &ListingForm {
        self.flow.form()
    }

    pub fn staged(&self) -> &ImageStaging {
        &self.staging
    }

    pub fn update_form(&mut self, edit: impl FnOnce(&mut ListingForm)) -> Result<(), FlowError> {
        self.flow.update(edit)
    }

    pub fn advance(&mut self) -> Result<SubmissionStep, FlowError> {
        self.flow.advance()
    }

    pub fn retreat(&mut self) -> Result<SubmissionStep, FlowError> {
        self.flow.retreat()
    }

    pub fn stage_images(&mut self, batch: Vec<StagedImage>) {
        self.staging.stage(batch);
    }

    pub fn remove_image(&mut self, index: usize) -> Result<(), StagingError> {
        self.staging.remove(index)
    }

    /// Drive the full submit contract: FSM validation, the authorization
    /// gate, the committer's upload-then-insert sequence, and the terminal
    /// state transition. Failures of any kind land back at the verification
    /// step with every entered value intact.
    pub async fn submit(&mut self) -> Result<SubmitOutcome, SubmissionError> {
        let submission = match self.flow.begin_submit()? {
            SubmitGate::AlreadyInFlight => return Ok(SubmitOutcome::Ignored),
            SubmitGate::Started(submission) => submission,
        };

        // Authorization gate sits before any collaborator call.
        let Some(principal) = self.identity.current_principal() else {
            self.flow.resolve_failure();
            return Err(SubmissionError::Unauthorized);
        };

        match self
            .committer
            .commit(&principal, &submission, self.staging.first())
            .await
        {
            Ok(listing) => {
                self.staging.clear();
                let navigate = self.flow.resolve_success();
                Ok(SubmitOutcome::Completed(SubmissionReceipt { listing, navigate }))
            }
            Err(err) => {
                warn!(error = %err, "listing submission failed");
                self.flow.resolve_failure();
                Err(SubmissionError::Commit(err))
            }
        }
    }
}
