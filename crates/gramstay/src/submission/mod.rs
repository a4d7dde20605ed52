//! Multi-step listing submission: form state, the step state machine,
//! local image staging, and the commit orchestration against the storage
//! and record-store collaborators.

pub mod committer;
pub mod form;
pub mod session;
pub mod staging;
pub mod state;

pub use committer::{CommitError, SubmissionCommitter};
pub use form::{ListingForm, ValidatedSubmission};
pub use session::{SubmissionError, SubmissionReceipt, SubmissionSession, SubmitOutcome};
pub use staging::{ImageStaging, Preview, PreviewAllocator, StagedImage, StagingError};
pub use state::{
    FieldError, FlowError, NavigationTarget, SubmissionFlow, SubmissionState, SubmissionStep,
    SubmitGate,
};
