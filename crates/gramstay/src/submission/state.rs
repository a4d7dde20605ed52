use serde::Serialize;

use super::form::{ListingForm, ValidatedSubmission};

/// Ordered steps an owner walks through before submitting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionStep {
    BasicDetails,
    MediaAmenities,
    Verification,
}

impl SubmissionStep {
    pub const fn label(self) -> &'static str {
        match self {
            Self::BasicDetails => "Basic Details",
            Self::MediaAmenities => "Photos & Amenities",
            Self::Verification => "Verification",
        }
    }
}

/// Tagged state machine for the submission flow. Every state carries the
/// accumulated form record, so a submit from step 1 or an edit during an
/// outstanding request is unrepresentable rather than merely unreachable.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionState {
    BasicDetails(ListingForm),
    MediaAmenities(ListingForm),
    Verification(ListingForm),
    Submitting(ListingForm),
}

impl SubmissionState {
    fn form(&self) -> &ListingForm {
        match self {
            Self::BasicDetails(form)
            | Self::MediaAmenities(form)
            | Self::Verification(form)
            | Self::Submitting(form) => form,
        }
    }
}

/// Field-level refusal detail surfaced to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub step: SubmissionStep,
    pub field: &'static str,
    pub message: &'static str,
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum FlowError {
    #[error("required fields are missing or invalid")]
    Validation(Vec<FieldError>),
    #[error("the form cannot change while a submission is in flight")]
    InFlight,
    #[error("no earlier step to return to")]
    AtFirstStep,
    #[error("no further step before submit")]
    AtFinalStep,
    #[error("submit is only available from the verification step")]
    NotAtVerification,
}

/// Outcome of the submit gate: either a validated snapshot to commit, or a
/// deliberate no-op because a request is already outstanding.
#[derive(Debug)]
pub enum SubmitGate {
    Started(ValidatedSubmission),
    AlreadyInFlight,
}

/// Where the presentation layer should route after a terminal outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NavigationTarget {
    Discovery,
    Authentication,
}

#[derive(Debug)]
pub struct SubmissionFlow {
    state: SubmissionState,
}

impl Default for SubmissionFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl SubmissionFlow {
    pub fn new() -> Self {
        Self {
            state: SubmissionState::BasicDetails(ListingForm::default()),
        }
    }

    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    pub fn form(&self) -> &ListingForm {
        self.state.form()
    }

    pub fn step(&self) -> Option<SubmissionStep> {
        match self.state {
            SubmissionState::BasicDetails(_) => Some(SubmissionStep::BasicDetails),
            SubmissionState::MediaAmenities(_) => Some(SubmissionStep::MediaAmenities),
            SubmissionState::Verification(_) => Some(SubmissionStep::Verification),
            SubmissionState::Submitting(_) => None,
        }
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.state, SubmissionState::Submitting(_))
    }

    /// Apply an edit to the captured form. Refused while a submission is
    /// outstanding; the in-flight snapshot must not change underneath it.
    pub fn update(&mut self, edit: impl FnOnce(&mut ListingForm)) -> Result<(), FlowError> {
        match &mut self.state {
            SubmissionState::Submitting(_) => Err(FlowError::InFlight),
            SubmissionState::BasicDetails(form)
            | SubmissionState::MediaAmenities(form)
            | SubmissionState::Verification(form) => {
                edit(form);
                Ok(())
            }
        }
    }

    /// Move forward one step. Step 1 gates on its required fields; step 2
    /// has only advisory content and always advances.
    pub fn advance(&mut self) -> Result<SubmissionStep, FlowError> {
        match std::mem::replace(&mut self.state, SubmissionState::BasicDetails(ListingForm::default()))
        {
            SubmissionState::BasicDetails(form) => {
                let problems = validate_basic_details(&form);
                if problems.is_empty() {
                    self.state = SubmissionState::MediaAmenities(form);
                    Ok(SubmissionStep::MediaAmenities)
                } else {
                    self.state = SubmissionState::BasicDetails(form);
                    Err(FlowError::Validation(problems))
                }
            }
            SubmissionState::MediaAmenities(form) => {
                self.state = SubmissionState::Verification(form);
                Ok(SubmissionStep::Verification)
            }
            state @ SubmissionState::Verification(_) => {
                self.state = state;
                Err(FlowError::AtFinalStep)
            }
            state @ SubmissionState::Submitting(_) => {
                self.state = state;
                Err(FlowError::InFlight)
            }
        }
    }

    /// Move back exactly one step, retaining every entered value.
    pub fn retreat(&mut self) -> Result<SubmissionStep, FlowError> {
        match std::mem::replace(&mut self.state, SubmissionState::BasicDetails(ListingForm::default()))
        {
            SubmissionState::MediaAmenities(form) => {
                self.state = SubmissionState::BasicDetails(form);
                Ok(SubmissionStep::BasicDetails)
            }
            SubmissionState::Verification(form) => {
                self.state = SubmissionState::MediaAmenities(form);
                Ok(SubmissionStep::MediaAmenities)
            }
            state @ SubmissionState::BasicDetails(_) => {
                self.state = state;
                Err(FlowError::AtFirstStep)
            }
            state @ SubmissionState::Submitting(_) => {
                self.state = state;
                Err(FlowError::InFlight)
            }
        }
    }

    /// Validate the full form and move into the transient `Submitting`
    /// overlay. A second call while a request is outstanding is an ignored
    /// no-op, which is what prevents duplicate inserts from repeated user
    /// action. Step-1 fields are re-checked here because they stay editable
    /// on every step.
    pub fn begin_submit(&mut self) -> Result<SubmitGate, FlowError> {
        match &self.state {
            SubmissionState::Submitting(_) => return Ok(SubmitGate::AlreadyInFlight),
            SubmissionState::Verification(form) => {
                let mut problems = validate_basic_details(form);
                problems.extend(validate_verification(form));
                if !problems.is_empty() {
                    return Err(FlowError::Validation(problems));
                }
            }
            _ => return Err(FlowError::NotAtVerification),
        }

        let SubmissionState::Verification(form) = std::mem::replace(
            &mut self.state,
            SubmissionState::BasicDetails(ListingForm::default()),
        ) else {
            unreachable!("guarded by the match above");
        };

        let submission = validated_submission(&form);
        self.state = SubmissionState::Submitting(form);
        Ok(SubmitGate::Started(submission))
    }

    /// Success path: reset to a pristine first step, ready for a fresh
    /// listing, and hand the presentation layer its navigation signal.
    pub fn resolve_success(&mut self) -> NavigationTarget {
        self.state = SubmissionState::BasicDetails(ListingForm::default());
        NavigationTarget::Discovery
    }

    /// Failure path: return to verification with all entered data intact so
    /// the owner can retry without re-entering earlier steps.
    pub fn resolve_failure(&mut self) {
        if let SubmissionState::Submitting(form) = std::mem::replace(
            &mut self.state,
            SubmissionState::BasicDetails(ListingForm::default()),
        ) {
            self.state = SubmissionState::Verification(form);
        }
    }
}

fn validate_basic_details(form: &ListingForm) -> Vec<FieldError> {
    let mut problems = Vec::new();
    let step = SubmissionStep::BasicDetails;

    if form.title.trim().is_empty() {
        problems.push(FieldError {
            step,
            field: "title",
            message: "property title is required",
        });
    }
    if form.property_type.is_none() {
        problems.push(FieldError {
            step,
            field: "property_type",
            message: "property type is required",
        });
    }
    if form.location.trim().is_empty() {
        problems.push(FieldError {
            step,
            field: "location",
            message: "location is required",
        });
    }
    if form.parsed_price().is_none() {
        problems.push(FieldError {
            step,
            field: "price",
            message: "monthly rent must be a whole non-negative number",
        });
    }
    if form.description.trim().is_empty() {
        problems.push(FieldError {
            step,
            field: "description",
            message: "description is required",
        });
    }

    problems
}

fn validate_verification(form: &ListingForm) -> Vec<FieldError> {
    let mut problems = Vec::new();
    let step = SubmissionStep::Verification;

    if form.owner_name.trim().is_empty() {
        problems.push(FieldError {
            step,
            field: "owner_name",
            message: "owner name is required",
        });
    }
    if !is_ten_digit_phone(form.owner_phone.trim()) {
        problems.push(FieldError {
            step,
            field: "owner_phone",
            message: "phone number must be exactly 10 digits",
        });
    }
    if !form.authorization_acknowledged {
        problems.push(FieldError {
            step,
            field: "authorization_acknowledged",
            message: "listing authorization must be confirmed",
        });
    }

    problems
}

fn is_ten_digit_phone(raw: &str) -> bool {
    raw.len() == 10 && raw.bytes().all(|byte| byte.is_ascii_digit())
}

fn validated_submission(form: &ListingForm) -> ValidatedSubmission {
    ValidatedSubmission {
        title: form.title.trim().to_string(),
        property_type: form
            .property_type
            .expect("basic details validated before verification"),
        location: form.location.trim().to_string(),
        price: form
            .parsed_price()
            .expect("basic details validated before verification"),
        description: form.description.clone(),
        amenities: form.amenities.clone(),
        status: form.status,
        owner_name: form.owner_name.trim().to_string(),
        owner_phone: form.owner_phone.trim().to_string(),
    }
}
