use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::auth::IdentityProvider;
use crate::submission::{
    CommitError, FlowError, NavigationTarget, StagedImage, SubmissionCommitter, SubmissionError,
    SubmissionSession, SubmitOutcome,
};

use super::domain::{Listing, ListingCard, ListingId, ListingStatus, PropertyType};
use super::filter::FilterConfig;
use super::repository::{ListingRepository, RepositoryError};
use super::storage::StorageGateway;
use crate::submission::PreviewAllocator;

/// Collaborators the listing endpoints are built over.
pub struct ListingApi<S, R> {
    repository: Arc<R>,
    storage: Arc<S>,
    identity: Arc<dyn IdentityProvider>,
    previews: Arc<dyn PreviewAllocator>,
    placeholder_image_url: String,
}

impl<S, R> ListingApi<S, R> {
    pub fn new(
        repository: Arc<R>,
        storage: Arc<S>,
        identity: Arc<dyn IdentityProvider>,
        previews: Arc<dyn PreviewAllocator>,
        placeholder_image_url: impl Into<String>,
    ) -> Self {
        Self {
            repository,
            storage,
            identity,
            previews,
            placeholder_image_url: placeholder_image_url.into(),
        }
    }
}

/// Router builder for discovery and submission endpoints.
pub fn listing_router<S, R>(api: Arc<ListingApi<S, R>>) -> Router
where
    S: StorageGateway + 'static,
    R: ListingRepository + 'static,
{
    Router::new()
        .route(
            "/api/v1/listings",
            get(search_handler::<S, R>).post(submit_handler::<S, R>),
        )
        .route("/api/v1/listings/:listing_id", get(detail_handler::<S, R>))
        .with_state(api)
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct SearchParams {
    #[serde(default)]
    query: String,
    min_price: Option<u32>,
    max_price: Option<u32>,
    #[serde(default)]
    verified_only: bool,
}

impl SearchParams {
    fn filter(&self) -> FilterConfig {
        FilterConfig {
            text_query: self.query.clone(),
            min_price: self.min_price.unwrap_or(0),
            max_price: self.max_price.unwrap_or(u32::MAX),
            verified_only: self.verified_only,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct SearchResponse {
    pub(crate) count: usize,
    pub(crate) listings: Vec<ListingCard>,
}

pub(crate) async fn search_handler<S, R>(
    State(api): State<Arc<ListingApi<S, R>>>,
    Query(params): Query<SearchParams>,
) -> Response
where
    S: StorageGateway + 'static,
    R: ListingRepository + 'static,
{
    let rows = match api.repository.fetch_all().await {
        Ok(rows) => rows,
        Err(err) => return transport_failure(err),
    };

    let filtered = params.filter().apply(&rows);
    let response = SearchResponse {
        count: filtered.len(),
        listings: filtered.into_iter().map(Listing::card).collect(),
    };
    (StatusCode::OK, Json(response)).into_response()
}

pub(crate) async fn detail_handler<S, R>(
    State(api): State<Arc<ListingApi<S, R>>>,
    Path(listing_id): Path<String>,
) -> Response
where
    S: StorageGateway + 'static,
    R: ListingRepository + 'static,
{
    match api.repository.fetch(&ListingId(listing_id.clone())).await {
        Ok(Some(listing)) => (StatusCode::OK, Json(listing)).into_response(),
        Ok(None) => {
            let payload = json!({ "error": format!("listing {listing_id} not found") });
            (StatusCode::NOT_FOUND, Json(payload)).into_response()
        }
        Err(err) => transport_failure(err),
    }
}

/// Complete submission payload: the three collected steps in one request,
/// with any selected photos inlined as base64.
#[derive(Debug, Deserialize)]
pub(crate) struct SubmitListingRequest {
    #[serde(default)]
    title: String,
    #[serde(default)]
    property_type: Option<PropertyType>,
    #[serde(default)]
    location: String,
    #[serde(default)]
    price: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    amenities: Vec<String>,
    #[serde(default)]
    status: ListingStatus,
    #[serde(default)]
    owner_name: String,
    #[serde(default)]
    owner_phone: String,
    #[serde(default)]
    authorization_acknowledged: bool,
    #[serde(default)]
    images: Vec<ImagePayload>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ImagePayload {
    file_name: String,
    content_base64: String,
}

pub(crate) async fn submit_handler<S, R>(
    State(api): State<Arc<ListingApi<S, R>>>,
    Json(request): Json<SubmitListingRequest>,
) -> Response
where
    S: StorageGateway + 'static,
    R: ListingRepository + 'static,
{
    let staged = match decode_images(&request.images) {
        Ok(staged) => staged,
        Err(response) => return response,
    };

    let committer = SubmissionCommitter::new(api.storage.clone(), api.repository.clone())
        .with_placeholder(api.placeholder_image_url.clone());
    let mut session = SubmissionSession::new(committer, api.identity.clone(), api.previews.clone());

    // Replay the payload through the step machine so the exact same gates
    // apply as for an interactive client.
    if let Err(err) = drive_session(&mut session, request, staged) {
        return refusal(err);
    }

    match session.submit().await {
        Ok(SubmitOutcome::Completed(receipt)) => {
            let payload = json!({
                "message": "listing submitted for verification",
                "listing": receipt.listing,
                "navigate": receipt.navigate,
            });
            (StatusCode::CREATED, Json(payload)).into_response()
        }
        // A session built per request starts pristine and can never already
        // be in flight; the arm only keeps the match exhaustive.
        Ok(SubmitOutcome::Ignored) => {
            let payload = json!({ "status": "submission already in flight" });
            (StatusCode::ACCEPTED, Json(payload)).into_response()
        }
        Err(SubmissionError::Flow(err)) => refusal(err),
        Err(SubmissionError::Unauthorized) => {
            let payload = json!({
                "error": "authentication required",
                "navigate": NavigationTarget::Authentication,
            });
            (StatusCode::UNAUTHORIZED, Json(payload)).into_response()
        }
        Err(SubmissionError::Commit(CommitError::Upload(err))) => transport_failure(err),
        Err(SubmissionError::Commit(CommitError::Insert(err))) => transport_failure(err),
    }
}

fn drive_session<S, R>(
    session: &mut SubmissionSession<S, R>,
    request: SubmitListingRequest,
    staged: Vec<StagedImage>,
) -> Result<(), FlowError>
where
    S: StorageGateway,
    R: ListingRepository,
{
    session.update_form(|form| {
        form.title = request.title;
        form.property_type = request.property_type;
        form.location = request.location;
        form.price = request.price;
        form.description = request.description;
    })?;
    session.advance()?;

    session.stage_images(staged);
    session.update_form(|form| {
        for amenity in &request.amenities {
            form.amenities.insert(amenity.clone());
        }
        form.status = request.status;
    })?;
    session.advance()?;

    session.update_form(|form| {
        form.owner_name = request.owner_name;
        form.owner_phone = request.owner_phone;
        form.authorization_acknowledged = request.authorization_acknowledged;
    })?;
    Ok(())
}

fn decode_images(images: &[ImagePayload]) -> Result<Vec<StagedImage>, Response> {
    images
        .iter()
        .map(|payload| {
            base64::engine::general_purpose::STANDARD
                .decode(&payload.content_base64)
                .map(|bytes| StagedImage {
                    file_name: payload.file_name.clone(),
                    bytes,
                })
                .map_err(|_| {
                    let body = json!({
                        "error": format!("image '{}' is not valid base64", payload.file_name),
                    });
                    (StatusCode::UNPROCESSABLE_ENTITY, Json(body)).into_response()
                })
        })
        .collect()
}

fn refusal(err: FlowError) -> Response {
    let payload = match &err {
        FlowError::Validation(problems) => json!({
            "error": err.to_string(),
            "fields": problems,
        }),
        _ => json!({ "error": err.to_string() }),
    };
    (StatusCode::UNPROCESSABLE_ENTITY, Json(payload)).into_response()
}

/// Collaborator failures surface verbatim as a retryable condition.
fn transport_failure(err: impl std::fmt::Display) -> Response {
    let payload = json!({ "error": err.to_string() });
    (StatusCode::BAD_GATEWAY, Json(payload)).into_response()
}
