use std::sync::atomic::Ordering;
use std::sync::Arc;

use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use tracing::info;

use gramstay::auth::SessionHandle;
use gramstay::config::AppConfig;
use gramstay::error::AppError;
use gramstay::listings::router::ListingApi;
use gramstay::telemetry;

use crate::cli::ServeArgs;
use crate::infra::{
    AppState, InMemoryListingRepository, InMemoryPreviewAllocator, InMemoryStorageGateway,
};
use crate::routes::with_listing_routes;
use crate::seed::seed_listings;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let repository = Arc::new(InMemoryListingRepository::seeded(seed_listings()));
    let storage = Arc::new(InMemoryStorageGateway::new(
        config.media.storage_public_base.clone(),
    ));
    let previews = Arc::new(InMemoryPreviewAllocator::default());
    let identity = Arc::new(SessionHandle::restore(config.session.principal()));
    let api = Arc::new(ListingApi::new(
        repository,
        storage,
        identity,
        previews,
        config.media.placeholder_image_url.clone(),
    ));

    let app = with_listing_routes(api)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "listing marketplace service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
