use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;

use forsale_core::{DecorativePoint, InquiryRouting};
use forsale_relay::RelayClient;

use crate::{contact, telemetry};

#[derive(Clone)]
pub struct AppState {
    metrics: PrometheusHandle,
    relay: RelayClient,
    routing: Arc<InquiryRouting>,
    stars: Arc<[DecorativePoint]>,
}

impl AppState {
    /// Builds shared state. `stars` is generated once and reused by every render.
    pub fn new(
        metrics: PrometheusHandle,
        relay: RelayClient,
        routing: InquiryRouting,
        stars: Vec<DecorativePoint>,
    ) -> Self {
        Self {
            metrics,
            relay,
            routing: Arc::new(routing),
            stars: stars.into(),
        }
    }

    pub fn metrics(&self) -> &PrometheusHandle {
        &self.metrics
    }

    pub fn relay(&self) -> &RelayClient {
        &self.relay
    }

    pub fn routing(&self) -> &InquiryRouting {
        &self.routing
    }

    pub fn stars(&self) -> &[DecorativePoint] {
        &self.stars
    }
}

pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(contact::index))
        .route("/contact", post(contact::submit))
        .route("/healthz", get(healthz))
        .route("/metrics", get(metrics))
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

async fn metrics(State(state): State<AppState>) -> impl IntoResponse {
    let body = telemetry::render_metrics(state.metrics());
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        body,
    )
}
