use axum::{
    extract::State,
    http::{Method, StatusCode},
    middleware,
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    config::Config,
    db::ListingStore,
    middleware::{make_span_with_request_id, request_id_middleware},
};

pub mod properties;

/// Read-only state shared by all handlers
pub struct AppState {
    pub listings: Arc<ListingStore>,
    /// Reject searches that omit any of `roi`, `area` or `cost`
    pub require_all_params: bool,
}

impl AppState {
    pub fn new(listings: Arc<ListingStore>) -> Self {
        Self {
            listings,
            require_all_params: false,
        }
    }

    pub fn from_config(listings: Arc<ListingStore>, config: &Config) -> Self {
        Self {
            listings,
            require_all_params: config.require_all_params,
        }
    }

    pub fn with_required_params(mut self) -> Self {
        self.require_all_params = true;
        self
    }
}

/// Creates the application router with all routes
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET])
        .allow_origin(Any);

    Router::new()
        .route("/health", get(health_check))
        .route("/properties/search", get(properties::search))
        .layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn(request_id_middleware))
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
                .layer(cors),
        )
        .with_state(Arc::new(state))
}

/// Health check endpoint
async fn health_check(State(state): State<Arc<AppState>>) -> (StatusCode, Json<Value>) {
    (
        StatusCode::OK,
        Json(json!({ "status": "healthy", "listings": state.listings.len() })),
    )
}
