use std::time::Duration;

use axum::{
    http::HeaderValue,
    middleware::from_fn_with_state,
    routing::{get, patch},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::AppConfig;
use crate::handlers::{protected, public};
use crate::middleware::jwt_auth_middleware;
use crate::state::AppState;

/// All routes with their state, without transport-level layers.
pub fn router(state: AppState) -> Router {
    Router::new()
        // Public
        .route("/", get(public::root))
        .route("/health", get(public::health))
        // Protected
        .merge(protected_routes(state.clone()))
        .with_state(state)
}

/// The router wrapped in CORS, request tracing and the request timeout.
pub fn app(state: AppState, config: &AppConfig) -> Router {
    let origins: Vec<HeaderValue> = config
        .security
        .cors_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any);

    let mut app = router(state)
        .layer(TimeoutLayer::new(Duration::from_secs(config.api.request_timeout_secs)))
        .layer(cors);

    if config.api.enable_request_logging {
        app = app.layer(TraceLayer::new_for_http());
    }

    app
}

fn protected_routes(state: AppState) -> Router<AppState> {
    use protected::{auth, org, user};

    Router::new()
        .route("/api/auth/whoami", get(auth::whoami_get))
        .route("/api/user/organizations", get(user::organizations_get))
        .route("/api/org/:slug", get(org::organization_get))
        .route("/api/org/:slug/access", get(org::access_get))
        .route("/api/org/:slug/collections", get(org::collections_get))
        .route("/api/org/:slug/collections/:collection_id", get(org::collection_get))
        .route("/api/org/:slug/collections/:collection_id/items", get(org::items_get))
        .route(
            "/api/org/:slug/collections/:collection_id/items/:item_id",
            get(org::item_get),
        )
        .route("/api/org/:slug/events", get(org::events_get))
        .route("/api/org/:slug/members", get(org::members_get))
        .route(
            "/api/org/:slug/members/:user_id",
            patch(org::member_patch).delete(org::member_delete),
        )
        // route_layer: unmatched paths still 404 instead of 401
        .route_layer(from_fn_with_state(state, jwt_auth_middleware))
}
