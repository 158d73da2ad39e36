use axum::{
    routing::{get, patch, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use domain::catalog::Catalog;
use domain::store::RecordStore;

use crate::config::Config;
use crate::routes::{ballots, groups, health, invites, results, setup};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RecordStore>,
    pub catalog: Arc<Catalog>,
    pub config: Arc<Config>,
}

pub fn create_app(config: Config, store: Arc<dyn RecordStore>, catalog: Catalog) -> Router {
    let config = Arc::new(config);

    let state = AppState {
        store,
        catalog: Arc::new(catalog),
        config: config.clone(),
    };

    // Build CORS layer based on configuration
    let cors = if config.security.cors_origins.is_empty() {
        // Default: allow any origin (for development)
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        use tower_http::cors::AllowOrigin;
        let origins: Vec<_> = config
            .security
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    };

    // Group-scoped routes. Tokens travel as query parameters (`k` for the
    // host key, `t` for invite tokens), never as path segments.
    let api_routes = Router::new()
        .route("/api/v1/groups", post(groups::create_group))
        .route(
            "/api/v1/groups/:code/invites",
            post(invites::issue_invites).get(invites::list_invites),
        )
        .route(
            "/api/v1/groups/:code/invites/:invite_id",
            patch(invites::rename_invite),
        )
        .route(
            "/api/v1/groups/:code/setup",
            post(setup::apply_setup).get(setup::get_setup),
        )
        .route(
            "/api/v1/groups/:code/ballot",
            get(ballots::get_ballot_context).post(ballots::submit_ballot),
        )
        .route("/api/v1/groups/:code/status", get(results::get_status))
        .route("/api/v1/groups/:code/reveal", post(results::reveal))
        .route("/api/v1/groups/:code/results", get(results::get_results))
        .route(
            "/api/v1/groups/:code/public-results",
            get(results::get_public_results),
        );

    let health_routes = Router::new()
        .route("/api/health", get(health::health_check))
        .route("/api/health/ready", get(health::ready));

    Router::new()
        .merge(api_routes)
        .merge(health_routes)
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
