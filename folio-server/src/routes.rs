//! API routes

use crate::config::CorsOrigins;
use crate::handlers;
use crate::state::AppState;
use axum::{
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

fn cors_layer(origins: &CorsOrigins) -> CorsLayer {
    let allow_origin = match origins {
        CorsOrigins::Any => AllowOrigin::any(),
        CorsOrigins::List(origins) => {
            let allowed: Vec<HeaderValue> =
                origins.iter().filter_map(|s| s.parse().ok()).collect();
            AllowOrigin::list(allowed)
        }
        CorsOrigins::Localhost => AllowOrigin::list([
            HeaderValue::from_static("http://localhost:3000"),
            HeaderValue::from_static("http://localhost:5173"),
            HeaderValue::from_static("http://127.0.0.1:3000"),
            HeaderValue::from_static("http://127.0.0.1:5173"),
        ]),
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Create the application router
pub fn create_router(state: AppState, cors: &CorsOrigins) -> Router {
    let api_routes = Router::new()
        // Book lookup
        .route("/fetchbook", get(handlers::fetch_book_missing_id))
        .route("/fetchbook/", get(handlers::fetch_book_missing_id))
        .route("/fetchbook/:book_id", get(handlers::fetch_book))
        // Summaries
        .route("/generateanalysis", post(handlers::generate_analysis));

    Router::new()
        .nest("/api", api_routes)
        .route("/health", get(handlers::health_check))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(cors))
        .with_state(state)
}
