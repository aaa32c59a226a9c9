// ============================
// crates/backend-lib/src/router.rs
// ============================
//! HTTP router and middleware stack.
use std::sync::Arc;
use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};
use crate::config::Settings;
use crate::handlers::{auth, boxes};
use crate::AppState;

/// Create the application router
pub fn create_router(state: Arc<AppState>) -> Router {
    let body_limit = state.settings.body_limit_bytes;
    let cors = cors_layer(&state.settings);

    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/createbox", post(boxes::create_box))
        .route("/boxes", get(boxes::list_boxes))
        .route("/boxes/count", get(boxes::count_boxes))
        .route(
            "/box/{id}",
            get(boxes::get_box)
                .delete(boxes::delete_box)
                .put(boxes::update_box),
        )
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(settings: &Settings) -> CorsLayer {
    let origin = if settings.cors_allow_origin == "*" {
        AllowOrigin::from(Any)
    } else {
        match HeaderValue::from_str(&settings.cors_allow_origin) {
            Ok(value) => AllowOrigin::exact(value),
            Err(_) => {
                tracing::warn!(origin = %settings.cors_allow_origin, "invalid CORS origin, allowing any");
                AllowOrigin::from(Any)
            },
        }
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(Any)
        .allow_headers(Any)
}
