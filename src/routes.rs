//! Route registration
//! Assembles the API routes and applies the middleware stack

use axum::{
    routing::get,
    routing::post,
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::{handlers, middleware::AppState};

/// Build the application router
pub fn create_router(state: Arc<AppState>) -> Router {
    // Public endpoints: probes, registration, token issuance
    let public_routes = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/ready", get(handlers::health::readiness_check))
        .route("/user", post(handlers::user::register))
        .route("/user/get_token", get(handlers::auth::get_token));

    // Everything below requires a valid bearer token
    let authenticated_routes = Router::new()
        .route("/user", get(handlers::user::get_current_user))
        .route(
            "/tasks",
            get(handlers::task::list_tasks).post(handlers::task::create_task),
        )
        .route(
            "/task/{task_id}",
            get(handlers::task::get_task)
                .post(handlers::task::create_subtask)
                .put(handlers::task::replace_task)
                .patch(handlers::task::patch_task)
                .delete(handlers::task::delete_task),
        )
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            crate::auth::middleware::auth_middleware,
        ));

    Router::new()
        .merge(public_routes)
        .merge(authenticated_routes)
        .layer(axum::middleware::from_fn(
            crate::middleware::request_tracking_middleware,
        ))
        // The login widget posts from third-party pages, so the API answers
        // cross-origin requests
        .layer(CorsLayer::permissive())
        .with_state(state)
}
