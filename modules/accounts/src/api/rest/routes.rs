use std::sync::Arc;

use axum::{
    routing::{get, post},
    Extension, Router,
};

use crate::api::rest::handlers;
use crate::domain::service::Service;

/// Accounts routes. The token service extension is attached globally by the
/// server so the `Identity` extractor works across all modules.
pub fn router(service: Arc<Service>) -> Router {
    Router::new()
        .route("/register", post(handlers::register))
        .route("/login", post(handlers::login))
        .route("/refresh", post(handlers::refresh))
        .route("/profile", get(handlers::profile))
        .route("/doctors", get(handlers::list_doctors))
        .layer(Extension(service))
}
