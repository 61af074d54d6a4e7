use std::sync::Arc;

use axum::{
    routing::{get, post},
    Extension, Router,
};

use crate::api::rest::handlers;
use crate::domain::service::Service;

/// Appointment routes; the server nests these under `/appointments`.
pub fn router(service: Arc<Service>) -> Router {
    Router::new()
        .route("/book", post(handlers::book))
        .route("/my-appointments", get(handlers::my_appointments))
        .route("/{id}/status", post(handlers::set_status))
        .layer(Extension(service))
}
