use std::sync::Arc;

use axum::{
    routing::{get, post},
    Extension, Router,
};

use crate::api::rest::handlers;
use crate::domain::service::Service;

/// Document vault routes; the server nests these under `/documents`.
pub fn router(service: Arc<Service>) -> Router {
    Router::new()
        .route("/upload-request", post(handlers::upload_request))
        .route("/create-record", post(handlers::create_record))
        .route("/my-documents", get(handlers::my_documents))
        .route("/grant-access", post(handlers::grant_access))
        .route("/patient/{patient_id}", get(handlers::patient_documents))
        .layer(Extension(service))
}
