use std::sync::Arc;

use auth::Identity;
use axum::{
    extract::Path,
    http::StatusCode,
    response::Json,
    Extension,
};
use uuid::Uuid;

use problem::ProblemResponse;

use crate::api::rest::dto::{
    CreateRecordReq, DocumentDto, GrantAccessReq, GrantAccessResp, UploadRequestReq, UploadSlotDto,
};
use crate::api::rest::error::map_domain_error;
use crate::domain::service::Service;

/// Issue a pre-signed upload URL for the authenticated patient.
pub async fn upload_request(
    Extension(svc): Extension<Arc<Service>>,
    identity: Identity,
    Json(req): Json<UploadRequestReq>,
) -> Result<Json<UploadSlotDto>, ProblemResponse> {
    let slot = svc
        .request_upload(identity, &req.file_name, &req.file_type)
        .await
        .map_err(|e| map_domain_error(&e))?;
    Ok(Json(UploadSlotDto::from(slot)))
}

/// Register metadata for an uploaded document.
pub async fn create_record(
    Extension(svc): Extension<Arc<Service>>,
    identity: Identity,
    Json(req): Json<CreateRecordReq>,
) -> Result<(StatusCode, Json<DocumentDto>), ProblemResponse> {
    let doc = svc
        .create_record(identity, req.into())
        .await
        .map_err(|e| map_domain_error(&e))?;
    Ok((StatusCode::CREATED, Json(DocumentDto::from(doc))))
}

/// The caller's own documents.
pub async fn my_documents(
    Extension(svc): Extension<Arc<Service>>,
    identity: Identity,
) -> Result<Json<Vec<DocumentDto>>, ProblemResponse> {
    let docs = svc
        .list_own(identity)
        .await
        .map_err(|e| map_domain_error(&e))?;
    Ok(Json(docs.into_iter().map(DocumentDto::from).collect()))
}

/// Grant a doctor access to the caller's documents.
pub async fn grant_access(
    Extension(svc): Extension<Arc<Service>>,
    identity: Identity,
    Json(req): Json<GrantAccessReq>,
) -> Result<Json<GrantAccessResp>, ProblemResponse> {
    svc.grant_access(identity, req.doctor_id)
        .await
        .map_err(|e| map_domain_error(&e))?;
    Ok(Json(GrantAccessResp {
        status: "Access granted".to_string(),
    }))
}

/// A granted doctor's view of one patient's documents.
pub async fn patient_documents(
    Extension(svc): Extension<Arc<Service>>,
    identity: Identity,
    Path(patient_id): Path<Uuid>,
) -> Result<Json<Vec<DocumentDto>>, ProblemResponse> {
    let docs = svc
        .list_for_doctor(identity, patient_id)
        .await
        .map_err(|e| map_domain_error(&e))?;
    Ok(Json(docs.into_iter().map(DocumentDto::from).collect()))
}
