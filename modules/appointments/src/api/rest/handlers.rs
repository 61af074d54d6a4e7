use std::sync::Arc;

use auth::Identity;
use axum::{
    extract::Path,
    http::StatusCode,
    response::Json,
    Extension,
};
use uuid::Uuid;

use problem::{bad_request, ProblemResponse};

use crate::api::rest::dto::{AppointmentDto, BookAppointmentReq, SetStatusReq};
use crate::api::rest::error::map_domain_error;
use crate::contract::model::AppointmentStatus;
use crate::domain::service::Service;

/// Book an appointment as the authenticated patient.
pub async fn book(
    Extension(svc): Extension<Arc<Service>>,
    identity: Identity,
    Json(req): Json<BookAppointmentReq>,
) -> Result<(StatusCode, Json<AppointmentDto>), ProblemResponse> {
    let view = svc
        .book(identity, req.into())
        .await
        .map_err(|e| map_domain_error(&e))?;
    Ok((StatusCode::CREATED, Json(AppointmentDto::from(view))))
}

/// The caller's appointments, filtered by their side of the relation.
pub async fn my_appointments(
    Extension(svc): Extension<Arc<Service>>,
    identity: Identity,
) -> Result<Json<Vec<AppointmentDto>>, ProblemResponse> {
    let views = svc
        .list_for(identity)
        .await
        .map_err(|e| map_domain_error(&e))?;
    Ok(Json(views.into_iter().map(AppointmentDto::from).collect()))
}

/// Confirm or cancel an appointment.
pub async fn set_status(
    Extension(svc): Extension<Arc<Service>>,
    identity: Identity,
    Path(id): Path<Uuid>,
    Json(req): Json<SetStatusReq>,
) -> Result<Json<AppointmentDto>, ProblemResponse> {
    let target = AppointmentStatus::parse(&req.status)
        .ok_or_else(|| bad_request(format!("unknown status '{}'", req.status)))?;

    let view = svc
        .set_status(identity, id, target)
        .await
        .map_err(|e| map_domain_error(&e))?;
    Ok(Json(AppointmentDto::from(view)))
}
