use std::sync::Arc;

use auth::Identity;
use axum::{http::StatusCode, response::Json, Extension};
use tracing::info;

use problem::ProblemResponse;

use crate::api::rest::dto::{
    AccountDto, DoctorDto, LoginReq, RefreshReq, RegisterReq, TokenPairDto,
};
use crate::api::rest::error::map_domain_error;
use crate::domain::service::Service;

/// Create a user and profile. Open endpoint.
pub async fn register(
    Extension(svc): Extension<Arc<Service>>,
    Json(req): Json<RegisterReq>,
) -> Result<(StatusCode, Json<AccountDto>), ProblemResponse> {
    info!(email = %req.email, "Registration request");

    let view = svc
        .register(req.into())
        .await
        .map_err(|e| map_domain_error(&e))?;
    Ok((StatusCode::CREATED, Json(AccountDto::from(view))))
}

/// Verify credentials and return an access + refresh token pair.
pub async fn login(
    Extension(svc): Extension<Arc<Service>>,
    Json(req): Json<LoginReq>,
) -> Result<Json<TokenPairDto>, ProblemResponse> {
    let (_, pair) = svc
        .login(&req.email, &req.password)
        .await
        .map_err(|e| map_domain_error(&e))?;
    Ok(Json(TokenPairDto::from(pair)))
}

/// Exchange a refresh token for a fresh pair.
pub async fn refresh(
    Extension(svc): Extension<Arc<Service>>,
    Json(req): Json<RefreshReq>,
) -> Result<Json<TokenPairDto>, ProblemResponse> {
    let pair = svc
        .refresh(&req.refresh)
        .await
        .map_err(|e| map_domain_error(&e))?;
    Ok(Json(TokenPairDto::from(pair)))
}

/// The authenticated caller's own account.
pub async fn profile(
    Extension(svc): Extension<Arc<Service>>,
    identity: Identity,
) -> Result<Json<AccountDto>, ProblemResponse> {
    let view = svc
        .get_account(identity.user_id)
        .await
        .map_err(|e| map_domain_error(&e))?;
    Ok(Json(AccountDto::from(view)))
}

/// Verified doctors, visible to any authenticated caller.
pub async fn list_doctors(
    Extension(svc): Extension<Arc<Service>>,
    _identity: Identity,
) -> Result<Json<Vec<DoctorDto>>, ProblemResponse> {
    let doctors = svc
        .list_verified_doctors()
        .await
        .map_err(|e| map_domain_error(&e))?;
    Ok(Json(doctors.into_iter().map(DoctorDto::from).collect()))
}
