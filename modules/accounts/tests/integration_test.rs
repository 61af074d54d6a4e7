use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Extension, Router,
};
use sea_orm::{Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use tower::ServiceExt;

use accounts::api::rest::dto::{
    AccountDto, LoginReq, ProfileReq, RegisterReq, TokenPairDto,
};
use accounts::contract::model::{NewAccount, NewProfile};
use accounts::domain::error::DomainError;
use accounts::domain::service::{Service, ServiceConfig};
use accounts::infra::storage::migrations::Migrator;
use auth::{Role, TokenService};

async fn create_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to connect to test database");

    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    db
}

fn test_tokens() -> Arc<TokenService> {
    Arc::new(TokenService::new(
        b"test-secret",
        Duration::from_secs(900),
        Duration::from_secs(7 * 24 * 3600),
    ))
}

async fn create_test_service() -> Arc<Service> {
    let db = create_test_db().await;
    Arc::new(Service::new(db, test_tokens(), ServiceConfig::default()))
}

fn patient_account(email: &str) -> NewAccount {
    NewAccount {
        email: email.to_string(),
        password: "hunter2secret".to_string(),
        role: Role::Patient,
        profile: NewProfile {
            full_name: "Pat Example".to_string(),
            phone_number: "555-0100".to_string(),
            ..Default::default()
        },
    }
}

fn doctor_account(email: &str) -> NewAccount {
    NewAccount {
        email: email.to_string(),
        password: "hunter2secret".to_string(),
        role: Role::Doctor,
        profile: NewProfile {
            full_name: "Dr. Example".to_string(),
            phone_number: "555-0101".to_string(),
            specialty: Some("Cardiology".to_string()),
            medical_license_number: Some("LIC-1".to_string()),
            clinic_address: Some("1 Clinic Way".to_string()),
        },
    }
}

#[tokio::test]
async fn register_creates_user_and_profile() -> Result<()> {
    let service = create_test_service().await;

    let view = service.register(patient_account("a@x.com")).await?;
    assert_eq!(view.user.email, "a@x.com");
    assert_eq!(view.user.role, Role::Patient);
    assert!(view.user.is_active);
    assert_eq!(view.profile.user_id, view.user.id);
    assert_eq!(view.profile.full_name, "Pat Example");
    assert!(!view.profile.is_verified);

    // The same account is readable back as one joined projection.
    let loaded = service.get_account(view.user.id).await?;
    assert_eq!(loaded, view);

    Ok(())
}

#[tokio::test]
async fn register_rejects_duplicate_email() -> Result<()> {
    let service = create_test_service().await;

    service.register(patient_account("dup@x.com")).await?;
    let err = service
        .register(patient_account("dup@x.com"))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::EmailAlreadyExists { .. }));

    Ok(())
}

#[tokio::test]
async fn register_validates_input() -> Result<()> {
    let service = create_test_service().await;

    let mut bad_email = patient_account("not-an-email");
    bad_email.email = "not-an-email".to_string();
    assert!(matches!(
        service.register(bad_email).await.unwrap_err(),
        DomainError::InvalidEmail { .. }
    ));

    let mut short_pw = patient_account("b@x.com");
    short_pw.password = "short".to_string();
    assert!(matches!(
        service.register(short_pw).await.unwrap_err(),
        DomainError::PasswordTooShort { .. }
    ));

    let mut no_name = patient_account("c@x.com");
    no_name.profile.full_name = "  ".to_string();
    assert!(matches!(
        service.register(no_name).await.unwrap_err(),
        DomainError::EmptyFullName
    ));

    Ok(())
}

#[tokio::test]
async fn login_failure_is_uniform() -> Result<()> {
    let service = create_test_service().await;
    service.register(patient_account("p@x.com")).await?;

    // Correct credentials yield a pair.
    let (user, pair) = service.login("p@x.com", "hunter2secret").await?;
    assert_eq!(user.email, "p@x.com");
    assert!(!pair.access.is_empty());
    assert!(!pair.refresh.is_empty());

    // Wrong password and unknown email fail identically.
    let wrong_pw = service.login("p@x.com", "wrong").await.unwrap_err();
    let unknown = service.login("ghost@x.com", "whatever").await.unwrap_err();
    assert!(matches!(wrong_pw, DomainError::InvalidCredentials));
    assert!(matches!(unknown, DomainError::InvalidCredentials));
    assert_eq!(wrong_pw.to_string(), unknown.to_string());

    Ok(())
}

#[tokio::test]
async fn refresh_rotates_pair_and_rejects_access_token() -> Result<()> {
    let service = create_test_service().await;
    service.register(patient_account("r@x.com")).await?;

    let (_, pair) = service.login("r@x.com", "hunter2secret").await?;

    let rotated = service.refresh(&pair.refresh).await?;
    assert!(!rotated.access.is_empty());

    // An access token presented as a refresh token is rejected.
    let err = service.refresh(&pair.access).await.unwrap_err();
    assert!(matches!(err, DomainError::InvalidCredentials));

    Ok(())
}

#[tokio::test]
async fn doctor_directory_only_lists_verified() -> Result<()> {
    let service = create_test_service().await;

    let doc = service.register(doctor_account("d@x.com")).await?;
    service.register(patient_account("p2@x.com")).await?;

    // Freshly registered doctor is invisible.
    assert!(service.list_verified_doctors().await?.is_empty());

    service.verify_doctor(doc.user.id).await?;
    let listed = service.list_verified_doctors().await?;
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, doc.user.id);
    assert_eq!(listed[0].specialty.as_deref(), Some("Cardiology"));

    Ok(())
}

// ---- REST surface ----

async fn create_test_router() -> Router {
    let service = create_test_service().await;
    accounts::api::rest::routes::router(service).layer(Extension(test_tokens()))
}

fn json_request(method: &str, uri: &str, body: impl serde::Serialize) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

#[tokio::test]
async fn rest_register_login_profile_flow() -> Result<()> {
    let router = create_test_router().await;

    let register = RegisterReq {
        email: "rest@x.com".to_string(),
        password: "hunter2secret".to_string(),
        role: Role::Patient,
        profile: ProfileReq {
            full_name: "Rest Patient".to_string(),
            ..Default::default()
        },
    };

    let response = router
        .clone()
        .oneshot(json_request("POST", "/register", &register))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    let account: AccountDto = serde_json::from_slice(&body)?;
    assert_eq!(account.email, "rest@x.com");
    // The response must not echo the password in any form.
    assert!(!String::from_utf8_lossy(&body).contains("hunter2secret"));

    let login = LoginReq {
        email: "rest@x.com".to_string(),
        password: "hunter2secret".to_string(),
    };
    let response = router
        .clone()
        .oneshot(json_request("POST", "/login", &login))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    let tokens: TokenPairDto = serde_json::from_slice(&body)?;

    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/profile")
                .header("authorization", format!("Bearer {}", tokens.access))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    let me: AccountDto = serde_json::from_slice(&body)?;
    assert_eq!(me.id, account.id);

    Ok(())
}

#[tokio::test]
async fn rest_profile_requires_token() -> Result<()> {
    let router = create_test_router().await;

    let response = router
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/profile")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    Ok(())
}

#[tokio::test]
async fn rest_login_failures_share_one_shape() -> Result<()> {
    let router = create_test_router().await;

    let register = RegisterReq {
        email: "uni@x.com".to_string(),
        password: "hunter2secret".to_string(),
        role: Role::Patient,
        profile: ProfileReq {
            full_name: "Uniform".to_string(),
            ..Default::default()
        },
    };
    let response = router
        .clone()
        .oneshot(json_request("POST", "/register", &register))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let mut bodies = Vec::new();
    for (email, password) in [("uni@x.com", "wrong-password"), ("nobody@x.com", "whatever")] {
        let login = LoginReq {
            email: email.to_string(),
            password: password.to_string(),
        };
        let response = router
            .clone()
            .oneshot(json_request("POST", "/login", &login))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        bodies.push(axum::body::to_bytes(response.into_body(), usize::MAX).await?);
    }
    assert_eq!(bodies[0], bodies[1]);

    Ok(())
}
