use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Extension, Router,
};
use sea_orm::{Database, DatabaseConnection, EntityTrait, PaginatorTrait};
use sea_orm_migration::MigratorTrait;
use tower::ServiceExt;
use uuid::Uuid;

use accounts::contract::model::{NewAccount, NewProfile};
use accounts::gateways::local::AccountsLocalClient;
use auth::{Identity, Role, TokenService};
use documents::api::rest::dto::{
    CreateRecordReq, DocumentDto, GrantAccessReq, UploadRequestReq, UploadSlotDto,
};
use documents::contract::model::NewDocumentRecord;
use documents::domain::error::DomainError;
use documents::domain::ports::{DocumentStore, PresignedUpload};
use documents::domain::service::{Service, ServiceConfig};
use documents::infra::storage::entity;

/// In-process store that records every presign request it receives.
#[derive(Default)]
struct RecordingStore {
    calls: Mutex<Vec<(String, String, Duration)>>,
}

#[async_trait]
impl DocumentStore for RecordingStore {
    async fn presign_put(
        &self,
        key: &str,
        content_type: &str,
        ttl: Duration,
    ) -> anyhow::Result<PresignedUpload> {
        self.calls
            .lock()
            .unwrap()
            .push((key.to_string(), content_type.to_string(), ttl));
        Ok(PresignedUpload {
            url: format!("https://storage.test/{key}?sig=stub"),
        })
    }
}

/// In-process store whose presign call always fails, like a bucket with
/// revoked credentials.
struct FailingStore;

#[async_trait]
impl DocumentStore for FailingStore {
    async fn presign_put(
        &self,
        _key: &str,
        _content_type: &str,
        _ttl: Duration,
    ) -> anyhow::Result<PresignedUpload> {
        Err(anyhow::anyhow!("credential chain exhausted"))
    }
}

struct TestEnv {
    db: DatabaseConnection,
    service: Arc<Service>,
    accounts: Arc<accounts::domain::service::Service>,
    store: Arc<RecordingStore>,
    tokens: Arc<TokenService>,
}

async fn create_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to connect to test database");

    accounts::infra::storage::migrations::Migrator::up(&db, None)
        .await
        .expect("Failed to run accounts migrations");
    documents::infra::storage::migrations::Migrator::up(&db, None)
        .await
        .expect("Failed to run documents migrations");

    db
}

async fn create_test_env() -> TestEnv {
    let db = create_test_db().await;
    let tokens = Arc::new(TokenService::new(
        b"test-secret",
        Duration::from_secs(900),
        Duration::from_secs(3600),
    ));
    let accounts_svc = Arc::new(accounts::domain::service::Service::new(
        db.clone(),
        tokens.clone(),
        accounts::domain::service::ServiceConfig::default(),
    ));
    let client = Arc::new(AccountsLocalClient::new(accounts_svc.clone()));
    let store = Arc::new(RecordingStore::default());
    TestEnv {
        db: db.clone(),
        service: Arc::new(Service::new(
            db,
            store.clone(),
            client,
            ServiceConfig::default(),
        )),
        accounts: accounts_svc,
        store,
        tokens,
    }
}

async fn register(env: &TestEnv, email: &str, role: Role) -> Identity {
    let view = env
        .accounts
        .register(NewAccount {
            email: email.to_string(),
            password: "hunter2secret".to_string(),
            role,
            profile: NewProfile {
                full_name: format!("User {email}"),
                phone_number: "555-0100".to_string(),
                ..Default::default()
            },
        })
        .await
        .expect("registration failed");
    Identity {
        user_id: view.user.id,
        role,
    }
}

fn record(key: &str) -> NewDocumentRecord {
    NewDocumentRecord {
        file_name: "scan.pdf".to_string(),
        file_type: "application/pdf".to_string(),
        storage_key: key.to_string(),
        file_size: 2048,
    }
}

#[tokio::test]
async fn upload_request_issues_scoped_slot() -> Result<()> {
    let env = create_test_env().await;
    let patient = register(&env, "p@x.com", Role::Patient).await;

    let slot = env
        .service
        .request_upload(patient, "scan.pdf", "application/pdf")
        .await?;

    let expected_key = format!("documents/{}/scan.pdf", patient.user_id);
    assert_eq!(slot.key, expected_key);
    assert_eq!(slot.expires_in, Duration::from_secs(3600));
    assert!(slot.url.contains(&expected_key));

    // The store saw exactly one presign with the key, type and TTL intact.
    let calls = env.store.calls.lock().unwrap();
    assert_eq!(
        *calls,
        vec![(
            expected_key,
            "application/pdf".to_string(),
            Duration::from_secs(3600)
        )]
    );

    // Nothing was persisted yet.
    drop(calls);
    let count = entity::document::Entity::find().count(&env.db).await?;
    assert_eq!(count, 0);

    Ok(())
}

#[tokio::test]
async fn upload_request_requires_patient_role() -> Result<()> {
    let env = create_test_env().await;
    let doctor = register(&env, "d@x.com", Role::Doctor).await;

    let err = env
        .service
        .request_upload(doctor, "scan.pdf", "application/pdf")
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::PatientRoleRequired));
    assert!(env.store.calls.lock().unwrap().is_empty());

    Ok(())
}

#[tokio::test]
async fn upload_request_requires_file_metadata() -> Result<()> {
    let env = create_test_env().await;
    let patient = register(&env, "p@x.com", Role::Patient).await;

    let err = env
        .service
        .request_upload(patient, "", "application/pdf")
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::MissingFileMetadata));

    let err = env
        .service
        .request_upload(patient, "scan.pdf", "  ")
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::MissingFileMetadata));

    // Validation fires before the store is ever consulted.
    assert!(env.store.calls.lock().unwrap().is_empty());

    Ok(())
}

#[tokio::test]
async fn upload_request_surfaces_store_failure() -> Result<()> {
    let env = create_test_env().await;
    let patient = register(&env, "p@x.com", Role::Patient).await;

    let client = Arc::new(AccountsLocalClient::new(env.accounts.clone()));
    let failing = Service::new(
        env.db.clone(),
        Arc::new(FailingStore),
        client,
        ServiceConfig::default(),
    );

    let err = failing
        .request_upload(patient, "scan.pdf", "application/pdf")
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Storage { .. }));

    Ok(())
}

#[tokio::test]
async fn duplicate_storage_key_is_rejected() -> Result<()> {
    let env = create_test_env().await;
    let patient = register(&env, "p@x.com", Role::Patient).await;

    env.service
        .create_record(patient, record("documents/a/scan.pdf"))
        .await?;

    let err = env
        .service
        .create_record(patient, record("documents/a/scan.pdf"))
        .await
        .unwrap_err();
    // The conflict names the offending key.
    match err {
        DomainError::StorageKeyTaken { key } => assert_eq!(key, "documents/a/scan.pdf"),
        other => panic!("expected StorageKeyTaken, got {other:?}"),
    }

    let count = entity::document::Entity::find().count(&env.db).await?;
    assert_eq!(count, 1);

    Ok(())
}

#[tokio::test]
async fn grant_access_is_idempotent() -> Result<()> {
    let env = create_test_env().await;
    let patient = register(&env, "p@x.com", Role::Patient).await;
    let doctor = register(&env, "d@x.com", Role::Doctor).await;

    env.service.grant_access(patient, doctor.user_id).await?;
    env.service.grant_access(patient, doctor.user_id).await?;

    let count = entity::access::Entity::find().count(&env.db).await?;
    assert_eq!(count, 1);

    Ok(())
}

#[tokio::test]
async fn grant_access_rejects_non_doctor_target() -> Result<()> {
    let env = create_test_env().await;
    let patient = register(&env, "p@x.com", Role::Patient).await;
    let other_patient = register(&env, "p2@x.com", Role::Patient).await;

    // Another patient is not a grantable target, nor is a random id.
    let err = env
        .service
        .grant_access(patient, other_patient.user_id)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::DoctorNotFound { .. }));

    let err = env
        .service
        .grant_access(patient, Uuid::new_v4())
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::DoctorNotFound { .. }));

    Ok(())
}

#[tokio::test]
async fn doctor_view_is_grant_gated() -> Result<()> {
    let env = create_test_env().await;
    let patient = register(&env, "p@x.com", Role::Patient).await;
    let granted = register(&env, "d@x.com", Role::Doctor).await;
    let ungranted = register(&env, "d2@x.com", Role::Doctor).await;

    env.service
        .create_record(
            patient,
            record(&format!("documents/{}/scan.pdf", patient.user_id)),
        )
        .await?;
    env.service.grant_access(patient, granted.user_id).await?;

    let docs = env
        .service
        .list_for_doctor(granted, patient.user_id)
        .await?;
    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0].file_name, "scan.pdf");

    let err = env
        .service
        .list_for_doctor(ungranted, patient.user_id)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NoGrant));

    Ok(())
}

#[tokio::test]
async fn doctor_view_rejects_patient_callers() -> Result<()> {
    let env = create_test_env().await;
    let patient = register(&env, "p@x.com", Role::Patient).await;
    let other_patient = register(&env, "p2@x.com", Role::Patient).await;

    // A grant never lets a patient use the doctor-side view.
    let err = env
        .service
        .list_for_doctor(patient, other_patient.user_id)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::DoctorRoleRequired));

    Ok(())
}

// ---- REST surface ----

async fn create_test_router() -> (Router, TestEnv) {
    let env = create_test_env().await;
    let router = documents::api::rest::routes::router(env.service.clone())
        .layer(Extension(env.tokens.clone()));
    (router, env)
}

fn bearer(env: &TestEnv, identity: Identity) -> String {
    let pair = env
        .tokens
        .issue_pair(identity.user_id, identity.role)
        .unwrap();
    format!("Bearer {}", pair.access)
}

#[tokio::test]
async fn rest_upload_and_register_flow() -> Result<()> {
    let (router, env) = create_test_router().await;
    let patient = register(&env, "p@x.com", Role::Patient).await;

    let req = UploadRequestReq {
        file_name: "scan.pdf".to_string(),
        file_type: "application/pdf".to_string(),
    };
    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/upload-request")
                .header("authorization", bearer(&env, patient))
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_string(&req)?))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    let slot: UploadSlotDto = serde_json::from_slice(&body)?;
    assert_eq!(slot.expires_in_secs, 3600);
    assert!(slot
        .storage_key
        .starts_with(&format!("documents/{}/", patient.user_id)));

    // After the direct upload the client registers the metadata.
    let req = CreateRecordReq {
        file_name: "scan.pdf".to_string(),
        file_type: "application/pdf".to_string(),
        storage_key: slot.storage_key.clone(),
        file_size: 2048,
    };
    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/create-record")
                .header("authorization", bearer(&env, patient))
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_string(&req)?))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = router
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/my-documents")
                .header("authorization", bearer(&env, patient))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    let docs: Vec<DocumentDto> = serde_json::from_slice(&body)?;
    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0].file_name, "scan.pdf");
    assert_eq!(docs[0].storage_key, slot.storage_key);

    Ok(())
}

#[tokio::test]
async fn rest_upload_request_without_metadata_is_bad_request() -> Result<()> {
    let (router, env) = create_test_router().await;
    let patient = register(&env, "p@x.com", Role::Patient).await;

    let req = UploadRequestReq {
        file_name: "scan.pdf".to_string(),
        file_type: String::new(),
    };
    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/upload-request")
                .header("authorization", bearer(&env, patient))
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_string(&req)?))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    Ok(())
}

#[tokio::test]
async fn rest_upload_request_store_failure_is_internal_error() -> Result<()> {
    let env = create_test_env().await;
    let patient = register(&env, "p@x.com", Role::Patient).await;

    let client = Arc::new(AccountsLocalClient::new(env.accounts.clone()));
    let failing = Arc::new(Service::new(
        env.db.clone(),
        Arc::new(FailingStore),
        client,
        ServiceConfig::default(),
    ));
    let router =
        documents::api::rest::routes::router(failing).layer(Extension(env.tokens.clone()));

    let req = UploadRequestReq {
        file_name: "scan.pdf".to_string(),
        file_type: "application/pdf".to_string(),
    };
    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/upload-request")
                .header("authorization", bearer(&env, patient))
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_string(&req)?))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    // The provider failure detail is not leaked to the client.
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    let text = String::from_utf8_lossy(&body);
    assert!(!text.contains("credential chain"));

    Ok(())
}

#[tokio::test]
async fn rest_duplicate_key_returns_conflict() -> Result<()> {
    let (router, env) = create_test_router().await;
    let patient = register(&env, "p@x.com", Role::Patient).await;

    let req = CreateRecordReq {
        file_name: "scan.pdf".to_string(),
        file_type: "application/pdf".to_string(),
        storage_key: "documents/a/scan.pdf".to_string(),
        file_size: 2048,
    };
    for expected in [StatusCode::CREATED, StatusCode::CONFLICT] {
        let response = router
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/create-record")
                    .header("authorization", bearer(&env, patient))
                    .header("content-type", "application/json")
                    .body(Body::from(serde_json::to_string(&req)?))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), expected);
    }

    Ok(())
}

#[tokio::test]
async fn rest_grant_then_doctor_reads_patient_documents() -> Result<()> {
    let (router, env) = create_test_router().await;
    let patient = register(&env, "p@x.com", Role::Patient).await;
    let doctor = register(&env, "d@x.com", Role::Doctor).await;

    env.service
        .create_record(
            patient,
            record(&format!("documents/{}/scan.pdf", patient.user_id)),
        )
        .await?;

    // Without a grant the doctor is refused.
    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri(&format!("/patient/{}", patient.user_id))
                .header("authorization", bearer(&env, doctor))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/grant-access")
                .header("authorization", bearer(&env, patient))
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_string(&GrantAccessReq {
                    doctor_id: doctor.user_id,
                })?))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = router
        .oneshot(
            Request::builder()
                .method("GET")
                .uri(&format!("/patient/{}", patient.user_id))
                .header("authorization", bearer(&env, doctor))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    let docs: Vec<DocumentDto> = serde_json::from_slice(&body)?;
    assert_eq!(docs.len(), 1);

    Ok(())
}
