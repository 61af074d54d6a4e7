use async_trait::async_trait;
use std::time::Duration;

/// A write authorization issued by the external store.
#[derive(Debug, Clone)]
pub struct PresignedUpload {
    pub url: String,
}

/// Port for the external object store: the only capability the domain needs
/// is "issue a time-limited write URL for a key and content type".
///
/// The production implementation presigns S3 PUTs; tests use an in-process
/// fake.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn presign_put(
        &self,
        key: &str,
        content_type: &str,
        ttl: Duration,
    ) -> anyhow::Result<PresignedUpload>;
}
