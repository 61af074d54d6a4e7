use std::time::Duration;

use async_trait::async_trait;
use aws_sdk_s3::presigning::PresigningConfig;

use crate::domain::ports::{DocumentStore, PresignedUpload};

/// Production `DocumentStore`: presigns S3 PUT requests so clients upload
/// bytes directly to the bucket without the backend in the data path.
pub struct S3DocumentStore {
    client: aws_sdk_s3::Client,
    bucket: String,
}

impl S3DocumentStore {
    pub fn new(client: aws_sdk_s3::Client, bucket: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
        }
    }

    /// Build a store from ambient AWS configuration, with an optional custom
    /// endpoint for S3-compatible stores.
    pub async fn connect(bucket: &str, region: &str, endpoint: Option<&str>) -> Self {
        let region = aws_config::Region::new(region.to_string());
        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest()).region(region);
        if let Some(endpoint) = endpoint {
            loader = loader.endpoint_url(endpoint);
        }
        let config = loader.load().await;
        Self::new(aws_sdk_s3::Client::new(&config), bucket)
    }
}

#[async_trait]
impl DocumentStore for S3DocumentStore {
    async fn presign_put(
        &self,
        key: &str,
        content_type: &str,
        ttl: Duration,
    ) -> anyhow::Result<PresignedUpload> {
        let presigning = PresigningConfig::expires_in(ttl)?;
        let presigned = self
            .client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type(content_type)
            .presigned(presigning)
            .await?;

        Ok(PresignedUpload {
            url: presigned.uri().to_string(),
        })
    }
}
