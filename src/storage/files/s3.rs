//! Amazon S3 artifact store

use crate::config::S3Config;
use crate::utils::error::{CertforgeError, Result};
use async_trait::async_trait;
use aws_sdk_s3 as aws_s3;
use bytes::Bytes;
use tracing::{debug, info};
use uuid::Uuid;

use super::error::StoreError;
use super::{ArtifactStore, detect_content_type, sanitize_name};

/// S3 artifact storage
#[derive(Debug, Clone)]
pub struct S3ArtifactStore {
    bucket: String,
    region: String,
    prefix: String,
    public_base_url: String,
    client: aws_s3::Client,
}

impl S3ArtifactStore {
    /// Create a new S3 store from configuration
    pub async fn new(config: &S3Config) -> Result<Self> {
        use aws_s3::config::Region;

        if config.bucket.is_empty() {
            return Err(CertforgeError::Config(
                "S3 bucket not specified".to_string(),
            ));
        }

        let region = Region::new(config.region.clone());
        let aws_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(region)
            .load()
            .await;

        let public_base_url = config
            .public_base_url
            .clone()
            .unwrap_or_else(|| {
                format!(
                    "https://{}.s3.{}.amazonaws.com",
                    config.bucket, config.region
                )
            })
            .trim_end_matches('/')
            .to_string();

        info!(
            "S3 artifact storage initialized: bucket={}, region={}",
            config.bucket, config.region
        );

        Ok(Self {
            bucket: config.bucket.clone(),
            region: config.region.clone(),
            prefix: config.prefix.trim_matches('/').to_string(),
            public_base_url,
            client: aws_s3::Client::new(&aws_config),
        })
    }

    /// Health check
    pub async fn health_check(&self) -> std::result::Result<(), StoreError> {
        self.client
            .head_bucket()
            .bucket(&self.bucket)
            .send()
            .await
            .map(|_| ())
            .map_err(|e| {
                StoreError::StoreUnavailable(format!(
                    "S3 bucket {} in {} unreachable: {}",
                    self.bucket, self.region, e
                ))
            })
    }

    fn object_key(&self, artifact_id: &str, name: &str) -> String {
        if self.prefix.is_empty() {
            format!("{}/{}", artifact_id, name)
        } else {
            format!("{}/{}/{}", self.prefix, artifact_id, name)
        }
    }
}

#[async_trait]
impl ArtifactStore for S3ArtifactStore {
    async fn store(
        &self,
        content: Bytes,
        suggested_name: &str,
    ) -> std::result::Result<String, StoreError> {
        use aws_s3::primitives::ByteStream;

        let name = sanitize_name(suggested_name);
        let key = self.object_key(&Uuid::new_v4().to_string(), &name);

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(&key)
            .content_type(detect_content_type(&name))
            .body(ByteStream::from(content))
            .send()
            .await
            .map_err(|e| StoreError::StoreUnavailable(format!("S3 upload failed: {}", e)))?;

        debug!("Artifact uploaded to S3: {}", key);
        Ok(format!("{}/{}", self.public_base_url, key))
    }
}
