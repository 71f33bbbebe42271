//! S3 client implementation
//!
//! Wraps aws-sdk-s3 and implements the StorageAdapter trait from
//! bup-core. Endpoints are taken from the profile, with path-style
//! addressing for compatibility with S3-alike services.

use std::path::Path;

use async_trait::async_trait;
use aws_sdk_s3::error::{DisplayErrorContext, SdkError};
use aws_sdk_s3::primitives::ByteStream;
use tracing::debug;

use bup_core::{object_url, Error, Profile, Result, StorageAdapter};

/// Region placeholder for S3-compatible endpoints that ignore it
const DEFAULT_REGION: &str = "us-east-1";

/// S3 client wrapper bound to one profile
pub struct S3Client {
    inner: aws_sdk_s3::Client,
    profile: Profile,
}

impl S3Client {
    /// Create a new S3 client from a profile snapshot
    pub async fn new(profile: Profile) -> Result<Self> {
        let credentials = aws_credential_types::Credentials::new(
            profile.access_key.clone(),
            profile.secret_key.clone(),
            None, // session token
            None, // expiry
            "bup-static-credentials",
        );

        let config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .credentials_provider(credentials)
            .region(aws_config::Region::new(DEFAULT_REGION))
            .endpoint_url(&profile.endpoint)
            .load()
            .await;

        let s3_config = aws_sdk_s3::config::Builder::from(&config)
            .force_path_style(true)
            .build();

        Ok(Self {
            inner: aws_sdk_s3::Client::from_conf(s3_config),
            profile,
        })
    }

    /// Get the underlying aws-sdk-s3 client
    pub fn inner(&self) -> &aws_sdk_s3::Client {
        &self.inner
    }
}

#[async_trait]
impl StorageAdapter for S3Client {
    async fn head_object(&self, bucket: &str, key: &str) -> Result<bool> {
        match self
            .inner
            .head_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
        {
            Ok(_) => Ok(true),
            Err(SdkError::ServiceError(context)) if context.err().is_not_found() => Ok(false),
            Err(e) => Err(Error::Provider(DisplayErrorContext(&e).to_string())),
        }
    }

    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        file: &Path,
        cache_control: &str,
    ) -> Result<String> {
        let body = ByteStream::from_path(file)
            .await
            .map_err(|e| Error::Provider(format!("cannot read {}: {e}", file.display())))?;

        let mut request = self
            .inner
            .put_object()
            .bucket(bucket)
            .key(key)
            .cache_control(cache_control)
            .body(body);

        if let Some(mime) = mime_guess::from_path(file).first() {
            request = request.content_type(mime.essence_str());
        }

        request
            .send()
            .await
            .map_err(|e| Error::Provider(DisplayErrorContext(&e).to_string()))?;

        debug!(bucket, key, "object uploaded");
        Ok(object_url(&self.profile, key))
    }
}
