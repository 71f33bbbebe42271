//! StorageAdapter trait definition
//!
//! The narrow capability interface the upload scheduler depends on. The
//! production implementation wraps aws-sdk-s3 in the `bup-s3` crate; tests
//! substitute in-process doubles.

use std::path::Path;

use async_trait::async_trait;

use crate::error::Result;

/// Cache-Control header applied when no explicit value is given (10 years)
pub const DEFAULT_CACHE_CONTROL: &str = "max-age=315360000";

/// Capability interface for the object-storage backend
#[async_trait]
pub trait StorageAdapter: Send + Sync {
    /// Check whether an object exists.
    ///
    /// A not-found response maps to `Ok(false)`; any other failure is
    /// [`crate::Error::Provider`].
    async fn head_object(&self, bucket: &str, key: &str) -> Result<bool>;

    /// Upload a local file, returning the public URL of the object.
    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        file: &Path,
        cache_control: &str,
    ) -> Result<String>;
}
