//! Bucket profile model
//!
//! A profile is a named bucket configuration: credentials, endpoint,
//! bucket name and an optional key prefix / URL host override. Profiles
//! are persisted as a single JSON object in the user's home directory and
//! handed to the upload core as immutable snapshots.

use serde::{Deserialize, Serialize};

/// A named bucket configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Profile {
    /// Unique profile name
    pub name: String,

    /// Bucket name in the storage service
    pub bucket: String,

    /// Optional host used when building object URLs (e.g. a CDN domain)
    #[serde(default)]
    pub host: String,

    /// Key prefix prepended to every generated object key
    #[serde(default)]
    pub prefix: String,

    /// Storage service endpoint URL
    pub endpoint: String,

    /// Access key ID
    pub access_key: String,

    /// Secret access key
    pub secret_key: String,
}

impl Profile {
    /// Create a new profile with required fields
    pub fn new(
        name: impl Into<String>,
        bucket: impl Into<String>,
        endpoint: impl Into<String>,
        access_key: impl Into<String>,
        secret_key: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            bucket: bucket.into(),
            host: String::new(),
            prefix: String::new(),
            endpoint: endpoint.into(),
            access_key: access_key.into(),
            secret_key: secret_key.into(),
        }
    }
}

/// On-disk shape of the profile config file
///
/// The whole file is read into memory before each command and rewritten
/// entirely after any mutating command. Last writer wins; no locking.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileFile {
    /// Name of the currently selected profile, empty if none
    #[serde(default)]
    pub current: String,

    /// All configured profiles
    #[serde(default)]
    pub config: Vec<Profile>,
}
