//! bup-core: Core library for the bup uploader CLI
//!
//! This crate provides the core functionality for bup, including:
//! - Bucket profile model and the profile store
//! - Object key and object URL generation
//! - Recursive file discovery
//! - The bounded-concurrency upload scheduler
//!
//! This crate is designed to be independent of any specific storage SDK:
//! uploads go through the narrow [`StorageAdapter`] trait, implemented by
//! the `bup-s3` crate in production and by test doubles in tests.

pub mod adapter;
pub mod error;
pub mod key;
pub mod profile;
pub mod store;
pub mod upload;
pub mod walk;

pub use adapter::{StorageAdapter, DEFAULT_CACHE_CONTROL};
pub use error::{Error, Result};
pub use key::{generate_object_key, object_url};
pub use profile::{Profile, ProfileFile};
pub use store::{FileProfileStore, MemoryProfileStore, ProfileStore, ProfileUpdate};
pub use upload::{upload_folder, upload_one, UploadOptions, UploadOutcome, UploadTask};
pub use walk::walk;
