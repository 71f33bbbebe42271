//! Upload scheduler
//!
//! Turns a local file (or folder tree) into upload tasks and runs them
//! against a [`StorageAdapter`] with bounded concurrency. Folder uploads
//! use settle-all semantics: every task runs to its terminal outcome and
//! a single failing file never aborts the batch.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use futures::stream::{self, StreamExt};
use tracing::debug;

use crate::adapter::{StorageAdapter, DEFAULT_CACHE_CONTROL};
use crate::error::{Error, Result};
use crate::key::{generate_object_key, object_url};
use crate::profile::Profile;
use crate::walk::walk;

/// Default number of concurrent in-flight uploads for folder mode
pub const DEFAULT_LIMIT: usize = 10;

/// Options for a single `put` or `putfolder` invocation
#[derive(Debug, Clone)]
pub struct UploadOptions {
    /// Extra key prefix appended after the profile prefix
    pub key_prefix: Option<String>,

    /// Explicit object key, bypassing key generation (single file only)
    pub object_key: Option<String>,

    /// Concurrency limit for folder uploads
    pub limit: usize,

    /// Only upload files with these extensions (no leading dot)
    pub extensions: Option<HashSet<String>>,

    /// Collapse the folder tree into a flat key namespace
    pub flat: bool,

    /// Cache-Control header; [`DEFAULT_CACHE_CONTROL`] when unset
    pub cache_control: Option<String>,

    /// Upload even when the object already exists
    pub override_existing: bool,

    /// Replace the filename with a basename+timestamp hash
    pub hashed_name: bool,
}

impl Default for UploadOptions {
    fn default() -> Self {
        Self {
            key_prefix: None,
            object_key: None,
            limit: DEFAULT_LIMIT,
            extensions: None,
            flat: false,
            cache_control: None,
            override_existing: false,
            hashed_name: true,
        }
    }
}

/// One file scheduled for upload
#[derive(Debug, Clone)]
pub struct UploadTask {
    /// Absolute path of the local file
    pub source: PathBuf,

    /// Destination object key
    pub object_key: String,

    /// Path shown in progress output (relative to the folder root)
    pub display: String,
}

/// Terminal outcome of one upload task
#[derive(Debug)]
pub enum UploadOutcome {
    /// Uploaded; `url` is the public object URL
    Success { url: String },

    /// Object already exists and overriding was not requested
    Skipped { url: String },

    /// Adapter call failed
    Failed(Error),
}

impl UploadOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped { .. })
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

/// Upload a single task, capturing every failure as an outcome.
///
/// Unless overriding is requested, the object is probed first and an
/// existing object short-circuits to [`UploadOutcome::Skipped`] without
/// an upload. This function never returns an error: adapter failures on
/// either call become [`UploadOutcome::Failed`].
pub async fn upload_one(
    adapter: &dyn StorageAdapter,
    profile: &Profile,
    task: &UploadTask,
    options: &UploadOptions,
) -> UploadOutcome {
    let url = object_url(profile, &task.object_key);

    if !options.override_existing {
        match adapter.head_object(&profile.bucket, &task.object_key).await {
            Ok(true) => {
                debug!(key = %task.object_key, "object exists, skipping");
                return UploadOutcome::Skipped { url };
            }
            Ok(false) => {}
            Err(e) => return UploadOutcome::Failed(e),
        }
    }

    let cache_control = options
        .cache_control
        .as_deref()
        .unwrap_or(DEFAULT_CACHE_CONTROL);

    match adapter
        .put_object(&profile.bucket, &task.object_key, &task.source, cache_control)
        .await
    {
        Ok(url) => UploadOutcome::Success { url },
        Err(e) => UploadOutcome::Failed(e),
    }
}

/// Upload a folder tree with bounded concurrency.
///
/// Files are discovered up front (a walk failure aborts before anything
/// is scheduled), keyed deterministically, and run through a pool of at
/// most `options.limit` concurrent [`upload_one`] calls. `on_progress` is
/// invoked exactly once per task, in completion order, as outcomes become
/// known; the returned aggregation is in discovery order.
pub async fn upload_folder(
    adapter: &dyn StorageAdapter,
    profile: &Profile,
    root: &Path,
    options: &UploadOptions,
    mut on_progress: impl FnMut(&UploadTask, &UploadOutcome),
) -> Result<Vec<(UploadTask, UploadOutcome)>> {
    let files = walk(root, options.extensions.as_ref())?;
    debug!(count = files.len(), root = %root.display(), "files discovered");

    let tasks: Vec<UploadTask> = files
        .into_iter()
        .map(|source| {
            let relative_dir = if options.flat {
                String::new()
            } else {
                source
                    .parent()
                    .and_then(|parent| parent.strip_prefix(root).ok())
                    .map(|rel| rel.to_string_lossy().replace('\\', "/"))
                    .unwrap_or_default()
            };
            let object_key = generate_object_key(&source, profile, options, &relative_dir);
            let display = source
                .strip_prefix(root)
                .unwrap_or(&source)
                .to_string_lossy()
                .replace('\\', "/");
            UploadTask {
                source,
                object_key,
                display,
            }
        })
        .collect();

    let mut outcomes: Vec<Option<UploadOutcome>> = (0..tasks.len()).map(|_| None).collect();

    let mut settled = stream::iter(tasks.iter().enumerate().map(|(index, task)| async move {
        (index, upload_one(adapter, profile, task, options).await)
    }))
    .buffer_unordered(options.limit.max(1));

    while let Some((index, outcome)) = settled.next().await {
        on_progress(&tasks[index], &outcome);
        outcomes[index] = Some(outcome);
    }
    drop(settled);

    Ok(tasks
        .into_iter()
        .zip(outcomes)
        .map(|(task, outcome)| (task, outcome.expect("every scheduled task settles")))
        .collect())
}
