//! putfolder command - Upload a folder recursively
//!
//! Walks the directory, derives one object key per file and runs the
//! uploads through the bounded-concurrency scheduler. Per-file outcomes
//! are printed as they settle; one failing file never aborts the batch,
//! and the command still exits 0 after a partially failed run.

use std::collections::HashSet;
use std::path::PathBuf;

use clap::Args;
use serde::Serialize;

use bup_core::{upload_folder, ProfileStore, UploadOptions, UploadOutcome, UploadTask};
use bup_s3::S3Client;

use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

/// Upload a folder recursively
#[derive(Args, Debug)]
pub struct PutfolderArgs {
    /// Local folder to upload
    pub dir: PathBuf,

    /// Profile name (defaults to the current profile)
    #[arg(short, long)]
    pub bucket: Option<String>,

    /// Extra object key prefix
    #[arg(short, long)]
    pub prefix: Option<String>,

    /// Maximum number of concurrent uploads
    #[arg(short, long, default_value_t = 10)]
    pub limit: usize,

    /// Only upload files with these extensions (comma separated)
    #[arg(short, long)]
    pub ext: Option<String>,

    /// Collapse the folder tree into a flat key namespace
    #[arg(short, long)]
    pub flat: bool,

    /// Cache-Control header value
    #[arg(short, long)]
    pub cache: Option<String>,

    /// Hash object names from basename + timestamp (default)
    #[arg(long, overrides_with = "no_md5")]
    pub md5: bool,

    /// Keep original file names
    #[arg(long)]
    pub no_md5: bool,

    /// Upload even when an object already exists
    #[arg(short = 'o', long = "override")]
    pub override_existing: bool,
}

/// Per-file entry in the JSON output
#[derive(Debug, Serialize)]
struct FileResult {
    status: &'static str,
    path: String,
    key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Output structure for the putfolder command (JSON format)
#[derive(Debug, Serialize)]
struct PutfolderOutput {
    uploaded: usize,
    skipped: usize,
    failed: usize,
    results: Vec<FileResult>,
}

fn parse_extensions(ext: Option<&str>) -> Option<HashSet<String>> {
    let ext = ext?;
    let set: HashSet<String> = ext
        .split(',')
        .map(|e| e.trim().trim_start_matches('.').to_string())
        .filter(|e| !e.is_empty())
        .collect();
    (!set.is_empty()).then_some(set)
}

fn file_result(task: &UploadTask, outcome: &UploadOutcome) -> FileResult {
    match outcome {
        UploadOutcome::Success { url } => FileResult {
            status: "success",
            path: task.display.clone(),
            key: task.object_key.clone(),
            url: Some(url.clone()),
            error: None,
        },
        UploadOutcome::Skipped { url } => FileResult {
            status: "exists",
            path: task.display.clone(),
            key: task.object_key.clone(),
            url: Some(url.clone()),
            error: None,
        },
        UploadOutcome::Failed(e) => FileResult {
            status: "failed",
            path: task.display.clone(),
            key: task.object_key.clone(),
            url: None,
            error: Some(e.to_string()),
        },
    }
}

/// Execute the putfolder command
pub async fn execute(
    args: PutfolderArgs,
    store: &dyn ProfileStore,
    output_config: OutputConfig,
) -> ExitCode {
    let formatter = Formatter::new(output_config);

    if !args.dir.is_dir() {
        formatter.error(&format!("{} does not exist", args.dir.display()));
        return ExitCode::GeneralError;
    }

    let profile = match store.get(args.bucket.as_deref()) {
        Ok(profile) => profile,
        Err(e) => {
            formatter.error(&e.to_string());
            return ExitCode::GeneralError;
        }
    };

    let client = match S3Client::new(profile.clone()).await {
        Ok(client) => client,
        Err(e) => {
            formatter.error(&format!("Failed to create storage client: {e}"));
            return ExitCode::GeneralError;
        }
    };

    let options = UploadOptions {
        key_prefix: args.prefix,
        limit: args.limit.max(1),
        extensions: parse_extensions(args.ext.as_deref()),
        flat: args.flat,
        cache_control: args.cache,
        override_existing: args.override_existing,
        hashed_name: !args.no_md5,
        ..Default::default()
    };

    let on_progress = |task: &UploadTask, outcome: &UploadOutcome| {
        if formatter.is_json() {
            return;
        }
        match outcome {
            UploadOutcome::Success { url } => formatter.println(&format!(
                "[success] {} ({})",
                task.display,
                formatter.highlight(url)
            )),
            UploadOutcome::Skipped { url } => formatter.println(&format!(
                "[exists] {} ({})",
                task.display,
                formatter.highlight(url)
            )),
            UploadOutcome::Failed(e) => {
                formatter.error(&format!("[failed] {}: {e}", task.display));
            }
        }
    };

    let results = match upload_folder(&client, &profile, &args.dir, &options, on_progress).await {
        Ok(results) => results,
        Err(e) => {
            formatter.error(&format!("Failed to read {}: {e}", args.dir.display()));
            return ExitCode::GeneralError;
        }
    };

    let uploaded = results.iter().filter(|(_, o)| o.is_success()).count();
    let skipped = results.iter().filter(|(_, o)| o.is_skipped()).count();
    let failed = results.iter().filter(|(_, o)| o.is_failed()).count();

    if formatter.is_json() {
        formatter.json(&PutfolderOutput {
            uploaded,
            skipped,
            failed,
            results: results
                .iter()
                .map(|(task, outcome)| file_result(task, outcome))
                .collect(),
        });
    } else if failed > 0 {
        formatter.warning(&format!(
            "Done with failures: {uploaded} uploaded, {skipped} skipped, {failed} failed"
        ));
    } else {
        formatter.success(&format!("Done: {uploaded} uploaded, {skipped} skipped"));
    }

    // Per-file failures are reported above; a completed batch exits 0.
    ExitCode::Success
}

#[cfg(test)]
mod tests {
    use super::*;
    use bup_core::{Error, MemoryProfileStore};

    #[test]
    fn test_parse_extensions() {
        let set = parse_extensions(Some("png,.jpg, gif")).unwrap();
        assert_eq!(set.len(), 3);
        assert!(set.contains("png"));
        assert!(set.contains("jpg"));
        assert!(set.contains("gif"));

        assert!(parse_extensions(None).is_none());
        assert!(parse_extensions(Some("")).is_none());
    }

    #[test]
    fn test_file_result_statuses() {
        let task = UploadTask {
            source: PathBuf::from("/tmp/a.png"),
            object_key: "img/a.png".into(),
            display: "a.png".into(),
        };

        let ok = file_result(&task, &UploadOutcome::Success { url: "u".into() });
        assert_eq!(ok.status, "success");
        assert_eq!(ok.url.as_deref(), Some("u"));

        let failed = file_result(&task, &UploadOutcome::Failed(Error::Provider("x".into())));
        assert_eq!(failed.status, "failed");
        assert!(failed.error.is_some());
    }

    #[tokio::test]
    async fn test_missing_dir_is_preflight_error() {
        let store = MemoryProfileStore::new();
        let args = PutfolderArgs {
            dir: PathBuf::from("/definitely/not/here"),
            bucket: None,
            prefix: None,
            limit: 10,
            ext: None,
            flat: false,
            cache: None,
            md5: false,
            no_md5: false,
            override_existing: false,
        };
        let code = execute(args, &store, OutputConfig::default()).await;
        assert_eq!(code, ExitCode::GeneralError);
    }
}
