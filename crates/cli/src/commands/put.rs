//! put command - Upload a single file
//!
//! Resolves the profile (explicit `-b` name or the current selection),
//! derives the object key and uploads through the storage adapter. An
//! existing object is reported as a skip unless `-o` is passed.

use std::path::PathBuf;

use clap::Args;
use serde::Serialize;

use bup_core::{generate_object_key, upload_one, ProfileStore, UploadOptions, UploadOutcome, UploadTask};
use bup_s3::S3Client;

use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig, Spinner};

/// Upload a single file
#[derive(Args, Debug)]
pub struct PutArgs {
    /// Local file to upload
    pub file: PathBuf,

    /// Profile name (defaults to the current profile)
    #[arg(short, long)]
    pub bucket: Option<String>,

    /// Extra object key prefix
    #[arg(short, long)]
    pub prefix: Option<String>,

    /// Explicit object key, bypassing key generation
    #[arg(short = 'k', long = "objectKey")]
    pub object_key: Option<String>,

    /// Cache-Control header value
    #[arg(short, long)]
    pub cache: Option<String>,

    /// Hash the object name from basename + timestamp (default)
    #[arg(long, overrides_with = "no_md5")]
    pub md5: bool,

    /// Keep the original file name
    #[arg(long)]
    pub no_md5: bool,

    /// Upload even when the object already exists
    #[arg(short = 'o', long = "override")]
    pub override_existing: bool,
}

/// Output structure for the put command (JSON format)
#[derive(Debug, Serialize)]
struct PutOutput {
    status: &'static str,
    key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Execute the put command
pub async fn execute(
    args: PutArgs,
    store: &dyn ProfileStore,
    output_config: OutputConfig,
) -> ExitCode {
    let formatter = Formatter::new(output_config);

    let profile = match store.get(args.bucket.as_deref()) {
        Ok(profile) => profile,
        Err(e) => {
            formatter.error(&e.to_string());
            return ExitCode::GeneralError;
        }
    };

    let options = UploadOptions {
        key_prefix: args.prefix,
        object_key: args.object_key,
        cache_control: args.cache,
        override_existing: args.override_existing,
        hashed_name: !args.no_md5,
        ..Default::default()
    };

    let display = args.file.to_string_lossy().into_owned();
    let object_key = generate_object_key(&args.file, &profile, &options, "");
    let task = UploadTask {
        source: args.file.clone(),
        object_key,
        display: display.clone(),
    };

    let client = match S3Client::new(profile.clone()).await {
        Ok(client) => client,
        Err(e) => {
            formatter.error(&format!("Failed to create storage client: {e}"));
            return ExitCode::GeneralError;
        }
    };

    let size = std::fs::metadata(&args.file)
        .map(|m| humansize::format_size(m.len(), humansize::BINARY))
        .unwrap_or_else(|_| "unknown size".to_string());
    let spinner = Spinner::start(output_config, &format!("Uploading {display} ({size})"));

    let outcome = upload_one(&client, &profile, &task, &options).await;
    spinner.finish_and_clear();

    match outcome {
        UploadOutcome::Success { url } => {
            if formatter.is_json() {
                formatter.json(&PutOutput {
                    status: "success",
                    key: task.object_key,
                    url: Some(url),
                    error: None,
                });
            } else {
                formatter.success(&format!("[success] {}", formatter.highlight(&url)));
            }
            ExitCode::Success
        }
        UploadOutcome::Skipped { url } => {
            if formatter.is_json() {
                formatter.json(&PutOutput {
                    status: "exists",
                    key: task.object_key,
                    url: Some(url),
                    error: None,
                });
            } else {
                formatter.println(&format!("[exists] {} already exists.", formatter.highlight(&url)));
                formatter.warning("Use -o to override.");
            }
            ExitCode::Success
        }
        UploadOutcome::Failed(e) => {
            if formatter.is_json() {
                formatter.json(&PutOutput {
                    status: "failed",
                    key: task.object_key,
                    url: None,
                    error: Some(e.to_string()),
                });
            } else {
                formatter.error(&format!("[failed] {display}: {e}"));
            }
            ExitCode::GeneralError
        }
    }
}
