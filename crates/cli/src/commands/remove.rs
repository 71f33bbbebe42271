//! remove command - Delete a profile by name
//!
//! Removing the current profile also clears the selection. Removing a
//! name that does not exist is reported as success, matching the
//! idempotent store semantics.

use clap::Args;
use serde::Serialize;

use bup_core::ProfileStore;

use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

/// Delete a profile
#[derive(Args, Debug)]
pub struct RemoveArgs {
    /// Profile name
    pub bucket: String,
}

/// JSON output for the remove command
#[derive(Serialize)]
struct RemoveOutput {
    success: bool,
    profile: String,
}

/// Execute the remove command
pub fn execute(
    args: RemoveArgs,
    store: &dyn ProfileStore,
    output_config: OutputConfig,
) -> ExitCode {
    let formatter = Formatter::new(output_config);

    match store.remove(&args.bucket) {
        Ok(()) => {
            if formatter.is_json() {
                formatter.json(&RemoveOutput {
                    success: true,
                    profile: args.bucket,
                });
            } else {
                formatter.success(&format!("Removed '{}'", args.bucket));
            }
            ExitCode::Success
        }
        Err(e) => {
            formatter.error(&e.to_string());
            ExitCode::GeneralError
        }
    }
}
