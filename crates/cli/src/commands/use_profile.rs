//! use command - Select the current profile
//!
//! An unknown name leaves the selection unchanged and exits non-zero.

use clap::Args;
use serde::Serialize;

use bup_core::ProfileStore;

use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

/// Select the current profile
#[derive(Args, Debug)]
pub struct UseArgs {
    /// Profile name
    pub name: String,
}

/// JSON output for the use command
#[derive(Serialize)]
struct UseOutput {
    success: bool,
    current: String,
}

/// Execute the use command
pub fn execute(args: UseArgs, store: &dyn ProfileStore, output_config: OutputConfig) -> ExitCode {
    let formatter = Formatter::new(output_config);

    match store.set_current(&args.name) {
        Ok(()) => {
            if formatter.is_json() {
                formatter.json(&UseOutput {
                    success: true,
                    current: args.name,
                });
            } else {
                formatter.success(&format!("Current profile set to '{}'", args.name));
            }
            ExitCode::Success
        }
        Err(e) => {
            formatter.error(&e.to_string());
            ExitCode::GeneralError
        }
    }
}
