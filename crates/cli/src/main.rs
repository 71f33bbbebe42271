//! bup - bucket profile manager and uploader
//!
//! A command-line interface for managing named bucket profiles and
//! uploading files or folders to S3-compatible object storage.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use bup_cli::commands::{self, Cli};

#[tokio::main]
async fn main() {
    // Initialize tracing subscriber for logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let exit_code = commands::execute(cli).await;

    std::process::exit(exit_code.as_i32());
}
