//! config command - Edit fields of an existing profile
//!
//! Only the flags passed on the command line are written; everything else
//! is left untouched.

use clap::Args;
use serde::Serialize;

use bup_core::{ProfileStore, ProfileUpdate};

use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

/// Edit fields of an existing profile
#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Profile name
    pub name: String,

    /// Host used when building object URLs
    #[arg(long)]
    pub host: Option<String>,

    /// Object key prefix
    #[arg(long)]
    pub prefix: Option<String>,

    /// Bucket name
    #[arg(long)]
    pub bucket: Option<String>,

    /// Storage service endpoint URL
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Access key ID
    #[arg(long)]
    pub ak: Option<String>,

    /// Secret access key
    #[arg(long)]
    pub sk: Option<String>,
}

/// JSON output for the config command
#[derive(Serialize)]
struct ConfigOutput {
    success: bool,
    profile: String,
}

/// Execute the config command
pub fn execute(
    args: ConfigArgs,
    store: &dyn ProfileStore,
    output_config: OutputConfig,
) -> ExitCode {
    let formatter = Formatter::new(output_config);

    let update = ProfileUpdate {
        host: args.host,
        prefix: args.prefix,
        bucket: args.bucket,
        endpoint: args.endpoint,
        access_key: args.ak,
        secret_key: args.sk,
    };

    if update.is_empty() {
        formatter.error("Nothing to change: pass at least one of --host, --prefix, --bucket, --endpoint, --ak, --sk");
        return ExitCode::GeneralError;
    }

    match store.update(&args.name, &update) {
        Ok(()) => {
            if formatter.is_json() {
                formatter.json(&ConfigOutput {
                    success: true,
                    profile: args.name,
                });
            } else {
                formatter.success(&format!("Profile '{}' updated", args.name));
            }
            ExitCode::Success
        }
        Err(e) => {
            formatter.error(&e.to_string());
            ExitCode::GeneralError
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bup_core::{MemoryProfileStore, Profile};

    fn args(name: &str) -> ConfigArgs {
        ConfigArgs {
            name: name.into(),
            host: None,
            prefix: None,
            bucket: None,
            endpoint: None,
            ak: None,
            sk: None,
        }
    }

    #[test]
    fn test_config_without_flags_is_an_error() {
        let store = MemoryProfileStore::new();
        store
            .add(Profile::new("p1", "assets", "https://s3.example.com", "ak", "sk"))
            .unwrap();

        let code = execute(args("p1"), &store, OutputConfig::default());
        assert_eq!(code, ExitCode::GeneralError);
    }

    #[test]
    fn test_config_applies_given_flags() {
        let store = MemoryProfileStore::new();
        store
            .add(Profile::new("p1", "assets", "https://s3.example.com", "ak", "sk"))
            .unwrap();

        let mut a = args("p1");
        a.prefix = Some("img".into());
        let code = execute(
            a,
            &store,
            OutputConfig {
                quiet: true,
                ..Default::default()
            },
        );
        assert_eq!(code, ExitCode::Success);
        assert_eq!(store.get(Some("p1")).unwrap().prefix, "img");
    }

    #[test]
    fn test_config_unknown_profile_fails() {
        let store = MemoryProfileStore::new();
        let mut a = args("missing");
        a.prefix = Some("img".into());
        let code = execute(a, &store, OutputConfig::default());
        assert_eq!(code, ExitCode::GeneralError);
    }
}
