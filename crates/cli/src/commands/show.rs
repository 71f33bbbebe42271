//! show command - Print profile detail
//!
//! The secret key is masked; profiles carry credentials and `show` output
//! routinely ends up in terminals and logs.

use clap::Args;
use serde::Serialize;

use bup_core::ProfileStore;

use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

/// Show detail of a profile
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Profile name
    pub name: String,
}

/// Output structure for the show command (JSON format)
#[derive(Debug, Serialize)]
struct ShowOutput {
    name: String,
    bucket: String,
    host: String,
    prefix: String,
    endpoint: String,
    access_key: String,
    secret_key: String,
}

fn mask(secret: &str) -> String {
    if secret.len() <= 4 {
        "****".to_string()
    } else {
        format!("{}****", &secret[..4])
    }
}

/// Execute the show command
pub fn execute(args: ShowArgs, store: &dyn ProfileStore, output_config: OutputConfig) -> ExitCode {
    let formatter = Formatter::new(output_config);

    let profile = match store.get(Some(&args.name)) {
        Ok(profile) => profile,
        Err(e) => {
            formatter.error(&e.to_string());
            return ExitCode::GeneralError;
        }
    };

    if formatter.is_json() {
        let output = ShowOutput {
            name: profile.name,
            bucket: profile.bucket,
            host: profile.host,
            prefix: profile.prefix,
            endpoint: profile.endpoint,
            access_key: profile.access_key,
            secret_key: mask(&profile.secret_key),
        };
        formatter.json(&output);
        return ExitCode::Success;
    }

    formatter.println(&format!("name:       {}", profile.name));
    formatter.println(&format!("bucket:     {}", profile.bucket));
    formatter.println(&format!("host:       {}", profile.host));
    formatter.println(&format!("prefix:     {}", profile.prefix));
    formatter.println(&format!("endpoint:   {}", profile.endpoint));
    formatter.println(&format!("access key: {}", profile.access_key));
    formatter.println(&format!("secret key: {}", mask(&profile.secret_key)));

    ExitCode::Success
}

#[cfg(test)]
mod tests {
    use super::*;
    use bup_core::{MemoryProfileStore, Profile};

    #[test]
    fn test_mask_short_and_long() {
        assert_eq!(mask("ab"), "****");
        assert_eq!(mask("abcdefgh"), "abcd****");
    }

    #[test]
    fn test_show_unknown_profile_fails() {
        let store = MemoryProfileStore::new();
        let code = execute(
            ShowArgs {
                name: "missing".into(),
            },
            &store,
            OutputConfig::default(),
        );
        assert_eq!(code, ExitCode::GeneralError);
    }

    #[test]
    fn test_show_known_profile() {
        let store = MemoryProfileStore::new();
        store
            .add(Profile::new("p1", "assets", "https://s3.example.com", "ak", "sk"))
            .unwrap();
        let code = execute(
            ShowArgs { name: "p1".into() },
            &store,
            OutputConfig {
                quiet: true,
                ..Default::default()
            },
        );
        assert_eq!(code, ExitCode::Success);
    }
}
