//! ls command - List profiles
//!
//! Renders the configured profiles as a table, with the current profile
//! marked in the first column.

use clap::Args;
use comfy_table::{presets::UTF8_FULL_CONDENSED, Table};
use serde::Serialize;

use bup_core::{Profile, ProfileStore};

use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

/// List all profiles
#[derive(Args, Debug)]
pub struct LsArgs {}

/// Output structure for the ls command (JSON format)
#[derive(Debug, Serialize)]
struct LsOutput {
    profiles: Vec<ProfileInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    current: Option<String>,
}

/// Profile information without credentials
#[derive(Debug, Serialize)]
struct ProfileInfo {
    name: String,
    bucket: String,
    host: String,
    prefix: String,
    current: bool,
}

impl ProfileInfo {
    fn from_profile(profile: &Profile, current: Option<&str>) -> Self {
        Self {
            name: profile.name.clone(),
            bucket: profile.bucket.clone(),
            host: profile.host.clone(),
            prefix: profile.prefix.clone(),
            current: Some(profile.name.as_str()) == current,
        }
    }
}

/// Execute the ls command
pub fn execute(_args: LsArgs, store: &dyn ProfileStore, output_config: OutputConfig) -> ExitCode {
    let formatter = Formatter::new(output_config);

    let (profiles, current) = match (store.list(), store.current()) {
        (Ok(profiles), Ok(current)) => (profiles, current),
        (Err(e), _) | (_, Err(e)) => {
            formatter.error(&format!("Failed to load profiles: {e}"));
            return ExitCode::GeneralError;
        }
    };

    if formatter.is_json() {
        let output = LsOutput {
            profiles: profiles
                .iter()
                .map(|p| ProfileInfo::from_profile(p, current.as_deref()))
                .collect(),
            current,
        };
        formatter.json(&output);
        return ExitCode::Success;
    }

    if profiles.is_empty() {
        formatter.println("No profiles configured. Run `bup add` to create one.");
        return ExitCode::Success;
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec!["", "name", "bucket", "host", "prefix"]);
    for profile in &profiles {
        let marker = if Some(profile.name.as_str()) == current.as_deref() {
            "*"
        } else {
            ""
        };
        table.add_row(vec![
            marker,
            &profile.name,
            &profile.bucket,
            &profile.host,
            &profile.prefix,
        ]);
    }
    formatter.println(&table.to_string());

    ExitCode::Success
}

#[cfg(test)]
mod tests {
    use super::*;
    use bup_core::MemoryProfileStore;

    #[test]
    fn test_ls_empty_store() {
        let store = MemoryProfileStore::new();
        let code = execute(LsArgs {}, &store, OutputConfig::default());
        assert_eq!(code, ExitCode::Success);
    }

    #[test]
    fn test_profile_info_marks_current() {
        let profile = Profile::new("p1", "assets", "https://s3.example.com", "ak", "sk");
        let info = ProfileInfo::from_profile(&profile, Some("p1"));
        assert!(info.current);
        let info = ProfileInfo::from_profile(&profile, Some("other"));
        assert!(!info.current);
    }
}
