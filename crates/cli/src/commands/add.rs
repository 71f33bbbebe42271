//! add command - Interactive profile creation
//!
//! Prompts for every profile field, validates them and persists the new
//! profile. A duplicate name aborts without touching the store.

use clap::Args;
use dialoguer::{Input, Password};
use url::Url;

use bup_core::{Profile, ProfileStore};

use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

/// Add a profile interactively
#[derive(Args, Debug)]
pub struct AddArgs {}

fn require_text(input: &String) -> Result<(), &'static str> {
    if input.trim().is_empty() {
        Err("value cannot be empty")
    } else {
        Ok(())
    }
}

fn require_url(input: &String) -> Result<(), &'static str> {
    match Url::parse(input.trim()) {
        Ok(url) if url.scheme() == "http" || url.scheme() == "https" => Ok(()),
        _ => Err("expected an http(s) URL"),
    }
}

fn optional_url(input: &String) -> Result<(), &'static str> {
    if input.trim().is_empty() {
        Ok(())
    } else {
        require_url(input)
    }
}

fn prompt_profile() -> dialoguer::Result<Profile> {
    let name: String = Input::new()
        .with_prompt("name")
        .validate_with(require_text)
        .interact_text()?;

    let bucket: String = Input::new()
        .with_prompt("bucket")
        .validate_with(require_text)
        .interact_text()?;

    let host: String = Input::new()
        .with_prompt("host (optional)")
        .allow_empty(true)
        .validate_with(optional_url)
        .interact_text()?;

    let prefix: String = Input::new()
        .with_prompt("prefix (optional)")
        .allow_empty(true)
        .interact_text()?;

    let endpoint: String = Input::new()
        .with_prompt("endpoint")
        .validate_with(require_url)
        .interact_text()?;

    let access_key: String = Input::new()
        .with_prompt("access key")
        .validate_with(require_text)
        .interact_text()?;

    let secret_key: String = Password::new().with_prompt("secret key").interact()?;

    let mut profile = Profile::new(
        name.trim(),
        bucket.trim(),
        endpoint.trim().trim_end_matches('/'),
        access_key.trim(),
        secret_key.trim(),
    );
    profile.host = host.trim().trim_end_matches('/').to_string();
    profile.prefix = prefix.trim().to_string();
    Ok(profile)
}

/// Execute the add command
pub fn execute(_args: AddArgs, store: &dyn ProfileStore, output_config: OutputConfig) -> ExitCode {
    let formatter = Formatter::new(output_config);

    let profile = match prompt_profile() {
        Ok(profile) => profile,
        Err(e) => {
            formatter.error(&format!("Aborted: {e}"));
            return ExitCode::GeneralError;
        }
    };

    let name = profile.name.clone();
    match store.add(profile) {
        Ok(()) => {
            formatter.success(&format!("Profile '{name}' added"));
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

    #[test]
    fn test_require_text() {
        assert!(require_text(&"p1".to_string()).is_ok());
        assert!(require_text(&"   ".to_string()).is_err());
    }

    #[test]
    fn test_require_url() {
        assert!(require_url(&"https://s3.example.com".to_string()).is_ok());
        assert!(require_url(&"http://localhost:9000".to_string()).is_ok());
        assert!(require_url(&"not a url".to_string()).is_err());
        assert!(require_url(&"ftp://example.com".to_string()).is_err());
    }

    #[test]
    fn test_optional_url_allows_empty() {
        assert!(optional_url(&String::new()).is_ok());
        assert!(optional_url(&"nope".to_string()).is_err());
    }
}
