//! Profile store
//!
//! The [`ProfileStore`] trait is the only way the rest of the tool reaches
//! profile data. Production uses [`FileProfileStore`], backed by the JSON
//! config file at `~/.buprc` (overridable through the `BUP_CONFIG`
//! environment variable); tests use [`MemoryProfileStore`].

use std::path::PathBuf;
use std::sync::Mutex;

use tracing::debug;

use crate::error::{Error, Result};
use crate::profile::{Profile, ProfileFile};

/// Environment variable overriding the config file location (used by tests)
pub const CONFIG_ENV: &str = "BUP_CONFIG";

/// Config file name under the home directory
const CONFIG_FILE: &str = ".buprc";

/// Partial update applied to an existing profile by the `config` command.
///
/// Only fields that are `Some` are written; everything else is untouched.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub host: Option<String>,
    pub prefix: Option<String>,
    pub bucket: Option<String>,
    pub endpoint: Option<String>,
    pub access_key: Option<String>,
    pub secret_key: Option<String>,
}

impl ProfileUpdate {
    /// True if no field is set
    pub fn is_empty(&self) -> bool {
        self.host.is_none()
            && self.prefix.is_none()
            && self.bucket.is_none()
            && self.endpoint.is_none()
            && self.access_key.is_none()
            && self.secret_key.is_none()
    }

    fn apply(&self, profile: &mut Profile) {
        if let Some(host) = &self.host {
            profile.host = host.clone();
        }
        if let Some(prefix) = &self.prefix {
            profile.prefix = prefix.clone();
        }
        if let Some(bucket) = &self.bucket {
            profile.bucket = bucket.clone();
        }
        if let Some(endpoint) = &self.endpoint {
            profile.endpoint = endpoint.trim_end_matches('/').to_string();
        }
        if let Some(access_key) = &self.access_key {
            profile.access_key = access_key.clone();
        }
        if let Some(secret_key) = &self.secret_key {
            profile.secret_key = secret_key.clone();
        }
    }
}

/// Store of named bucket profiles plus the "current" selection
pub trait ProfileStore {
    /// Get a profile by name, or the current profile when `name` is `None`.
    ///
    /// Fails with [`Error::NotFound`] if the name is unknown, or if no name
    /// is given and no current profile is set.
    fn get(&self, name: Option<&str>) -> Result<Profile>;

    /// List all profiles
    fn list(&self) -> Result<Vec<Profile>>;

    /// Name of the current profile, if one is set
    fn current(&self) -> Result<Option<String>>;

    /// Select the current profile. Unknown names fail with
    /// [`Error::NotFound`] and leave the selection unchanged.
    fn set_current(&self, name: &str) -> Result<()>;

    /// Add a new profile. Fails with [`Error::DuplicateName`] if the name
    /// is already taken.
    fn add(&self, profile: Profile) -> Result<()>;

    /// Apply a partial update to an existing profile
    fn update(&self, name: &str, update: &ProfileUpdate) -> Result<()>;

    /// Remove a profile by name, clearing the current selection if it
    /// matched. Removing an unknown name is not an error.
    fn remove(&self, name: &str) -> Result<()>;
}

fn get_from(file: &ProfileFile, name: Option<&str>) -> Result<Profile> {
    let wanted = match name {
        Some(n) => n.to_string(),
        None if !file.current.is_empty() => file.current.clone(),
        None => {
            return Err(Error::NotFound(
                "no profile selected, run `bup use <name>` or pass -b".into(),
            ))
        }
    };
    file.config
        .iter()
        .find(|p| p.name == wanted)
        .cloned()
        .ok_or(Error::NotFound(wanted))
}

/// Profile store backed by the JSON config file
#[derive(Debug)]
pub struct FileProfileStore {
    config_path: PathBuf,
}

impl FileProfileStore {
    /// Create a store using the default config path
    ///
    /// `$BUP_CONFIG` wins when set; otherwise `~/.buprc`.
    pub fn new() -> Result<Self> {
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            return Ok(Self {
                config_path: PathBuf::from(path),
            });
        }
        let home = dirs::home_dir()
            .ok_or_else(|| Error::Config("Could not determine home directory".into()))?;
        Ok(Self {
            config_path: home.join(CONFIG_FILE),
        })
    }

    /// Create a store with a custom path (useful for testing)
    pub fn with_path(path: PathBuf) -> Self {
        Self { config_path: path }
    }

    /// Get the configuration file path
    pub fn config_path(&self) -> &PathBuf {
        &self.config_path
    }

    /// Load the whole config file, or defaults if it doesn't exist yet
    fn load(&self) -> Result<ProfileFile> {
        if !self.config_path.exists() {
            return Ok(ProfileFile::default());
        }
        let content = std::fs::read_to_string(&self.config_path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Rewrite the whole config file
    ///
    /// Creates parent directories if needed and restricts permissions to
    /// the owner on Unix, since the file holds credentials.
    fn save(&self, file: &ProfileFile) -> Result<()> {
        if let Some(parent) = self.config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(file)?;
        std::fs::write(&self.config_path, content)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let permissions = std::fs::Permissions::from_mode(0o600);
            std::fs::set_permissions(&self.config_path, permissions)?;
        }

        debug!(path = %self.config_path.display(), "config saved");
        Ok(())
    }
}

impl ProfileStore for FileProfileStore {
    fn get(&self, name: Option<&str>) -> Result<Profile> {
        get_from(&self.load()?, name)
    }

    fn list(&self) -> Result<Vec<Profile>> {
        Ok(self.load()?.config)
    }

    fn current(&self) -> Result<Option<String>> {
        let file = self.load()?;
        Ok((!file.current.is_empty()).then_some(file.current))
    }

    fn set_current(&self, name: &str) -> Result<()> {
        let mut file = self.load()?;
        if !file.config.iter().any(|p| p.name == name) {
            return Err(Error::NotFound(name.to_string()));
        }
        file.current = name.to_string();
        self.save(&file)
    }

    fn add(&self, profile: Profile) -> Result<()> {
        let mut file = self.load()?;
        if file.config.iter().any(|p| p.name == profile.name) {
            return Err(Error::DuplicateName(profile.name));
        }
        file.config.push(profile);
        self.save(&file)
    }

    fn update(&self, name: &str, update: &ProfileUpdate) -> Result<()> {
        let mut file = self.load()?;
        let profile = file
            .config
            .iter_mut()
            .find(|p| p.name == name)
            .ok_or_else(|| Error::NotFound(name.to_string()))?;
        update.apply(profile);
        self.save(&file)
    }

    fn remove(&self, name: &str) -> Result<()> {
        let mut file = self.load()?;
        file.config.retain(|p| p.name != name);
        if file.current == name {
            file.current.clear();
        }
        self.save(&file)
    }
}

/// In-memory profile store for tests
#[derive(Debug, Default)]
pub struct MemoryProfileStore {
    state: Mutex<ProfileFile>,
}

impl MemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProfileStore for MemoryProfileStore {
    fn get(&self, name: Option<&str>) -> Result<Profile> {
        get_from(&self.state.lock().unwrap(), name)
    }

    fn list(&self) -> Result<Vec<Profile>> {
        Ok(self.state.lock().unwrap().config.clone())
    }

    fn current(&self) -> Result<Option<String>> {
        let state = self.state.lock().unwrap();
        Ok((!state.current.is_empty()).then(|| state.current.clone()))
    }

    fn set_current(&self, name: &str) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        if !state.config.iter().any(|p| p.name == name) {
            return Err(Error::NotFound(name.to_string()));
        }
        state.current = name.to_string();
        Ok(())
    }

    fn add(&self, profile: Profile) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        if state.config.iter().any(|p| p.name == profile.name) {
            return Err(Error::DuplicateName(profile.name));
        }
        state.config.push(profile);
        Ok(())
    }

    fn update(&self, name: &str, update: &ProfileUpdate) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        let profile = state
            .config
            .iter_mut()
            .find(|p| p.name == name)
            .ok_or_else(|| Error::NotFound(name.to_string()))?;
        update.apply(profile);
        Ok(())
    }

    fn remove(&self, name: &str) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.config.retain(|p| p.name != name);
        if state.current == name {
            state.current.clear();
        }
        Ok(())
    }
}
