use std::env;
use std::fmt;
use std::path::{Path, PathBuf};

use reqwest::header::{HeaderValue, AUTHORIZATION};
use reqwest::RequestBuilder;
use serde::Deserialize;

use crate::error::KaggleError;

type Result<T> = std::result::Result<T, KaggleError>;

pub const USERNAME_VAR: &str = "KAGGLE_USERNAME";
pub const KEY_VAR: &str = "KAGGLE_KEY";
pub const CONFIG_DIR_VAR: &str = "KAGGLE_CONFIG_DIR";

const CONFIG_FILE: &str = "kaggle.json";
const API_TOKEN_PREFIX: &str = "KGAT_";

#[derive(Debug)]
pub struct Unauthenticated;
#[derive(Debug)]
pub struct Authenticated(pub(crate) Credentials);

pub trait AuthStates: private::Sealed {}
impl AuthStates for Unauthenticated {}
impl AuthStates for Authenticated {}

#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    key: String,
}

// Keeps the key out of logs and panics.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("key", &"<redacted>")
            .finish()
    }
}

impl Credentials {
    pub fn new(username: &str, key: &str) -> Credentials {
        Credentials {
            username: String::from(username),
            key: String::from(key),
        }
    }

    /// Writes the pair into the process environment, where the client picks it
    /// up during [`authenticate`](super::CompetitionClient::authenticate).
    pub fn export(&self) {
        env::set_var(USERNAME_VAR, &self.username);
        env::set_var(KEY_VAR, &self.key);
    }

    /// Resolves credentials the way the official client does: environment
    /// variables win, `kaggle.json` in the config directory fills the gaps.
    pub fn resolve<F>(lookup: F, config_dir: &Path) -> Result<Credentials>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |name: &str| lookup(name).filter(|v| !v.is_empty());
        let mut username = lookup(USERNAME_VAR);
        let mut key = lookup(KEY_VAR);

        if username.is_none() || key.is_none() {
            if let Some(file) = ConfigFile::load(config_dir)? {
                tracing::debug!(dir = %config_dir.display(), "read {CONFIG_FILE}");
                username = username.or(file.username);
                key = key.or(file.key);
            }
        }

        match (username, key) {
            (Some(username), Some(key)) => Ok(Credentials { username, key }),
            _ => Err(KaggleError::MissingCredentials {
                config_dir: config_dir.to_path_buf(),
            }),
        }
    }

    pub fn from_env() -> Result<Credentials> {
        Credentials::resolve(|name| env::var(name).ok(), &config_dir())
    }

    pub(crate) fn authorize(&self, request: RequestBuilder) -> Result<RequestBuilder> {
        if self.key.starts_with(API_TOKEN_PREFIX) {
            let mut value = HeaderValue::from_str(&format!("Bearer {}", self.key))?;
            value.set_sensitive(true);
            Ok(request.header(AUTHORIZATION, value))
        } else {
            Ok(request.basic_auth(&self.username, Some(&self.key)))
        }
    }
}

/// `KAGGLE_CONFIG_DIR`, else `~/.kaggle`.
pub fn config_dir() -> PathBuf {
    config_dir_from(env::var_os(CONFIG_DIR_VAR).map(PathBuf::from), dirs::home_dir())
}

fn config_dir_from(configured: Option<PathBuf>, home: Option<PathBuf>) -> PathBuf {
    match configured.filter(|p| !p.as_os_str().is_empty()) {
        Some(dir) => dir,
        None => home.unwrap_or_default().join(".kaggle"),
    }
}

#[derive(Deserialize, Default)]
struct ConfigFile {
    username: Option<String>,
    key: Option<String>,
}

impl ConfigFile {
    fn load(dir: &Path) -> Result<Option<ConfigFile>> {
        let path = dir.join(CONFIG_FILE);
        let text = match std::fs::read_to_string(&path) {
            Ok(t) => t,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(KaggleError::ConfigRead { path, source }),
        };

        let file = serde_json::from_str::<ConfigFile>(&text)
            .map_err(|source| KaggleError::ConfigParse { path, source })?;

        Ok(Some(ConfigFile {
            username: file.username.filter(|v| !v.is_empty()),
            key: file.key.filter(|v| !v.is_empty()),
        }))
    }
}

mod private {
    pub trait Sealed {}
    impl Sealed for super::Unauthenticated {}
    impl Sealed for super::Authenticated {}
}
