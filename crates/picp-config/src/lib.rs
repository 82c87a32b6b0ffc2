//! Profile configuration for the picp console tools.
//!
//! TOML profiles naming an appliance, optional console credentials, and TLS
//! and timeout overrides, translated into the settings `picp_api::ApiClient`
//! is built from. The CLI layers its flag overrides on top.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use picp_api::{TlsMode, TransportConfig};

/// Where the appliance listens when nothing else is configured.
pub const DEFAULT_APPLIANCE: &str = "http://127.0.0.1:8888";

/// Name used when neither the flag nor the file selects a profile.
pub const DEFAULT_PROFILE: &str = "default";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("profile '{name}' is not defined in {path}")]
    UnknownProfile { name: String, path: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Profile used when `--profile` is not given.
    pub default_profile: Option<String>,

    #[serde(default)]
    pub defaults: Defaults,

    /// Named appliance profiles.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some(DEFAULT_PROFILE.into()),
            defaults: Defaults::default(),
            profiles: HashMap::new(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Defaults {
    /// Request timeout in seconds; 0 waits indefinitely.
    #[serde(default)]
    pub timeout: u64,

    #[serde(default)]
    pub insecure: bool,
}

/// A named appliance profile.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Profile {
    /// Appliance base URL (e.g. "http://192.168.1.10:8888").
    #[serde(default = "default_appliance")]
    pub appliance: String,

    /// Console user for `picp login`.
    pub user: Option<String>,

    /// Console password (plaintext; prefer the prompt or `PICP_PASSWORD`).
    pub password: Option<String>,

    /// PEM CA certificate for an HTTPS appliance.
    pub ca_cert: Option<PathBuf>,

    /// Override `defaults.insecure`.
    pub insecure: Option<bool>,

    /// Override `defaults.timeout`.
    pub timeout: Option<u64>,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            appliance: default_appliance(),
            user: None,
            password: None,
            ca_cert: None,
            insecure: None,
            timeout: None,
        }
    }
}

fn default_appliance() -> String {
    DEFAULT_APPLIANCE.into()
}

/// Everything needed to construct an `ApiClient`.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: Url,
    pub transport: TransportConfig,
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path: `PICP_CONFIG` if set, else XDG / platform
/// conventions.
pub fn config_path() -> PathBuf {
    if let Some(path) = std::env::var_os("PICP_CONFIG").filter(|p| !p.is_empty()) {
        return PathBuf::from(path);
    }
    ProjectDirs::from("io", "picp", "picp").map_or_else(
        || {
            let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
            p.push(".config");
            p.push("picp");
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load Config from `path` + environment.
///
/// A missing file yields the defaults. Environment keys use `__` as the
/// nesting separator, e.g. `PICP_DEFAULTS__TIMEOUT=10`.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("PICP_").split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

// ── Config saving ───────────────────────────────────────────────────

/// Write config to the canonical file.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    save_config_to(cfg, &config_path())
}

/// Serialize config to TOML and write it to `path`, creating parent dirs.
pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Profile resolution ──────────────────────────────────────────────

impl Config {
    /// Pick the profile named `requested`, else `default_profile`.
    ///
    /// An explicitly requested profile must exist. The implicit default may
    /// be absent, in which case a local-appliance profile is used.
    pub fn select_profile(&self, requested: Option<&str>) -> Result<(String, Profile), ConfigError> {
        if let Some(name) = requested {
            return self
                .profiles
                .get(name)
                .map(|p| (name.to_owned(), p.clone()))
                .ok_or_else(|| ConfigError::UnknownProfile {
                    name: name.to_owned(),
                    path: config_path().display().to_string(),
                });
        }

        let name = self
            .default_profile
            .clone()
            .unwrap_or_else(|| DEFAULT_PROFILE.into());
        let profile = self.profiles.get(&name).cloned().unwrap_or_default();
        Ok((name, profile))
    }
}

/// Parse and check an appliance base URL.
pub fn parse_appliance_url(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw).map_err(|e| ConfigError::Validation {
        field: "appliance".into(),
        reason: format!("invalid URL '{raw}': {e}"),
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::Validation {
            field: "appliance".into(),
            reason: format!("expected an http or https URL, got '{raw}'"),
        });
    }
    Ok(url)
}

/// Build an `ApiConfig` from a profile and the global defaults.
pub fn resolve_profile(profile: &Profile, defaults: &Defaults) -> Result<ApiConfig, ConfigError> {
    let base_url = parse_appliance_url(&profile.appliance)?;

    let tls = if profile.insecure.unwrap_or(defaults.insecure) {
        TlsMode::DangerAcceptInvalid
    } else if let Some(ref ca_path) = profile.ca_cert {
        TlsMode::CustomCa(ca_path.clone())
    } else {
        TlsMode::System
    };

    let mut transport = TransportConfig::default().with_tls(tls);
    match profile.timeout.unwrap_or(defaults.timeout) {
        0 => {}
        secs => transport = transport.with_timeout(Duration::from_secs(secs)),
    }

    Ok(ApiConfig {
        base_url,
        transport,
    })
}

/// Console credentials from the profile, with `PICP_PASSWORD` taking
/// precedence over a plaintext password. `None` unless both parts are known.
pub fn resolve_credentials(profile: &Profile) -> Option<(String, SecretString)> {
    let user = profile.user.clone().filter(|u| !u.is_empty())?;
    let password = std::env::var("PICP_PASSWORD")
        .ok()
        .or_else(|| profile.password.clone())?;
    Some((user, SecretString::from(password)))
}
