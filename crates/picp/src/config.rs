//! CLI configuration: thin wrapper around `picp_config`.
//!
//! Applies `GlobalOpts` flag overrides (--appliance, --insecure, --timeout)
//! on top of the selected profile and builds the `ApiClient`.

use std::sync::Arc;

use secrecy::SecretString;

use picp_api::ApiClient;

use crate::cli::GlobalOpts;
use crate::console::{LoginHint, TerminalNotifier};
use crate::error::CliError;

pub use picp_config::{Config, Profile, config_path, load_config, save_config};

/// A ready client plus what the commands need to know about its profile.
pub struct Session {
    pub client: ApiClient,
    pub profile: String,
    pub credentials: Option<(String, SecretString)>,
    pub notifier: TerminalNotifier,
}

/// Apply CLI flag overrides to a profile; flags win.
pub fn apply_overrides(mut profile: Profile, global: &GlobalOpts) -> Profile {
    if let Some(ref url) = global.appliance {
        profile.appliance.clone_from(url);
    }
    if global.insecure {
        profile.insecure = Some(true);
    }
    if let Some(timeout) = global.timeout {
        profile.timeout = Some(timeout);
    }
    profile
}

/// Load config, select the profile, and build a client for it.
pub fn connect(global: &GlobalOpts, notifier: TerminalNotifier) -> Result<Session, CliError> {
    let cfg = load_config()?;
    let (name, profile) = cfg.select_profile(global.profile.as_deref())?;
    let profile = apply_overrides(profile, global);

    let api = picp_config::resolve_profile(&profile, &cfg.defaults)?;
    tracing::debug!(profile = %name, appliance = %api.base_url, "resolved profile");

    let client = ApiClient::new(api.base_url, &api.transport)?
        .with_navigator(Arc::new(LoginHint::new(notifier, &name)));

    Ok(Session {
        client,
        credentials: picp_config::resolve_credentials(&profile),
        profile: name,
        notifier,
    })
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;
    use crate::cli::Cli;

    #[test]
    fn flags_override_profile() {
        let cli = Cli::parse_from([
            "picp",
            "--appliance",
            "http://10.0.0.2:8888",
            "--insecure",
            "--timeout",
            "3",
            "devices",
        ]);
        let profile = apply_overrides(Profile::default(), &cli.global);
        assert_eq!(profile.appliance, "http://10.0.0.2:8888");
        assert_eq!(profile.insecure, Some(true));
        assert_eq!(profile.timeout, Some(3));
    }

    #[test]
    fn absent_flags_keep_profile() {
        let cli = Cli::parse_from(["picp", "devices"]);
        let base = Profile {
            appliance: "http://192.168.1.10:8888".into(),
            timeout: Some(9),
            ..Profile::default()
        };
        let profile = apply_overrides(base, &cli.global);
        assert_eq!(profile.appliance, "http://192.168.1.10:8888");
        assert_eq!(profile.timeout, Some(9));
        assert_eq!(profile.insecure, None);
    }
}
