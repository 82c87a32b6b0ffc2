//! Config subcommand handlers.

use std::fmt::Write;

use picp_api::{DEFAULT_NOTICE_DURATION, NoticeKind, Notifier};
use picp_config::{DEFAULT_PROFILE, Profile};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config::{self, Config};
use crate::console::TerminalNotifier;
use crate::error::CliError;
use crate::output;

/// Format config for display, masking the password.
fn format_config_redacted(cfg: &Config) -> String {
    let mut out = String::new();

    if let Some(ref default) = cfg.default_profile {
        let _ = writeln!(out, "default_profile = \"{default}\"");
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "[defaults]");
    let _ = writeln!(out, "timeout = {}", cfg.defaults.timeout);
    let _ = writeln!(out, "insecure = {}", cfg.defaults.insecure);

    let mut names: Vec<_> = cfg.profiles.keys().collect();
    names.sort();
    for name in names {
        let p = &cfg.profiles[name];
        let _ = writeln!(out);
        let _ = writeln!(out, "[profiles.{name}]");
        let _ = writeln!(out, "appliance = \"{}\"", p.appliance);
        if let Some(ref u) = p.user {
            let _ = writeln!(out, "user = \"{u}\"");
        }
        if p.password.is_some() {
            let _ = writeln!(out, "password = \"****\"");
        }
        if let Some(ref ca) = p.ca_cert {
            let _ = writeln!(out, "ca_cert = \"{}\"", ca.display());
        }
        if let Some(insecure) = p.insecure {
            let _ = writeln!(out, "insecure = {insecure}");
        }
        if let Some(timeout) = p.timeout {
            let _ = writeln!(out, "timeout = {timeout}");
        }
    }

    out.trim_end().to_owned()
}

/// Apply one `config set` key to a profile.
fn set_profile_key(profile: &mut Profile, key: &str, value: &str) -> Result<(), CliError> {
    match key {
        "appliance" => {
            picp_config::parse_appliance_url(value)?;
            value.clone_into(&mut profile.appliance);
        }
        "user" => profile.user = Some(value.to_owned()),
        "ca_cert" | "ca-cert" => profile.ca_cert = Some(value.into()),
        "insecure" => {
            profile.insecure = Some(value.parse().map_err(|_| CliError::Validation {
                field: "insecure".into(),
                reason: "must be 'true' or 'false'".into(),
            })?);
        }
        "timeout" => {
            profile.timeout = Some(value.parse().map_err(|_| CliError::Validation {
                field: "timeout".into(),
                reason: "must be a number of seconds".into(),
            })?);
        }
        other => {
            return Err(CliError::Validation {
                field: other.into(),
                reason: format!(
                    "unknown config key '{other}'. Valid keys: appliance, user, ca_cert, \
                     insecure, timeout"
                ),
            });
        }
    }
    Ok(())
}

pub fn handle(args: &ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let notifier = TerminalNotifier::new(output::should_color(global.color), global.quiet);
    match args.command {
        ConfigCommand::Show => {
            let cfg = config::load_config()?;
            output::print_output(&format_config_redacted(&cfg), global.quiet);
        }
        ConfigCommand::Path => {
            output::print_output(&config::config_path().display().to_string(), global.quiet);
        }
        ConfigCommand::Set { ref key, ref value } => {
            let mut cfg = config::load_config()?;
            let name = global
                .profile
                .clone()
                .or_else(|| cfg.default_profile.clone())
                .unwrap_or_else(|| DEFAULT_PROFILE.to_owned());
            let profile = cfg.profiles.entry(name.clone()).or_default();
            set_profile_key(profile, key, value)?;
            config::save_config(&cfg)?;
            notifier.notify(
                NoticeKind::Success,
                &format!("set {key} on profile '{name}'"),
                DEFAULT_NOTICE_DURATION,
            );
        }
        ConfigCommand::Use { ref name } => {
            let mut cfg = config::load_config()?;
            if !cfg.profiles.contains_key(name) {
                return Err(CliError::ProfileNotFound {
                    name: name.clone(),
                    path: config::config_path().display().to_string(),
                });
            }
            cfg.default_profile = Some(name.clone());
            config::save_config(&cfg)?;
            notifier.notify(
                NoticeKind::Success,
                &format!("default profile set to '{name}'"),
                DEFAULT_NOTICE_DURATION,
            );
        }
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn redacts_password() {
        let mut cfg = Config::default();
        cfg.profiles.insert(
            "lab".into(),
            Profile {
                appliance: "http://192.168.1.10:8888".into(),
                user: Some("admin".into()),
                password: Some("s3cret-pass".into()),
                ..Profile::default()
            },
        );

        let text = format_config_redacted(&cfg);
        assert!(text.contains("[profiles.lab]"));
        assert!(text.contains("user = \"admin\""));
        assert!(text.contains("password = \"****\""));
        assert!(!text.contains("s3cret-pass"));
    }

    #[test]
    fn set_profile_key_validates_values() {
        let mut profile = Profile::default();
        set_profile_key(&mut profile, "appliance", "http://10.0.0.5:8888").unwrap();
        set_profile_key(&mut profile, "timeout", "15").unwrap();
        set_profile_key(&mut profile, "insecure", "true").unwrap();
        assert_eq!(profile.appliance, "http://10.0.0.5:8888");
        assert_eq!(profile.timeout, Some(15));
        assert_eq!(profile.insecure, Some(true));

        for (key, value) in [
            ("appliance", "ftp://10.0.0.5"),
            ("timeout", "soon"),
            ("insecure", "maybe"),
            ("site", "lab"),
        ] {
            let err = set_profile_key(&mut profile, key, value).unwrap_err();
            assert_eq!(err.exit_code(), crate::error::exit_code::USAGE, "{key}={value}");
        }
        assert_eq!(profile.appliance, "http://10.0.0.5:8888");
    }
}
