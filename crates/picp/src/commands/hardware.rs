//! Fan, display, and access-point settings handlers.
//!
//! All three are get/set pairs over a JSON document, so they share one
//! generic handler parameterized by the endpoint pair.

use std::io::Read;
use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;

use picp_api::{
    ApiClient, DEFAULT_NOTICE_DURATION, DisplayConfig, FanConfig, NoticeKind, Notifier,
    PendingRequest, WifiConfig,
};

use crate::cli::{ConfigFileArgs, ConfigFileCommand, GlobalOpts};
use crate::commands::settle;
use crate::config::Session;
use crate::error::CliError;
use crate::output;

/// Read a JSON document from `path`, or stdin for `-`.
pub fn read_document<T: DeserializeOwned>(path: &Path) -> Result<T, CliError> {
    let raw = if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(path)?
    };
    Ok(serde_json::from_str(&raw)?)
}

async fn handle_settings<T>(
    session: &Session,
    args: ConfigFileArgs,
    global: &GlobalOpts,
    label: &str,
    get: fn(&ApiClient) -> PendingRequest<T>,
    set: fn(&ApiClient, &T) -> PendingRequest<()>,
) -> Result<(), CliError>
where
    T: Serialize + DeserializeOwned,
{
    match args.command {
        ConfigFileCommand::Get => {
            let current = settle(get(&session.client)).await?;
            output::print_output(&output::render(global.output, &current)?, global.quiet);
        }
        ConfigFileCommand::Set { file } => {
            let desired: T = read_document(&file)?;
            settle(set(&session.client, &desired)).await?;
            session.notifier.notify(
                NoticeKind::Success,
                &format!("{label} settings saved"),
                DEFAULT_NOTICE_DURATION,
            );
        }
    }
    Ok(())
}

pub async fn handle_fan(
    session: &Session,
    args: ConfigFileArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    handle_settings::<FanConfig>(
        session,
        args,
        global,
        "fan",
        ApiClient::get_fan_config,
        ApiClient::set_fan_config,
    )
    .await
}

pub async fn handle_display(
    session: &Session,
    args: ConfigFileArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    handle_settings::<DisplayConfig>(
        session,
        args,
        global,
        "display",
        ApiClient::get_display_config,
        ApiClient::set_display_config,
    )
    .await
}

pub async fn handle_wifi_config(
    session: &Session,
    args: ConfigFileArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    handle_settings::<WifiConfig>(
        session,
        args,
        global,
        "access point",
        ApiClient::get_wifi_config,
        ApiClient::set_wifi_config,
    )
    .await
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn reads_fan_document_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fan.json");
        std::fs::write(&path, r#"{ "Enable": true, "Speed": 70, "mode": "curve" }"#).unwrap();

        let cfg: FanConfig = read_document(&path).unwrap();
        assert_eq!(cfg.enable, Some(true));
        assert_eq!(cfg.speed, Some(70));
        assert!(cfg.extra.contains_key("mode"));
    }

    #[test]
    fn malformed_document_is_json_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("display.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = read_document::<DisplayConfig>(&path).unwrap_err();
        assert!(matches!(err, CliError::Json(_)));
    }
}
