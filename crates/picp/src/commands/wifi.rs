//! Wi-Fi command handlers.

use secrecy::SecretString;

use picp_api::{DEFAULT_NOTICE_DURATION, NoticeKind, Notifier, WifiApSetting};

use crate::cli::{GlobalOpts, WifiArgs, WifiCommand, WifiConnectArgs};
use crate::commands::settle;
use crate::config::Session;
use crate::error::CliError;
use crate::output;

/// Build the connect request from CLI arguments.
fn connect_setting(args: WifiConnectArgs) -> WifiApSetting {
    let setting = match (args.ssid, args.bssid) {
        (Some(ssid), _) => WifiApSetting::connect_ssid(args.device, ssid),
        (None, Some(bssid)) => WifiApSetting::connect_bssid(args.device, bssid),
        // clap's `target` group requires one of the two
        (None, None) => WifiApSetting::connect_ssid(args.device, String::new()),
    };
    let setting = setting.hidden(args.hidden);
    let setting = match args.password {
        Some(pw) => setting.with_password(SecretString::from(pw)),
        None => setting,
    };
    match args.wep_key_type {
        Some(key_type) => setting.with_wep_key_type(key_type),
        None => setting,
    }
}

pub async fn handle(session: &Session, args: WifiArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let client = &session.client;
    let done = |message: &str| {
        session
            .notifier
            .notify(NoticeKind::Success, message, DEFAULT_NOTICE_DURATION);
    };

    match args.command {
        WifiCommand::List { device } => {
            let aps = settle(client.list_wifi_ap(&device)).await?;
            output::print_output(&output::render(global.output, &aps)?, global.quiet);
        }
        WifiCommand::Connect(args) => {
            let target = args.ssid.clone().or_else(|| args.bssid.clone()).unwrap_or_default();
            let device = args.device.clone();
            settle(client.create_wifi_ap(&connect_setting(args))).await?;
            done(&format!("{device} connected to {target}"));
        }
        WifiCommand::Up { connection_uuid } => {
            settle(client.create_wifi_ap(&WifiApSetting::toggle(&connection_uuid, true))).await?;
            done(&format!("connection {connection_uuid} is up"));
        }
        WifiCommand::Down { connection_uuid } => {
            settle(client.create_wifi_ap(&WifiApSetting::toggle(&connection_uuid, false))).await?;
            done(&format!("connection {connection_uuid} is down"));
        }
        WifiCommand::Delete { connection_uuid } => {
            settle(client.delete_wifi_ap(&connection_uuid)).await?;
            done(&format!("connection {connection_uuid} deleted"));
        }
    }
    Ok(())
}
