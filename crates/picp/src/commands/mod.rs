//! Command dispatch: bridges CLI args -> API calls -> output formatting.

pub mod config_cmd;
pub mod devices;
pub mod hardware;
pub mod login;
pub mod wifi;

use picp_api::{LoginCredentials, PendingRequest};

use crate::cli::{Command, GlobalOpts};
use crate::config::Session;
use crate::error::CliError;

/// Await a pending request, cancelling it on Ctrl-C.
pub async fn settle<T>(mut pending: PendingRequest<T>) -> Result<T, picp_api::Error> {
    tokio::select! {
        result = &mut pending => result,
        _ = tokio::signal::ctrl_c() => {
            tracing::debug!("interrupted, cancelling request");
            pending.cancel();
            pending.await
        }
    }
}

/// Dispatch an appliance-bound command to its handler.
///
/// Profiles carrying both a user and a password log in first, so every
/// command runs inside a fresh console session.
pub async fn dispatch(cmd: Command, session: &Session, global: &GlobalOpts) -> Result<(), CliError> {
    if !matches!(cmd, Command::Login(_)) {
        if let Some((ref user, ref password)) = session.credentials {
            tracing::debug!(user = %user, "logging in with profile credentials");
            let creds = LoginCredentials::new(user.clone(), password.clone());
            settle(session.client.login(&creds))
                .await
                .map_err(|e| CliError::login(e, &session.profile))?;
        }
    }

    match cmd {
        Command::Devices => devices::handle(session, global).await,
        Command::Wifi(args) => wifi::handle(session, args, global).await,
        Command::Fan(args) => hardware::handle_fan(session, args, global).await,
        Command::Display(args) => hardware::handle_display(session, args, global).await,
        Command::WifiConfig(args) => hardware::handle_wifi_config(session, args, global).await,
        Command::Login(args) => login::handle_login(session, args).await,
        Command::LoginSetting(args) => login::handle_setting(session, args, global).await,
        // Config and Completions are handled before a session exists
        Command::Config(_) | Command::Completions(_) => Ok(()),
    }
}
