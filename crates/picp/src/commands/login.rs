//! Console login handlers.

use secrecy::SecretString;

use picp_api::{
    DEFAULT_NOTICE_DURATION, LoginCredentials, LoginSettingUpdate, NoticeKind, Notifier,
};

use crate::cli::{GlobalOpts, LoginArgs, LoginSettingArgs, LoginSettingCommand};
use crate::commands::settle;
use crate::config::Session;
use crate::error::CliError;
use crate::output;

fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "password".into(),
        reason: format!("prompt failed: {e}"),
    }
}

fn prompt_password(prompt: &str) -> Result<SecretString, CliError> {
    let pass = rpassword::prompt_password(prompt).map_err(prompt_err)?;
    if pass.is_empty() {
        return Err(CliError::Validation {
            field: "password".into(),
            reason: "password cannot be empty".into(),
        });
    }
    Ok(SecretString::from(pass))
}

pub async fn handle_login(session: &Session, args: LoginArgs) -> Result<(), CliError> {
    let profile_user = session.credentials.as_ref().map(|(user, _)| user.clone());
    let user = args.user.or(profile_user).ok_or_else(|| CliError::Validation {
        field: "user".into(),
        reason: format!(
            "pass --user or set `user` in profile '{}'",
            session.profile
        ),
    })?;

    // Reuse the profile password only for the profile's own user.
    let password = match session.credentials {
        Some((ref profile_user, ref pw)) if *profile_user == user => pw.clone(),
        _ => prompt_password("Password: ")?,
    };

    settle(session.client.login(&LoginCredentials::new(user.clone(), password)))
        .await
        .map_err(|e| CliError::login(e, &session.profile))?;

    session.notifier.notify(
        NoticeKind::Success,
        &format!("logged in as {user}"),
        DEFAULT_NOTICE_DURATION,
    );
    Ok(())
}

pub async fn handle_setting(
    session: &Session,
    args: LoginSettingArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        LoginSettingCommand::Get => {
            let setting = settle(session.client.get_login_setting()).await?;
            output::print_output(&output::render(global.output, &setting)?, global.quiet);
        }
        LoginSettingCommand::Set {
            user,
            max_age,
            disable,
        } => {
            let (update, notice) = match user {
                Some(user) if !disable => {
                    let password = prompt_password("New password: ")?;
                    let notice = format!("console user set to {user}");
                    (LoginSettingUpdate::new(user, password), notice)
                }
                _ => (LoginSettingUpdate::disable(), "console login disabled".to_owned()),
            };
            settle(session.client.set_login_setting(&update.with_max_age(max_age))).await?;
            session
                .notifier
                .notify(NoticeKind::Success, &notice, DEFAULT_NOTICE_DURATION);
        }
    }
    Ok(())
}
