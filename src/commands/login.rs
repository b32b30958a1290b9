use super::admit;
use crate::{
    libs::{context::AppContext, guard::View, messages::Message},
    msg_error, msg_success,
};
use anyhow::Result;
use clap::Args;
use dialoguer::{theme::ColorfulTheme, Input, Password};

#[derive(Debug, Args)]
pub struct LoginArgs {
    /// Account name; prompted for when omitted
    username: Option<String>,
}

pub async fn cmd(ctx: &mut AppContext, login_args: LoginArgs) -> Result<()> {
    if !admit(ctx, View::Login) {
        return Ok(());
    }

    let username = match login_args.username {
        Some(username) => username,
        None => Input::<String>::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptUsername.to_string())
            .interact_text()?,
    };
    let password = Password::with_theme(&ColorfulTheme::default())
        .with_prompt(Message::PromptPassword.to_string())
        .interact()?;

    if ctx.session.login(&username, &password).await {
        let name = ctx.session.user().map(|user| user.username.clone()).unwrap_or(username);
        msg_success!(Message::LoginSucceeded(name));
    } else {
        msg_error!(Message::LoginFailed);
    }
    Ok(())
}
