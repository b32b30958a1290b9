use super::admit;
use crate::{
    libs::{context::AppContext, guard::View, messages::Message},
    msg_error, msg_success,
};
use anyhow::Result;
use clap::Args;
use dialoguer::{theme::ColorfulTheme, Input, Password};

#[derive(Debug, Args)]
pub struct SignupArgs {
    /// Account name; prompted for when omitted
    username: Option<String>,
    /// Email address; prompted for when omitted
    email: Option<String>,
}

pub async fn cmd(ctx: &mut AppContext, signup_args: SignupArgs) -> Result<()> {
    if !admit(ctx, View::Signup) {
        return Ok(());
    }

    let username = match signup_args.username {
        Some(username) => username,
        None => Input::<String>::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptUsername.to_string())
            .interact_text()?,
    };
    let email = match signup_args.email {
        Some(email) => email,
        None => Input::<String>::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptEmail.to_string())
            .interact_text()?,
    };
    let password = Password::with_theme(&ColorfulTheme::default())
        .with_prompt(Message::PromptPassword.to_string())
        .with_confirmation(
            Message::PromptPasswordConfirm.to_string(),
            Message::PromptPasswordMismatch.to_string(),
        )
        .interact()?;

    // Signing up does not log in; the user is sent to the login view
    if ctx.session.signup(&username, &email, &password).await {
        msg_success!(Message::SignupSucceeded(username));
    } else {
        msg_error!(Message::SignupFailed);
    }
    Ok(())
}
