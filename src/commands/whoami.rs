use super::admit;
use crate::{
    libs::{context::AppContext, guard::View, messages::Message},
    msg_print,
};
use anyhow::Result;

pub fn cmd(ctx: &AppContext) -> Result<()> {
    if !admit(ctx, View::LANDING) {
        return Ok(());
    }

    if let Some(user) = ctx.session.user() {
        msg_print!(Message::CurrentUser {
            username: user.username.clone(),
            email: user.email.clone(),
        });
    }
    Ok(())
}
