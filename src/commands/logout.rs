use super::admit;
use crate::{
    libs::{context::AppContext, guard::View, messages::Message},
    msg_success,
};
use anyhow::Result;

pub async fn cmd(ctx: &mut AppContext) -> Result<()> {
    if !admit(ctx, View::LANDING) {
        return Ok(());
    }

    ctx.session.logout().await;
    msg_success!(Message::LoggedOut);
    Ok(())
}
