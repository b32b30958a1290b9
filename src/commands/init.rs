//! Configuration setup command.
//!
//! Runs the interactive wizard that writes `config.json`, or removes the
//! file again with `--delete`.

use crate::{
    libs::{config::Config, data_storage::DataStorage, messages::Message},
    msg_info, msg_success,
};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Remove existing configuration instead of creating new one
    #[arg(short, long)]
    delete: bool,
}

pub fn cmd(init_args: InitArgs) -> Result<()> {
    let storage = DataStorage::new();

    if init_args.delete {
        Config::delete_from(&storage)?;
        msg_success!(Message::ConfigDeleted);
        return Ok(());
    }

    let config = Config::init()?;
    config.save_to(&storage)?;

    msg_success!(Message::ConfigSaved);
    msg_info!(Message::ServerAddress(config.api_url()));
    Ok(())
}
