pub mod calendar;
pub mod category;
pub mod init;
pub mod login;
pub mod logout;
pub mod signup;
pub mod task;
pub mod whoami;

use crate::libs::{
    config::Config,
    context::AppContext,
    data_storage::DataStorage,
    guard::{Guard, View},
    list::{ListError, ListStatus},
    messages::Message,
};
use crate::{msg_debug, msg_error, msg_error_anyhow, msg_info, msg_warning};
use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Configuration initialization")]
    Init(init::InitArgs),
    #[command(about = "Log in to the task server")]
    Login(login::LoginArgs),
    #[command(about = "Create a new account")]
    Signup(signup::SignupArgs),
    #[command(about = "End the current session")]
    Logout,
    #[command(about = "Show the logged-in user")]
    Whoami,
    #[command(about = "Manage tasks")]
    Task(task::TaskArgs),
    #[command(about = "Manage categories")]
    Category(category::CategoryArgs),
    #[command(about = "Show tasks due on a given day")]
    Calendar(calendar::CalendarArgs),
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub async fn menu() -> Result<()> {
        let cli = Self::parse();

        // Init works on the configuration itself and needs no session
        if let Commands::Init(args) = cli.command {
            return init::cmd(args);
        }

        let storage = DataStorage::new();
        let config = Config::read_from(&storage)
            .map_err(|err| msg_error_anyhow!(Message::ConfigUnreadable(err.to_string())))?;
        let mut ctx = AppContext::from_config(&config, &storage)?;
        msg_debug!(Message::ServerAddress(ctx.api.base_url().to_string()));
        ctx.init().await;

        let result = match cli.command {
            Commands::Init(_) => Ok(()),
            Commands::Login(args) => login::cmd(&mut ctx, args).await,
            Commands::Signup(args) => signup::cmd(&mut ctx, args).await,
            Commands::Logout => logout::cmd(&mut ctx).await,
            Commands::Whoami => whoami::cmd(&ctx),
            Commands::Task(args) => task::cmd(&ctx, args).await,
            Commands::Category(args) => category::cmd(&ctx, args).await,
            Commands::Calendar(args) => calendar::cmd(&ctx, args).await,
        };

        ctx.dispose();
        result
    }
}

/// Checks the access rule for `view` and tells the user where to go
/// instead. Returns `true` when the view may be shown.
pub(crate) fn admit(ctx: &AppContext, view: View) -> bool {
    match ctx.guard(view) {
        Guard::Render => true,
        Guard::Wait => {
            msg_info!(Message::SessionVerifying);
            false
        }
        Guard::Redirect(View::Login) => {
            msg_warning!(Message::NotLoggedIn);
            false
        }
        Guard::Redirect(_) => {
            let username = ctx.session.user().map(|user| user.username.clone()).unwrap_or_default();
            msg_info!(Message::AlreadyLoggedIn(username));
            false
        }
    }
}

/// Prints a failed list operation as a user message. Other errors are
/// passed on.
pub(crate) fn report_list_error(result: Result<()>) -> Result<()> {
    match result {
        Err(err) => match err.downcast_ref::<ListError>() {
            Some(list_err) => {
                msg_error!(Message::from_list_error(list_err));
                Ok(())
            }
            None => Err(err),
        },
        ok => ok,
    }
}

/// Warns when a saved change could not be followed by a reload.
pub(crate) fn warn_if_stale(status: ListStatus) {
    if status == ListStatus::Stale {
        msg_warning!(Message::ListStale);
    }
}

/// `clap` value parser for `YYYY-MM-DD` dates.
pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    crate::libs::task::parse_calendar_date(raw).map_err(|_| format!("invalid date '{}', expected YYYY-MM-DD", raw))
}
