use super::{admit, report_list_error, warn_if_stale};
use crate::{
    libs::{
        category::{Categories, CategoryDraft},
        context::AppContext,
        guard::View,
        list::ListController,
        messages::Message,
        view::View as Table,
    },
    msg_error, msg_info, msg_print, msg_success,
};
use anyhow::Result;
use clap::{Args, Subcommand};
use dialoguer::{theme::ColorfulTheme, Confirm};

#[derive(Debug, Args)]
pub struct CategoryArgs {
    #[command(subcommand)]
    command: CategoryCommand,
}

#[derive(Debug, Subcommand)]
enum CategoryCommand {
    /// List all categories
    List,
    /// Create a new category
    Create {
        /// Category name
        name: String,
    },
    /// Delete a category
    Delete {
        /// Category ID
        id: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

pub async fn cmd(ctx: &AppContext, args: CategoryArgs) -> Result<()> {
    if !admit(ctx, View::Categories) {
        return Ok(());
    }

    let mut categories = ctx.categories();
    let result = match args.command {
        CategoryCommand::List => handle_list(&mut categories).await,
        CategoryCommand::Create { name } => handle_create(&mut categories, &name).await,
        CategoryCommand::Delete { id, yes } => handle_delete(&mut categories, &id, yes).await,
    };
    report_list_error(result)
}

async fn handle_list(categories: &mut ListController<Categories>) -> Result<()> {
    categories.refresh().await?;

    if categories.items().is_empty() {
        msg_info!(Message::CategoriesNotFound);
        return Ok(());
    }

    msg_print!(Message::CategoriesHeader, true);
    Table::categories(categories.items());
    Ok(())
}

async fn handle_create(categories: &mut ListController<Categories>, name: &str) -> Result<()> {
    let category = categories.create(&CategoryDraft::new(name)).await?;
    msg_success!(Message::CategoryCreated(category.name));
    warn_if_stale(categories.status());
    Ok(())
}

async fn handle_delete(categories: &mut ListController<Categories>, id: &str, yes: bool) -> Result<()> {
    categories.refresh().await?;
    let Some(name) = categories.get(id).map(|category| category.name.clone()) else {
        msg_error!(Message::CategoryNotFound(id.to_string()));
        return Ok(());
    };

    let confirmed = yes
        || Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::ConfirmDeleteCategory(name).to_string())
            .default(false)
            .interact()?;
    if !confirmed {
        return Ok(());
    }

    categories.delete(id).await?;
    msg_success!(Message::CategoryDeleted(id.to_string()));
    warn_if_stale(categories.status());
    Ok(())
}
