use super::{admit, parse_date, report_list_error, warn_if_stale};
use crate::{
    libs::{
        context::AppContext,
        guard::View,
        list::ListController,
        messages::Message,
        task::{TaskDraft, TaskStatus, Tasks},
        view::View as Table,
    },
    msg_error, msg_info, msg_print, msg_success,
};
use anyhow::Result;
use chrono::NaiveDate;
use clap::{Args, Subcommand};
use dialoguer::{theme::ColorfulTheme, Confirm, Input};

#[derive(Debug, Args)]
pub struct TaskArgs {
    #[command(subcommand)]
    command: TaskCommand,
}

#[derive(Debug, Subcommand)]
enum TaskCommand {
    /// List tasks, one page at a time
    List {
        /// Page number
        #[arg(short, long)]
        page: Option<u32>,
        /// Only tasks in this category (ID)
        #[arg(short, long)]
        category: Option<String>,
        /// Only tasks with this status
        #[arg(short, long)]
        status: Option<TaskStatus>,
        /// Only tasks due on this day (YYYY-MM-DD)
        #[arg(short, long, value_parser = parse_date)]
        due: Option<NaiveDate>,
    },
    /// Create a new task
    Create {
        /// Task title; prompted for when omitted
        #[arg(short, long)]
        title: Option<String>,
        /// Task description; prompted for when omitted
        #[arg(short = 'D', long)]
        description: Option<String>,
        /// Due date (YYYY-MM-DD)
        #[arg(short, long, value_parser = parse_date)]
        due: Option<NaiveDate>,
        /// Initial status
        #[arg(short, long, default_value_t = TaskStatus::Pending)]
        status: TaskStatus,
        /// Category ID
        #[arg(short, long)]
        category: Option<String>,
    },
    /// Edit a task; only the given fields change
    Edit {
        /// Task ID
        id: String,
        #[arg(short, long)]
        title: Option<String>,
        #[arg(short = 'D', long)]
        description: Option<String>,
        #[arg(short, long, value_parser = parse_date)]
        due: Option<NaiveDate>,
        /// Remove the due date
        #[arg(long, conflicts_with = "due")]
        clear_due: bool,
        #[arg(short, long)]
        status: Option<TaskStatus>,
        /// Category ID, an empty value removes the category
        #[arg(short, long)]
        category: Option<String>,
    },
    /// Delete a task
    Delete {
        /// Task ID
        id: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

pub async fn cmd(ctx: &AppContext, args: TaskArgs) -> Result<()> {
    if !admit(ctx, View::Tasks) {
        return Ok(());
    }

    let mut tasks = ctx.tasks();
    let result = match args.command {
        TaskCommand::List {
            page,
            category,
            status,
            due,
        } => handle_list(&mut tasks, page, category, status, due).await,
        TaskCommand::Create {
            title,
            description,
            due,
            status,
            category,
        } => {
            let title = prompt_if_missing(title, Message::PromptTaskTitle)?;
            let description = prompt_if_missing(description, Message::PromptTaskDescription)?;
            let draft = TaskDraft::new(&title, &description)
                .with_due_date(due)
                .with_status(status)
                .with_category(category.as_deref());
            handle_create(&mut tasks, draft).await
        }
        TaskCommand::Edit {
            id,
            title,
            description,
            due,
            clear_due,
            status,
            category,
        } => {
            let patch = TaskPatch {
                title,
                description,
                due,
                clear_due,
                status,
                category,
            };
            handle_edit(&mut tasks, &id, patch).await
        }
        TaskCommand::Delete { id, yes } => handle_delete(&mut tasks, &id, yes).await,
    };
    report_list_error(result)
}

/// Fields given on the command line for `task edit`.
#[derive(Debug, Default)]
struct TaskPatch {
    title: Option<String>,
    description: Option<String>,
    due: Option<NaiveDate>,
    clear_due: bool,
    status: Option<TaskStatus>,
    category: Option<String>,
}

impl TaskPatch {
    fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.due.is_none()
            && !self.clear_due
            && self.status.is_none()
            && self.category.is_none()
    }

    fn apply(self, draft: &mut TaskDraft) {
        if let Some(title) = self.title {
            draft.title = title;
        }
        if let Some(description) = self.description {
            draft.description = description;
        }
        if self.clear_due {
            draft.due_date = None;
        } else if let Some(due) = self.due {
            draft.due_date = Some(due);
        }
        if let Some(status) = self.status {
            draft.status = status;
        }
        if let Some(category) = self.category {
            draft.category = Some(category).filter(|id| !id.trim().is_empty());
        }
    }
}

async fn handle_list(
    tasks: &mut ListController<Tasks>,
    page: Option<u32>,
    category: Option<String>,
    status: Option<TaskStatus>,
    due: Option<NaiveDate>,
) -> Result<()> {
    tasks
        .set_filter(|filter| {
            filter.set_category(category.as_deref());
            filter.status = status;
            filter.due_date = due;
        })
        .await?;
    if let Some(page) = page {
        tasks.set_page(page).await?;
    }

    if tasks.items().is_empty() {
        msg_info!(Message::TasksNotFound);
        return Ok(());
    }

    msg_print!(Message::TasksHeader, true);
    Table::tasks(tasks.items());
    msg_print!(Message::PageIndicator {
        current: tasks.current_page(),
        total: tasks.total_pages(),
    });
    Ok(())
}

async fn handle_create(tasks: &mut ListController<Tasks>, draft: TaskDraft) -> Result<()> {
    let task = tasks.create(&draft).await?;
    msg_success!(Message::TaskCreated(task.title));
    warn_if_stale(tasks.status());
    Ok(())
}

async fn handle_edit(tasks: &mut ListController<Tasks>, id: &str, patch: TaskPatch) -> Result<()> {
    if !tasks.seek(id).await? {
        msg_error!(Message::TaskNotFound(id.to_string()));
        return Ok(());
    }

    if patch.is_empty() {
        msg_info!(Message::TaskEditCancelled);
        return Ok(());
    }

    patch.apply(tasks.begin_edit(id)?);
    let task = match tasks.submit_edit().await {
        Ok(task) => task,
        Err(err) => {
            tasks.cancel_edit();
            return Err(err.into());
        }
    };
    msg_success!(Message::TaskUpdated(task.title));
    warn_if_stale(tasks.status());
    Ok(())
}

async fn handle_delete(tasks: &mut ListController<Tasks>, id: &str, yes: bool) -> Result<()> {
    if !tasks.seek(id).await? {
        msg_error!(Message::TaskNotFound(id.to_string()));
        return Ok(());
    }

    let title = tasks.get(id).map(|task| task.title.clone()).unwrap_or_default();
    let confirmed = yes
        || Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::ConfirmDeleteTask(title).to_string())
            .default(false)
            .interact()?;
    if !confirmed {
        return Ok(());
    }

    tasks.delete(id).await?;
    msg_success!(Message::TaskDeleted(id.to_string()));
    warn_if_stale(tasks.status());
    Ok(())
}

fn prompt_if_missing(value: Option<String>, prompt: Message) -> Result<String> {
    match value {
        Some(value) => Ok(value),
        None => Ok(Input::<String>::with_theme(&ColorfulTheme::default())
            .with_prompt(prompt.to_string())
            .interact_text()?),
    }
}
