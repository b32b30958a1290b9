//! Calendar view: the tasks due on one day.
//!
//! Uses the regular task list with a due-date filter and collects every
//! page, so a busy day is shown in one table.

use super::{admit, parse_date, report_list_error};
use crate::{
    libs::{
        context::AppContext,
        guard::View,
        list::ListController,
        messages::Message,
        task::{Task, Tasks, DATE_FORMAT},
        view::View as Table,
    },
    msg_info, msg_print,
};
use anyhow::Result;
use chrono::{Local, NaiveDate};
use clap::Args;

#[derive(Debug, Args)]
pub struct CalendarArgs {
    /// Day to show (YYYY-MM-DD), today when omitted
    #[arg(short, long, value_parser = parse_date)]
    date: Option<NaiveDate>,
}

pub async fn cmd(ctx: &AppContext, args: CalendarArgs) -> Result<()> {
    if !admit(ctx, View::Calendar) {
        return Ok(());
    }

    let date = args.date.unwrap_or_else(|| Local::now().date_naive());
    let mut tasks = ctx.tasks();
    report_list_error(show_day(&mut tasks, date).await)
}

async fn show_day(tasks: &mut ListController<Tasks>, date: NaiveDate) -> Result<()> {
    let day = date.format(DATE_FORMAT).to_string();
    let due = due_on(tasks, date).await?;

    if due.is_empty() {
        msg_info!(Message::NoTasksDue(day));
        return Ok(());
    }

    msg_print!(Message::CalendarHeader(day), true);
    Table::tasks(&due);
    Ok(())
}

async fn due_on(tasks: &mut ListController<Tasks>, date: NaiveDate) -> Result<Vec<Task>> {
    tasks.set_filter(|filter| filter.due_date = Some(date)).await?;

    let mut due = tasks.items().to_vec();
    while tasks.current_page() < tasks.total_pages() {
        tasks.next_page().await?;
        due.extend_from_slice(tasks.items());
    }
    Ok(due)
}
