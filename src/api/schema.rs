//! Typed request and response bodies.
//!
//! Every successful response wraps its payload in a `data` object. Bodies
//! are decoded into these types at the client boundary; anything that does
//! not match fails there instead of leaking partial values further in.

use crate::libs::category::Category;
use crate::libs::task::{calendar_date, Task, TaskDraft, TaskStatus};
use crate::libs::user::User;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub(crate) struct Envelope<T> {
    pub data: T,
}

#[derive(Debug, Serialize)]
pub(crate) struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct SignupRequest<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub password: &'a str,
}

/// Body of `PUT /tasks/:id`. The server replaces the stored record, so a
/// cleared due date or category goes out as `null` instead of being left out.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TaskReplacement<'a> {
    pub title: &'a str,
    pub description: &'a str,
    #[serde(serialize_with = "calendar_date::serialize")]
    pub due_date: Option<NaiveDate>,
    pub status: TaskStatus,
    pub category: Option<&'a str>,
}

impl<'a> From<&'a TaskDraft> for TaskReplacement<'a> {
    fn from(draft: &'a TaskDraft) -> Self {
        Self {
            title: &draft.title,
            description: &draft.description,
            due_date: draft.due_date,
            status: draft.status,
            category: draft.category.as_deref(),
        }
    }
}

/// Payload of a successful login.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginData {
    pub user: User,
    pub token: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct UserData {
    pub user: User,
}

/// One page of tasks.
#[derive(Debug, Clone, Deserialize)]
pub struct TasksPage {
    pub tasks: Vec<Task>,
    #[serde(rename = "totalPages", default = "one")]
    pub total_pages: u32,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TaskData {
    pub task: Task,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CategoriesData {
    pub categories: Vec<Category>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CategoryData {
    pub category: Category,
}

fn one() -> u32 {
    1
}
