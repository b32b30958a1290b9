//! Tasks, task drafts and task filters.
//!
//! Due dates are plain calendar dates. The server may hand them back with a
//! time-of-day attached (`2024-05-01T00:00:00.000Z`); the time part is
//! dropped on the way in and never sent back out.

use super::category::Category;
use super::list::{Identified, ListError, Page, PageQuery, QueryFilter, Resource};
use crate::api::ApiClient;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Wire and display format for calendar dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Number of tasks requested per page.
pub const TASK_PAGE_SIZE: u32 = 10;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::InProgress => "in-progress",
            TaskStatus::Completed => "completed",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(TaskStatus::Pending),
            "in-progress" | "in_progress" | "inprogress" => Ok(TaskStatus::InProgress),
            "completed" | "done" => Ok(TaskStatus::Completed),
            other => Err(format!("unknown status '{}', expected pending, in-progress or completed", other)),
        }
    }
}

/// A task's link to its category.
///
/// The server populates the reference on reads (`{"_id", "name"}`) but may
/// also return the bare id, for example when the category has since been
/// deleted. Only the populated form has a name to show.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CategoryRef {
    Populated(Category),
    Id(String),
}

impl CategoryRef {
    pub fn id(&self) -> &str {
        match self {
            CategoryRef::Populated(category) => &category.id,
            CategoryRef::Id(id) => id,
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            CategoryRef::Populated(category) => Some(&category.name),
            CategoryRef::Id(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, with = "calendar_date")]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default)]
    pub category: Option<CategoryRef>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Task {
    pub fn category_id(&self) -> Option<&str> {
        self.category.as_ref().map(CategoryRef::id).filter(|id| !id.is_empty())
    }

    /// Category name for display, `N/A` when absent or unresolved.
    pub fn category_name(&self) -> &str {
        self.category.as_ref().and_then(CategoryRef::name).unwrap_or("N/A")
    }
}

impl Identified for Task {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Editable task fields.
///
/// Serialised as is for `POST /tasks`, where unset due date and category are
/// left out. Updates go through the API client, which sends every field.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "calendar_date::serialize")]
    pub due_date: Option<NaiveDate>,
    pub status: TaskStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl TaskDraft {
    pub fn new(title: &str, description: &str) -> Self {
        Self {
            title: title.to_string(),
            description: description.to_string(),
            ..Self::default()
        }
    }

    pub fn with_due_date(mut self, due_date: Option<NaiveDate>) -> Self {
        self.due_date = due_date;
        self
    }

    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_category(mut self, category: Option<&str>) -> Self {
        self.category = non_empty(category);
        self
    }
}

impl From<&Task> for TaskDraft {
    fn from(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            description: task.description.clone(),
            due_date: task.due_date,
            status: task.status,
            category: task.category_id().map(str::to_string),
        }
    }
}

/// Active task filters. `None` means "no filter" and is never sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    pub category: Option<String>,
    pub status: Option<TaskStatus>,
    pub due_date: Option<NaiveDate>,
}

impl TaskFilter {
    /// Sets the category filter; a blank id unsets it.
    pub fn set_category(&mut self, category: Option<&str>) {
        self.category = non_empty(category);
    }

    pub fn is_empty(&self) -> bool {
        self.category.is_none() && self.status.is_none() && self.due_date.is_none()
    }
}

impl QueryFilter for TaskFilter {
    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(category) = non_empty(self.category.as_deref()) {
            pairs.push(("category", category));
        }
        if let Some(status) = self.status {
            pairs.push(("status", status.to_string()));
        }
        if let Some(due_date) = self.due_date {
            pairs.push(("dueDate", due_date.format(DATE_FORMAT).to_string()));
        }
        pairs
    }
}

/// Task list binding for [`ListController`](super::list::ListController).
#[derive(Debug)]
pub struct Tasks;

impl Resource for Tasks {
    type Item = Task;
    type Draft = TaskDraft;
    type Filter = TaskFilter;

    const NAME: &'static str = "task";
    const PAGE_SIZE: Option<u32> = Some(TASK_PAGE_SIZE);
    const EDITABLE: bool = true;

    fn missing_fields(draft: &TaskDraft) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if draft.title.trim().is_empty() {
            missing.push("title");
        }
        if draft.description.trim().is_empty() {
            missing.push("description");
        }
        missing
    }

    fn draft_from(item: &Task) -> TaskDraft {
        TaskDraft::from(item)
    }

    async fn fetch(api: &ApiClient, query: &PageQuery<'_, TaskFilter>) -> Result<Page<Task>, ListError> {
        let page = api.list_tasks(&query.query_pairs()).await?;
        Ok(Page {
            items: page.tasks,
            total_pages: page.total_pages,
        })
    }

    async fn create(api: &ApiClient, draft: &TaskDraft) -> Result<Task, ListError> {
        Ok(api.create_task(draft).await?)
    }

    async fn update(api: &ApiClient, id: &str, draft: &TaskDraft) -> Result<Task, ListError> {
        Ok(api.update_task(id, draft).await?)
    }

    async fn delete(api: &ApiClient, id: &str) -> Result<(), ListError> {
        Ok(api.delete_task(id).await?)
    }
}

/// Parses a calendar date, ignoring any time-of-day suffix.
pub fn parse_calendar_date(raw: &str) -> Result<NaiveDate, chrono::ParseError> {
    let raw = raw.trim();
    let date_part = raw.split_once('T').map_or(raw, |(date, _)| date);
    NaiveDate::parse_from_str(date_part, DATE_FORMAT)
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.map(str::trim).filter(|v| !v.is_empty()).map(str::to_string)
}

pub(crate) mod calendar_date {
    use super::{parse_calendar_date, DATE_FORMAT};
    use chrono::NaiveDate;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error> {
        match date {
            Some(date) => serializer.serialize_str(&date.format(DATE_FORMAT).to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<NaiveDate>, D::Error> {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(raw) => parse_calendar_date(raw).map(Some).map_err(de::Error::custom),
        }
    }
}
