//! Text for every [`Message`] variant.
//!
//! Keeping all wording in one `match` means a new message cannot be added
//! without deciding how it reads.

use super::types::Message;
use std::fmt::{Display, Formatter, Result};

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let text = match self {
            // === CONFIGURATION MESSAGES ===
            Message::ConfigSaved => "Configuration saved successfully".to_string(),
            Message::ConfigDeleted => "Configuration removed".to_string(),
            Message::ConfigModuleServer => "Task server settings".to_string(),
            Message::ServerAddress(url) => format!("Server: {}", url),
            Message::ConfigUnreadable(reason) => {
                format!("Could not read the configuration ({}). Run 'taskman init' to recreate it", reason)
            }
            Message::InvalidApiUrl(url) => format!("'{}' is not an http:// or https:// address", url),

            // === SESSION MESSAGES ===
            Message::LoginSucceeded(username) => format!("Logged in as {}", username),
            Message::LoginFailed => "Login failed. Check your username and password".to_string(),
            Message::AlreadyLoggedIn(username) => {
                format!("Already logged in as {}. Run 'taskman logout' first", username)
            }
            Message::NotLoggedIn => "You are not logged in. Run 'taskman login' first".to_string(),
            Message::SessionVerifying => "Still verifying the saved session, try again".to_string(),
            Message::SignupSucceeded(username) => {
                format!("Account {} created. Run 'taskman login' to sign in", username)
            }
            Message::SignupFailed => "Signup failed".to_string(),
            Message::LoggedOut => "Logged out".to_string(),
            Message::CurrentUser { username, email } => format!("{} <{}>", username, email),

            // === TASK MESSAGES ===
            Message::TasksHeader => "Tasks".to_string(),
            Message::TasksNotFound => "No tasks found".to_string(),
            Message::TaskCreated(title) => format!("Task '{}' created", title),
            Message::TaskUpdated(title) => format!("Task '{}' updated", title),
            Message::TaskDeleted(id) => format!("Task {} deleted", id),
            Message::TaskNotFound(id) => format!("Task {} not found", id),
            Message::TaskEditCancelled => "No changes given, edit cancelled".to_string(),
            Message::PageIndicator { current, total } => format!("Page {} of {}", current, total),

            // === CATEGORY MESSAGES ===
            Message::CategoriesHeader => "Categories".to_string(),
            Message::CategoriesNotFound => "No categories found".to_string(),
            Message::CategoryCreated(name) => format!("Category '{}' created", name),
            Message::CategoryDeleted(id) => format!("Category {} deleted", id),
            Message::CategoryNotFound(id) => format!("Category {} not found", id),

            // === CALENDAR MESSAGES ===
            Message::CalendarHeader(date) => format!("Tasks due on {}", date),
            Message::NoTasksDue(date) => format!("No tasks due on {}", date),

            // === ERROR MESSAGES ===
            Message::RequestFailed(reason) => format!("Request failed: {}", reason),
            Message::ServerUnreachable(reason) => format!("Could not reach the task server: {}", reason),
            Message::OperationFailed(reason) => reason.clone(),
            Message::ListStale => "The change was saved, but the list could not be reloaded".to_string(),

            // === PROMPTS ===
            Message::PromptServerApiUrl => "Enter the task server API URL".to_string(),
            Message::PromptUsername => "Username".to_string(),
            Message::PromptEmail => "Email".to_string(),
            Message::PromptPassword => "Password".to_string(),
            Message::PromptPasswordConfirm => "Repeat password".to_string(),
            Message::PromptPasswordMismatch => "Passwords do not match".to_string(),
            Message::PromptTaskTitle => "Title".to_string(),
            Message::PromptTaskDescription => "Description".to_string(),
            Message::ConfirmDeleteTask(title) => format!("Delete task '{}'?", title),
            Message::ConfirmDeleteCategory(name) => format!("Delete category '{}'?", name),
        };
        write!(f, "{}", text)
    }
}
