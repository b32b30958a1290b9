//! # Taskman
//!
//! A command-line client for a task-management REST API.
//!
//! ## Features
//!
//! - **Sessions**: Log in once, the credential is kept between runs and
//!   verified on startup
//! - **Tasks**: Create, edit, delete, filter by category, status or due date,
//!   and page through results
//! - **Categories**: Create, list and delete task categories
//! - **Calendar**: See the tasks due on a given day
//!
//! ## Usage
//!
//! ```rust,no_run
//! use taskman::commands::Cli;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     Cli::menu().await
//! }
//! ```

pub mod api;
pub mod commands;
pub mod libs;
