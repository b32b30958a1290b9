//! Core library modules for the taskman client.
//!
//! ## Features
//!
//! - **Session**: login, signup, logout and startup verification of a saved
//!   credential ([`session`], [`credentials`])
//! - **Lists**: one generic controller that keeps a page of tasks or
//!   categories in step with the server ([`list`], [`task`], [`category`])
//! - **Access rules**: which views need a session ([`guard`])
//! - **Infrastructure**: configuration, data directory, messages, logging,
//!   table rendering
//!
//! ## Usage
//!
//! ```rust,no_run
//! use taskman::libs::{config::Config, context::AppContext, data_storage::DataStorage};
//!
//! # async fn run() -> anyhow::Result<()> {
//! let storage = DataStorage::new();
//! let mut ctx = AppContext::from_config(&Config::read_from(&storage)?, &storage)?;
//! ctx.init().await;
//!
//! let mut tasks = ctx.tasks();
//! tasks.refresh().await?;
//! println!("{} tasks on page {}", tasks.items().len(), tasks.current_page());
//! # Ok(())
//! # }
//! ```

pub mod category;
pub mod config;
pub mod context;
pub mod credentials;
pub mod data_storage;
pub mod guard;
pub mod list;
pub mod logging;
pub mod messages;
pub mod session;
pub mod task;
pub mod user;
pub mod view;
