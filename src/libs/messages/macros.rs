//! Output macros for user-facing messages.
//!
//! In normal mode messages go straight to the terminal. When debug mode is
//! on (`TASKMAN_DEBUG` or `RUST_LOG` is set) they are routed through
//! `tracing` instead, so they interleave with the structured logs.
//!
//! - `msg_print!`: plain message
//! - `msg_success!`, `msg_info!`, `msg_warning!`, `msg_error!`: prefixed
//! - `msg_debug!`: debug mode only
//! - `msg_error_anyhow!`, `msg_bail_anyhow!`: build or return an `anyhow::Error`
//!
//! The printing macros take a message and an optional `true` to surround it
//! with blank lines.
//!
//! ```rust
//! use taskman::{msg_info, msg_success};
//! use taskman::libs::messages::Message;
//!
//! msg_success!(Message::LoggedOut);
//! msg_info!(Message::TasksNotFound, true);
//! ```

use std::fmt::Display;
use std::sync::OnceLock;

/// Environment variable that switches on debug mode.
pub const DEBUG_ENV: &str = "TASKMAN_DEBUG";

pub const SUCCESS_PREFIX: &str = "✅ ";
pub const ERROR_PREFIX: &str = "❌ ";
pub const WARNING_PREFIX: &str = "⚠️ ";
pub const INFO_PREFIX: &str = "ℹ️ ";
pub const DEBUG_PREFIX: &str = "🔍 ";

static DEBUG_MODE: OnceLock<bool> = OnceLock::new();

/// Whether debug mode is on. Checked once per process.
#[doc(hidden)]
pub fn is_debug_mode() -> bool {
    *DEBUG_MODE.get_or_init(|| std::env::var(DEBUG_ENV).is_ok() || std::env::var("RUST_LOG").is_ok())
}

/// Final text of a message: prefix, message, and blank lines if `padded`.
#[doc(hidden)]
pub fn decorate(prefix: &str, msg: &dyn Display, padded: bool) -> String {
    if padded {
        format!("\n{}{}\n", prefix, msg)
    } else {
        format!("{}{}", prefix, msg)
    }
}

/// Shared body of the printing macros: `tracing` at `$level` in debug mode,
/// `$print!` otherwise.
#[doc(hidden)]
#[macro_export]
macro_rules! __msg_emit {
    ($level:ident, $print:ident, $prefix:expr, $msg:expr, $padded:expr) => {{
        let text = $crate::libs::messages::macros::decorate($prefix, &$msg, $padded);
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::$level!("{}", text);
        } else {
            $print!("{}", text);
        }
    }};
}

#[macro_export]
macro_rules! msg_print {
    ($msg:expr) => {
        $crate::__msg_emit!(info, println, "", $msg, false)
    };
    ($msg:expr, true) => {
        $crate::__msg_emit!(info, println, "", $msg, true)
    };
}

#[macro_export]
macro_rules! msg_success {
    ($msg:expr) => {
        $crate::__msg_emit!(info, println, $crate::libs::messages::macros::SUCCESS_PREFIX, $msg, false)
    };
    ($msg:expr, true) => {
        $crate::__msg_emit!(info, println, $crate::libs::messages::macros::SUCCESS_PREFIX, $msg, true)
    };
}

#[macro_export]
macro_rules! msg_error {
    ($msg:expr) => {
        $crate::__msg_emit!(error, eprintln, $crate::libs::messages::macros::ERROR_PREFIX, $msg, false)
    };
    ($msg:expr, true) => {
        $crate::__msg_emit!(error, eprintln, $crate::libs::messages::macros::ERROR_PREFIX, $msg, true)
    };
}

#[macro_export]
macro_rules! msg_warning {
    ($msg:expr) => {
        $crate::__msg_emit!(warn, println, $crate::libs::messages::macros::WARNING_PREFIX, $msg, false)
    };
    ($msg:expr, true) => {
        $crate::__msg_emit!(warn, println, $crate::libs::messages::macros::WARNING_PREFIX, $msg, true)
    };
}

#[macro_export]
macro_rules! msg_info {
    ($msg:expr) => {
        $crate::__msg_emit!(info, println, $crate::libs::messages::macros::INFO_PREFIX, $msg, false)
    };
    ($msg:expr, true) => {
        $crate::__msg_emit!(info, println, $crate::libs::messages::macros::INFO_PREFIX, $msg, true)
    };
}

#[macro_export]
macro_rules! msg_debug {
    ($msg:expr) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            let text = $crate::libs::messages::macros::decorate($crate::libs::messages::macros::DEBUG_PREFIX, &$msg, false);
            tracing::debug!("{}", text);
        }
    };
}

/// Builds an `anyhow::Error` whose text is the prefixed message.
#[macro_export]
macro_rules! msg_error_anyhow {
    ($msg:expr) => {
        anyhow::anyhow!($crate::libs::messages::macros::decorate(
            $crate::libs::messages::macros::ERROR_PREFIX,
            &$msg,
            false
        ))
    };
}

/// Returns early with [`msg_error_anyhow!`].
#[macro_export]
macro_rules! msg_bail_anyhow {
    ($msg:expr) => {
        return Err($crate::msg_error_anyhow!($msg))
    };
}
