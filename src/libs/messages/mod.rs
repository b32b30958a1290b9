pub mod display;
pub mod macros;
pub mod types;

pub use types::Message;

use crate::api::{ErrorKind, RequestError};
use crate::libs::list::ListError;

impl Message {
    /// Turns a failed list operation into the notification shown to the user.
    pub fn from_list_error(err: &ListError) -> Message {
        match err {
            ListError::Request(request) => Message::from_request_error(request),
            other => Message::OperationFailed(other.to_string()),
        }
    }

    pub fn from_request_error(err: &RequestError) -> Message {
        match err.kind() {
            ErrorKind::Network => Message::ServerUnreachable(err.to_string()),
            ErrorKind::Auth => Message::NotLoggedIn,
            _ => Message::RequestFailed(err.to_string()),
        }
    }
}
