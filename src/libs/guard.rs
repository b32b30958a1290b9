//! Access rules for views.
//!
//! Public views (login, signup) are only for signed-out users; everything
//! else needs a session. While the startup verification is still running
//! neither guard decides: both answer [`Guard::Wait`] so that a session that
//! is about to be restored is not bounced to the login view.

use super::session::SessionState;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Login,
    Signup,
    Tasks,
    Categories,
    Calendar,
}

impl View {
    /// Where authenticated users land.
    pub const LANDING: View = View::Tasks;

    pub fn is_public(&self) -> bool {
        matches!(self, View::Login | View::Signup)
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            View::Login => "login",
            View::Signup => "signup",
            View::Tasks => "tasks",
            View::Categories => "categories",
            View::Calendar => "calendar",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Guard {
    Render,
    Redirect(View),
    /// Session verification in flight; decide again once it settles.
    Wait,
}

pub fn public_guard(state: SessionState) -> Guard {
    match state {
        SessionState::Unknown | SessionState::Verifying => Guard::Wait,
        SessionState::Authenticated => Guard::Redirect(View::LANDING),
        SessionState::Unauthenticated => Guard::Render,
    }
}

pub fn authenticated_guard(state: SessionState) -> Guard {
    match state {
        SessionState::Unknown | SessionState::Verifying => Guard::Wait,
        SessionState::Authenticated => Guard::Render,
        SessionState::Unauthenticated => Guard::Redirect(View::Login),
    }
}

/// Applies the guard that matches `view`.
pub fn guard(view: View, state: SessionState) -> Guard {
    if view.is_public() {
        public_guard(state)
    } else {
        authenticated_guard(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_views() {
        assert_eq!(guard(View::Login, SessionState::Unauthenticated), Guard::Render);
        assert_eq!(guard(View::Signup, SessionState::Authenticated), Guard::Redirect(View::Tasks));
    }

    #[test]
    fn protected_views() {
        for view in [View::Tasks, View::Categories, View::Calendar] {
            assert_eq!(guard(view, SessionState::Authenticated), Guard::Render);
            assert_eq!(guard(view, SessionState::Unauthenticated), Guard::Redirect(View::Login));
        }
    }

    #[test]
    fn both_guards_wait_while_loading() {
        for state in [SessionState::Unknown, SessionState::Verifying] {
            assert_eq!(public_guard(state), Guard::Wait);
            assert_eq!(authenticated_guard(state), Guard::Wait);
        }
    }
}
