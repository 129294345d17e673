use std::sync::Arc;

use crate::domain::credentials::UserDirectory;

use super::notifier::{Notification, Notifier};

pub const LOGIN_SUCCEEDED: &str = "login successful";
pub const LOGIN_FAILED: &str = "incorrect username or password";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthOutcome { Success, Failure }

impl AuthOutcome {
    pub fn is_success(self) -> bool { self == AuthOutcome::Success }

    /// Failures share one message whichever field was wrong.
    pub fn notification(self) -> Notification {
        match self {
            AuthOutcome::Success => Notification::success(LOGIN_SUCCEEDED),
            AuthOutcome::Failure => Notification::error(LOGIN_FAILED),
        }
    }
}

/// Exact, case-sensitive match against a static directory. Grants nothing
/// beyond the notification.
pub struct AuthService<D: UserDirectory> {
    directory: D,
    notifier: Arc<dyn Notifier>,
}

impl<D: UserDirectory> AuthService<D> {
    pub fn new(directory: D, notifier: Arc<dyn Notifier>) -> Self { Self { directory, notifier } }

    pub fn authenticate(&self, username: &str, password: &str) -> AuthOutcome {
        let outcome = match self.directory.lookup(username) {
            Some(user) if user.password == password => AuthOutcome::Success,
            _ => AuthOutcome::Failure,
        };
        match outcome {
            AuthOutcome::Success => tracing::info!(username, "login succeeded"),
            AuthOutcome::Failure => tracing::warn!(username, "login failed"),
        }
        self.notifier.notify(&outcome.notification());
        outcome
    }
}
