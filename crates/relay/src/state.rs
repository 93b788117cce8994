//! Application state shared across handlers.

use std::sync::Arc;

use crate::services::email::EmailService;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    email: EmailService,
}

impl AppState {
    #[must_use]
    pub fn new(email: EmailService) -> Self {
        Self {
            inner: Arc::new(AppStateInner { email }),
        }
    }

    /// Get a reference to the email service.
    #[must_use]
    pub fn email(&self) -> &EmailService {
        &self.inner.email
    }
}
