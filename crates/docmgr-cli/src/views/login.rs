//! Login view.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, warn};

use docmgr_state::{AppContext, RefreshOutcome};

/// Shown for any rejected login; the backend's reason is never echoed.
pub const LOGIN_FAILED_MESSAGE: &str = "Invalid email or password";

/// Shown when the backend refuses the fresh token on the first listing.
pub const SESSION_REJECTED_MESSAGE: &str = "Session was rejected by the server. Please log in again.";

/// Shown when a required field is left blank.
pub const LOGIN_MISSING_INPUT_MESSAGE: &str = "Enter your email and password.";

/// Email/password form.
pub struct LoginView {
    ctx: Arc<AppContext>,
    /// Email buffer.
    pub email: String,
    /// Password buffer.
    pub password: String,
    error: Option<String>,
}

impl LoginView {
    /// Create an empty login form.
    pub fn new(ctx: Arc<AppContext>) -> Self {
        Self {
            ctx,
            email: String::new(),
            password: String::new(),
            error: None,
        }
    }

    /// The message from the last failed submission.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Authenticate with the buffered credentials.
    ///
    /// On success the session is established and both buffers are cleared.
    /// Returns whether the session is now authenticated.
    pub async fn submit(&mut self) -> bool {
        self.error = None;

        if self.email.trim().is_empty() || self.password.is_empty() {
            self.error = Some(LOGIN_MISSING_INPUT_MESSAGE.to_string());
            return false;
        }

        let credential = match self
            .ctx
            .gateway()
            .authenticate(self.email.trim(), &self.password)
            .await
        {
            Ok(credential) => credential,
            Err(e) => {
                debug!(error = %e, "Login rejected");
                self.error = Some(LOGIN_FAILED_MESSAGE.to_string());
                return false;
            }
        };

        match self.ctx.login(credential).await {
            Ok(RefreshOutcome::Unauthorized) => {
                warn!("Fresh session rejected by the first listing");
                self.error = Some(SESSION_REJECTED_MESSAGE.to_string());
                false
            }
            Ok(_) => {
                self.email.clear();
                self.password.clear();
                true
            }
            Err(e) => {
                warn!(error = %e, "Failed to persist session");
                self.error = Some(format!("Could not save session: {}", e.message));
                false
            }
        }
    }

    /// Render the form state.
    pub fn render(&self) -> String {
        let mut out = String::from("Login\nEnter your email and password to log in.\n");
        if let Some(error) = &self.error {
            out.push_str(error);
            out.push('\n');
        }
        out
    }
}

impl fmt::Debug for LoginView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginView")
            .field("email", &self.email)
            .field("password", &"***")
            .field("error", &self.error)
            .finish()
    }
}
