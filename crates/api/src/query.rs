//! Shared query parameter types for API handlers.

use serde::Deserialize;

use crate::error::{AppError, AppResult};

/// Query parameters for list endpoints that support an `include_inactive` flag.
///
/// Used by accounts and employees, the catalogs with soft deactivation.
#[derive(Debug, Deserialize)]
pub struct IncludeInactiveParams {
    #[serde(default)]
    pub include_inactive: bool,
}

/// `?confirm=true` gate for destructive lifecycle endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct ConfirmParams {
    #[serde(default)]
    pub confirm: bool,
}

impl ConfirmParams {
    /// Refuse the request unless the caller confirmed it.
    ///
    /// `prompt` is echoed back so the client can show it to the user.
    pub fn require(&self, prompt: &str) -> AppResult<()> {
        if self.confirm {
            Ok(())
        } else {
            Err(AppError::BadRequest(format!(
                "Confirmation required: {prompt} Repeat the request with ?confirm=true"
            )))
        }
    }
}
