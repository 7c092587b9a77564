//! Reservation system configuration.
//!
//! This module provides configuration structures for the workflow reducer
//! and the HTTP providers. Configuration values should be provided by the
//! application, not hardcoded.

use std::time::Duration;

use crate::error::{ReservationError, Result};

/// Reservation workflow configuration.
#[derive(Debug, Clone)]
pub struct WorkflowConfig {
    /// Notifier template used for verification-code emails.
    ///
    /// Default: "reservation_code"
    pub template_id: String,

    /// How long the success screen stays up before dismissing itself.
    ///
    /// Default: 2 seconds
    pub success_dismiss_after: Duration,
}

impl WorkflowConfig {
    /// Create new workflow configuration with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self {
            template_id: "reservation_code".to_string(),
            success_dismiss_after: Duration::from_secs(2),
        }
    }

    /// Set the notifier template id.
    #[must_use]
    pub fn with_template_id(mut self, template_id: impl Into<String>) -> Self {
        self.template_id = template_id.into();
        self
    }

    /// Set the success auto-dismiss delay.
    #[must_use]
    pub const fn with_success_dismiss_after(mut self, delay: Duration) -> Self {
        self.success_dismiss_after = delay;
        self
    }
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Supabase project configuration for the data store.
#[derive(Debug, Clone)]
pub struct SupabaseConfig {
    /// Project base URL (e.g. "<https://abc123.supabase.co>").
    pub project_url: String,

    /// Anonymous API key, sent as `apikey` on every request and as the
    /// bearer token until a session exists.
    pub api_key: String,
}

impl SupabaseConfig {
    /// Create new Supabase configuration.
    #[must_use]
    pub fn new(project_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            project_url: project_url.into(),
            api_key: api_key.into(),
        }
    }

    /// Read configuration from `SUPABASE_URL` and `SUPABASE_ANON_KEY`.
    ///
    /// # Errors
    ///
    /// Returns [`ReservationError::MissingEnv`] naming whichever variable
    /// is not set.
    pub fn from_env() -> Result<Self> {
        let project_url = std::env::var("SUPABASE_URL")
            .map_err(|_| ReservationError::MissingEnv { name: "SUPABASE_URL" })?;
        let api_key = std::env::var("SUPABASE_ANON_KEY").map_err(|_| {
            ReservationError::MissingEnv {
                name: "SUPABASE_ANON_KEY",
            }
        })?;

        Ok(Self::new(project_url, api_key))
    }
}

/// `EmailJS` configuration for the verification-code notifier.
#[derive(Debug, Clone)]
pub struct EmailJsConfig {
    /// API base URL.
    ///
    /// Default: "<https://api.emailjs.com>"
    pub api_url: String,

    /// Service the templates belong to.
    pub service_id: String,

    /// Public key identifying the account.
    pub public_key: String,
}

impl EmailJsConfig {
    /// Create new `EmailJS` configuration with the production API URL.
    #[must_use]
    pub fn new(service_id: impl Into<String>, public_key: impl Into<String>) -> Self {
        Self {
            api_url: "https://api.emailjs.com".to_string(),
            service_id: service_id.into(),
            public_key: public_key.into(),
        }
    }

    /// Override the API base URL (used to point tests at a local server).
    #[must_use]
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    /// Read configuration from `EMAILJS_SERVICE_ID` and `EMAILJS_PUBLIC_KEY`.
    ///
    /// # Errors
    ///
    /// Returns [`ReservationError::MissingEnv`] naming whichever variable
    /// is not set.
    pub fn from_env() -> Result<Self> {
        let service_id = std::env::var("EMAILJS_SERVICE_ID").map_err(|_| {
            ReservationError::MissingEnv {
                name: "EMAILJS_SERVICE_ID",
            }
        })?;
        let public_key = std::env::var("EMAILJS_PUBLIC_KEY").map_err(|_| {
            ReservationError::MissingEnv {
                name: "EMAILJS_PUBLIC_KEY",
            }
        })?;

        Ok(Self::new(service_id, public_key))
    }
}
