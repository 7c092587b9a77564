//! EmailJS-backed [`Notifier`].
//!
//! Posts to the EmailJS REST API (`/api/v1.0/email/send`). Template
//! parameter names (`passcode`, `time`, `email`) are fixed by the mail
//! templates configured on the EmailJS side.

use reqwest::Client;

use crate::config::EmailJsConfig;
use crate::error::{ReservationError, Result};
use crate::providers::notifier::{CodeDelivery, Notifier};

/// Notifier that delivers verification codes through EmailJS.
#[derive(Clone)]
pub struct EmailJsNotifier {
    client: Client,
    config: EmailJsConfig,
}

impl EmailJsNotifier {
    /// Create a notifier for the given EmailJS account.
    #[must_use]
    pub fn new(config: EmailJsConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    /// Create a notifier configured from `EMAILJS_SERVICE_ID` and
    /// `EMAILJS_PUBLIC_KEY`.
    ///
    /// # Errors
    ///
    /// Returns [`ReservationError::MissingEnv`] if either variable is not set.
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(EmailJsConfig::from_env()?))
    }
}

impl Notifier for EmailJsNotifier {
    async fn send(&self, template_id: &str, payload: &CodeDelivery) -> Result<()> {
        let body = serde_json::json!({
            "service_id": self.config.service_id,
            "template_id": template_id,
            "user_id": self.config.public_key,
            "template_params": {
                "passcode": payload.code,
                "time": payload.timestamp,
                "email": payload.recipient_email,
            },
        });

        let response = self
            .client
            .post(format!("{}/api/v1.0/email/send", self.config.api_url))
            .json(&body)
            .send()
            .await
            .map_err(|e| ReservationError::DeliveryFailed {
                message: e.to_string(),
            })?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(ReservationError::DeliveryFailed {
                message: format!("{}: {body}", status.as_u16()),
            })
        }
    }
}
