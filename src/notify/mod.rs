//! Best-effort admin notification.
//!
//! Delivery is an external collaborator reached over a webhook; this
//! module only hands the message off. A failed send is logged and
//! dropped — it never affects the record that triggered it.

use serde::Serialize;
use tracing::{info, warn};

#[derive(Debug, Clone, Serialize)]
struct Notification<'a> {
    to: &'a str,
    subject: &'a str,
    body: &'a str,
}

#[derive(Debug, Clone)]
pub struct Notifier {
    client: reqwest::Client,
    webhook_url: Option<String>,
    admin_email: String,
}

impl Notifier {
    pub fn new(webhook_url: Option<String>, admin_email: String) -> Self {
        if webhook_url.is_none() {
            info!("NOTIFY_WEBHOOK_URL not set, admin notifications disabled");
        }
        Self {
            client: reqwest::Client::new(),
            webhook_url,
            admin_email,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.webhook_url.is_some()
    }

    /// Sends one message to the configured admin address. Errors are
    /// logged for the operator and swallowed.
    pub async fn send(&self, subject: &str, body: &str) {
        let Some(url) = &self.webhook_url else {
            return;
        };

        let message = Notification {
            to: &self.admin_email,
            subject,
            body,
        };

        match self.client.post(url).json(&message).send().await {
            Ok(resp) if resp.status().is_success() => {
                info!(to = %self.admin_email, subject, "admin notification sent");
            }
            Ok(resp) => {
                warn!(
                    to = %self.admin_email,
                    status = %resp.status(),
                    "admin notification rejected by delivery endpoint"
                );
            }
            Err(e) => {
                warn!(to = %self.admin_email, error = %e, "admin notification failed");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unconfigured_notifier_is_disabled() {
        let n = Notifier::new(None, "admin@example.com".to_string());
        assert!(!n.is_enabled());
    }

    #[tokio::test]
    async fn disabled_send_is_a_noop() {
        // Must complete without attempting any network call.
        let n = Notifier::new(None, "admin@example.com".to_string());
        n.send("New Return Request", "A new return request has been submitted.").await;
    }

    #[test]
    fn configured_notifier_is_enabled() {
        let n = Notifier::new(
            Some("http://localhost:9999/hook".to_string()),
            "admin@example.com".to_string(),
        );
        assert!(n.is_enabled());
    }
}
