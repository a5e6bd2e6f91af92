//! Fire-and-forget webhook delivery

use std::time::{Duration, Instant};

use reqwest::Client;
use tracing::{debug, warn};

use super::error::DispatchError;
use super::notification::Notification;
use crate::constants;
use crate::metrics::ListenerMetrics;

/// HTTP client for delivering notifications to the webhook endpoint
///
/// Every notification is a single POST attempt. A slow or unreachable
/// endpoint never blocks event processing; failures are logged and counted,
/// then dropped.
#[derive(Clone)]
pub struct WebhookDispatcher {
    client: Client,
    url: String,
}

impl WebhookDispatcher {
    /// Create a dispatcher for the configured endpoint
    pub fn new(url: String) -> Self {
        let client = Client::builder()
            .user_agent(format!("herald/{}", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(
                constants::network::HTTP_REQUEST_TIMEOUT_SECS,
            ))
            .build()
            .expect("Failed to create HTTP client");

        Self { client, url }
    }

    /// Deliver a notification without blocking the caller
    pub fn dispatch(&self, notification: Notification) {
        let dispatcher = self.clone();

        tokio::spawn(async move {
            let contract = notification.contract_defn.name.clone();
            let event = notification.event_name.clone();
            let start = Instant::now();

            match dispatcher.deliver(&notification).await {
                Ok(()) => {
                    ListenerMetrics::global()
                        .record_notification_duration(&contract, start.elapsed().as_secs_f64());
                    ListenerMetrics::global().record_notification_sent(&contract, &event);
                    debug!("Delivered {} notification for '{}'", event, contract);
                }
                Err(e) => {
                    ListenerMetrics::global()
                        .record_notification_failure(&contract, e.reason_label());
                    warn!(
                        "Failed to deliver {} notification for '{}': {}",
                        event, contract, e
                    );
                }
            }
        });
    }

    /// Make the single delivery attempt
    async fn deliver(&self, notification: &Notification) -> Result<(), DispatchError> {
        let response = self
            .client
            .post(&self.url)
            .json(notification)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(DispatchError::Status(status.as_u16()));
        }

        Ok(())
    }
}
