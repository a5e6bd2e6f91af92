//! Metrics for event listening and notification delivery

use lazy_static::lazy_static;
use prometheus::{
    register_counter_vec, register_histogram_vec, register_int_gauge_vec, CounterVec, HistogramVec,
    IntGaugeVec,
};

/// Labels for listener metrics
pub const CONTRACT_LABEL: &str = "contract";
pub const NETWORK_LABEL: &str = "network";
pub const EVENT_LABEL: &str = "event";
pub const REASON_LABEL: &str = "reason";
pub const ERROR_TYPE_LABEL: &str = "error_type";

lazy_static! {
    /// Number of events received from chain connections
    static ref EVENTS_RECEIVED: CounterVec = register_counter_vec!(
        "herald_events_received_total",
        "Total number of blockchain events received",
        &[CONTRACT_LABEL, EVENT_LABEL]
    ).expect("Failed to create events_received metric");

    /// Number of notifications handed to the webhook endpoint
    static ref NOTIFICATIONS_SENT: CounterVec = register_counter_vec!(
        "herald_notifications_sent_total",
        "Total number of webhook notifications delivered",
        &[CONTRACT_LABEL, EVENT_LABEL]
    ).expect("Failed to create notifications_sent metric");

    /// Number of notification deliveries that failed
    static ref NOTIFICATION_FAILURES: CounterVec = register_counter_vec!(
        "herald_notification_failures_total",
        "Total number of webhook notification failures",
        &[CONTRACT_LABEL, REASON_LABEL]
    ).expect("Failed to create notification_failures metric");

    /// Webhook delivery time
    static ref NOTIFICATION_DURATION: HistogramVec = register_histogram_vec!(
        "herald_notification_duration_seconds",
        "Webhook delivery time in seconds",
        &[CONTRACT_LABEL]
    ).expect("Failed to create notification_duration metric");

    /// Event processing errors
    static ref PROCESSING_ERRORS: CounterVec = register_counter_vec!(
        "herald_processing_errors_total",
        "Total number of event processing errors",
        &[CONTRACT_LABEL, ERROR_TYPE_LABEL]
    ).expect("Failed to create processing_errors metric");

    /// Active event listeners
    static ref ACTIVE_LISTENERS: IntGaugeVec = register_int_gauge_vec!(
        "herald_active_listeners",
        "Number of active event listeners",
        &[NETWORK_LABEL]
    ).expect("Failed to create active_listeners metric");
}

/// Listener metrics
pub struct ListenerMetrics;

impl ListenerMetrics {
    /// Get global metrics instance
    pub fn global() -> Self {
        ListenerMetrics
    }

    /// Record event received
    pub fn record_event_received(&self, contract: &str, event: &str) {
        EVENTS_RECEIVED.with_label_values(&[contract, event]).inc();
    }

    /// Record notification delivered
    pub fn record_notification_sent(&self, contract: &str, event: &str) {
        NOTIFICATIONS_SENT
            .with_label_values(&[contract, event])
            .inc();
    }

    /// Record notification failure
    pub fn record_notification_failure(&self, contract: &str, reason: &str) {
        NOTIFICATION_FAILURES
            .with_label_values(&[contract, reason])
            .inc();
    }

    /// Record webhook delivery time
    pub fn record_notification_duration(&self, contract: &str, duration_secs: f64) {
        NOTIFICATION_DURATION
            .with_label_values(&[contract])
            .observe(duration_secs);
    }

    /// Record processing error
    pub fn record_processing_error(&self, contract: &str, error_type: &str) {
        PROCESSING_ERRORS
            .with_label_values(&[contract, error_type])
            .inc();
    }

    /// Update active listener count for a network
    pub fn update_active_listeners(&self, network: &str, count: i64) {
        ACTIVE_LISTENERS.with_label_values(&[network]).set(count);
    }
}
