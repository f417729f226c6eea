use metrics::{counter, gauge};

/// Metrics collector for WebSocket operations
#[derive(Clone)]
pub struct Metrics {
    prefix: &'static str,
}

impl Metrics {
    pub fn new() -> Self {
        Self { prefix: "rc_ws" }
    }

    /// Record new connection established
    pub fn connection_established(&self) {
        counter!(format!("{}.connections.established", self.prefix)).increment(1);
        gauge!(format!("{}.connections.active", self.prefix)).increment(1.0);
    }

    /// Record connection closed
    pub fn connection_closed(&self, reason: &str) {
        counter!(format!("{}.connections.closed", self.prefix)).increment(1);
        counter!(format!("{}.connections.closed.{}", self.prefix, reason)).increment(1);
        gauge!(format!("{}.connections.active", self.prefix)).decrement(1.0);
    }

    /// Record admission refused at the upgrade handler
    pub fn admission_denied(&self, reason: &str) {
        counter!(format!("{}.admission.denied", self.prefix)).increment(1);
        counter!(format!("{}.admission.denied.{}", self.prefix, reason)).increment(1);
    }

    /// Record client event received
    pub fn event_received(&self, event: &str) {
        counter!(format!("{}.events.received", self.prefix)).increment(1);
        counter!(format!("{}.events.received.{}", self.prefix, event)).increment(1);
    }

    /// Record server event sent to a client
    pub fn event_sent(&self, event: &str) {
        counter!(format!("{}.events.sent", self.prefix)).increment(1);
        counter!(format!("{}.events.sent.{}", self.prefix, event)).increment(1);
    }

    /// Record activity fanned out to one room
    pub fn activity_delivered(&self, recipients: usize) {
        counter!(format!("{}.activity.delivered", self.prefix)).increment(recipients as u64);
    }

    /// Record a message dropped before delivery
    pub fn message_dropped(&self, reason: &str) {
        counter!(format!("{}.messages.dropped", self.prefix)).increment(1);
        counter!(format!("{}.messages.dropped.{}", self.prefix, reason)).increment(1);
    }

    /// Record error occurrence
    pub fn error_occurred(&self, error_type: &str) {
        counter!(format!("{}.errors.total", self.prefix)).increment(1);
        counter!(format!("{}.errors.{}", self.prefix, error_type)).increment(1);
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}
