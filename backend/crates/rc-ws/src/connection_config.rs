/// Per-connection tuning shared by every WebSocket session
#[derive(Debug, Clone)]
pub struct ConnectionConfig {
    /// Capacity of the outgoing message buffer before a client counts as slow
    pub send_buffer_size: usize,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            send_buffer_size: 100,
        }
    }
}
