//! Shared messaging connection state
//!
//! Used by both WASM and native STOMP clients.

/// Connection state shown in the status indicator
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ConnectionState {
    #[default]
    Disconnected,
    Connecting,
    Connected,
}

impl ConnectionState {
    pub fn is_connected(&self) -> bool {
        matches!(self, ConnectionState::Connected)
    }

    /// "Connect" is offered only when fully disconnected
    pub fn can_connect(&self) -> bool {
        matches!(self, ConnectionState::Disconnected)
    }

    pub fn can_disconnect(&self) -> bool {
        !self.can_connect()
    }

    pub fn label(&self) -> &'static str {
        match self {
            ConnectionState::Disconnected => "Disconnected",
            ConnectionState::Connecting => "Connecting...",
            ConnectionState::Connected => "Connected",
        }
    }
}

/// Events a transport reports back to the dashboard, in arrival order
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ClientEvent {
    /// STOMP handshake done, subscription sent
    Connected,
    /// Body of one MESSAGE on the weather topic
    Message(String),
    /// Connect attempt or live session failed
    Failed(String),
    /// Session ended (closed by either side)
    Disconnected,
}
