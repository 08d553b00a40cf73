//! STOMP subscriber session, independent of the socket implementation
//!
//! Transports feed received text in and write out whatever frames the
//! session asks for. The session tracks the handshake and filters MESSAGE
//! frames down to the one subscription it owns.

use tracing::{debug, info, warn};

use super::error::StompError;
use super::stomp::{decode_frames, Command, Frame};

const SUBSCRIPTION_ID: &str = "sub-0";
const DISCONNECT_RECEIPT: &str = "disconnect-0";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    AwaitingConnected,
    Subscribed,
    Closed,
}

/// What the transport should do after feeding a message in
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// Write this frame to the socket
    Send(Frame),
    /// Handshake accepted and subscription requested
    Established { version: Option<String> },
    /// Body of a MESSAGE on our subscription
    Message(String),
    /// Server acknowledged our DISCONNECT
    Closed,
}

#[derive(Debug, Clone)]
pub struct StompSession {
    host: String,
    topic: String,
    state: SessionState,
}

impl StompSession {
    pub fn new(host: impl Into<String>, topic: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            topic: topic.into(),
            state: SessionState::Idle,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// First frame to write once the socket is open
    pub fn open(&mut self) -> Frame {
        self.state = SessionState::AwaitingConnected;
        debug!(host = %self.host, "Sending STOMP CONNECT");
        Frame::connect(&self.host)
    }

    /// Feed one WebSocket text message.
    ///
    /// Malformed frames are an error for the caller to log; an ERROR frame
    /// closes the session and is returned as [`StompError::Rejected`].
    pub fn handle_text(&mut self, text: &str) -> Result<Vec<SessionEvent>, StompError> {
        let mut events = Vec::new();
        for frame in decode_frames(text)? {
            self.handle_frame(frame, &mut events)?;
        }
        Ok(events)
    }

    fn handle_frame(&mut self, frame: Frame, events: &mut Vec<SessionEvent>) -> Result<(), StompError> {
        match frame.command {
            Command::Connected if self.state == SessionState::AwaitingConnected => {
                let version = frame.get("version").map(str::to_string);
                info!(version = ?version, topic = %self.topic, "STOMP session established");
                self.state = SessionState::Subscribed;
                events.push(SessionEvent::Send(Frame::subscribe(SUBSCRIPTION_ID, &self.topic)));
                events.push(SessionEvent::Established { version });
            }
            Command::Message if self.state == SessionState::Subscribed => {
                match frame.get("subscription") {
                    Some(SUBSCRIPTION_ID) | None => events.push(SessionEvent::Message(frame.body)),
                    Some(other) => warn!(subscription = other, "MESSAGE for unknown subscription"),
                }
            }
            Command::Receipt if frame.get("receipt-id") == Some(DISCONNECT_RECEIPT) => {
                self.state = SessionState::Closed;
                events.push(SessionEvent::Closed);
            }
            Command::Error => {
                self.state = SessionState::Closed;
                let message = frame
                    .get("message")
                    .map(str::to_string)
                    .unwrap_or_else(|| frame.body.clone());
                return Err(StompError::Rejected(message));
            }
            other => {
                debug!(command = other.as_str(), state = ?self.state, "Ignoring STOMP frame");
            }
        }
        Ok(())
    }

    /// DISCONNECT frame if the handshake got far enough to need one
    pub fn close(&mut self) -> Option<Frame> {
        let was = self.state;
        self.state = SessionState::Closed;
        match was {
            SessionState::AwaitingConnected | SessionState::Subscribed => {
                Some(Frame::disconnect(DISCONNECT_RECEIPT))
            }
            SessionState::Idle | SessionState::Closed => None,
        }
    }
}
