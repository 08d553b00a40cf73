//! Native STOMP-over-WebSocket client
//!
//! Runs the socket in a tokio task and reports [`ClientEvent`]s through a
//! channel; the task owning the `Dashboard` is the only reader.

use crate::core::{SessionEvent, StompError, StompSession};
use crate::ws_state::ClientEvent;
use futures_util::{SinkExt, StreamExt};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio_tungstenite::{connect_async, tungstenite::Message};
use tracing::{debug, error, info, warn};

/// One connection attempt; dropped or disconnected, it is never retried
pub struct NativeStompClient {
    /// Events in arrival order; closes when the session task ends
    pub rx: mpsc::UnboundedReceiver<ClientEvent>,
    shutdown: Option<oneshot::Sender<()>>,
    task: JoinHandle<()>,
}

impl NativeStompClient {
    /// Spawn the connection task; must be called inside a tokio runtime
    pub fn connect(url: &str, host: &str, topic: &str) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        let session = StompSession::new(host, topic);
        let url = url.to_string();

        let task = tokio::spawn(async move {
            run_session(&url, session, tx, shutdown_rx).await;
        });

        Self {
            rx,
            shutdown: Some(shutdown_tx),
            task,
        }
    }

    /// Send STOMP DISCONNECT, close the socket and wait for the task
    pub async fn disconnect(mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
        if let Err(e) = self.task.await {
            warn!(error = %e, "STOMP task did not finish cleanly");
        }
    }
}

fn emit(tx: &mpsc::UnboundedSender<ClientEvent>, event: ClientEvent) -> bool {
    tx.send(event).is_ok()
}

async fn run_session(
    url: &str,
    mut session: StompSession,
    tx: mpsc::UnboundedSender<ClientEvent>,
    mut shutdown: oneshot::Receiver<()>,
) {
    info!(url, "Connecting to WebSocket");

    // The handshake can hang; a disconnect must still get through
    let connected = tokio::select! {
        _ = &mut shutdown => {
            info!("Connect cancelled before the handshake completed");
            emit(&tx, ClientEvent::Disconnected);
            return;
        }
        result = connect_async(url) => result,
    };

    let ws_stream = match connected {
        Ok((stream, _)) => {
            info!("WebSocket connected");
            stream
        }
        Err(e) => {
            error!(error = %e, "Failed to connect");
            emit(&tx, ClientEvent::Failed(e.to_string()));
            return;
        }
    };

    let (mut write, mut read) = ws_stream.split();

    let connect = session.open().encode();
    if let Err(e) = write.send(Message::Text(connect.into())).await {
        error!(error = %e, "Failed to send STOMP CONNECT");
        emit(&tx, ClientEvent::Failed(e.to_string()));
        return;
    }

    loop {
        tokio::select! {
            _ = &mut shutdown => {
                if let Some(frame) = session.close() {
                    debug!("Sending STOMP DISCONNECT");
                    if let Err(e) = write.send(Message::Text(frame.encode().into())).await {
                        warn!(error = %e, "Failed to send STOMP DISCONNECT");
                    }
                }
                let _ = write.close().await;
                emit(&tx, ClientEvent::Disconnected);
                return;
            }
            msg = read.next() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        let events = match session.handle_text(&text) {
                            Ok(events) => events,
                            Err(StompError::Rejected(reason)) => {
                                error!(reason = %reason, "Server sent STOMP ERROR");
                                emit(&tx, ClientEvent::Failed(reason));
                                return;
                            }
                            Err(e) => {
                                warn!(error = %e, "Dropping malformed STOMP frame");
                                continue;
                            }
                        };
                        for event in events {
                            let forwarded = match event {
                                SessionEvent::Send(frame) => {
                                    if let Err(e) = write.send(Message::Text(frame.encode().into())).await {
                                        error!(error = %e, "Failed to send STOMP frame");
                                        emit(&tx, ClientEvent::Failed(e.to_string()));
                                        return;
                                    }
                                    true
                                }
                                SessionEvent::Established { .. } => emit(&tx, ClientEvent::Connected),
                                SessionEvent::Message(body) => emit(&tx, ClientEvent::Message(body)),
                                SessionEvent::Closed => true,
                            };
                            if !forwarded {
                                // Receiver dropped, exit
                                return;
                            }
                        }
                    }
                    Some(Ok(Message::Close(_))) | None => {
                        warn!("WebSocket closed by server");
                        emit(&tx, ClientEvent::Disconnected);
                        return;
                    }
                    Some(Err(e)) => {
                        error!(error = %e, "WebSocket error");
                        emit(&tx, ClientEvent::Failed(e.to_string()));
                        return;
                    }
                    _ => {}
                }
            }
        }
    }
}
