//! Browser STOMP-over-WebSocket client

use crate::core::{SessionEvent, StompError, StompSession};
use crate::ws_state::ClientEvent;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use tracing::{debug, error, info, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CloseEvent, ErrorEvent, MessageEvent, WebSocket};

/// Shared event buffer: socket callbacks push, the app drains in update()
pub type EventBuffer = Rc<RefCell<VecDeque<ClientEvent>>>;

pub struct WsClient {
    ws: WebSocket,
    session: Rc<RefCell<StompSession>>,
    events: EventBuffer,
}

impl WsClient {
    /// Open the socket; CONNECT goes out once it is open
    pub fn connect(url: &str, host: &str, topic: &str, events: EventBuffer) -> Result<Self, JsValue> {
        info!(url, "Connecting to WebSocket");

        let ws = WebSocket::new(url)?;
        let session = Rc::new(RefCell::new(StompSession::new(host, topic)));

        let ws_clone = ws.clone();
        let session_clone = session.clone();
        let on_open = Closure::wrap(Box::new(move |_| {
            info!("WebSocket connected, sending STOMP CONNECT");
            let frame = session_clone.borrow_mut().open().encode();
            if let Err(e) = ws_clone.send_with_str(&frame) {
                error!(?e, "Failed to send STOMP CONNECT");
            }
        }) as Box<dyn Fn(JsValue)>);
        ws.set_onopen(Some(on_open.as_ref().unchecked_ref()));
        on_open.forget();

        let ws_clone = ws.clone();
        let session_clone = session.clone();
        let events_clone = events.clone();
        let on_msg = Closure::wrap(Box::new(move |e: MessageEvent| {
            let Ok(txt) = e.data().dyn_into::<js_sys::JsString>() else {
                return;
            };
            let text: String = txt.into();
            let result = session_clone.borrow_mut().handle_text(&text);
            let mut events = events_clone.borrow_mut();
            match result {
                Ok(session_events) => {
                    for event in session_events {
                        match event {
                            SessionEvent::Send(frame) => {
                                if let Err(e) = ws_clone.send_with_str(&frame.encode()) {
                                    error!(?e, "Failed to send STOMP frame");
                                }
                            }
                            SessionEvent::Established { version } => {
                                debug!(?version, "STOMP session established");
                                events.push_back(ClientEvent::Connected);
                            }
                            SessionEvent::Message(body) => events.push_back(ClientEvent::Message(body)),
                            SessionEvent::Closed => {}
                        }
                    }
                }
                Err(StompError::Rejected(reason)) => {
                    error!(reason = %reason, "Server sent STOMP ERROR");
                    events.push_back(ClientEvent::Failed(reason));
                    let _ = ws_clone.close();
                }
                Err(e) => warn!(error = %e, "Dropping malformed STOMP frame"),
            }
        }) as Box<dyn Fn(MessageEvent)>);
        ws.set_onmessage(Some(on_msg.as_ref().unchecked_ref()));
        on_msg.forget();

        let events_clone = events.clone();
        let on_err = Closure::wrap(Box::new(move |e: ErrorEvent| {
            let msg = e.message();
            error!(error = %msg, "WebSocket error");
            events_clone.borrow_mut().push_back(ClientEvent::Failed(msg));
        }) as Box<dyn Fn(ErrorEvent)>);
        ws.set_onerror(Some(on_err.as_ref().unchecked_ref()));
        on_err.forget();

        let events_clone = events.clone();
        let on_close = Closure::wrap(Box::new(move |e: CloseEvent| {
            let code = e.code();
            let reason = e.reason();
            warn!(code, reason = %reason, "WebSocket closed");
            events_clone.borrow_mut().push_back(ClientEvent::Disconnected);
        }) as Box<dyn Fn(CloseEvent)>);
        ws.set_onclose(Some(on_close.as_ref().unchecked_ref()));
        on_close.forget();

        Ok(Self { ws, session, events })
    }

    /// Send DISCONNECT (if the session got that far) and close the socket.
    ///
    /// Callbacks are detached first so a late close event cannot be
    /// mistaken for the next session's.
    pub fn close(self) {
        if let Some(frame) = self.session.borrow_mut().close() {
            debug!("Sending STOMP DISCONNECT");
            if let Err(e) = self.ws.send_with_str(&frame.encode()) {
                warn!(?e, "Failed to send STOMP DISCONNECT");
            }
        }
        self.ws.set_onopen(None);
        self.ws.set_onmessage(None);
        self.ws.set_onerror(None);
        self.ws.set_onclose(None);
        if let Err(e) = self.ws.close() {
            warn!(?e, "Failed to close WebSocket");
        }
        self.events.borrow_mut().push_back(ClientEvent::Disconnected);
    }
}
