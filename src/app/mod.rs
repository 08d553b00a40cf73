//! Browser weather dashboard
//!
//! Header (clock, connection, theme), filter sidebar, and a central column
//! with the current-weather card, temperature chart and notification feed.

mod chart;
mod feed;
mod filter;
mod header;
mod panel;

use eframe::egui;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::Duration;
use tracing::{error, info};

use crate::config::DashboardConfig;
use crate::core::{Dashboard, DashboardError, Notification};
use crate::history::fetch_history;
use crate::storage_wasm::LocalStorage;
use crate::theme;
use crate::time::clock_now;
use crate::websocket_wasm::{EventBuffer, WsClient};
use crate::ws_state::ClientEvent;

/// History fetch result, filled by the startup task and taken in update()
type HistorySlot = Rc<RefCell<Option<Result<Vec<Notification>, DashboardError>>>>;

pub struct WeatherApp {
    pub(crate) dashboard: Dashboard,
    config: DashboardConfig,
    /// Socket callbacks push, update() drains
    events: EventBuffer,
    ws_client: Option<WsClient>,
    history: HistorySlot,
    /// Header clock labels, refreshed every frame
    pub(crate) clock: (String, String),
    /// Theme last pushed into egui
    applied_dark: Option<bool>,
}

/// Page origin, with `window.__weather_ws_url` overriding the socket URL
fn browser_config() -> DashboardConfig {
    let window = web_sys::window();
    let origin = window
        .as_ref()
        .and_then(|w| w.location().origin().ok())
        .unwrap_or_else(|| crate::config::DEFAULT_BASE_URL.to_string());
    let mut config = DashboardConfig::for_origin(&origin);
    if let Some(ws) = window
        .as_ref()
        .and_then(|w| js_sys::Reflect::get(w, &"__weather_ws_url".into()).ok())
        .and_then(|v| v.as_string())
    {
        config.ws_url = ws;
    }
    config
}

impl WeatherApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let config = browser_config();
        info!(base = %config.base_url, ws = %config.ws_url, "Configuration resolved");

        let dashboard = Dashboard::new(Box::new(LocalStorage::open()));
        cc.egui_ctx.set_visuals(theme::visuals(dashboard.dark_mode()));

        // History first; the connection is opened once it has been applied
        let history: HistorySlot = Rc::new(RefCell::new(None));
        let slot = history.clone();
        let url = config.history_url();
        let ctx = cc.egui_ctx.clone();
        wasm_bindgen_futures::spawn_local(async move {
            let result = fetch_history(&url).await;
            *slot.borrow_mut() = Some(result);
            ctx.request_repaint();
        });

        Self {
            applied_dark: Some(dashboard.dark_mode()),
            dashboard,
            config,
            events: Rc::new(RefCell::new(VecDeque::new())),
            ws_client: None,
            history,
            clock: clock_now(),
        }
    }

    /// Open the socket for a dashboard already moved to Connecting
    pub(crate) fn open_client(&mut self) {
        match WsClient::connect(
            &self.config.ws_url,
            &self.config.stomp_host(),
            &self.config.topic,
            self.events.clone(),
        ) {
            Ok(client) => self.ws_client = Some(client),
            Err(e) => {
                error!(?e, "Failed to create WebSocket");
                self.dashboard
                    .handle_client_event(ClientEvent::Failed(format!("{e:?}")));
            }
        }
    }

    pub(crate) fn connect(&mut self) {
        if self.dashboard.request_connect() {
            self.open_client();
        }
    }

    pub(crate) fn disconnect(&mut self) {
        self.dashboard.request_disconnect();
        if let Some(client) = self.ws_client.take() {
            client.close();
        }
    }

    fn process_events(&mut self) {
        let history = self.history.borrow_mut().take();
        if self.dashboard.bootstrap_from_slot(history) {
            self.open_client();
        }

        loop {
            let Some(event) = self.events.borrow_mut().pop_front() else {
                break;
            };
            let ended = matches!(event, ClientEvent::Failed(_) | ClientEvent::Disconnected);
            self.dashboard.handle_client_event(event);
            if ended {
                if let Some(client) = self.ws_client.take() {
                    client.close();
                }
            }
        }
    }

    fn sync_theme(&mut self, ctx: &egui::Context) {
        let dark = self.dashboard.dark_mode();
        if self.applied_dark != Some(dark) {
            ctx.set_visuals(theme::visuals(dark));
            self.applied_dark = Some(dark);
        }
    }
}

impl eframe::App for WeatherApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Header clock ticks once a second; socket callbacks do not wake egui
        ctx.request_repaint_after(Duration::from_secs(1));

        self.process_events();
        self.clock = clock_now();
        self.sync_theme(ctx);

        egui::TopBottomPanel::top("header")
            .frame(egui::Frame::new().inner_margin(8.0))
            .show(ctx, |ui| {
                self.render_header(ui);
            });

        egui::SidePanel::left("filters")
            .resizable(false)
            .default_width(200.0)
            .show(ctx, |ui| {
                self.render_filters(ui);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .id_salt("dashboard")
                .show(ui, |ui| {
                    self.render_current_weather(ui);
                    ui.add_space(12.0);
                    self.render_chart(ui);
                    ui.add_space(12.0);
                    self.render_feed(ui);
                });
        });
    }
}
