//! Weather dashboard - live weather notifications over STOMP/WebSocket
//!
//! Subscribes to the server's weather topic and displays:
//! - Current weather card for the most recent (or selected) city
//! - Temperature chart of the last ten readings
//! - Filterable notification feed, newest first
//!
//! The browser build (`--features wasm`) renders with egui; the native CLI
//! (`--features cli`) drives the same [`core::Dashboard`] from a terminal.

pub mod config;
pub mod core;
pub mod time;
pub mod ws_state;

#[cfg(not(target_arch = "wasm32"))]
pub mod console;

#[cfg(any(feature = "cli", all(target_arch = "wasm32", feature = "wasm")))]
pub mod history;

#[cfg(feature = "cli")]
pub mod websocket_native;

#[cfg(all(target_arch = "wasm32", feature = "wasm"))]
mod app;
#[cfg(all(target_arch = "wasm32", feature = "wasm"))]
mod storage_wasm;
#[cfg(all(target_arch = "wasm32", feature = "wasm"))]
mod theme;
#[cfg(all(target_arch = "wasm32", feature = "wasm"))]
mod websocket_wasm;

#[cfg(all(target_arch = "wasm32", feature = "wasm"))]
use wasm_bindgen::prelude::*;

#[cfg(all(target_arch = "wasm32", feature = "wasm"))]
#[wasm_bindgen(start)]
pub fn main() {
    use wasm_bindgen::JsCast;

    console_error_panic_hook::set_once();

    // Initialize tracing for browser console
    tracing_wasm::set_as_global_default();

    let web_options = eframe::WebOptions::default();

    wasm_bindgen_futures::spawn_local(async {
        let Some(canvas) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id("canvas"))
            .and_then(|e| e.dyn_into::<web_sys::HtmlCanvasElement>().ok())
        else {
            tracing::error!("No <canvas id=\"canvas\"> element on the page");
            return;
        };

        if let Err(e) = eframe::WebRunner::new()
            .start(
                canvas,
                web_options,
                Box::new(|cc| Ok(Box::new(app::WeatherApp::new(cc)))),
            )
            .await
        {
            tracing::error!(error = ?e, "Failed to start eframe");
        }
    });
}
