//! One-shot fetch of previously sent notifications
//!
//! `GET /api/notifications` returns a JSON array, newest first. Any failure
//! comes back as [`DashboardError`] for the dashboard to
//! log; startup carries on either way.

use crate::core::{DashboardError, Notification};
use tracing::{debug, info};

/// Native fetch via reqwest
#[cfg(feature = "cli")]
pub async fn fetch_history(
    client: &reqwest::Client,
    url: &str,
) -> Result<Vec<Notification>, DashboardError> {
    info!(url, "Fetching notification history");
    let response = client
        .get(url)
        .send()
        .await
        .and_then(reqwest::Response::error_for_status)
        .map_err(|e| DashboardError::History(e.to_string()))?;
    let items: Vec<Notification> = response
        .json()
        .await
        .map_err(|e| DashboardError::History(e.to_string()))?;
    debug!(count = items.len(), "History response received");
    Ok(items)
}

/// Browser fetch via `window.fetch`
#[cfg(all(target_arch = "wasm32", feature = "wasm"))]
pub async fn fetch_history(url: &str) -> Result<Vec<Notification>, DashboardError> {
    use wasm_bindgen::JsCast;
    use wasm_bindgen_futures::JsFuture;

    fn js_err(e: wasm_bindgen::JsValue) -> DashboardError {
        DashboardError::History(format!("{e:?}"))
    }

    info!(url, "Fetching notification history");
    let window = web_sys::window().ok_or_else(|| DashboardError::History("no window".into()))?;
    let response: web_sys::Response = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(js_err)?
        .dyn_into()
        .map_err(js_err)?;
    if !response.ok() {
        return Err(DashboardError::History(format!(
            "HTTP {} {}",
            response.status(),
            response.status_text()
        )));
    }
    let body = JsFuture::from(response.text().map_err(js_err)?)
        .await
        .map_err(js_err)?
        .as_string()
        .ok_or_else(|| DashboardError::History("response body is not text".into()))?;
    debug!(bytes = body.len(), "History response received");
    Notification::list_from_json(&body)
}
