//! History fetch against a one-shot in-process HTTP responder

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use weather_dash::core::DashboardError;
use weather_dash::history::fetch_history;

/// Serve exactly one response, then close
async fn serve_once(status: &'static str, body: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("http://{}/api/notifications", listener.local_addr().unwrap());
    tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();
        let mut buf = [0u8; 4096];
        let _ = stream.read(&mut buf).await.unwrap();
        let response = format!(
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        stream.write_all(response.as_bytes()).await.unwrap();
        stream.shutdown().await.unwrap();
    });
    url
}

#[tokio::test]
async fn test_fetch_decodes_json_array() {
    let url = serve_once(
        "200 OK",
        r#"[{"city":"Cork","condition":"Rain","temperatureCelsius":8.5,"message":"Wet","timeStamp":"2024-03-05T14:30:00"},{"city":"Athlone"}]"#,
    )
    .await;

    let items = fetch_history(&reqwest::Client::new(), &url).await.unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].city, "Cork");
    assert_eq!(items[0].temperature_celsius, Some(8.5));
    assert_eq!(items[1].temperature_celsius, None);
}

#[tokio::test]
async fn test_fetch_reports_http_error() {
    let url = serve_once("503 Service Unavailable", "[]").await;
    let err = fetch_history(&reqwest::Client::new(), &url).await.unwrap_err();
    assert!(matches!(err, DashboardError::History(_)), "{err:?}");
}

#[tokio::test]
async fn test_fetch_reports_bad_body() {
    let url = serve_once("200 OK", "{not json").await;
    let err = fetch_history(&reqwest::Client::new(), &url).await.unwrap_err();
    assert!(matches!(err, DashboardError::History(_)), "{err:?}");
}
