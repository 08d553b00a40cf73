//! Terminal weather dashboard
//!
//! Run with: cargo run --features cli --bin weather-cli

#[cfg(not(target_arch = "wasm32"))]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use std::time::Duration;
    use tokio::io::{AsyncBufReadExt, BufReader};
    use tracing::{debug, info, warn};
    use tracing_subscriber::{fmt, EnvFilter};
    use weather_dash::config::DashboardConfig;
    use weather_dash::console::{render_dashboard, render_header, ConsoleCommand, HELP};
    use weather_dash::core::prefs::FileStore;
    use weather_dash::core::Dashboard;
    use weather_dash::history::fetch_history;
    use weather_dash::websocket_native::NativeStompClient;
    use weather_dash::ws_state::ClientEvent;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,weather_dash=debug"));
    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let config = DashboardConfig::from_env();
    info!(
        base = %config.base_url,
        ws = %config.ws_url,
        topic = %config.topic,
        prefs = %config.prefs_path,
        "Configuration resolved"
    );

    let mut dashboard = Dashboard::new(Box::new(FileStore::open(&config.prefs_path)));

    let http = reqwest::Client::new();
    let history = fetch_history(&http, &config.history_url()).await;

    let mut client = None;
    if dashboard.bootstrap(history) {
        client = Some(NativeStompClient::connect(
            &config.ws_url,
            &config.stomp_host(),
            &config.topic,
        ));
    }
    println!("{}", render_dashboard(&dashboard));

    // Pends forever while there is no client so select! skips the branch
    async fn next_event(client: &mut Option<NativeStompClient>) -> Option<ClientEvent> {
        match client {
            Some(c) => c.rx.recv().await,
            None => std::future::pending().await,
        }
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut clock = tokio::time::interval(Duration::from_secs(1));
    let mut last_status = "";

    loop {
        tokio::select! {
            event = next_event(&mut client) => {
                match event {
                    Some(event) => {
                        let redraw = matches!(event, ClientEvent::Message(_));
                        dashboard.handle_client_event(event);
                        if redraw {
                            println!("{}", render_dashboard(&dashboard));
                        }
                    }
                    None => {
                        debug!("STOMP task ended");
                        client = None;
                    }
                }
            }
            _ = clock.tick() => {
                // Reprint the header line whenever the connection status changes
                let status = dashboard.connection().label();
                if status != last_status {
                    println!("{}", render_header(&dashboard));
                    last_status = status;
                }
            }
            line = lines.next_line() => {
                let Some(line) = line? else {
                    info!("stdin closed");
                    break;
                };
                match ConsoleCommand::parse(&line) {
                    Ok(ConsoleCommand::Quit) => break,
                    Ok(ConsoleCommand::Help) => println!("{HELP}"),
                    Ok(ConsoleCommand::Show) => println!("{}", render_dashboard(&dashboard)),
                    Ok(ConsoleCommand::Connect) => {
                        if dashboard.request_connect() {
                            client = Some(NativeStompClient::connect(
                                &config.ws_url,
                                &config.stomp_host(),
                                &config.topic,
                            ));
                        } else {
                            println!("already {}", dashboard.connection().label());
                        }
                    }
                    Ok(ConsoleCommand::Disconnect) => {
                        dashboard.request_disconnect();
                        if let Some(c) = client.take() {
                            c.disconnect().await;
                        }
                        println!("{}", render_dashboard(&dashboard));
                    }
                    Ok(command) => {
                        match command {
                            ConsoleCommand::City(city) => dashboard.select_city(city),
                            ConsoleCommand::Condition(condition) => dashboard.select_condition(condition),
                            ConsoleCommand::Theme => {
                                dashboard.toggle_dark_mode();
                            }
                            ConsoleCommand::ToggleChart => dashboard.toggle_chart_kind(),
                            ConsoleCommand::ClearChart => dashboard.clear_chart(),
                            ConsoleCommand::ClearNotifications => dashboard.clear_notifications(),
                            _ => {}
                        }
                        println!("{}", render_dashboard(&dashboard));
                    }
                    Err(e) => println!("{e}"),
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupted");
                break;
            }
        }
    }

    if let Some(c) = client.take() {
        c.disconnect().await;
    }
    if dashboard.dropped_messages() > 0 {
        warn!(dropped = dashboard.dropped_messages(), "Malformed notifications were dropped");
    }
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {}
