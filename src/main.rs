mod config;
mod control;
mod handlers;
mod models;
mod routes;
mod services;
mod watcher;
mod websocket;

use std::net::{Ipv4Addr, SocketAddr};
use std::panic;
use std::process;
use std::sync::Arc;

use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use config::Config;
use control::ControlStream;
use models::{ControlRecord, OutboundMessage};
use routes::create_routes;
use websocket::hub::ConnectionHub;
use websocket::relay::EventRelay;

/// Shared application state
pub struct AppState {
    pub config: Config,
    pub hub: ConnectionHub,
    pub relay: EventRelay,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Set panic hook for better error messages
    panic::set_hook(Box::new(|info| {
        eprintln!("PANIC: {info}");
    }));

    // Initialize tracing. Logs go to stderr: stdout carries the control
    // stream read by the controller process.
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            "brainstorm_server=debug,tower_http=debug,axum::rejection=trace,info".into()
        }))
        .init();

    info!("Starting server...");

    // Load configuration
    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    // Make sure a screen document exists before anything can request it.
    if let Err(e) = services::screen_service::ensure_ready(&config.screen) {
        error!(file = %config.screen.display(), err = %e, "failed to prepare screen document");
        process::exit(1);
    }

    let control = ControlStream::stdout();
    let state = Arc::new(AppState {
        config: config.clone(),
        hub: ConnectionHub::new(),
        relay: EventRelay::new(control.clone()),
    });

    // Screen change notifications: the watcher callback hands off to this
    // channel, and the task below tells the controller and every connected
    // browser. A watcher failure disables reloads but not serving.
    let (change_tx, mut change_rx) = tokio::sync::mpsc::unbounded_channel::<()>();
    let _watcher = match watcher::start(&config.screen, move || {
        let _ = change_tx.send(());
    }) {
        Ok(watcher) => Some(watcher),
        Err(e) => {
            warn!(err = %e, "screen watching unavailable; reload broadcasts disabled");
            None
        }
    };

    {
        let state = state.clone();
        let control = control.clone();
        let screen = config.screen.clone();
        tokio::spawn(async move {
            while change_rx.recv().await.is_some() {
                let clients = state.hub.client_count().await;
                info!(file = %screen.display(), clients, "screen updated");
                control.emit(&ControlRecord::ScreenUpdated {
                    file: screen.clone(),
                });
                state.hub.broadcast(&OutboundMessage::Reload).await;
            }
        });
    }

    let app_routes = create_routes(state).layer(TraceLayer::new_for_http());

    // Loopback only: the control channel carries no authentication.
    let addr = SocketAddr::from((Ipv4Addr::LOCALHOST, config.port));
    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(addr = %addr, err = %e, "failed to bind");
            process::exit(1);
        }
    };

    // Report the actual bound port; with BRAINSTORM_PORT=0 the OS picks one.
    let port = listener.local_addr().map(|a| a.port()).unwrap_or(config.port);

    info!("🚀 Server running on http://localhost:{}", port);
    info!("📡 WebSocket available at ws://localhost:{}/ws", port);

    control.emit(&ControlRecord::ServerStarted {
        port,
        url: format!("http://localhost:{}", port),
    });

    axum::serve(listener, app_routes)
        .await
        .expect("Server failed to start");
}
