//! Snackbar Host - a headless snackbar with a pausable auto-dismiss timer
//! 
//! This is the main entry point for the snackbar-host server.

use std::sync::Arc;
use tokio::{net::TcpListener, sync::broadcast::error::RecvError};
use tracing::{info, warn};

use snackbar_host::{
    api::create_router,
    config::Config,
    state::{AppState, Snackbar},
    tasks::spawn_snackbar_task,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("snackbar_host={},tower_http=info", config.log_level()))
        .init();

    info!("Starting snackbar-host v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, auto_hide={:?}ms, resume_hide={:?}ms",
          config.host, config.port, config.auto_hide_ms, config.resume_hide_ms);

    // The snackbar lives in its own task; handlers reach it through channels
    let snackbar = Snackbar::new(config.snackbar_props());
    let handle = spawn_snackbar_task(snackbar);
    let state = Arc::new(AppState::new(config.port, config.host.clone(), handle));

    let mut closes = state.subscribe_closes();
    tokio::spawn(async move {
        loop {
            match closes.recv().await {
                Ok(request) => info!("Close request: reason={}, event={:?}",
                                     request.reason.as_str(), request.event),
                Err(RecvError::Lagged(skipped)) => warn!("Missed {} close requests", skipped),
                Err(RecvError::Closed) => break,
            }
        }
    });

    let app = create_router(state);

    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST   /messages             - Queue a message");
    info!("  POST   /open, /close         - Set the open flag");
    info!("  PUT    /config               - Change auto-hide configuration");
    info!("  POST   /events/<signal>      - pointer-enter, pointer-leave, window-blur, window-focus, click");
    info!("  DELETE /snackbar             - Unmount");
    info!("  GET    /status, /health      - Inspect state");

    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    info!("Server shutdown complete");
    Ok(())
}
