//! Focus Time - A local focus timer service
//!
//! This is the main entry point for the focus-time application.

use std::{sync::Arc, time::Duration};
use tokio::net::TcpListener;
use tracing::info;

use focus_time::{
    api::create_router,
    config::Config,
    state::AppState,
    tasks::{quote_rotation_task, session_events_task, tick_driver_task},
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("focus_time={},tower_http=info", config.log_level()))
        .init();

    info!("Starting focus-time server v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, focus={}min, rest={}min, sounds={}",
          config.host, config.port, config.focus, config.rest,
          if config.mute { "off" } else { "on" });

    // Create application state and the tick channel feeding the timer
    let (state, tick_rx) = AppState::new(&config);
    let state = Arc::new(state);

    // Start background tasks
    tokio::spawn(tick_driver_task(Arc::clone(&state), tick_rx));
    tokio::spawn(session_events_task(Arc::clone(&state)));
    tokio::spawn(quote_rotation_task(
        Arc::clone(&state),
        Duration::from_secs(config.quote_interval.max(1)),
    ));

    // Create HTTP router with all endpoints
    let app = create_router(state);

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /focus        - Start a focus session ({{\"hours\", \"minutes\"}} optional)");
    info!("  POST /rest         - Start a rest session");
    info!("  POST /next         - Start the offered session");
    info!("  POST /pause        - Pause the session");
    info!("  POST /resume       - Resume the session");
    info!("  POST /toggle       - Pause or resume");
    info!("  POST /reset        - Reset to idle");
    info!("  GET  /status       - Timer, session and quote status");
    info!("  GET  /quote        - Current quote");
    info!("  POST /quote/next   - Next quote");
    info!("  POST /sounds/toggle - Toggle sound cues");
    info!("  GET  /events       - WebSocket event stream");
    info!("  GET  /health       - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        signal = shutdown_signal() => {
            match signal {
                Ok(signal) => info!("Shutdown signal {} received", signal),
                Err(e) => tracing::error!("Signal handling failed: {}", e),
            }
        }
    }

    info!("Server shutdown complete");
    Ok(())
}
