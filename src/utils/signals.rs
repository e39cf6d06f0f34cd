//! Signal handling for graceful shutdown

use futures::stream::StreamExt;
use signal_hook::consts::{SIGINT, SIGTERM};
use signal_hook_tokio::Signals;
use tracing::debug;

/// Wait for the first shutdown signal (SIGTERM, SIGINT) and return its number
pub async fn shutdown_signal() -> Result<i32, String> {
    let mut signals = Signals::new([SIGTERM, SIGINT])
        .map_err(|e| format!("Failed to register signal handler: {}", e))?;
    debug!("Listening for shutdown signals");

    let signal = signals.next()
        .await
        .ok_or_else(|| "Signal stream ended unexpectedly".to_string())?;

    signals.handle().close();
    Ok(signal)
}
