//! Tick delivery background task

use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{error, info};

use crate::{state::AppState, timer::TickSignal};

/// Background task that feeds tick source signals into the timer
pub async fn tick_driver_task(state: Arc<AppState>, mut tick_rx: mpsc::UnboundedReceiver<TickSignal>) {
    info!("Starting tick driver task");

    while let Some(signal) = tick_rx.recv().await {
        if let Err(e) = state.deliver_tick(signal) {
            error!("Failed to deliver tick: {}", e);
        }
    }

    info!("Tick source closed, tick driver stopping");
}
