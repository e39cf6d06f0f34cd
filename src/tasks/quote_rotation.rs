//! Quote rotation background task

use std::{sync::Arc, time::Duration};
use tokio::time::{interval_at, Instant};
use tracing::{debug, info, warn};

use crate::state::AppState;

/// Background task that moves to the next quote on a fixed cadence
pub async fn quote_rotation_task(state: Arc<AppState>, period: Duration) {
    info!("Starting quote rotation task (every {}s)", period.as_secs());

    // The first quote is picked at startup, so the first rotation waits a full period
    let mut interval = interval_at(Instant::now() + period, period);

    loop {
        interval.tick().await;

        match state.advance_quote() {
            Ok(Some(quote)) => debug!("Now showing quote by {}", quote.author),
            Ok(None) => debug!("No quotes to rotate"),
            Err(e) => warn!("Failed to rotate quote: {}", e),
        }
    }
}
