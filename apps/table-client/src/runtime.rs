//! Async driver for one table.
//!
//! The engine is single-threaded (`Rc` store, boxed collaborators), so the
//! loop runs on the caller's task rather than being spawned.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::{self, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::config::MIN_FRAME;
use crate::engine::TableEngine;
use crate::protocol::WireEvent;

/// Feed inbound events and frame ticks to `engine` until `shutdown` fires or
/// the event channel closes. The engine is disposed before it is returned.
pub async fn run_table(
    mut engine: TableEngine,
    mut events: mpsc::UnboundedReceiver<WireEvent>,
    shutdown: CancellationToken,
    frame_interval: Duration,
) -> TableEngine {
    let started = Instant::now();
    let frame_interval = frame_interval.max(MIN_FRAME);
    let mut frames = time::interval(frame_interval);
    frames.set_missed_tick_behavior(MissedTickBehavior::Skip);
    info!(frame_ms = frame_interval.as_millis() as u64, "[RUNTIME] started");

    loop {
        tokio::select! {
            biased;

            _ = shutdown.cancelled() => {
                info!("[RUNTIME] shutdown requested");
                break;
            }
            event = events.recv() => match event {
                Some(wire) => engine.handle_wire_event(&wire),
                None => {
                    info!("[RUNTIME] event channel closed");
                    break;
                }
            },
            tick = frames.tick() => {
                engine.tick(tick.duration_since(started));
            }
        }
    }

    engine.dispose();
    engine
}
