//! Replaying recorded wire events against an engine on a virtual clock.

use std::path::Path;
use std::time::Duration;

use tracing::debug;

use crate::config::MIN_FRAME;
use crate::engine::TableEngine;
use crate::error::ClientError;
use crate::protocol::WireEvent;

/// Upper bound on frames spent waiting for animations to finish.
const MAX_SETTLE_FRAMES: u32 = 10_000;

/// One `WireEvent` per line. Blank lines and `#` comments are skipped.
pub fn parse_events(text: &str) -> Result<Vec<WireEvent>, ClientError> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| {
            let line = line.trim();
            !line.is_empty() && !line.starts_with('#')
        })
        .map(|(index, line)| {
            serde_json::from_str::<WireEvent>(line).map_err(|e| ClientError::Replay {
                detail: format!("line {}: {e}", index + 1),
            })
        })
        .collect()
}

pub fn load_events(path: &Path) -> Result<Vec<WireEvent>, ClientError> {
    let text = std::fs::read_to_string(path).map_err(|e| ClientError::Replay {
        detail: format!("cannot read {}: {e}", path.display()),
    })?;
    parse_events(&text)
}

/// Tick frames until no animation is queued. Returns the new clock.
pub fn settle(engine: &mut TableEngine, mut now: Duration, frame: Duration) -> Duration {
    let frame = frame.max(MIN_FRAME);
    let mut frames = 0;
    while engine.is_animating() && frames < MAX_SETTLE_FRAMES {
        now += frame;
        engine.tick(now);
        frames += 1;
    }
    debug!(frames, now_ms = now.as_millis() as u64, "[REPLAY] settled");
    now
}

/// Deliver `events` in order, letting `gap` of frame time pass between
/// them, then settle. Returns the final clock.
pub fn replay(
    engine: &mut TableEngine,
    events: &[WireEvent],
    frame: Duration,
    gap: Duration,
) -> Duration {
    let frame = frame.max(MIN_FRAME);
    let mut now = Duration::ZERO;
    for wire in events {
        engine.handle_wire_event(wire);
        let until = now + gap;
        while now < until && engine.is_animating() {
            now += frame;
            engine.tick(now);
        }
        // The scheduler clock must follow even when idle, or the next deal
        // would start in the past.
        if now < until {
            now = until;
            engine.tick(now);
        }
    }
    settle(engine, now, frame)
}
