//! Transport events into engine events.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::domain::cards_parsing::{first_truthy, is_truthy, scalar_text};
use crate::domain::snapshot::game_object;
use crate::domain::{normalize_cards, normalize_roster, Card, RosterEntry};

const LOCAL_IDENTITY_FIELDS: [&str; 3] = ["localIdentity", "mySocketId", "socketId"];

/// A named event exactly as the transport delivers it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireEvent {
    pub event: String,
    #[serde(default)]
    pub payload: Value,
}

impl WireEvent {
    pub fn new(event: impl Into<String>, payload: Value) -> Self {
        Self {
            event: event.into(),
            payload,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum InboundEvent {
    Connected {
        identity: Option<String>,
    },
    Disconnected,
    RoomUpdated {
        players: Vec<RosterEntry>,
        local_identity: Option<String>,
        /// Game object for mirroring into the store.
        game: Value,
    },
    /// Raw state payload; normalized by the engine, which knows the local
    /// identity needed to find the player's own hand.
    StateSnapshot(Value),
    PassingComplete {
        phase: Option<String>,
        hand: Vec<Card>,
    },
    ServerError(String),
    GameReset,
}

fn optional_text(value: &Value, fields: &[&str]) -> Option<String> {
    first_truthy(value, fields).map(scalar_text)
}

fn room_updated(payload: &Value) -> InboundEvent {
    let game = game_object(payload);
    InboundEvent::RoomUpdated {
        players: game
            .get("players")
            .map(normalize_roster)
            .unwrap_or_default(),
        local_identity: optional_text(payload, &LOCAL_IDENTITY_FIELDS),
        game: game.clone(),
    }
}

fn has_players(payload: &Value) -> bool {
    game_object(payload)
        .get("players")
        .and_then(Value::as_array)
        .is_some_and(|players| !players.is_empty())
}

fn server_error(payload: &Value) -> String {
    match payload {
        Value::String(message) => message.clone(),
        other => optional_text(other, &["message", "error"])
            .unwrap_or_else(|| "Unknown server error".to_string()),
    }
}

/// Map one wire event onto zero or more engine events. Unknown event names
/// are logged and dropped.
pub fn decode(wire: &WireEvent) -> Vec<InboundEvent> {
    let payload = &wire.payload;
    let events = match wire.event.as_str() {
        "connect" => vec![InboundEvent::Connected {
            identity: optional_text(payload, &["id", "socketId"]),
        }],
        "disconnect" => vec![InboundEvent::Disconnected],
        "roomUpdated" | "playerJoined" => vec![room_updated(payload)],
        // Some servers ship the first snapshot inside gameCreated.
        "gameCreated" => {
            let mut events = vec![room_updated(payload)];
            if has_players(payload) {
                events.push(InboundEvent::StateSnapshot(payload.clone()));
            }
            events
        }
        "stateSnapshot" | "gameState" | "cardPlayed" | "roundResult" => {
            vec![InboundEvent::StateSnapshot(payload.clone())]
        }
        "passingComplete" => vec![InboundEvent::PassingComplete {
            phase: payload
                .get("phase")
                .filter(|v| is_truthy(v))
                .map(scalar_text),
            hand: payload
                .get("hand")
                .map(normalize_cards)
                .unwrap_or_default(),
        }],
        "errorMessage" => vec![InboundEvent::ServerError(server_error(payload))],
        "gameReset" => vec![InboundEvent::GameReset],
        other => {
            warn!(event = other, "[WIRE] ignoring unknown event");
            Vec::new()
        }
    };
    debug!(event = %wire.event, decoded = events.len(), "[WIRE] decoded");
    events
}
