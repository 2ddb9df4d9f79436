//! Snapshot normalization: one server state payload into a `Snapshot`.
//!
//! Payloads come wrapped (`{ game: {...}, hand: [...] }`) or direct
//! (`{ players, phase, ... }`). Every field is optional.

use serde_json::Value;

use super::cards_parsing::{first_truthy, is_truthy, normalize_cards, scalar_text};
use super::cards_types::Card;
use super::roster::{normalize_roster, RosterEntry};

const HAND_FIELDS: [&str; 3] = ["hand", "playerHand", "myHand"];
const OWN_IDENTITY_FIELDS: [&str; 2] = ["socketId", "id"];

/// The unit of truth for one reconciliation pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub phase: Option<String>,
    pub players: Vec<RosterEntry>,
    pub local_hand: Vec<Card>,
    pub current_turn: Option<String>,
    pub room_id: Option<String>,
    /// Game object as received, for mirroring into the store.
    pub game: Value,
}

pub(crate) fn game_object(payload: &Value) -> &Value {
    match payload.get("game") {
        Some(game) if is_truthy(game) => game,
        _ => payload,
    }
}

fn own_hand<'a>(players: &'a Value, local_identity: Option<&str>) -> Option<&'a Value> {
    let local = local_identity?;
    players.as_array()?.iter().find_map(|player| {
        let id = first_truthy(player, &OWN_IDENTITY_FIELDS).map(scalar_text)?;
        (id == local).then(|| player.get("hand")).flatten()
    })
}

fn text_field(value: &Value, field: &str) -> Option<String> {
    value
        .get(field)
        .filter(|v| is_truthy(v))
        .map(scalar_text)
}

/// Normalize a state payload. `local_identity` lets the local hand be found
/// inside the player list when the payload has no top-level hand.
pub fn normalize_snapshot(payload: &Value, local_identity: Option<&str>) -> Snapshot {
    let game = game_object(payload);
    let players_raw = game.get("players").filter(|v| v.is_array());

    let hand_raw = first_truthy(payload, &HAND_FIELDS)
        .or_else(|| players_raw.and_then(|p| own_hand(p, local_identity)));

    Snapshot {
        phase: text_field(payload, "phase").or_else(|| text_field(game, "phase")),
        players: players_raw.map(normalize_roster).unwrap_or_default(),
        local_hand: hand_raw.map(normalize_cards).unwrap_or_default(),
        current_turn: text_field(game, "currentTurn"),
        room_id: text_field(game, "roomId"),
        game: game.clone(),
    }
}
