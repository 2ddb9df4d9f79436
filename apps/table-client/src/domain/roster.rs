//! Roster normalization: raw server player records into `RosterEntry`.

use std::collections::BTreeSet;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::Value;
use tracing::debug;

use super::cards_parsing::{first_truthy, normalize_cards, scalar_text};
use super::cards_types::Card;

const IDENTITY_FIELDS: [&str; 3] = ["socketId", "id", "playerId"];
const NAME_FIELDS: [&str; 2] = ["name", "playerName"];
const HAND_FIELDS: [&str; 2] = ["hand", "cards"];
const COUNT_FIELDS: [&str; 3] = ["handCount", "cardsCount", "cardCount"];

/// No count can exceed a full deck; anything larger is treated as missing.
pub const MAX_HAND_COUNT: usize = 52;

/// What the server told us about a player's hand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandInfo {
    /// Full card list (normally only for the local player).
    Cards(Vec<Card>),
    /// Explicit card count.
    Count(usize),
    /// Nothing supplied.
    Unknown,
}

impl HandInfo {
    /// Number of cards to show; `full_hand` when the server said nothing.
    pub fn card_count(&self, full_hand: usize) -> usize {
        match self {
            HandInfo::Cards(cards) => cards.len(),
            HandInfo::Count(n) => (*n).min(MAX_HAND_COUNT),
            HandInfo::Unknown => full_hand,
        }
    }
}

/// One normalized server player record. Transient: lives for one
/// reconciliation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterEntry {
    pub identity: String,
    pub display_name: String,
    pub hand: HandInfo,
}

impl RosterEntry {
    pub fn new(identity: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            identity: identity.into(),
            display_name: display_name.into(),
            hand: HandInfo::Unknown,
        }
    }
}

impl Serialize for RosterEntry {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("id", &self.identity)?;
        map.serialize_entry("name", &self.display_name)?;
        match &self.hand {
            HandInfo::Cards(cards) => map.serialize_entry("hand", cards)?,
            HandInfo::Count(n) => map.serialize_entry("handCount", n)?,
            HandInfo::Unknown => {}
        }
        map.end()
    }
}

fn hand_info(raw: &Value) -> HandInfo {
    if let Some(cards) = HAND_FIELDS
        .iter()
        .filter_map(|field| raw.get(field))
        .find(|v| v.is_array())
    {
        return HandInfo::Cards(normalize_cards(cards));
    }

    COUNT_FIELDS
        .iter()
        .filter_map(|field| raw.get(field))
        .find_map(hand_count)
        .map(HandInfo::Count)
        .unwrap_or(HandInfo::Unknown)
}

/// A usable card count: non-negative, finite and at most a deck. Negative
/// numbers read as zero; fractions are truncated.
fn hand_count(raw: &Value) -> Option<usize> {
    let count = match raw.as_u64() {
        Some(n) => n,
        None => {
            let f = raw.as_f64().filter(|f| f.is_finite())?;
            f.max(0.0) as u64
        }
    };
    match usize::try_from(count) {
        Ok(n) if n <= MAX_HAND_COUNT => Some(n),
        _ => {
            debug!(count = %raw, "[NORMALIZE] hand count out of range, ignoring");
            None
        }
    }
}

fn normalize_entry(index: usize, raw: &Value) -> RosterEntry {
    let identity = match first_truthy(raw, &IDENTITY_FIELDS) {
        Some(v) => scalar_text(v),
        None => {
            debug!(index, "[NORMALIZE] roster entry without identity");
            format!("unknown-{index}")
        }
    };
    let display_name = first_truthy(raw, &NAME_FIELDS)
        .map(scalar_text)
        .unwrap_or_else(|| format!("Player {}", index + 1));

    RosterEntry {
        identity,
        display_name,
        hand: hand_info(raw),
    }
}

/// Normalize a raw player list. Anything that is not an array is an empty
/// roster.
pub fn normalize_roster(raw: &Value) -> Vec<RosterEntry> {
    match raw {
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(index, item)| normalize_entry(index, item))
            .collect(),
        _ => Vec::new(),
    }
}

/// True when both rosters hold the same set of identities, ignoring order.
pub fn same_membership(a: &[RosterEntry], b: &[RosterEntry]) -> bool {
    let left: BTreeSet<&str> = a.iter().map(|e| e.identity.as_str()).collect();
    let right: BTreeSet<&str> = b.iter().map(|e| e.identity.as_str()).collect();
    left == right
}
