// Proptest generators for domain types.

use proptest::prelude::*;
use serde_json::{json, Value};

use crate::domain::roster::RosterEntry;
use crate::domain::{Card, Rank, Suit};

pub fn suit() -> impl Strategy<Value = Suit> {
    prop::sample::select(Suit::ALL.to_vec())
}

pub fn rank() -> impl Strategy<Value = Rank> {
    prop::sample::select(Rank::ALL.to_vec())
}

pub fn card() -> impl Strategy<Value = Card> {
    (rank(), suit()).prop_map(|(rank, suit)| Card { rank, suit })
}

/// Hand of `len` cards; duplicates allowed, as after lossy normalization.
pub fn hand(len: std::ops::Range<usize>) -> impl Strategy<Value = Vec<Card>> {
    prop::collection::vec(card(), len)
}

/// One card in any wire shape the server has been seen to send.
pub fn raw_card() -> impl Strategy<Value = Value> {
    let code = card().prop_map(|c| json!(c.code()));
    let lower = card().prop_map(|c| json!(c.code().to_lowercase()));
    let glyph = card().prop_map(|c| json!(c.to_string()));
    let object = card().prop_map(|c| json!({"rank": c.rank.label(), "suit": c.suit.letter().to_string()}));
    let aliased =
        card().prop_map(|c| json!({"value": c.rank.label(), "symbol": c.suit.glyph().to_string()}));
    let junk = prop_oneof![
        Just(Value::Null),
        Just(json!("")),
        Just(json!(0)),
        "[A-Z0-9]{0,4}".prop_map(Value::String),
        Just(json!({"rank": "??", "suit": "??"})),
    ];
    prop_oneof![code, lower, glyph, object, aliased, junk]
}

/// Roster of `len` entries with unique identities.
pub fn roster(len: std::ops::Range<usize>) -> impl Strategy<Value = Vec<RosterEntry>> {
    prop::collection::btree_set("[a-z]{3,8}", len)
        .prop_map(|ids| ids.into_iter().collect::<Vec<_>>())
        .prop_shuffle()
        .prop_map(|ids| {
            ids.into_iter()
                .map(|id| RosterEntry::new(id.clone(), id.to_uppercase()))
                .collect()
        })
}
