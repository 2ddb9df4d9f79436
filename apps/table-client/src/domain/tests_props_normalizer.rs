//! Property tests for payload normalization.
//!
//! Properties tested:
//! - Normalizing an already-normalized card (any output shape) is a no-op
//! - Every alias of a suit maps to the same glyph
//! - Normalization never panics on arbitrary JSON scalars

use proptest::prelude::*;
use serde_json::{json, Value};

use crate::domain::roster::normalize_roster;
use crate::domain::{normalize_card, normalize_suit, test_gens, test_prelude, Suit};

fn aliases(suit: Suit) -> [&'static str; 4] {
    match suit {
        Suit::Spades => ["S", "SPADE", "SPADES", "\u{2660}"],
        Suit::Hearts => ["H", "HEART", "HEARTS", "\u{2665}"],
        Suit::Diamonds => ["D", "DIAMOND", "DIAMONDS", "\u{2666}"],
        Suit::Clubs => ["C", "CLUB", "CLUBS", "\u{2663}"],
    }
}

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    /// Property: normalize(serialize(normalize(x))) == normalize(x)
    #[test]
    fn prop_card_normalization_is_idempotent(raw in test_gens::raw_card()) {
        let once = normalize_card(&raw);
        let as_object = serde_json::to_value(once).unwrap();
        prop_assert_eq!(normalize_card(&as_object), once);
        prop_assert_eq!(normalize_card(&json!(once.code())), once);
        prop_assert_eq!(normalize_card(&json!(once.to_string())), once);
    }

    /// Property: recognized cards survive any wire shape unchanged
    #[test]
    fn prop_known_cards_in_every_shape(card in test_gens::card()) {
        let shapes = [
            json!(card.code()),
            json!(card.code().to_lowercase()),
            json!(card.to_string()),
            json!({"rank": card.rank.label(), "suit": card.suit.letter().to_string()}),
            json!({"value": card.rank.label(), "symbol": card.suit.glyph().to_string()}),
        ];
        for shape in shapes {
            prop_assert_eq!(normalize_card(&shape), card);
        }
    }

    /// Property: every alias of a suit, in any case, gives the same glyph
    #[test]
    fn prop_suit_aliases_agree(suit in test_gens::suit(), lower in any::<bool>()) {
        for alias in aliases(suit) {
            let input = if lower { alias.to_lowercase() } else { alias.to_string() };
            prop_assert_eq!(normalize_suit(&input), suit);
            prop_assert_eq!(normalize_suit(&format!("  {input} ")), suit);
        }
    }

    /// Property: arbitrary strings never panic and always yield a card
    #[test]
    fn prop_arbitrary_strings_normalize(s in ".{0,6}") {
        let card = normalize_card(&Value::String(s));
        prop_assert_eq!(normalize_card(&serde_json::to_value(card).unwrap()), card);
    }

    /// Property: synthetic identities are unique within one roster
    #[test]
    fn prop_roster_identities_unique_when_missing(n in 0usize..10) {
        let raw = Value::Array(vec![json!({}); n]);
        let roster = normalize_roster(&raw);
        let ids: std::collections::HashSet<_> = roster.iter().map(|e| e.identity.clone()).collect();
        prop_assert_eq!(ids.len(), n);
    }
}
