//! Card normalization from loosely-shaped server payloads.
//!
//! The server has no versioned card format. A card may arrive as a compact
//! code ("QS", "10H", "A♠") or as an object with rank/suit-like fields under
//! several names. Normalization never fails: unknown suits become spades,
//! unknown ranks become aces, and missing cards become the ace of spades.

use std::str::FromStr;

use serde_json::Value;
use tracing::debug;

use super::cards_types::{Card, Rank, Suit};
use super::errors::DomainError;

const RANK_FIELDS: [&str; 2] = ["rank", "value"];
const SUIT_FIELDS: [&str; 2] = ["suit", "symbol"];

/// Canonicalize a suit given as a letter code, a word or a glyph.
///
/// Unrecognized input falls back to spades. This is lossy on purpose.
pub fn normalize_suit(raw: &str) -> Suit {
    match strict_suit(raw) {
        Some(suit) => suit,
        None => {
            debug!(raw, "[NORMALIZE] unrecognized suit, falling back to spades");
            Suit::Spades
        }
    }
}

/// Canonicalize a rank label. Unrecognized input falls back to the ace.
pub fn normalize_rank(raw: &str) -> Rank {
    match strict_rank(raw) {
        Some(rank) => rank,
        None => {
            debug!(raw, "[NORMALIZE] unrecognized rank, falling back to ace");
            Rank::Ace
        }
    }
}

fn strict_suit(raw: &str) -> Option<Suit> {
    match raw.trim().to_uppercase().as_str() {
        "S" | "SPADE" | "SPADES" | "\u{2660}" => Some(Suit::Spades),
        "H" | "HEART" | "HEARTS" | "\u{2665}" => Some(Suit::Hearts),
        "D" | "DIAMOND" | "DIAMONDS" | "\u{2666}" => Some(Suit::Diamonds),
        "C" | "CLUB" | "CLUBS" | "\u{2663}" => Some(Suit::Clubs),
        _ => None,
    }
}

fn strict_rank(raw: &str) -> Option<Rank> {
    let rank = match raw.trim().to_uppercase().as_str() {
        "A" | "ACE" => Rank::Ace,
        "2" | "TWO" => Rank::Two,
        "3" | "THREE" => Rank::Three,
        "4" | "FOUR" => Rank::Four,
        "5" | "FIVE" => Rank::Five,
        "6" | "SIX" => Rank::Six,
        "7" | "SEVEN" => Rank::Seven,
        "8" | "EIGHT" => Rank::Eight,
        "9" | "NINE" => Rank::Nine,
        "10" | "T" | "TEN" => Rank::Ten,
        "J" | "JACK" => Rank::Jack,
        "Q" | "QUEEN" => Rank::Queen,
        "K" | "KING" => Rank::King,
        _ => return None,
    };
    Some(rank)
}

/// JavaScript-style truthiness, which is what the server's optional fields
/// are written against.
pub(crate) fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// First truthy value among `fields` of an object.
pub(crate) fn first_truthy<'a>(value: &'a Value, fields: &[&str]) -> Option<&'a Value> {
    fields
        .iter()
        .filter_map(|field| value.get(field))
        .find(|v| is_truthy(v))
}

/// Render a scalar field as text the way the server's clients stringify it.
pub(crate) fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Split a compact code into (rank text, suit char). `None` below two chars.
fn split_code(code: &str) -> Option<(String, char)> {
    let upper = code.trim().to_uppercase();
    if upper.chars().count() < 2 {
        return None;
    }
    let mut chars: Vec<char> = upper.chars().collect();
    let suit = chars.pop()?;
    Some((chars.into_iter().collect(), suit))
}

/// Normalize any card representation into a canonical `Card`.
pub fn normalize_card(raw: &Value) -> Card {
    if !is_truthy(raw) {
        debug!("[NORMALIZE] missing card, substituting default");
        return Card::default();
    }

    if let Value::String(code) = raw {
        return match split_code(code) {
            Some((rank, suit)) => Card {
                rank: normalize_rank(&rank),
                suit: normalize_suit(&suit.to_string()),
            },
            None => Card::default(),
        };
    }

    let rank = first_truthy(raw, &RANK_FIELDS)
        .map(|v| normalize_rank(&scalar_text(v)))
        .unwrap_or(Rank::Ace);
    let suit = first_truthy(raw, &SUIT_FIELDS)
        .map(|v| normalize_suit(&scalar_text(v)))
        .unwrap_or(Suit::Spades);
    Card { rank, suit }
}

/// Normalize a hand. Anything that is not an array yields an empty hand.
pub fn normalize_cards(raw: &Value) -> Vec<Card> {
    match raw {
        Value::Array(items) => items.iter().map(normalize_card).collect(),
        _ => Vec::new(),
    }
}

impl Card {
    /// Compact wire code, e.g. "10H".
    pub fn code(&self) -> String {
        format!("{}{}", self.rank.label(), self.suit.letter())
    }
}

/// Strict parse of a compact code; used for fixtures and CLI input where a
/// typo should be reported instead of silently becoming the ace of spades.
impl FromStr for Card {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (rank, suit) = split_code(s).ok_or_else(|| DomainError::ParseCard(s.to_string()))?;
        let rank = strict_rank(&rank).ok_or_else(|| DomainError::ParseCard(s.to_string()))?;
        let suit =
            strict_suit(&suit.to_string()).ok_or_else(|| DomainError::ParseCard(s.to_string()))?;
        Ok(Card { rank, suit })
    }
}

/// Non-panicking helper to parse card codes (e.g., "AS", "10H") into cards.
pub fn try_parse_cards<I, S>(tokens: I) -> Result<Vec<Card>, DomainError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    tokens
        .into_iter()
        .map(|s| s.as_ref().parse::<Card>())
        .collect()
}
