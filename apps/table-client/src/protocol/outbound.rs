use serde::{Deserialize, Serialize};

use crate::domain::{Card, PASS_SIZE};

/// Actions sent to the server, serialized as `{ "event", "payload" }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "payload", rename_all = "camelCase")]
pub enum OutboundAction {
    /// Register the local display name.
    StartGame { name: String },
    PassCards { cards: [Card; PASS_SIZE] },
    PlayCard { card: Card },
}

impl OutboundAction {
    pub fn event_name(&self) -> &'static str {
        match self {
            OutboundAction::StartGame { .. } => "startGame",
            OutboundAction::PassCards { .. } => "passCards",
            OutboundAction::PlayCard { .. } => "playCard",
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::domain::{Rank, Suit};

    #[test]
    fn wire_shape() {
        let action = OutboundAction::PassCards {
            cards: [
                Card::new(Rank::Ten, Suit::Hearts),
                Card::new(Rank::Queen, Suit::Spades),
                Card::new(Rank::Ace, Suit::Spades),
            ],
        };
        assert_eq!(
            serde_json::to_value(&action).unwrap(),
            json!({
                "event": "passCards",
                "payload": {"cards": [
                    {"rank": "10", "suit": "♥"},
                    {"rank": "Q", "suit": "♠"},
                    {"rank": "A", "suit": "♠"}
                ]}
            })
        );
        assert_eq!(action.event_name(), "passCards");
    }

    #[test]
    fn start_game_carries_name() {
        let action = OutboundAction::StartGame { name: "Ann".into() };
        assert_eq!(
            serde_json::to_value(&action).unwrap(),
            json!({"event": "startGame", "payload": {"name": "Ann"}})
        );
    }
}
