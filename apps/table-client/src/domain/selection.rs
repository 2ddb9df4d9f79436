//! Card selection for the three-card pass.

use std::fmt;

use thiserror::Error;
use tracing::debug;

use super::cards_types::{Card, Rank, Suit};
use super::phase::Phase;

/// Cards passed per exchange.
pub const PASS_SIZE: usize = 3;

/// Stable per-card key within one logical hand.
///
/// Rank and suit alone cannot tell apart duplicate-valued cards (the
/// normalizer's fallbacks can produce them), so the hand position is part of
/// the key.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct CardKey {
    pub position: usize,
    pub rank: Rank,
    pub suit: Suit,
}

impl CardKey {
    pub fn new(card: Card, position: usize) -> Self {
        Self {
            position,
            rank: card.rank,
            suit: card.suit,
        }
    }

    pub fn card(&self) -> Card {
        Card::new(self.rank, self.suit)
    }

    /// Key still names the card at its position in `hand`.
    pub fn matches(&self, hand: &[Card]) -> bool {
        hand.get(self.position) == Some(&self.card())
    }
}

impl fmt::Display for CardKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.card(), self.position)
    }
}

/// Keys for every card of a hand, in hand order.
pub fn hand_keys(hand: &[Card]) -> Vec<CardKey> {
    hand.iter()
        .enumerate()
        .map(|(position, card)| CardKey::new(*card, position))
        .collect()
}

/// Why a selection operation was ignored. Never shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("selection only allowed while passing (phase is {0})")]
    WrongPhase(String),
    #[error("a pass submission is already pending")]
    Pending,
    #[error("pass needs exactly 3 cards, have {0}")]
    WrongCount(usize),
    #[error("card {0} is not in the current hand")]
    UnknownCard(CardKey),
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ToggleOutcome {
    Selected,
    Deselected,
    /// Set already full; insertion silently dropped.
    Full,
}

#[derive(Debug, Default)]
pub struct SelectionManager {
    selected: Vec<CardKey>,
    /// Keys of the pass in flight, restored if the send fails.
    submitted: Vec<CardKey>,
    pending: bool,
}

impl SelectionManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> &[CardKey] {
        &self.selected
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn contains(&self, key: &CardKey) -> bool {
        self.selected.contains(key)
    }

    fn check_open(&self, phase: &Phase) -> Result<(), SelectionError> {
        if *phase != Phase::Passing {
            return Err(SelectionError::WrongPhase(phase.to_string()));
        }
        if self.pending {
            return Err(SelectionError::Pending);
        }
        Ok(())
    }

    /// Flip membership of `key`. `phase` must be the latest known phase.
    pub fn toggle(&mut self, key: CardKey, phase: &Phase) -> Result<ToggleOutcome, SelectionError> {
        self.check_open(phase)?;
        if let Some(at) = self.selected.iter().position(|k| *k == key) {
            self.selected.remove(at);
            return Ok(ToggleOutcome::Deselected);
        }
        if self.selected.len() >= PASS_SIZE {
            debug!(key = %key, "[SELECTION] full, ignoring");
            return Ok(ToggleOutcome::Full);
        }
        self.selected.push(key);
        Ok(ToggleOutcome::Selected)
    }

    pub fn can_submit(&self, phase: &Phase) -> bool {
        self.check_open(phase).is_ok() && self.selected.len() == PASS_SIZE
    }

    /// Accept the pass: returns the cards in hand order, empties the
    /// selection and marks the submission pending. Toggling stays disabled
    /// until `reset`.
    pub fn submit(&mut self, phase: &Phase) -> Result<[Card; PASS_SIZE], SelectionError> {
        self.check_open(phase)?;
        if self.selected.len() != PASS_SIZE {
            return Err(SelectionError::WrongCount(self.selected.len()));
        }
        let mut keys = std::mem::take(&mut self.selected);
        keys.sort_by_key(|k| k.position);
        let cards = [keys[0].card(), keys[1].card(), keys[2].card()];
        self.submitted = keys;
        self.pending = true;
        Ok(cards)
    }

    /// Re-open the selection after the submitted pass could not be sent.
    pub fn abort_submit(&mut self) {
        if self.pending {
            self.selected = std::mem::take(&mut self.submitted);
            self.pending = false;
        }
    }

    /// Drop keys that no longer name the card at their position.
    pub fn retain_matching(&mut self, hand: &[Card]) {
        let before = self.selected.len();
        self.selected.retain(|k| k.matches(hand));
        if self.selected.len() != before {
            debug!(
                dropped = before - self.selected.len(),
                "[SELECTION] pruned stale keys after hand change"
            );
        }
    }

    /// Clear selection and pending flag unconditionally.
    pub fn reset(&mut self) {
        self.selected.clear();
        self.submitted.clear();
        self.pending = false;
    }
}
