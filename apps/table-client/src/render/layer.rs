//! The card surface and its generation.
//!
//! Every clear starts a new generation and cancels the previous
//! generation's token. Animation tasks hold a child of that token and a
//! `CardRef` stamped with the generation, so a stale task can neither pass
//! its cancellation check nor resolve its target card.

use tokio_util::sync::CancellationToken;
use tracing::trace;

use super::{RenderBackend, RenderableCard};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct CardRef {
    pub generation: u64,
    pub slot: usize,
}

pub struct CardLayer {
    generation: u64,
    token: CancellationToken,
    /// Retired slots stay as `None` so later refs keep their index.
    cards: Vec<Option<Box<dyn RenderableCard>>>,
}

impl Default for CardLayer {
    fn default() -> Self {
        Self::new()
    }
}

impl CardLayer {
    pub fn new() -> Self {
        Self {
            generation: 0,
            token: CancellationToken::new(),
            cards: Vec::new(),
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Token cancelled when this generation is cleared.
    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    /// Cards still on the surface.
    pub fn len(&self) -> usize {
        self.cards.iter().filter(|c| c.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn push(&mut self, card: Box<dyn RenderableCard>) -> CardRef {
        self.cards.push(Some(card));
        CardRef {
            generation: self.generation,
            slot: self.cards.len() - 1,
        }
    }

    /// Resolve a reference; `None` once its generation has been cleared.
    pub fn get_mut(&mut self, card: CardRef) -> Option<&mut Box<dyn RenderableCard>> {
        if card.generation != self.generation {
            return None;
        }
        self.cards.get_mut(card.slot)?.as_mut()
    }

    /// Take one card off the surface. False when the ref is stale or the
    /// card is already gone.
    pub fn retire(&mut self, card: CardRef) -> bool {
        if card.generation != self.generation {
            return false;
        }
        match self.cards.get_mut(card.slot).and_then(Option::take) {
            Some(mut retired) => {
                retired.remove();
                true
            }
            None => false,
        }
    }

    /// Cancel everything targeting this surface and empty it.
    pub fn clear(&mut self, backend: &mut dyn RenderBackend) {
        self.token.cancel();
        self.token = CancellationToken::new();
        self.generation += 1;
        self.cards.clear();
        backend.clear_cards();
        trace!(generation = self.generation, "[LAYER] cleared");
    }
}
