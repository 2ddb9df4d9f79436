//! Domain layer: normalized table data and the pure state machines.

pub mod cards_parsing;
pub mod cards_serde;
pub mod cards_types;
pub mod errors;
pub mod phase;
pub mod roster;
pub mod seats;
pub mod selection;
pub mod snapshot;

#[cfg(test)]
mod test_gens;
#[cfg(test)]
mod test_prelude;
#[cfg(test)]
mod tests_props_normalizer;
#[cfg(test)]
mod tests_props_seats;
#[cfg(test)]
mod tests_props_selection;

// Re-exports for ergonomics
pub use cards_parsing::{normalize_card, normalize_cards, normalize_rank, normalize_suit};
pub use cards_types::{Card, Rank, Suit};
pub use errors::DomainError;
pub use phase::{Phase, PhaseController, PhaseTransition};
pub use roster::{normalize_roster, HandInfo, RosterEntry};
pub use seats::{assign_seats, Seat, SeatAnchor, FULL_HAND, SEAT_COUNT};
pub use selection::{hand_keys, CardKey, SelectionError, SelectionManager, ToggleOutcome, PASS_SIZE};
pub use snapshot::{normalize_snapshot, Snapshot};
