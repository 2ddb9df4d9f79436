//! Seat topology: projects the server's player order onto the fixed local
//! seat layout with the local participant at seat 0 (bottom).

use serde::Serialize;
use tracing::{debug, warn};

use super::cards_types::Card;
use super::errors::DomainError;
use super::roster::RosterEntry;

/// Seats at a table.
pub const SEAT_COUNT: usize = 4;

/// Hand size assumed for opponents when the server gives no count.
pub const FULL_HAND: usize = 13;

/// Screen anchor of a seat, in clockwise order starting at the local seat.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SeatAnchor {
    Bottom,
    Left,
    Top,
    Right,
}

impl SeatAnchor {
    pub const CYCLE: [SeatAnchor; SEAT_COUNT] = [
        SeatAnchor::Bottom,
        SeatAnchor::Left,
        SeatAnchor::Top,
        SeatAnchor::Right,
    ];

    pub fn for_seat(seat_index: usize) -> Self {
        Self::CYCLE[seat_index % SEAT_COUNT]
    }
}

/// A fixed local screen position and whoever currently sits there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Seat {
    /// 0 = local/bottom, 1..3 clockwise.
    pub index: usize,
    pub identity: String,
    pub display_name: String,
    /// Replaced wholesale on every snapshot.
    pub hand: Vec<Card>,
    pub anchor: SeatAnchor,
}

impl Seat {
    fn from_entry(index: usize, entry: &RosterEntry) -> Self {
        Self {
            index,
            identity: entry.identity.clone(),
            display_name: entry.display_name.clone(),
            hand: Vec::new(),
            anchor: SeatAnchor::for_seat(index),
        }
    }

    /// Seat 0 shows real card faces; every other seat shows backs.
    pub fn is_local_seat(&self) -> bool {
        self.index == 0
    }

    /// Name plate text; the local player is marked.
    pub fn label(&self, local_identity: Option<&str>) -> String {
        if local_identity == Some(self.identity.as_str()) {
            format!("{} (You)", self.display_name)
        } else {
            self.display_name.clone()
        }
    }

    pub fn reset(&mut self) {
        self.hand.clear();
    }
}

/// Rotate `items` left by `k` so `items[k]` comes first.
pub fn rotate_left<T: Clone>(items: &[T], k: usize) -> Vec<T> {
    if items.is_empty() {
        return Vec::new();
    }
    let k = k % items.len();
    items[k..].iter().chain(items[..k].iter()).cloned().collect()
}

/// Egocentric rotation of the roster. When the local identity is missing
/// (reconnect race) the roster order is kept as given.
pub fn rotate_roster(roster: &[RosterEntry], local_identity: Option<&str>) -> Vec<RosterEntry> {
    let position =
        local_identity.and_then(|id| roster.iter().position(|entry| entry.identity == id));
    match position {
        Some(k) => rotate_left(roster, k),
        None => {
            warn!(
                local_identity = local_identity.unwrap_or("<none>"),
                roster_len = roster.len(),
                "[SEATS] local identity not in roster, using server order"
            );
            roster.to_vec()
        }
    }
}

/// Assign the four seats from a roster of at least four players.
pub fn assign_seats(
    roster: &[RosterEntry],
    local_identity: Option<&str>,
) -> Result<[Seat; SEAT_COUNT], DomainError> {
    if roster.len() < SEAT_COUNT {
        return Err(DomainError::RosterIncomplete {
            need: SEAT_COUNT,
            have: roster.len(),
        });
    }
    let rotated = rotate_roster(roster, local_identity);
    let seats = std::array::from_fn(|i| Seat::from_entry(i, &rotated[i]));
    debug!(
        seats = ?rotated.iter().take(SEAT_COUNT).map(|e| e.identity.as_str()).collect::<Vec<_>>(),
        "[SEATS] assigned"
    );
    Ok(seats)
}

/// Replace every seat's hand from one snapshot.
///
/// Seat 0 receives the authoritative local hand. Opponents receive
/// face-down placeholders: as many as the roster says, or `full_hand` when
/// the roster has no count for them.
pub fn apply_hands(
    seats: &mut [Seat; SEAT_COUNT],
    local_hand: &[Card],
    roster: &[RosterEntry],
    full_hand: usize,
) {
    for seat in seats.iter_mut() {
        seat.reset();
        if seat.is_local_seat() {
            seat.hand.extend_from_slice(local_hand);
            continue;
        }
        let count = roster
            .iter()
            .find(|entry| entry.identity == seat.identity)
            .map(|entry| entry.hand.card_count(full_hand))
            .unwrap_or(full_hand);
        seat.hand.resize(count, Card::default());
    }
}
