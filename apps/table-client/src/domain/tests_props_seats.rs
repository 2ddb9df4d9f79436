//! Property tests for seat topology.
//!
//! Properties tested:
//! - Local identity always lands on seat 0
//! - Other seats are a cyclic rotation preserving relative order
//! - Anchors follow bottom, left, top, right regardless of roster

use proptest::prelude::*;

use crate::domain::seats::rotate_left;
use crate::domain::{assign_seats, test_gens, test_prelude, SeatAnchor, SEAT_COUNT};

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    /// Property: egocentric rotation for any local position k
    #[test]
    fn prop_local_player_is_seat_zero(
        (roster, k) in test_gens::roster(4..5).prop_flat_map(|r| (Just(r), 0usize..SEAT_COUNT)),
    ) {
        let local = roster[k].identity.clone();
        let seats = assign_seats(&roster, Some(&local)).unwrap();

        prop_assert_eq!(&seats[0].identity, &local);
        for (offset, seat) in seats.iter().enumerate() {
            prop_assert_eq!(&seat.identity, &roster[(k + offset) % SEAT_COUNT].identity);
            prop_assert_eq!(seat.index, offset);
            prop_assert_eq!(seat.anchor, SeatAnchor::CYCLE[offset]);
        }
    }

    /// Property: missing local identity degrades to the first four in order
    #[test]
    fn prop_missing_local_uses_prefix(roster in test_gens::roster(4..9)) {
        let seats = assign_seats(&roster, Some("NOT-A-LOWERCASE-ID")).unwrap();
        for (i, seat) in seats.iter().enumerate() {
            prop_assert_eq!(&seat.identity, &roster[i].identity);
        }
    }

    /// Property: rotation is a permutation
    #[test]
    fn prop_rotate_left_is_permutation(items in prop::collection::vec(any::<u8>(), 0..12), k in 0usize..20) {
        let rotated = rotate_left(&items, k);
        prop_assert_eq!(rotated.len(), items.len());
        let mut a = rotated.clone();
        let mut b = items.clone();
        a.sort();
        b.sort();
        prop_assert_eq!(a, b);
    }

    /// Property: rosters below four never produce seats
    #[test]
    fn prop_small_roster_never_seats(roster in test_gens::roster(0..4)) {
        let local = roster.first().map(|e| e.identity.clone());
        prop_assert!(assign_seats(&roster, local.as_deref()).is_err());
    }
}
