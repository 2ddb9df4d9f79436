//! Property tests for the pass selection.
//!
//! Properties tested:
//! - Toggling a key twice restores the previous selection
//! - Selection never exceeds three keys
//! - Submit succeeds iff exactly three are selected and nothing is pending
//! - Reset always yields an empty, unlocked selection

use proptest::prelude::*;

use crate::domain::selection::hand_keys;
use crate::domain::{test_gens, test_prelude, Phase, SelectionManager, PASS_SIZE};

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    /// Property: toggle is an involution while below capacity
    #[test]
    fn prop_toggle_twice_is_identity(
        hand in test_gens::hand(4..14),
        picks in prop::collection::vec(0usize..13, 0..3),
        probe in 0usize..13,
    ) {
        let keys = hand_keys(&hand);
        let mut sel = SelectionManager::new();
        for p in picks {
            let _ = sel.toggle(keys[p % keys.len()], &Phase::Passing);
        }
        let before = sel.selected().to_vec();
        let key = keys[probe % keys.len()];
        let was_member = sel.contains(&key);
        if was_member || sel.len() < PASS_SIZE {
            sel.toggle(key, &Phase::Passing).unwrap();
            sel.toggle(key, &Phase::Passing).unwrap();
            let mut after = sel.selected().to_vec();
            let mut expected = before.clone();
            after.sort();
            expected.sort();
            prop_assert_eq!(after, expected);
        }
    }

    /// Property: size stays <= 3 and submit matches the size rule
    #[test]
    fn prop_size_bounded_and_submit_rule(
        hand in test_gens::hand(4..14),
        ops in prop::collection::vec(0usize..13, 0..20),
    ) {
        let keys = hand_keys(&hand);
        let mut sel = SelectionManager::new();
        for op in ops {
            let _ = sel.toggle(keys[op % keys.len()], &Phase::Passing);
            prop_assert!(sel.len() <= PASS_SIZE);
        }
        let size = sel.len();
        prop_assert_eq!(sel.can_submit(&Phase::Passing), size == PASS_SIZE);
        prop_assert_eq!(sel.submit(&Phase::Passing).is_ok(), size == PASS_SIZE);
        prop_assert!(sel.submit(&Phase::Passing).is_err());
    }

    /// Property: leaving passing always empties the selection
    #[test]
    fn prop_reset_empties(
        hand in test_gens::hand(4..14),
        ops in prop::collection::vec(0usize..13, 0..6),
        submit in any::<bool>(),
    ) {
        let keys = hand_keys(&hand);
        let mut sel = SelectionManager::new();
        for op in ops {
            let _ = sel.toggle(keys[op % keys.len()], &Phase::Passing);
        }
        if submit {
            let _ = sel.submit(&Phase::Passing);
        }
        sel.reset();
        prop_assert!(sel.is_empty());
        prop_assert!(!sel.is_pending());
        prop_assert!(!sel.can_submit(&Phase::Playing));
    }
}
