use crate::state::StateKey;

/// Whether a single floor satisfies the safety invariant.
///
/// A microchip is exposed if its own generator is elsewhere; the floor is unsafe iff it holds
/// both an exposed microchip and any generator.
pub fn is_valid_floor(key: StateKey, item_count: usize, floor: u8) -> bool {
    let mut generators: usize = 0_usize;
    let mut exposed_microchips: usize = 0_usize;

    for item_index in 0_usize..item_count {
        let generator_on_floor: bool = key.field(2_usize * item_index) == floor;
        let microchip_on_floor: bool = key.field(2_usize * item_index + 1_usize) == floor;

        generators += generator_on_floor as usize;
        exposed_microchips += (microchip_on_floor && !generator_on_floor) as usize;
    }

    generators == 0_usize || exposed_microchips == 0_usize
}

/// Whether a whole configuration is admissible: the elevator floor is in range and holds at
/// least one item (it can never move empty-handed), and every floor satisfies `is_valid_floor`.
///
/// The move generator rechecks only the elevator's source and destination floors, since those
/// are the only floors that change between consecutive states; this full scan is for initial
/// states and tests.
pub fn is_valid_state(key: StateKey, item_count: usize, floor_count: u8) -> bool {
    let elevator_floor: u8 = key.elevator_floor();

    elevator_floor >= 1_u8
        && elevator_floor <= floor_count
        && (0_usize..2_usize * item_count)
            .any(|field_index| key.field(field_index) == elevator_floor)
        && (1_u8..=floor_count).all(|floor| is_valid_floor(key, item_count, floor))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(elevator_floor: u8, item_floors: &[(u8, u8)]) -> StateKey {
        StateKey::encode(elevator_floor, item_floors).unwrap()
    }

    #[test]
    fn test_exposed_microchip_with_foreign_generator_is_unsafe() {
        // Item A's microchip shares floor 2 with item B's generator and A's generator is absent.
        let unsafe_key: StateKey = key(2_u8, &[(1_u8, 2_u8), (2_u8, 3_u8)]);

        assert!(!is_valid_floor(unsafe_key, 2_usize, 2_u8));
        assert!(!is_valid_state(unsafe_key, 2_usize, 4_u8));
    }

    #[test]
    fn test_microchip_with_own_generator_is_safe() {
        // Item A's pair is joined on floor 2; item B's generator is also there.
        let safe_key: StateKey = key(2_u8, &[(2_u8, 2_u8), (2_u8, 1_u8)]);

        assert!(is_valid_floor(safe_key, 2_usize, 2_u8));
        assert!(is_valid_state(safe_key, 2_usize, 4_u8));
    }

    #[test]
    fn test_microchips_alone_are_safe() {
        let safe_key: StateKey = key(1_u8, &[(2_u8, 1_u8), (3_u8, 1_u8)]);

        assert!(is_valid_state(safe_key, 2_usize, 4_u8));
    }

    #[test]
    fn test_elevator_on_empty_floor_is_invalid() {
        // Regardless of how the items sit elsewhere, an empty elevator floor is inadmissible.
        for (empty_floor, item_floors) in [
            (4_u8, vec![(2_u8, 1_u8), (3_u8, 1_u8)]),
            (2_u8, vec![(4_u8, 4_u8), (4_u8, 4_u8)]),
            (3_u8, vec![(1_u8, 1_u8)]),
        ] {
            assert!(!is_valid_state(
                key(empty_floor, &item_floors),
                item_floors.len(),
                4_u8
            ));
        }
    }

    #[test]
    fn test_out_of_range_elevator_is_invalid() {
        assert!(!is_valid_state(key(0_u8, &[(1_u8, 1_u8)]), 1_usize, 4_u8));
        assert!(!is_valid_state(key(5_u8, &[(5_u8, 5_u8)]), 1_usize, 4_u8));
    }
}
