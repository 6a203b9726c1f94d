use {
    crate::{safety::is_valid_floor, state::StateKey},
    strum::{EnumIter, IntoEnumIterator},
};

/// One elevator trip moves exactly one floor.
#[derive(Clone, Copy, Debug, EnumIter, Eq, PartialEq)]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    /// The floor one step in this direction, if it stays within `[1, floor_count]`.
    pub fn target_floor(self, floor: u8, floor_count: u8) -> Option<u8> {
        match self {
            Self::Up => (floor < floor_count).then(|| floor + 1_u8),
            Self::Down => (floor > 1_u8).then(|| floor - 1_u8),
        }
    }
}

/// A legal successor configuration, one elevator trip (step cost +1) away. The direction flag
/// lets the search driver apply its directional queue preference.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Successor {
    pub key: StateKey,
    pub direction: Direction,
}

/// Appends every legal successor of `key` to `successors`, normalized.
///
/// Enumeration order per direction is 2-item combinations before 1-item ones, since moving two
/// items per trip is never worse and usually strictly better. Two prunes narrow the fan-out:
///
/// * The elevator never descends below the lowest occupied floor; the puzzle is solved by
///   raising items, so such a trip can never be part of an optimal solution.
/// * Downward trips carry exactly one item. This is an optimization specific to this puzzle's
///   uniform cost structure, not a rule of the puzzle: a fully general mover (e.g. with
///   non-uniform move costs) would need 2-item downward trips for correctness, but this
///   puzzle's optimal solutions never require them.
///
/// Each candidate is validated on the elevator's source and destination floors only, the two
/// floors that change between consecutive states.
pub fn push_successors(
    key: StateKey,
    item_count: usize,
    floor_count: u8,
    successors: &mut Vec<Successor>,
) {
    let elevator_floor: u8 = key.elevator_floor();
    let field_count: usize = 2_usize * item_count;
    let liftable: Vec<usize> = (0_usize..field_count)
        .filter(|&field_index| key.field(field_index) == elevator_floor)
        .collect();
    let lowest_occupied_floor: u8 = (0_usize..field_count)
        .map(|field_index| key.field(field_index))
        .min()
        .unwrap_or(elevator_floor);

    let mut try_candidate = |target_floor: u8, moved: &[usize], direction: Direction| {
        let mut candidate: StateKey = key.with_elevator_floor(target_floor);

        for &field_index in moved {
            candidate = candidate.with_field(field_index, target_floor);
        }

        if is_valid_floor(candidate, item_count, elevator_floor)
            && is_valid_floor(candidate, item_count, target_floor)
        {
            successors.push(Successor {
                key: candidate.normalize(item_count),
                direction,
            });
        }
    };

    for direction in Direction::iter() {
        let Some(target_floor) = direction.target_floor(elevator_floor, floor_count) else {
            continue;
        };

        if direction == Direction::Down && target_floor < lowest_occupied_floor {
            continue;
        }

        if direction == Direction::Up {
            for (position, &field_a) in liftable.iter().enumerate() {
                for &field_b in &liftable[position + 1_usize..] {
                    try_candidate(target_floor, &[field_a, field_b], direction);
                }
            }
        }

        for &field_index in &liftable {
            try_candidate(target_floor, &[field_index], direction);
        }
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::safety::is_valid_state,
    };

    fn successors_of(key: StateKey, item_count: usize) -> Vec<Successor> {
        let mut successors: Vec<Successor> = Vec::new();

        push_successors(key, item_count, 4_u8, &mut successors);

        successors
    }

    #[test]
    fn test_successors_are_valid() {
        // The example arrangement plus a few mid-solve configurations.
        let keys: &[(StateKey, usize)] = &[
            (
                StateKey::encode(1_u8, &[(2_u8, 1_u8), (3_u8, 1_u8)]).unwrap(),
                2_usize,
            ),
            (
                StateKey::encode(2_u8, &[(2_u8, 2_u8), (3_u8, 1_u8)]).unwrap(),
                2_usize,
            ),
            (
                StateKey::encode(3_u8, &[(3_u8, 3_u8), (3_u8, 1_u8)]).unwrap(),
                2_usize,
            ),
            (
                StateKey::encode(4_u8, &[(4_u8, 4_u8), (4_u8, 3_u8)]).unwrap(),
                2_usize,
            ),
        ];

        for &(key, item_count) in keys {
            let successors: Vec<Successor> = successors_of(key, item_count);

            assert!(!successors.is_empty());

            for successor in successors {
                assert!(
                    is_valid_state(successor.key, item_count, 4_u8),
                    "invalid successor of:\n{}got:\n{}",
                    key.diagram(item_count, 4_u8),
                    successor.key.diagram(item_count, 4_u8),
                );
            }
        }
    }

    #[test]
    fn test_first_example_move_is_generated() {
        // Taking the exposed microchip up to its generator is the example's opening move.
        let start: StateKey = StateKey::encode(1_u8, &[(2_u8, 1_u8), (3_u8, 1_u8)]).unwrap();
        let after: StateKey = StateKey::encode(2_u8, &[(2_u8, 2_u8), (3_u8, 1_u8)])
            .unwrap()
            .normalize(2_usize);

        assert!(successors_of(start, 2_usize)
            .into_iter()
            .any(|successor| successor.key == after && successor.direction == Direction::Up));
    }

    #[test]
    fn test_no_descent_below_lowest_occupied_floor() {
        // Everything sits on floor 2 or above; moving down to floor 1 is pruned.
        let key: StateKey = StateKey::encode(2_u8, &[(2_u8, 2_u8), (3_u8, 3_u8)]).unwrap();

        assert!(successors_of(key, 2_usize)
            .into_iter()
            .all(|successor| successor.direction == Direction::Up));
    }

    #[test]
    fn test_downward_trips_carry_one_item() {
        fn floor_histogram(key: StateKey, item_count: usize) -> [usize; 5_usize] {
            (0_usize..2_usize * item_count).fold(
                [0_usize; 5_usize],
                |mut histogram, field_index| {
                    histogram[key.field(field_index) as usize] += 1_usize;

                    histogram
                },
            )
        }

        let key: StateKey = StateKey::encode(2_u8, &[(2_u8, 2_u8), (1_u8, 1_u8)]).unwrap();
        let down_successors: Vec<Successor> = successors_of(key, 2_usize)
            .into_iter()
            .filter(|successor| successor.direction == Direction::Down)
            .collect();

        assert!(!down_successors.is_empty());

        for successor in down_successors {
            let mut expected: [usize; 5_usize] = floor_histogram(key, 2_usize);

            // Exactly one item field moves from the source floor to the target floor.
            expected[2_usize] -= 1_usize;
            expected[1_usize] += 1_usize;

            assert_eq!(floor_histogram(successor.key, 2_usize), expected);
        }
    }

    #[test]
    fn test_elevator_bounds_respected() {
        assert_eq!(Direction::Up.target_floor(4_u8, 4_u8), None);
        assert_eq!(Direction::Down.target_floor(1_u8, 4_u8), None);
        assert_eq!(Direction::Up.target_floor(3_u8, 4_u8), Some(4_u8));
        assert_eq!(Direction::Down.target_floor(3_u8, 4_u8), Some(2_u8));
    }
}
