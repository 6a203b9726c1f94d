use {
    crate::{
        error::Error,
        item::Arrangement,
        moves::{push_successors, Direction, Successor},
        safety::is_valid_state,
        state::StateKey,
    },
    std::collections::{hash_map::Entry, HashMap, HashSet, VecDeque},
};

/// Bookkeeping for one discovered state: how it was first (or most cheaply) reached.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct Visit {
    parent: StateKey,
    steps: u32,
}

/// Branch-and-bound breadth-first exploration over the state graph of one arrangement.
///
/// A planner is constructed fresh per search call and owns all of its containers; nothing is
/// shared between invocations. Upward-reached states are drained before downward-reached ones,
/// matching the move generator's directional bias, and any path whose step count already
/// matches the best known full-path length is cut off.
pub struct Planner {
    item_count: usize,
    floor_count: u8,
    start: StateKey,
    goal: StateKey,
    up_queue: VecDeque<StateKey>,
    down_queue: VecDeque<StateKey>,
    expanded: HashSet<StateKey>,
    record: HashMap<StateKey, Visit>,
    successors: Vec<Successor>,
    minimum_moves: Option<u32>,
    expansion_budget: Option<usize>,
}

impl Planner {
    /// Encodes and validates the start configuration and derives the goal key.
    ///
    /// The start state is the only state admitted without passing through the move generator,
    /// so it is validated here, once; an unsafe initial arrangement is an `Error::Configuration`.
    pub fn new(arrangement: &Arrangement) -> Result<Self, Error> {
        let item_count: usize = arrangement.item_count();
        let floor_count: u8 = arrangement.floor_count();
        let start: StateKey =
            StateKey::encode(arrangement.elevator_floor(), &arrangement.floor_pairs())?
                .normalize(item_count);

        if !is_valid_state(start, item_count, floor_count) {
            return Err(Error::Configuration(
                "initial arrangement violates the safety invariant".to_owned(),
            ));
        }

        Ok(Self {
            item_count,
            floor_count,
            start,
            goal: StateKey::goal(item_count, arrangement.top_floor())?,
            up_queue: VecDeque::new(),
            down_queue: VecDeque::new(),
            expanded: HashSet::new(),
            record: HashMap::new(),
            successors: Vec::new(),
            minimum_moves: None,
            expansion_budget: None,
        })
    }

    /// Caps the number of state expansions, as a safety valve for arbitrarily large inputs.
    /// Spending the budget without completing the search reports `Error::NoSolution`; the
    /// search is deterministic, so retrying would reproduce the identical failure.
    pub fn with_expansion_budget(mut self, expansion_budget: usize) -> Self {
        self.expansion_budget = Some(expansion_budget);

        self
    }

    /// The minimum number of elevator trips from the start configuration to the goal
    /// configuration, or `Error::NoSolution` if the goal is structurally unreachable.
    pub fn minimum_moves(&mut self) -> Result<u32, Error> {
        self.reset();

        if self.start == self.goal {
            self.minimum_moves = Some(0_u32);

            return Ok(0_u32);
        }

        let mut expansions: usize = 0_usize;

        while let Some(key) = self.pop_frontier() {
            // A queued entry may have been superseded by a cheaper rediscovery; the record
            // always holds the cheapest known visit.
            let steps: u32 = self.record[&key].steps;

            if !self.expanded.insert(key) {
                continue;
            }

            expansions += 1_usize;

            if self
                .expansion_budget
                .map_or(false, |expansion_budget| expansions > expansion_budget)
            {
                // An answer found but not yet proven minimal is discarded along with the rest
                // of the incomplete search, so `path` reports nothing afterwards.
                self.minimum_moves = None;

                return Err(Error::NoSolution);
            }

            self.successors.clear();
            push_successors(
                key,
                self.item_count,
                self.floor_count,
                &mut self.successors,
            );

            for successor_index in 0_usize..self.successors.len() {
                let Successor {
                    key: successor_key,
                    direction,
                } = self.successors[successor_index];
                let successor_steps: u32 = steps + 1_u32;

                // Branch-and-bound cutoff: this path can never beat an answer already found.
                if self
                    .minimum_moves
                    .map_or(false, |minimum_moves| successor_steps >= minimum_moves)
                {
                    continue;
                }

                let improved: bool = match self.record.entry(successor_key) {
                    Entry::Vacant(entry) => {
                        entry.insert(Visit {
                            parent: key,
                            steps: successor_steps,
                        });

                        true
                    }
                    Entry::Occupied(mut entry) => {
                        if successor_steps < entry.get().steps {
                            entry.insert(Visit {
                                parent: key,
                                steps: successor_steps,
                            });

                            true
                        } else {
                            false
                        }
                    }
                };

                if !improved {
                    continue;
                }

                if successor_key == self.goal {
                    self.minimum_moves = Some(successor_steps);
                } else {
                    // A strictly shorter rediscovery reopens an already-expanded state.
                    self.expanded.remove(&successor_key);

                    match direction {
                        Direction::Up => self.up_queue.push_back(successor_key),
                        Direction::Down => self.down_queue.push_back(successor_key),
                    }
                }
            }
        }

        self.minimum_moves.ok_or(Error::NoSolution)
    }

    /// The move sequence behind the last successful `minimum_moves` call, start state first,
    /// reconstructed from the parent pointers in the search record.
    pub fn path(&self) -> Option<Vec<StateKey>> {
        self.minimum_moves?;

        let mut path: VecDeque<StateKey> = VecDeque::new();
        let mut key: StateKey = self.goal;

        while key != self.start {
            path.push_front(key);
            key = self.record.get(&key)?.parent;
        }

        path.push_front(self.start);

        Some(path.into())
    }

    pub fn start(&self) -> StateKey {
        self.start
    }

    pub fn goal(&self) -> StateKey {
        self.goal
    }

    fn reset(&mut self) {
        self.up_queue.clear();
        self.down_queue.clear();
        self.expanded.clear();
        self.record.clear();
        self.minimum_moves = None;

        self.record.insert(
            self.start,
            Visit {
                parent: self.start,
                steps: 0_u32,
            },
        );
        self.up_queue.push_back(self.start);
    }

    fn pop_frontier(&mut self) -> Option<StateKey> {
        self.up_queue
            .pop_front()
            .or_else(|| self.down_queue.pop_front())
    }
}

/// The whole subsystem as the pure function it is: `(items, floor count) -> minimum moves`.
pub fn minimum_moves(arrangement: &Arrangement) -> Result<u32, Error> {
    Planner::new(arrangement)?.minimum_moves()
}
