use {
    crate::error::Error,
    bitvec::prelude::*,
    static_assertions::const_assert,
    std::{
        fmt::{Display, Formatter, Result as FmtResult},
        ops::Range,
    },
};

/// A complete configuration packed into one machine word: the elevator floor plus, for every
/// item, its generator floor and its microchip floor, 4 bits per field.
///
/// Layout from the least-significant nibble: `[elevator][gen 0][chip 0][gen 1][chip 1]...`.
/// All packing logic lives here; move and search code only ever goes through the accessor
/// methods.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct StateKey(u64);

// One elevator nibble plus two nibbles per item must fit the word.
const_assert!((2_usize * StateKey::MAX_ITEMS + 1_usize) * StateKey::FIELD_BITS <= u64::BITS as usize);
const_assert!(StateKey::MAX_ITEMS == 7_usize);

impl StateKey {
    const FIELD_BITS: usize = 4_usize;

    /// Widest floor value a 4-bit field can hold.
    pub const MAX_FLOOR: u8 = (1_u8 << Self::FIELD_BITS) - 1_u8;

    /// Item capacity of one key: `(word bits / field bits - 1) / 2`.
    pub const MAX_ITEMS: usize = (u64::BITS as usize / Self::FIELD_BITS - 1_usize) / 2_usize;

    const ELEVATOR: Range<usize> = 0_usize..Self::FIELD_BITS;

    /// Bit range of an item field. Index `2 * item` is the item's generator, `2 * item + 1` its
    /// microchip.
    fn field_bits(field_index: usize) -> Range<usize> {
        let start: usize = (field_index + 1_usize) * Self::FIELD_BITS;

        start..start + Self::FIELD_BITS
    }

    fn bits(&self) -> &BitSlice<u64, Lsb0> {
        self.0.view_bits()
    }

    pub fn elevator_floor(self) -> u8 {
        self.bits()[Self::ELEVATOR].load()
    }

    pub fn field(self, field_index: usize) -> u8 {
        self.bits()[Self::field_bits(field_index)].load()
    }

    pub fn with_elevator_floor(mut self, floor: u8) -> Self {
        self.0.view_bits_mut::<Lsb0>()[Self::ELEVATOR].store(floor);

        self
    }

    pub fn with_field(mut self, field_index: usize, floor: u8) -> Self {
        self.0.view_bits_mut::<Lsb0>()[Self::field_bits(field_index)].store(floor);

        self
    }

    /// Packs an elevator floor and per-item `(generator floor, microchip floor)` pairs.
    ///
    /// Fails with `Error::Capacity` if the item count exceeds the word-width budget or any floor
    /// value exceeds the field width.
    pub fn encode(elevator_floor: u8, item_floors: &[(u8, u8)]) -> Result<Self, Error> {
        if item_floors.len() > Self::MAX_ITEMS {
            return Err(Error::Capacity(format!(
                "{} items exceed the {}-item budget",
                item_floors.len(),
                Self::MAX_ITEMS
            )));
        }

        let validate_floor = |floor: u8| -> Result<u8, Error> {
            if floor > Self::MAX_FLOOR {
                Err(Error::Capacity(format!(
                    "floor {floor} exceeds the field-width maximum {}",
                    Self::MAX_FLOOR
                )))
            } else {
                Ok(floor)
            }
        };

        let mut key: Self = Self::default().with_elevator_floor(validate_floor(elevator_floor)?);

        for (item_index, (generator_floor, microchip_floor)) in
            item_floors.iter().copied().enumerate()
        {
            key = key
                .with_field(2_usize * item_index, validate_floor(generator_floor)?)
                .with_field(2_usize * item_index + 1_usize, validate_floor(microchip_floor)?);
        }

        Ok(key)
    }

    /// Pure inverse of `encode`.
    pub fn decode(self, item_count: usize) -> (u8, Vec<(u8, u8)>) {
        (
            self.elevator_floor(),
            (0_usize..item_count)
                .map(|item_index| {
                    (
                        self.field(2_usize * item_index),
                        self.field(2_usize * item_index + 1_usize),
                    )
                })
                .collect(),
        )
    }

    /// The key with every field equal to the top floor. Derived from the item count, never
    /// parsed from input.
    pub fn goal(item_count: usize, top_floor: u8) -> Result<Self, Error> {
        Self::encode(top_floor, &vec![(top_floor, top_floor); item_count])
    }

    /// Canonical form under item relabeling: the `(generator, microchip)` pairs sorted.
    ///
    /// Item pairs are interchangeable, so two configurations that differ only by which element
    /// occupies which floors reach the goal in the same number of moves. Collapsing them to one
    /// key keeps the frontier small.
    pub fn normalize(self, item_count: usize) -> Self {
        let (elevator_floor, mut item_floors): (u8, Vec<(u8, u8)>) = self.decode(item_count);

        item_floors.sort_unstable();

        // `item_floors` entries are already validated nibbles.
        Self::encode(elevator_floor, &item_floors).unwrap_or(self)
    }

    pub fn diagram(self, item_count: usize, floor_count: u8) -> Diagram {
        Diagram {
            key: self,
            item_count,
            floor_count,
        }
    }
}

/// Human-readable rendering of a key, top floor first, one column per item field:
///
/// ```text
/// F4 .  .  .  .  .
/// F3 .  .  .  BG .
/// F2 .  AG .  .  .
/// F1 E  .  AM .  BM
/// ```
pub struct Diagram {
    key: StateKey,
    item_count: usize,
    floor_count: u8,
}

impl Display for Diagram {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let elevator_floor: u8 = self.key.elevator_floor();

        for floor in (1_u8..=self.floor_count).rev() {
            write!(
                f,
                "F{} {} ",
                floor,
                if elevator_floor == floor { 'E' } else { '.' }
            )?;

            for item_index in 0_usize..self.item_count {
                let item_char: char = (item_index as u8 + b'A') as char;
                let floor_has_generator: bool = self.key.field(2_usize * item_index) == floor;
                let floor_has_microchip: bool =
                    self.key.field(2_usize * item_index + 1_usize) == floor;

                write!(
                    f,
                    " {}{} {}{}",
                    if floor_has_generator { item_char } else { '.' },
                    if floor_has_generator { 'G' } else { ' ' },
                    if floor_has_microchip { item_char } else { '.' },
                    if floor_has_microchip { 'M' } else { ' ' },
                )?;
            }

            writeln!(f)?;
        }

        Ok(())
    }
}
