use {
    crate::{error::Error, state::StateKey},
    nom::{
        branch::alt,
        bytes::complete::tag,
        character::complete::{alpha1, line_ending},
        combinator::{map, opt},
        multi::many1_count,
        sequence::{delimited, tuple},
        IResult,
    },
};

/// The extra pairs that start on the lowest floor in the alternate-start variant.
pub const EXTRA_ELEMENTS: [&str; 2_usize] = ["elerium", "dilithium"];

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ItemKind {
    Generator,
    Microchip,
}

/// One normalized `(floor, kind, element)` triple, the contract consumed from the parser.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ItemRecord {
    pub floor: u8,
    pub kind: ItemKind,
    pub element: String,
}

/// A generator/microchip pair sharing one element identity, with its initial floors.
///
/// Floors are never mutated in place after construction; exploration produces new `StateKey`
/// values instead.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Item {
    pub element: String,
    pub generator_floor: u8,
    pub microchip_floor: u8,
}

/// One puzzle instance: the owned item list, the floor range, and the elevator's start floor.
///
/// Everything a search needs is owned here; no state survives between instances, since
/// different instances have different item counts and thus different key layouts.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Arrangement {
    items: Vec<Item>,
    floor_count: u8,
    elevator_floor: u8,
}

impl Arrangement {
    pub const DEFAULT_FLOOR_COUNT: u8 = 4_u8;
    pub const START_FLOOR: u8 = 1_u8;

    /// Cross-indexes generator and microchip records by element name.
    ///
    /// Fails with `Error::Configuration` if an element is listed twice for one kind, lacks one
    /// of the two kinds, or sits on a floor outside `1..=floor_count`.
    pub fn from_records(records: &[ItemRecord], floor_count: u8) -> Result<Self, Error> {
        let mut partial_items: Vec<(String, Option<u8>, Option<u8>)> = Vec::new();

        for record in records {
            if record.floor < 1_u8 || record.floor > floor_count {
                return Err(Error::Configuration(format!(
                    "floor {} for '{}' is outside 1..={floor_count}",
                    record.floor, record.element
                )));
            }

            let partial_item: &mut (String, Option<u8>, Option<u8>) = match partial_items
                .iter()
                .position(|(element, ..)| *element == record.element)
            {
                Some(item_index) => &mut partial_items[item_index],
                None => {
                    partial_items.push((record.element.clone(), None, None));

                    partial_items.last_mut().unwrap()
                }
            };
            let floor: &mut Option<u8> = match record.kind {
                ItemKind::Generator => &mut partial_item.1,
                ItemKind::Microchip => &mut partial_item.2,
            };

            if floor.is_some() {
                return Err(Error::Configuration(format!(
                    "{:?} for '{}' listed twice",
                    record.kind, record.element
                )));
            }

            *floor = Some(record.floor);
        }

        let items: Vec<Item> = partial_items
            .into_iter()
            .map(
                |(element, generator_floor, microchip_floor)| match (generator_floor, microchip_floor)
                {
                    (Some(generator_floor), Some(microchip_floor)) => Ok(Item {
                        element,
                        generator_floor,
                        microchip_floor,
                    }),
                    (None, _) => Err(Error::Configuration(format!(
                        "generator for '{element}' not found"
                    ))),
                    (_, None) => Err(Error::Configuration(format!(
                        "microchip for '{element}' not found"
                    ))),
                },
            )
            .collect::<Result<_, _>>()?;

        Ok(Self {
            items,
            floor_count,
            elevator_floor: Self::START_FLOOR,
        })
    }

    /// Repositions the elevator's start floor (floor 1 by default).
    pub fn with_start_floor(mut self, elevator_floor: u8) -> Result<Self, Error> {
        if elevator_floor < 1_u8 || elevator_floor > self.floor_count {
            Err(Error::Configuration(format!(
                "elevator start floor {elevator_floor} is outside 1..={}",
                self.floor_count
            )))
        } else {
            self.elevator_floor = elevator_floor;

            Ok(self)
        }
    }

    /// The alternate-start variant: the fixed extra pairs appended on the lowest floor.
    ///
    /// Fails with `Error::Configuration` if an extra element is already present (element names
    /// are unique, as `from_records` enforces) and with `Error::Capacity` if the appended pairs
    /// overflow the item budget.
    pub fn with_extra_pairs(&self) -> Result<Self, Error> {
        if let Some(element) = EXTRA_ELEMENTS
            .iter()
            .find(|element| self.items.iter().any(|item| item.element == **element))
        {
            return Err(Error::Configuration(format!(
                "'{element}' is already present in the arrangement"
            )));
        }

        let mut arrangement: Self = self.clone();

        arrangement
            .items
            .extend(EXTRA_ELEMENTS.iter().map(|element| Item {
                element: (*element).to_owned(),
                generator_floor: Self::START_FLOOR,
                microchip_floor: Self::START_FLOOR,
            }));

        if arrangement.items.len() > StateKey::MAX_ITEMS {
            Err(Error::Capacity(format!(
                "{} items exceed the {}-item budget",
                arrangement.items.len(),
                StateKey::MAX_ITEMS
            )))
        } else {
            Ok(arrangement)
        }
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn floor_count(&self) -> u8 {
        self.floor_count
    }

    pub fn top_floor(&self) -> u8 {
        self.floor_count
    }

    pub fn elevator_floor(&self) -> u8 {
        self.elevator_floor
    }

    /// Initial `(generator floor, microchip floor)` pairs in item order, codec-ready.
    pub fn floor_pairs(&self) -> Vec<(u8, u8)> {
        self.items
            .iter()
            .map(|item| (item.generator_floor, item.microchip_floor))
            .collect()
    }
}

fn parse_element_wrapper<'i, T, F: Fn(&'i str) -> T>(
    tag_str: &'static str,
    f: F,
) -> impl FnMut(&'i str) -> IResult<&'i str, T> {
    map(delimited(tag("a "), alpha1, tag(tag_str)), f)
}

enum FloorElement<'s> {
    Generator(&'s str),
    Microchip(&'s str),
}

impl<'s> FloorElement<'s> {
    fn parse(input: &'s str) -> IResult<&'s str, Self> {
        alt((
            parse_element_wrapper(" generator", Self::Generator),
            parse_element_wrapper("-compatible microchip", Self::Microchip),
        ))(input)
    }
}

/// Parses the four-floor arrangement text, e.g.
/// `The first floor contains a hydrogen generator and a lithium-compatible microchip.`, into
/// normalized records.
pub fn parse_records(input: &str) -> IResult<&str, Vec<ItemRecord>> {
    const FLOOR_TAGS: [&str; 4_usize] = ["first", "second", "third", "fourth"];

    let mut input: &str = input;
    let mut records: Vec<ItemRecord> = Vec::new();

    for (floor_index, floor_tag) in FLOOR_TAGS.into_iter().enumerate() {
        let floor: u8 = floor_index as u8 + 1_u8;

        input = tuple((
            tag("The "),
            tag(floor_tag),
            tag(" floor contains "),
            alt((
                map(tag("nothing relevant"), |_| {}),
                map(
                    many1_count(map(
                        tuple((
                            opt(tag(",")),
                            opt(tag(" ")),
                            opt(tag("and ")),
                            FloorElement::parse,
                        )),
                        |(.., floor_element)| {
                            let (kind, element): (ItemKind, &str) = match floor_element {
                                FloorElement::Generator(element) => (ItemKind::Generator, element),
                                FloorElement::Microchip(element) => (ItemKind::Microchip, element),
                            };

                            records.push(ItemRecord {
                                floor,
                                kind,
                                element: element.to_owned(),
                            });
                        },
                    )),
                    |_| {},
                ),
            )),
            tag("."),
            opt(line_ending),
        ))(input)?
        .0;
    }

    Ok((input, records))
}

impl TryFrom<&str> for Arrangement {
    type Error = Error;

    fn try_from(input: &str) -> Result<Self, Self::Error> {
        // Run the grammar first, then cross-index, so that pairing violations come back as
        // configuration errors rather than parse errors.
        let (_, records) = parse_records(input).map_err(|error| Error::Parse(error.to_string()))?;

        Self::from_records(&records, Self::DEFAULT_FLOOR_COUNT)
    }
}
