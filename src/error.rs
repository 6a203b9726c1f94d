use std::{
    error::Error as StdError,
    fmt::{Display, Formatter, Result as FmtResult},
};

/// Fatal failure taxonomy for the planner.
///
/// Every variant is raised once, at the point of detection, and aborts the computation. The
/// planner is a deterministic function of its input, so nothing here is worth retrying.
#[derive(Debug, Eq, PartialEq)]
pub enum Error {
    /// Generator/microchip counts are mismatched, an element lacks its pair, or an element was
    /// listed twice. Detected before any search begins.
    Configuration(String),

    /// The arrangement text did not match the expected grammar.
    Parse(String),

    /// The arrangement exceeds what the packed state key can represent: too many items for the
    /// word width, or a floor value wider than its field. Detected before any search begins.
    Capacity(String),

    /// The frontier was exhausted (or the expansion budget spent) without reaching the goal
    /// state. A well-formed arrangement always has a solution, so this indicates malformed
    /// input rather than an "answer unknown" outcome.
    NoSolution,
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Configuration(message) => write!(f, "invalid arrangement: {message}"),
            Self::Parse(message) => write!(f, "failed to parse arrangement: {message}"),
            Self::Capacity(message) => write!(f, "state key capacity exceeded: {message}"),
            Self::NoSolution => write!(f, "no sequence of moves reaches the goal state"),
        }
    }
}

impl StdError for Error {}
