use enum_map::Enum;
use serde::{Deserialize, Serialize};
use strum::EnumIter;


// Declaration order matters: win detection checks teams in `Team::iter()` order.
#[derive(
    Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Enum, EnumIter, Serialize, Deserialize,
)]
pub enum Team {
    Us,
    Them,
}

impl Team {
    pub fn opponent(self) -> Self {
        match self {
            Team::Us => Team::Them,
            Team::Them => Team::Us,
        }
    }

    // Identifier used in commands. Independent of the display name.
    pub fn id(self) -> &'static str {
        match self {
            Team::Us => "us",
            Team::Them => "them",
        }
    }

    // Seat letter: the first team is "a", the second is "b".
    pub fn letter(self) -> char {
        match self {
            Team::Us => 'a',
            Team::Them => 'b',
        }
    }
}
