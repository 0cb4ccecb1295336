use enum_map::EnumMap;

use crate::team::Team;


// Points in the current match. Each value is within `0..=max_score`.
pub type Scores = EnumMap<Team, u32>;

// Matches won since the session started or since the last full reset.
pub type Victories = EnumMap<Team, u32>;

pub fn total(tally: &EnumMap<Team, u32>) -> u32 { tally.values().sum() }

pub fn is_zero(tally: &EnumMap<Team, u32>) -> bool { tally.values().all(|&v| v == 0) }
