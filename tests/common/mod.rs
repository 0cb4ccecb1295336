// Improvement potential. Combine integration tests together:
//   https://matklad.github.io/2021/02/27/delete-cargo-integration-tests.html

use enum_map::{EnumMap, enum_map};
use truco_counter::{MatchRules, MatchState, Team};


#[allow(dead_code)]
pub fn truco_state() -> MatchState { MatchState::new(MatchRules::truco()).unwrap() }

#[allow(dead_code)]
pub fn tally(us: u32, them: u32) -> EnumMap<Team, u32> {
    enum_map! {
        Team::Us => us,
        Team::Them => them,
    }
}
