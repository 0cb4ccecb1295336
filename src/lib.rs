#![forbid(unsafe_code)]
#![cfg_attr(feature = "strict", deny(warnings))]

pub mod command;
pub mod match_state;
pub mod rules;
pub mod scores;
pub mod team;
pub mod test_util;

pub use command::{CommandError, ScoreboardCommand, parse_command};
pub use match_state::{AddPointsOutcome, MatchState, MatchStatus};
pub use rules::{MatchRules, RulesError};
pub use scores::{Scores, Victories};
pub use team::Team;
