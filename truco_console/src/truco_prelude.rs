// What to put in prelude? The scoreboard concepts: teams, rules, match state and commands.
// Test helpers remain behind `truco_counter::test_util`.

pub use truco_counter::command::*;
pub use truco_counter::match_state::*;
pub use truco_counter::rules::*;
pub use truco_counter::scores::*;
pub use truco_counter::team::*;
