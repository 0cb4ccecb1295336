// Test utilities that cannot be moved to the "tests" folder, because stress_test uses them.

use enum_map::enum_map;
use rand::{Rng, SeedableRng};

use crate::match_state::{AddPointsOutcome, MatchState};
use crate::rules::MatchRules;
use crate::scores;
use crate::team::Team;


// In theory random tests verify statistical properties that should always hold, but let's fix
// the seed to avoid sporadic failures.
pub fn deterministic_rng() -> impl Rng { rand::rngs::StdRng::from_seed([0; 32]) }

pub fn sample_rules(max_score: u32) -> MatchRules {
    MatchRules {
        max_score,
        team_names: enum_map! {
            Team::Us => "Alice & Bob".to_owned(),
            Team::Them => "Carol & Dave".to_owned(),
        },
    }
}

#[derive(Clone, Copy, Debug)]
pub enum Action {
    AddPoints { team: Team, points: u32 },
    NewMatch,
    ResetAll,
}

// Mostly small point values (as in a real game), with rare resets and occasional overshoots.
pub fn random_action(rng: &mut impl Rng, max_score: u32) -> Action {
    match rng.random_range(0..100) {
        0 => Action::ResetAll,
        1..=9 => Action::NewMatch,
        _ => Action::AddPoints {
            team: if rng.random::<bool>() { Team::Us } else { Team::Them },
            points: if rng.random_bool(0.05) {
                rng.random_range(0..=max_score.saturating_mul(2))
            } else {
                rng.random_range(0..=3)
            },
        },
    }
}

pub fn apply_action(state: &mut MatchState, action: Action) -> Option<AddPointsOutcome> {
    match action {
        Action::AddPoints { team, points } => Some(state.add_points(team, points)),
        Action::NewMatch => {
            state.new_match();
            None
        }
        Action::ResetAll => {
            state.reset_all();
            None
        }
    }
}

// Checks everything that must hold after applying `action` to `before`, producing `after`.
pub fn verify_transition(
    before: &MatchState, action: Action, outcome: Option<AddPointsOutcome>, after: &MatchState,
) -> Result<(), String> {
    let max_score = after.rules().max_score;
    for (team, &score) in after.scores() {
        if score > max_score {
            return Err(format!("{team:?} has {score} points, above {max_score}"));
        }
    }
    let reached = after.scores().iter().filter(|(_, s)| **s >= max_score).count();
    if after.winner().is_some() != (reached > 0) {
        return Err(format!(
            "Winner is {:?}, but {reached} team(s) reached {max_score}",
            after.winner()
        ));
    }
    if let Some(winner) = after.winner() {
        if after.score(winner) < max_score {
            return Err(format!("Winner {winner:?} has only {} points", after.score(winner)));
        }
    }
    match action {
        Action::AddPoints { team, .. } => {
            let just_won = before.winner().is_none() && after.winner().is_some();
            if before.winner().is_some() {
                if outcome != Some(AddPointsOutcome::Ignored) || after.scores() != before.scores() {
                    return Err("Points were added after the match was over".to_owned());
                }
            }
            if after.score(team.opponent()) != before.score(team.opponent()) {
                return Err(format!("Adding points to {team:?} changed the opponent's score"));
            }
            for t in [Team::Us, Team::Them] {
                let expected = before.victories_of(t) + u32::from(just_won && after.winner() == Some(t));
                if after.victories_of(t) != expected {
                    return Err(format!(
                        "{t:?} victories went from {} to {}",
                        before.victories_of(t),
                        after.victories_of(t)
                    ));
                }
            }
            if just_won != matches!(outcome, Some(AddPointsOutcome::Won { .. })) {
                return Err(format!("Outcome {outcome:?} does not match the win transition"));
            }
        }
        Action::NewMatch => {
            if !scores::is_zero(after.scores()) || after.winner().is_some() {
                return Err("New match did not clear the board".to_owned());
            }
            if after.victories() != before.victories() {
                return Err("New match changed victories".to_owned());
            }
        }
        Action::ResetAll => {
            if !scores::is_zero(after.scores())
                || !scores::is_zero(after.victories())
                || after.winner().is_some()
            {
                return Err("Full reset left some state behind".to_owned());
            }
        }
    }
    Ok(())
}
