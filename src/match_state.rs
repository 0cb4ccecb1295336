use log::{debug, info};
use strum::IntoEnumIterator;

use crate::rules::{MatchRules, RulesError};
use crate::scores::{Scores, Victories};
use crate::team::Team;


#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum MatchStatus {
    InProgress,
    Won(Team),
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum AddPointsOutcome {
    // The match is already over. Nothing changed.
    Ignored,
    Scored { score: u32 },
    // This call has ended the match.
    Won { team: Team, score: u32 },
}

// Scoreboard for a sequence of matches between two teams.
//
// Invariants:
//   - `scores[team] <= rules.max_score` for every team;
//   - `winner.is_some()` iff some team has reached `rules.max_score` in the current match;
//   - victories change only when `winner` goes from `None` to `Some`, or on full reset.
#[derive(Clone, Debug)]
pub struct MatchState {
    rules: MatchRules,
    scores: Scores,
    victories: Victories,
    winner: Option<Team>,
}

impl MatchState {
    // The invariants above only hold for verified rules: with zero `max_score` a fresh match
    // would already be won.
    pub fn new(rules: MatchRules) -> Result<Self, RulesError> {
        rules.verify()?;
        Ok(MatchState {
            rules,
            scores: Scores::default(),
            victories: Victories::default(),
            winner: None,
        })
    }

    pub fn rules(&self) -> &MatchRules { &self.rules }
    pub fn scores(&self) -> &Scores { &self.scores }
    pub fn score(&self, team: Team) -> u32 { self.scores[team] }
    pub fn victories(&self) -> &Victories { &self.victories }
    pub fn victories_of(&self, team: Team) -> u32 { self.victories[team] }
    pub fn winner(&self) -> Option<Team> { self.winner }
    pub fn is_active(&self) -> bool { self.winner.is_none() }

    pub fn status(&self) -> MatchStatus {
        match self.winner {
            Some(team) => MatchStatus::Won(team),
            None => MatchStatus::InProgress,
        }
    }

    pub fn points_to_win(&self, team: Team) -> u32 { self.rules.max_score - self.scores[team] }

    pub fn add_points(&mut self, team: Team, points: u32) -> AddPointsOutcome {
        if self.winner.is_some() {
            debug!("Ignoring {} point(s) for {:?}: match is over", points, team);
            return AddPointsOutcome::Ignored;
        }
        let score = &mut self.scores[team];
        *score = score.saturating_add(points).min(self.rules.max_score);
        let score = *score;
        debug!("{:?} scored {} point(s), now at {}", team, points, score);
        match self.detect_winner() {
            Some(winner) => AddPointsOutcome::Won { team: winner, score },
            None => AddPointsOutcome::Scored { score },
        }
    }

    pub fn new_match(&mut self) {
        self.scores = Scores::default();
        self.winner = None;
        info!(
            "New match started, victories: {} x {}",
            self.victories[Team::Us],
            self.victories[Team::Them]
        );
    }

    pub fn reset_all(&mut self) {
        self.scores = Scores::default();
        self.victories = Victories::default();
        self.winner = None;
        info!("Scoreboard reset");
    }

    // Runs after every score change. Teams are checked in declaration order, so even if both
    // teams were at the threshold only one victory would be credited.
    fn detect_winner(&mut self) -> Option<Team> {
        if self.winner.is_some() {
            return None;
        }
        let team = Team::iter().find(|&team| self.scores[team] >= self.rules.max_score)?;
        self.winner = Some(team);
        self.victories[team] += 1;
        info!(
            "{:?} won the match {} x {}, victories: {}",
            team,
            self.scores[team],
            self.scores[team.opponent()],
            self.victories[team]
        );
        Some(team)
    }
}
