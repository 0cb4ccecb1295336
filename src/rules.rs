use std::fmt;

use enum_map::{EnumMap, enum_map};
use serde::{Deserialize, Serialize};

use crate::team::Team;


#[derive(Clone, PartialEq, Eq, Debug)]
pub enum RulesError {
    ZeroMaxScore,
    EmptyTeamName(Team),
    DuplicateTeamNames,
}

impl std::error::Error for RulesError {}

impl fmt::Display for RulesError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RulesError::ZeroMaxScore => write!(f, "Max score must be positive"),
            RulesError::EmptyTeamName(team) => write!(f, "Team '{}' has an empty name", team.id()),
            RulesError::DuplicateTeamNames => write!(f, "Teams must have different names"),
        }
    }
}

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchRules {
    // A match ends as soon as a team has this many points.
    pub max_score: u32,
    pub team_names: EnumMap<Team, String>,
}

impl MatchRules {
    pub const TRUCO_MAX_SCORE: u32 = 12;

    pub fn truco() -> Self {
        Self {
            max_score: Self::TRUCO_MAX_SCORE,
            team_names: enum_map! {
                Team::Us => "Nós".to_owned(),
                Team::Them => "Eles".to_owned(),
            },
        }
    }

    pub fn team_name(&self, team: Team) -> &str { &self.team_names[team] }

    pub fn verify(&self) -> Result<(), RulesError> {
        if self.max_score == 0 {
            return Err(RulesError::ZeroMaxScore);
        }
        for (team, name) in &self.team_names {
            if name.trim().is_empty() {
                return Err(RulesError::EmptyTeamName(team));
            }
        }
        // Names double as command aliases, so they must be distinguishable.
        if self.team_names[Team::Us].trim().to_lowercase()
            == self.team_names[Team::Them].trim().to_lowercase()
        {
            return Err(RulesError::DuplicateTeamNames);
        }
        Ok(())
    }
}

impl Default for MatchRules {
    fn default() -> Self { Self::truco() }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truco_rules_are_valid() {
        let rules = MatchRules::truco();
        assert_eq!(rules.max_score, 12);
        assert_eq!(rules.team_name(Team::Us), "Nós");
        assert_eq!(rules.team_name(Team::Them), "Eles");
        assert_eq!(rules.verify(), Ok(()));
    }

    #[test]
    fn zero_max_score_rejected() {
        let rules = MatchRules { max_score: 0, ..MatchRules::truco() };
        assert_eq!(rules.verify(), Err(RulesError::ZeroMaxScore));
    }

    #[test]
    fn blank_team_name_rejected() {
        let mut rules = MatchRules::truco();
        rules.team_names[Team::Them] = "  ".to_owned();
        assert_eq!(rules.verify(), Err(RulesError::EmptyTeamName(Team::Them)));
    }

    #[test]
    fn duplicate_team_names_rejected() {
        let mut rules = MatchRules::truco();
        rules.team_names[Team::Us] = "eles".to_owned();
        assert_eq!(rules.verify(), Err(RulesError::DuplicateTeamNames));
    }
}
