use std::fmt;

use itertools::Itertools;
use strum::IntoEnumIterator;

use crate::rules::MatchRules;
use crate::team::Team;


// Things a user can ask the scoreboard to do. Produced from text input; dispatched by the
// interface, which is responsible for confirming destructive commands.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ScoreboardCommand {
    AddPoints { team: Team, points: u32 },
    NewMatch,
    ResetAll,
    Help,
    Quit,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum CommandError {
    EmptyInput,
    UnknownCommand(String),
    UnknownTeam(String),
    InvalidPoints(String),
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandError::EmptyInput => write!(f, "Nothing to do"),
            CommandError::UnknownCommand(cmd) => write!(f, "Unknown command: '{}'", cmd),
            CommandError::UnknownTeam(team) => write!(f, "Unknown team: '{}'", team),
            CommandError::InvalidPoints(points) => {
                write!(f, "Points must be a non-negative whole number, got '{}'", points)
            }
        }
    }
}

pub const HELP_TEXT: &str = "\
<team> [points]   add points (default 1), e.g. 'us 3' or 'b +1'
/new              start a new match (victories are kept)
/reset            reset scores and victories
/help             show this help
/quit             exit";

// Accepts command id ("us"), seat letter ("a") or display name, case-insensitive.
pub fn parse_team(s: &str, rules: &MatchRules) -> Option<Team> {
    let s = s.trim().to_lowercase();
    Team::iter().find(|&team| {
        s == team.id()
            || s == team.letter().to_string()
            || s == rules.team_name(team).trim().to_lowercase()
    })
}

// Negative and fractional values are rejected rather than clamped.
pub fn parse_points(s: &str) -> Result<u32, CommandError> {
    let digits = s.strip_prefix('+').unwrap_or(s);
    if digits.is_empty() || !digits.chars().all(|ch| ch.is_ascii_digit()) {
        return Err(CommandError::InvalidPoints(s.to_owned()));
    }
    digits.parse().map_err(|_| CommandError::InvalidPoints(s.to_owned()))
}

fn looks_like_number(s: &str) -> bool {
    s.starts_with(|ch: char| ch.is_ascii_digit() || matches!(ch, '+' | '-' | '.'))
}

pub fn parse_command(input: &str, rules: &MatchRules) -> Result<ScoreboardCommand, CommandError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(CommandError::EmptyInput);
    }
    if let Some(cmd) = input.strip_prefix('/') {
        return match cmd.trim().to_lowercase().as_str() {
            "new" => Ok(ScoreboardCommand::NewMatch),
            "reset" => Ok(ScoreboardCommand::ResetAll),
            "help" => Ok(ScoreboardCommand::Help),
            "quit" => Ok(ScoreboardCommand::Quit),
            _ => Err(CommandError::UnknownCommand(cmd.to_owned())),
        };
    }
    // Team names may contain spaces, so the points (if any) are the last word.
    let words = input.split_whitespace().collect_vec();
    let (team_words, points) = match words.split_last() {
        Some((last, rest)) if !rest.is_empty() && looks_like_number(last) => {
            (rest, parse_points(last)?)
        }
        _ => (words.as_slice(), 1),
    };
    let team_str = team_words.iter().join(" ");
    let team = parse_team(&team_str, rules).ok_or(CommandError::UnknownTeam(team_str))?;
    Ok(ScoreboardCommand::AddPoints { team, points })
}
