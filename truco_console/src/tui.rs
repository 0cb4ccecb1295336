// Rendering is a pure function of `MatchState`: the caller owns the state and decides when to
// repaint.

use console::{Alignment, Style, pad_str};
use itertools::Itertools;

use crate::truco_prelude::*;


const PANEL_INNER_WIDTH: usize = 22;
const PROGRESS_WIDTH: usize = 12;
const PANEL_GAP: &str = "    ";

fn team_style(team: Team) -> Style {
    match team {
        Team::Us => Style::new().cyan(),
        Team::Them => Style::new().red(),
    }
}

// Truncates text that does not fit, so long team names cannot break the panel borders.
fn center(s: &str, width: usize) -> String {
    pad_str(s, width, Alignment::Center, Some("…")).into_owned()
}

fn render_progress(score: u32, max_score: u32) -> String {
    let filled = (u64::from(score) * PROGRESS_WIDTH as u64 / u64::from(max_score.max(1))) as usize;
    let filled = filled.min(PROGRESS_WIDTH);
    format!("{}{}", "●".repeat(filled), "○".repeat(PROGRESS_WIDTH - filled))
}

fn boxed(lines: Vec<String>, border: &Style) -> Vec<String> {
    let horizontal = "─".repeat(PANEL_INNER_WIDTH);
    let mut ret = vec![border.apply_to(format!("┌{horizontal}┐")).to_string()];
    for line in lines {
        ret.push(format!(
            "{}{}{}",
            border.apply_to("│"),
            center(&line, PANEL_INNER_WIDTH),
            border.apply_to("│")
        ));
    }
    ret.push(border.apply_to(format!("└{horizontal}┘")).to_string());
    ret
}

fn render_team_panel(state: &MatchState, team: Team) -> Vec<String> {
    let style = team_style(team);
    let score = state.score(team);
    let status_line = match state.status() {
        MatchStatus::InProgress => format!("{} to win", state.points_to_win(team)),
        MatchStatus::Won(winner) if winner == team => "WINNER".to_owned(),
        MatchStatus::Won(_) => String::new(),
    };
    let border = match state.status() {
        MatchStatus::Won(winner) if winner == team => style.clone().bold(),
        MatchStatus::Won(_) => Style::new().dim(),
        MatchStatus::InProgress => style.clone(),
    };
    boxed(
        vec![
            style.clone().bold().apply_to(state.rules().team_name(team)).to_string(),
            format!("[{}] {}", team.letter(), team.id()),
            String::new(),
            Style::new().bold().apply_to(score).to_string(),
            style.apply_to(render_progress(score, state.rules().max_score)).to_string(),
            status_line,
        ],
        &border,
    )
}

pub fn render_victories(state: &MatchState) -> String {
    let rules = state.rules();
    format!(
        "Victories:  {} {}  x  {} {}",
        team_style(Team::Us).apply_to(rules.team_name(Team::Us)),
        Style::new().bold().apply_to(state.victories_of(Team::Us)),
        Style::new().bold().apply_to(state.victories_of(Team::Them)),
        team_style(Team::Them).apply_to(rules.team_name(Team::Them)),
    )
}

pub fn render_team_panels(state: &MatchState) -> String {
    let us = render_team_panel(state, Team::Us);
    let them = render_team_panel(state, Team::Them);
    us.iter().zip(them.iter()).map(|(l1, l2)| format!("{l1}{PANEL_GAP}{l2}")).join("\n")
}

pub fn render_winner_banner(state: &MatchState) -> Option<String> {
    let winner = state.winner()?;
    let name = state.rules().team_name(winner);
    Some(format!(
        "{} won the match!  Type {} to play again.",
        team_style(winner).bold().apply_to(name),
        Style::new().bold().apply_to("/new"),
    ))
}

pub fn render_scoreboard(state: &MatchState) -> String {
    let width = (PANEL_INNER_WIDTH + 2) * 2 + PANEL_GAP.len();
    let mut sections = vec![
        center(&Style::new().bold().apply_to("Truco Counter").to_string(), width),
        center(&Style::new().dim().apply_to("Keep track of your match points").to_string(), width),
        String::new(),
        center(&render_victories(state), width),
        String::new(),
        render_team_panels(state),
        String::new(),
    ];
    if let Some(banner) = render_winner_banner(state) {
        sections.push(center(&banner, width));
        sections.push(String::new());
    }
    sections.join("\n")
}
