use std::fmt;
use std::io;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::event::{self as term_event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::style::{self, Stylize};
use crossterm::{cursor, execute, terminal};
use log::{debug, error, info};
use scopeguard::defer;

use crate::config::ScoreboardConfig;
use crate::truco_prelude::*;
use crate::tui;


enum IncomingEvent {
    Terminal(term_event::Event),
    Tick,
}

#[derive(Clone, PartialEq, Eq, Debug)]
enum Message {
    Info(String),
    Error(String),
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Reaction {
    Continue,
    Exit,
}

// Owns the only `MatchState` of the session. Text commands and key presses are turned into
// `MatchState` calls here; full reset additionally requires a y/n confirmation.
struct Scoreboard {
    state: MatchState,
    keyboard_input: String,
    message: Option<Message>,
    confirming_reset: bool,
}

impl Scoreboard {
    fn new(rules: MatchRules) -> Result<Self, RulesError> {
        Ok(Scoreboard {
            state: MatchState::new(rules)?,
            keyboard_input: String::new(),
            message: None,
            confirming_reset: false,
        })
    }

    fn on_key(&mut self, key: KeyEvent) -> Reaction {
        if key.kind != KeyEventKind::Press {
            return Reaction::Continue;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Reaction::Exit;
        }
        if self.confirming_reset {
            self.on_confirmation_key(key.code);
            return Reaction::Continue;
        }
        match key.code {
            KeyCode::Char(ch) => {
                if !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
                    self.keyboard_input.push(ch);
                }
            }
            KeyCode::Backspace => {
                self.keyboard_input.pop();
            }
            KeyCode::Esc => {
                self.keyboard_input.clear();
                self.message = None;
            }
            KeyCode::Enter => {
                let input = std::mem::take(&mut self.keyboard_input);
                match parse_command(&input, self.state.rules()) {
                    Ok(command) => return self.execute(command),
                    Err(CommandError::EmptyInput) => {}
                    Err(err) => {
                        self.message = Some(Message::Error(err.to_string()));
                        // Let the user fix a typo instead of retyping everything.
                        self.keyboard_input = input;
                    }
                }
            }
            _ => {}
        }
        Reaction::Continue
    }

    fn on_confirmation_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('y' | 'Y') => {
                self.confirming_reset = false;
                self.state.reset_all();
                self.message = Some(Message::Info("Scoreboard reset.".to_owned()));
            }
            KeyCode::Char('n' | 'N') | KeyCode::Esc => {
                self.confirming_reset = false;
                self.message = None;
                info!("Reset cancelled");
            }
            _ => {}
        }
    }

    fn execute(&mut self, command: ScoreboardCommand) -> Reaction {
        debug!("Executing {:?}", command);
        self.message = None;
        match command {
            ScoreboardCommand::AddPoints { team, points } => {
                if self.state.add_points(team, points) == AddPointsOutcome::Ignored {
                    self.message = Some(Message::Info(
                        "The match is over. Type /new to start another one.".to_owned(),
                    ));
                }
            }
            ScoreboardCommand::NewMatch => self.state.new_match(),
            ScoreboardCommand::ResetAll => self.confirming_reset = true,
            ScoreboardCommand::Help => self.message = Some(Message::Info(HELP_TEXT.to_owned())),
            ScoreboardCommand::Quit => return Reaction::Exit,
        }
        Reaction::Continue
    }
}

fn writeln_raw(stdout: &mut io::Stdout, v: impl fmt::Display) -> io::Result<()> {
    let s = v.to_string();
    // Note. Not using `lines()` because it removes trailing new line.
    for line in s.split('\n') {
        execute!(stdout, style::Print(line), cursor::MoveToNextLine(1), cursor::Hide)?;
    }
    Ok(())
}

fn render(stdout: &mut io::Stdout, app_start_time: Instant, scoreboard: &Scoreboard) -> io::Result<()> {
    let now = Instant::now();
    execute!(stdout, cursor::MoveTo(0, 0), terminal::Clear(terminal::ClearType::All))?;
    writeln_raw(stdout, tui::render_scoreboard(&scoreboard.state))?;

    if scoreboard.confirming_reset {
        let prompt = "Reset the current match AND all victories? (y/n)";
        writeln_raw(stdout, prompt.with(style::Color::Yellow).bold())?;
    } else {
        // Simulate cursor: real cursor blinking is broken with Show/Hide.
        let show_cursor = now.duration_since(app_start_time).as_millis() % 1000 >= 500;
        let cursor = if show_cursor { '▂' } else { ' ' };
        let input_style =
            if scoreboard.state.is_active() { style::Color::White } else { style::Color::DarkGrey };
        writeln_raw(
            stdout,
            format!("> {}{}", scoreboard.keyboard_input, cursor).with(input_style),
        )?;
    }
    writeln_raw(stdout, "")?;

    match &scoreboard.message {
        Some(Message::Error(err)) => writeln_raw(stdout, err.clone().with(style::Color::Red))?,
        Some(Message::Info(msg)) => writeln_raw(stdout, msg.clone().with(style::Color::Grey))?,
        None => writeln_raw(stdout, "Type /help for the list of commands.".with(style::Color::DarkGrey))?,
    }
    Ok(())
}

pub fn run(config: ScoreboardConfig) -> io::Result<()> {
    info!(
        "Starting scoreboard: {} vs {}, playing to {}",
        config.rules.team_name(Team::Us),
        config.rules.team_name(Team::Them),
        config.rules.max_score
    );
    let mut scoreboard = Scoreboard::new(config.rules).map_err(io::Error::other)?;

    let mut stdout = io::stdout();
    terminal::enable_raw_mode()?;
    execute!(stdout, terminal::EnterAlternateScreen, cursor::Hide)?;
    defer! {
        _ = execute!(io::stdout(), terminal::LeaveAlternateScreen, cursor::Show);
        _ = terminal::disable_raw_mode();
    };
    let app_start_time = Instant::now();

    let (tx, rx) = mpsc::channel();
    let tx_local = tx.clone();
    let tx_tick = tx;
    thread::spawn(move || {
        loop {
            match term_event::read() {
                Ok(ev) => {
                    if tx_local.send(IncomingEvent::Terminal(ev)).is_err() {
                        return;
                    }
                }
                Err(err) => {
                    error!("Cannot read terminal event: {err}");
                    return;
                }
            }
        }
    });
    thread::spawn(move || {
        loop {
            thread::sleep(Duration::from_millis(100));
            if tx_tick.send(IncomingEvent::Tick).is_err() {
                return;
            }
        }
    });

    render(&mut stdout, app_start_time, &scoreboard)?;
    for event in rx {
        match event {
            IncomingEvent::Terminal(term_event::Event::Key(key)) => {
                if scoreboard.on_key(key) == Reaction::Exit {
                    info!("Exiting scoreboard");
                    return Ok(());
                }
            }
            IncomingEvent::Terminal(_) => {}
            IncomingEvent::Tick => {
                // Any event triggers repaint, so no additional action is required.
            }
        }
        render(&mut stdout, app_start_time, &scoreboard)?;
    }
    Err(io::Error::new(io::ErrorKind::UnexpectedEof, "Terminal event stream ended"))
}


#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn press(code: KeyCode) -> KeyEvent { KeyEvent::new(code, KeyModifiers::NONE) }

    fn type_line(scoreboard: &mut Scoreboard, line: &str) -> Reaction {
        for ch in line.chars() {
            scoreboard.on_key(press(KeyCode::Char(ch)));
        }
        scoreboard.on_key(press(KeyCode::Enter))
    }

    #[test]
    fn typed_points_reach_state() {
        let mut scoreboard = Scoreboard::new(MatchRules::truco()).unwrap();
        type_line(&mut scoreboard, "us 3");
        type_line(&mut scoreboard, "b");
        assert_eq!(scoreboard.state.score(Team::Us), 3);
        assert_eq!(scoreboard.state.score(Team::Them), 1);
        assert_eq!(scoreboard.keyboard_input, "");
        assert_eq!(scoreboard.message, None);
    }

    #[test]
    fn invalid_input_is_kept_for_editing() {
        let mut scoreboard = Scoreboard::new(MatchRules::truco()).unwrap();
        type_line(&mut scoreboard, "us -2");
        assert_eq!(scoreboard.state.score(Team::Us), 0);
        assert_eq!(scoreboard.keyboard_input, "us -2");
        assert!(matches!(scoreboard.message, Some(Message::Error(_))));
    }

    #[test]
    fn reset_requires_confirmation() {
        let mut scoreboard = Scoreboard::new(MatchRules::truco()).unwrap();
        type_line(&mut scoreboard, "us 12");
        assert_eq!(scoreboard.state.victories_of(Team::Us), 1);

        type_line(&mut scoreboard, "/reset");
        assert!(scoreboard.confirming_reset);
        assert_eq!(scoreboard.state.victories_of(Team::Us), 1);
        scoreboard.on_key(press(KeyCode::Char('n')));
        assert!(!scoreboard.confirming_reset);
        assert_eq!(scoreboard.state.victories_of(Team::Us), 1);

        type_line(&mut scoreboard, "/reset");
        scoreboard.on_key(press(KeyCode::Char('x')));
        assert!(scoreboard.confirming_reset);
        scoreboard.on_key(press(KeyCode::Char('y')));
        assert!(!scoreboard.confirming_reset);
        assert_eq!(scoreboard.state.victories_of(Team::Us), 0);
        assert_eq!(scoreboard.state.winner(), None);
    }

    #[test]
    fn points_after_win_show_hint() {
        let mut scoreboard = Scoreboard::new(MatchRules::truco()).unwrap();
        type_line(&mut scoreboard, "them 12");
        type_line(&mut scoreboard, "us 1");
        assert_eq!(scoreboard.state.score(Team::Us), 0);
        assert!(matches!(scoreboard.message, Some(Message::Info(_))));
        type_line(&mut scoreboard, "/new");
        assert!(scoreboard.state.is_active());
        assert_eq!(scoreboard.state.victories_of(Team::Them), 1);
    }

    #[test]
    fn control_and_alt_chords_are_not_typed() {
        let mut scoreboard = Scoreboard::new(MatchRules::truco()).unwrap();
        scoreboard.on_key(KeyEvent::new(KeyCode::Char('d'), KeyModifiers::CONTROL));
        scoreboard.on_key(KeyEvent::new(KeyCode::Char('b'), KeyModifiers::ALT));
        scoreboard.on_key(KeyEvent::new(KeyCode::Char('A'), KeyModifiers::SHIFT));
        assert_eq!(scoreboard.keyboard_input, "A");
    }

    #[test]
    fn invalid_rules_rejected() {
        let rules = MatchRules { max_score: 0, ..MatchRules::truco() };
        assert!(Scoreboard::new(rules).is_err());
    }

    #[test]
    fn quit_and_ctrl_c_exit() {
        let mut scoreboard = Scoreboard::new(MatchRules::truco()).unwrap();
        assert_eq!(type_line(&mut scoreboard, "/quit"), Reaction::Exit);
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(scoreboard.on_key(ctrl_c), Reaction::Exit);
    }
}
