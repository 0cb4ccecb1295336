// Applies random actions to `MatchState` and verifies invariants after each one. Unlike the
// integration test, uses a fresh random seed on every run and keeps going until interrupted
// (or until `matches` matches have been played).

use std::cell::RefCell;
use std::time::Instant;
use std::{io, panic};

use log::info;
use rand::Rng;
use truco_counter::test_util::*;

use crate::truco_prelude::*;


const ACTIONS_PER_BATCH: usize = 100_000;
const MAX_SCORE_RANGE: std::ops::RangeInclusive<u32> = 1..=40;

pub struct StressTestConfig {
    pub matches: Option<u64>,
}

#[derive(Default)]
struct TestState {
    state: Option<MatchState>,
    last_action: Option<Action>,
}

thread_local! {
    static TEST_STATE: RefCell<TestState> = RefCell::new(TestState::default());
}

fn random_rules(rng: &mut impl Rng) -> MatchRules {
    sample_rules(rng.random_range(MAX_SCORE_RANGE))
}

pub fn run(config: StressTestConfig) -> io::Result<()> {
    let std_panic_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        TEST_STATE.with(|cell| {
            if let Some(ref last_action) = cell.borrow().last_action {
                println!("Last action: {last_action:?}");
            }
            if let Some(ref state) = cell.borrow().state {
                println!("MatchState before action:\n{state:#?}");
            }
        });
        std_panic_hook(panic_info);
    }));

    let rng = &mut rand::rng();
    let mut total_matches = 0;
    loop {
        let t0 = Instant::now();
        let mut state = MatchState::new(random_rules(rng)).map_err(io::Error::other)?;
        let max_score = state.rules().max_score;
        let mut finished_matches = 0;
        for _ in 0..ACTIONS_PER_BATCH {
            let action = random_action(rng, max_score);
            let before = state.clone();
            TEST_STATE.with(|cell| {
                let test_state = &mut cell.borrow_mut();
                test_state.state = Some(before.clone());
                test_state.last_action = Some(action);
            });
            let outcome = apply_action(&mut state, action);
            if let Err(err) = verify_transition(&before, action, outcome, &state) {
                panic!("Invariant violated: {err}");
            }
            if matches!(outcome, Some(AddPointsOutcome::Won { .. })) {
                finished_matches += 1;
            }
        }
        total_matches += finished_matches;
        let elapsed = t0.elapsed();
        let message = format!(
            "Ran: {} actions to {} points ({} matches finished, {} victories on the board) in {:.2}s",
            ACTIONS_PER_BATCH,
            max_score,
            finished_matches,
            total(state.victories()),
            elapsed.as_secs_f64(),
        );
        info!("{message}");
        println!("{message}");
        if config.matches.is_some_and(|limit| total_matches >= limit) {
            return Ok(());
        }
    }
}
