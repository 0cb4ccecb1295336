// Legend for various fix-this comments:
//   * "TODO" - bug or missing crucial feature.
//   * "Improvement potential" - missing nice-to-have feature or an opportunity
//       to make code better or faster.

#![forbid(unsafe_code)]
#![cfg_attr(feature = "strict", deny(warnings))]

mod config;
mod scoreboard_main;
mod stress_test;
mod truco_prelude;
mod tui;

use std::fs::File;

use anyhow::Context;
use clap::{Command, arg};
use config::ConfigOverrides;


// The scoreboard owns the terminal, so logs either go to a file or are limited to warnings.
// `RUST_LOG` overrides the default in both cases.
fn default_log_level(to_file: bool) -> log::LevelFilter {
    if to_file { log::LevelFilter::Info } else { log::LevelFilter::Warn }
}

fn init_logger(log_file: Option<&String>) -> anyhow::Result<()> {
    let mut builder = env_logger::Builder::new();
    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create log file '{path}'."))?;
            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }
        None => {
            builder.target(env_logger::Target::Stderr);
        }
    }
    builder.filter_level(default_log_level(log_file.is_some())).parse_default_env().init();
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let matches = Command::new("Truco Counter")
        .version(clap::crate_version!())
        .about("Scorekeeper for Truco matches")
        .subcommand_required(true)
        .arg(arg!(--"log-file" <file> "Write logs to this file").global(true))
        .subcommand(
            Command::new("play")
                .about("Run the interactive scoreboard")
                .arg(arg!(
                    -c --"config" <config_file>
                    "Path to the configuration file: yaml-serialized ScoreboardConfig."
                ))
                .arg(
                    arg!(--"max-score" <n> "Points needed to win a match")
                        .value_parser(clap::value_parser!(u32).range(1..)),
                )
                .arg(arg!(--"us-name" <name> "Display name of the first team"))
                .arg(arg!(--"them-name" <name> "Display name of the second team")),
        )
        .subcommand(
            Command::new("stress-test")
                .about("Apply random actions to the scoreboard and verify its invariants")
                .arg(
                    arg!(-'n' --"matches" <n> "Stop after this many finished matches")
                        .value_parser(clap::value_parser!(u64)),
                ),
        )
        .get_matches();

    init_logger(matches.get_one::<String>("log-file"))?;

    match matches.subcommand() {
        Some(("play", sub_matches)) => {
            let overrides = ConfigOverrides {
                max_score: sub_matches.get_one::<u32>("max-score").copied(),
                us_name: sub_matches.get_one::<String>("us-name").cloned(),
                them_name: sub_matches.get_one::<String>("them-name").cloned(),
            };
            let config = config::load_config(
                sub_matches.get_one::<String>("config").map(String::as_str),
                overrides,
            )?;
            scoreboard_main::run(config)?;
            Ok(())
        }
        Some(("stress-test", sub_matches)) => {
            stress_test::run(stress_test::StressTestConfig {
                matches: sub_matches.get_one::<u64>("matches").copied(),
            })?;
            Ok(())
        }
        _ => unreachable!("Exhausted list of subcommands and subcommand_required prevents `None`"),
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_level_depends_on_target() {
        assert_eq!(default_log_level(true), log::LevelFilter::Info);
        assert_eq!(default_log_level(false), log::LevelFilter::Warn);
    }
}
