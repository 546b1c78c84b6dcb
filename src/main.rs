//! Flappy City headless driver
//!
//! Plays the game with the autopilot at a fixed number of ticks and reports
//! how the runs went. A windowed or browser front end drives `tick` the
//! same way, one call per frame.

use std::process::ExitCode;

use flappy_city::Tuning;
use flappy_city::render::{build_instances, hud};
use flappy_city::sim::{GameEvent, GameState, TickInput, tick};

/// Command-line options
#[derive(Debug)]
struct Options {
    seed: Option<u64>,
    ticks: u64,
    tuning: Option<String>,
    snapshot: bool,
}

const USAGE: &str = "usage: flappy-city [--seed N] [--ticks N] [--tuning FILE] [--snapshot]";

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Options, String> {
    let mut options = Options {
        seed: None,
        ticks: 3600,
        tuning: None,
        snapshot: false,
    };
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--seed" => {
                let value = args.next().ok_or("--seed needs a value")?;
                let seed = value.parse().map_err(|_| format!("bad seed: {value}"))?;
                options.seed = Some(seed);
            }
            "--ticks" => {
                let value = args.next().ok_or("--ticks needs a value")?;
                options.ticks = value
                    .parse()
                    .map_err(|_| format!("bad tick count: {value}"))?;
            }
            "--tuning" => {
                options.tuning = Some(args.next().ok_or("--tuning needs a path")?);
            }
            "--snapshot" => options.snapshot = true,
            "-h" | "--help" => return Err(USAGE.to_string()),
            other => return Err(format!("unknown argument: {other}\n{USAGE}")),
        }
    }
    Ok(options)
}

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Flappy City (headless) starting...");

    let options = match parse_args(std::env::args().skip(1)) {
        Ok(options) => options,
        Err(message) => {
            eprintln!("{message}");
            return ExitCode::FAILURE;
        }
    };

    let tuning = match &options.tuning {
        Some(path) => match Tuning::load(path) {
            Ok(tuning) => tuning,
            Err(e) => {
                eprintln!("{e}");
                return ExitCode::FAILURE;
            }
        },
        None => Tuning::default(),
    };

    let seed = options.seed.unwrap_or_else(rand::random);
    log::info!("Game initialized with seed: {}", seed);

    let mut state = match GameState::try_with_tuning(tuning, seed) {
        Ok(state) => state,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };
    let input = TickInput {
        autopilot: true,
        ..Default::default()
    };

    let mut runs = 0u32;
    let mut spikes = 0u32;
    let mut quads = 0usize;
    for _ in 0..options.ticks {
        tick(&mut state, &input);
        for event in &state.events {
            match event {
                GameEvent::Started => runs += 1,
                GameEvent::DifficultyChanged { spike: true, .. } => spikes += 1,
                GameEvent::Collided(_) => {
                    log::info!("{}", hud::final_line(state.score, state.best_score));
                }
                _ => {}
            }
        }
        quads = quads.max(build_instances(&state).len());
    }

    log::info!(
        "Ran {} ticks: {} runs, best score {}, {} speed spikes, up to {} quads per frame",
        state.frames,
        runs,
        state.best_score,
        spikes,
        quads
    );

    if options.snapshot {
        match serde_json::to_string_pretty(&state.snapshot()) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("failed to serialize snapshot: {e}");
                return ExitCode::FAILURE;
            }
        }
    } else {
        println!("runs: {runs}  best: {}", state.best_score);
    }

    ExitCode::SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> impl Iterator<Item = String> {
        list.iter().map(|s| s.to_string()).collect::<Vec<_>>().into_iter()
    }

    #[test]
    fn test_parse_defaults() {
        let options = parse_args(args(&[])).unwrap();
        assert_eq!(options.seed, None);
        assert_eq!(options.ticks, 3600);
        assert!(!options.snapshot);
    }

    #[test]
    fn test_parse_all() {
        let options = parse_args(args(&[
            "--seed", "9", "--ticks", "10", "--tuning", "t.json", "--snapshot",
        ]))
        .unwrap();
        assert_eq!(options.seed, Some(9));
        assert_eq!(options.ticks, 10);
        assert_eq!(options.tuning.as_deref(), Some("t.json"));
        assert!(options.snapshot);
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse_args(args(&["--seed"])).is_err());
        assert!(parse_args(args(&["--ticks", "many"])).is_err());
        assert!(parse_args(args(&["--fast"])).is_err());
    }
}
