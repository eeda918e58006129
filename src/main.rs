//! Lava Runner entry point
//!
//! Runs the level set headless with the autopilot.
//!
//! Usage: `lava-runner [levels.json] [settings.json]`

use std::path::Path;

use lava_runner::game::{Autopilot, run_game};
use lava_runner::plans;
use lava_runner::sim::{LevelParser, standard_dictionary};
use lava_runner::{Result, Settings};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Lava Runner starting...");

    if let Err(e) = run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let mut args = std::env::args().skip(1);

    let plans = match args.next() {
        Some(path) => plans::load_plans(Path::new(&path))?,
        None => plans::bundled()?,
    };
    let settings = match args.next() {
        Some(path) => Settings::load(Path::new(&path)),
        None => Settings::default(),
    };

    let parser = LevelParser::new(standard_dictionary()).with_seed(settings.seed);
    let outcome = run_game(&plans, &parser, &mut Autopilot, &settings)?;

    if outcome.completed() {
        log::info!("All {} levels won in {} attempts", outcome.levels_total, outcome.attempts);
    } else {
        log::info!(
            "Run over: {}/{} levels won in {} attempts",
            outcome.levels_won,
            outcome.levels_total,
            outcome.attempts
        );
    }
    Ok(())
}
