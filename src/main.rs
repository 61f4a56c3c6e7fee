//! taskpad - interactive shell entry point.
//!
//! Owns stdin/stdout and the loop-until-`bye`; everything it prints comes
//! from the pure rendering functions in `taskpad::ui`.

use std::io::{self, BufRead};

use taskpad::{ui, Config, Tracker};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "taskpad=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration and the saved task list
    let config = Config::from_env();
    info!("Using task file {}", config.data_file.display());

    let (mut tracker, report) = Tracker::open(&config);
    if let Some(notice) = ui::render_load_report(&report) {
        println!("{notice}");
    }

    println!("{}", ui::welcome());

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        match tracker.execute(input) {
            Ok(outcome) => {
                println!("{}", ui::render(&outcome));
                if outcome.is_exit() {
                    break;
                }
            }
            Err(error) => println!("{}", ui::render_error(&error)),
        }
    }

    Ok(())
}
