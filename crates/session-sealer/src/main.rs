//! `session-sealer` — binary entry point.
//!
//! Startup sequence:
//! 1. Parse the command (`encode` or `decode`).
//! 2. Load and validate [`Config`](config::Config) from environment variables.
//! 3. Initialise structured JSON logging.
//! 4. Build the [`Encrypter`](session_codec::Encrypter), read stdin, write the result to stdout.

mod commands;
mod config;
mod telemetry;

use std::io::Read;

use anyhow::{Context, Result};
use tracing::info;

use commands::Command;

fn main() -> Result<()> {
    // -----------------------------------------------------------------------
    // 1. Command
    // -----------------------------------------------------------------------
    let command = Command::parse(std::env::args().nth(1).as_deref())?;

    // -----------------------------------------------------------------------
    // 2. Configuration
    // -----------------------------------------------------------------------
    let cfg = config::Config::from_env().map_err(|e| {
        // Telemetry is not yet up; write to stderr directly.
        eprintln!("ERROR: session-sealer configuration invalid: {e}");
        e
    })?;

    // -----------------------------------------------------------------------
    // 3. Telemetry
    // -----------------------------------------------------------------------
    telemetry::init(&cfg.log_level)?;
    info!(
        version = env!("CARGO_PKG_VERSION"),
        cipher = %cfg.cipher,
        command = ?command,
        "session-sealer starting"
    );

    // -----------------------------------------------------------------------
    // 4. Run
    // -----------------------------------------------------------------------
    let encrypter = cfg.build_encrypter()?;

    let mut input = String::new();
    std::io::stdin()
        .read_to_string(&mut input)
        .context("failed to read stdin")?;

    let output = commands::run(command, &encrypter, &input)?;
    println!("{output}");
    Ok(())
}
