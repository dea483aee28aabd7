//! `encode` / `decode` commands.
//!
//! Documents on the plain side look like the serialized session record:
//! `{"Deadline": "<RFC 3339>", "Values": {...}}`. The sealed side is the
//! envelope in standard base64.

use anyhow::{Context, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use session_codec::{Encrypter, SessionRecord, SessionValues};
use tracing::debug;

/// Usage line printed on a bad invocation.
pub const USAGE: &str = "usage: session-sealer <encode|decode> < input";

/// Operation selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Session document on stdin, base64 envelope on stdout.
    Encode,
    /// Base64 envelope on stdin, session document on stdout.
    Decode,
}

impl Command {
    /// Parse the first positional argument.
    pub fn parse(arg: Option<&str>) -> Result<Self> {
        match arg {
            Some("encode") => Ok(Command::Encode),
            Some("decode") => Ok(Command::Decode),
            Some(other) => anyhow::bail!("unknown command {other:?}\n{USAGE}"),
            None => anyhow::bail!("missing command\n{USAGE}"),
        }
    }
}

/// Run `command` over `input`, returning what should be written to stdout.
pub fn run(command: Command, encrypter: &Encrypter, input: &str) -> Result<String> {
    match command {
        Command::Encode => encode(encrypter, input),
        Command::Decode => decode(encrypter, input),
    }
}

fn encode(encrypter: &Encrypter, input: &str) -> Result<String> {
    let record: SessionRecord =
        serde_json::from_str(input).context("input is not a session document")?;
    let envelope = encrypter
        .encode(record.deadline, &record.values)
        .context("failed to seal session")?;
    debug!(
        values = record.values.len(),
        bytes = envelope.len(),
        "session sealed"
    );
    Ok(STANDARD.encode(envelope))
}

fn decode(encrypter: &Encrypter, input: &str) -> Result<String> {
    let envelope = STANDARD
        .decode(input.trim())
        .context("input is not standard base64")?;
    let (deadline, values): (_, SessionValues) = encrypter
        .decode(&envelope)
        .context("failed to open session")?;
    debug!(values = values.len(), "session opened");
    serde_json::to_string_pretty(&SessionRecord { deadline, values })
        .context("failed to render session document")
}
