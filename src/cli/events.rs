//! `hookroute events` command implementation.

use crate::error::Result;
use crate::hooks::EventName;
use std::io::{self, Write};

/// Print every routable event name, one per line.
///
/// # Errors
///
/// Returns an error if writing to stdout fails.
pub fn run() -> Result<()> {
    write_events(io::stdout().lock())
}

fn write_events<W: Write>(mut writer: W) -> Result<()> {
    for name in EventName::ALL {
        writeln!(writer, "{name}")?;
    }
    Ok(())
}
