//! `hookroute config` command implementation.

use crate::config::{Config, get_config_path, load_config, load_config_from};
use crate::error::{Error, Result};
use std::io::{self, Write};
use std::path::Path;

/// Print the effective configuration as TOML.
///
/// # Errors
///
/// Returns an error if the config file cannot be parsed or stdout cannot be
/// written.
pub fn run(config_path: Option<&Path>) -> Result<()> {
    let (path, config) = match config_path {
        Some(path) => (path.to_path_buf(), load_config_from(path)?),
        None => (get_config_path(), load_config()?),
    };

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "# {}", path.display())?;
    write_config(&config, stdout)
}

fn write_config<W: Write>(config: &Config, mut writer: W) -> Result<()> {
    let text = toml::to_string(config).map_err(|e| Error::Config(e.to_string()))?;
    writer.write_all(text.as_bytes())?;
    Ok(())
}
