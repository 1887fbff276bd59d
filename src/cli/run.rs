//! `hookroute run` command implementation.

use crate::builtin::router_from_config;
use crate::config::{Config, get_config_path, load_config, load_config_from};
use crate::error::Result;
use crate::hooks::ExitDisposition;
use std::io::{self, Read, Write};
use std::path::Path;
use tracing::debug;

/// Run one hook invocation.
///
/// Reads a payload from stdin, dispatches it through the router built from
/// the config at `config_path` (or the default location) and writes the
/// decision to stdout.
///
/// # Errors
///
/// Returns an error if the config is invalid, the payload cannot be
/// decoded, a handler fails or the deadline passes.
pub fn run(config_path: Option<&Path>) -> Result<ExitDisposition> {
    let config = match config_path {
        Some(path) => {
            debug!(path = %path.display(), "loading config");
            load_config_from(path)?
        }
        None => {
            debug!(path = %get_config_path().display(), "loading config");
            load_config()?
        }
    };

    run_with(&config, io::stdin().lock(), io::stdout().lock())
}

/// Dispatch one payload from `reader` to `writer` under `config`.
///
/// # Errors
///
/// Same as [`run`], minus config loading.
pub fn run_with<R: Read, W: Write>(
    config: &Config,
    reader: R,
    writer: W,
) -> Result<ExitDisposition> {
    let router = router_from_config(config)?;
    router.run_with_io(reader, writer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use serde_json::Value;

    fn run_str(config: &Config, payload: &str) -> (Result<ExitDisposition>, String) {
        let mut out = Vec::new();
        let result = run_with(config, payload.as_bytes(), &mut out);
        (result, String::from_utf8(out).unwrap())
    }

    #[test]
    fn dangerous_command_exits_blocking() {
        let payload = r#"{"session_id":"s1","transcript_path":"t","cwd":"/","hook_event_name":"PreToolUse","tool_name":"Bash","tool_input":{"command":"rm -rf /"}}"#;
        let (result, out) = run_str(&Config::default(), payload);
        let disposition = result.unwrap();
        assert_eq!(disposition.exit_code(), 2);

        let json: Value = serde_json::from_str(out.trim()).unwrap();
        assert_eq!(json["continue"], false);
        assert_eq!(json["allowTool"], false);
        assert!(json["stopReason"].as_str().unwrap().contains("rm -rf"));
    }

    #[test]
    fn harmless_command_exits_success() {
        let payload = r#"{"session_id":"s1","transcript_path":"t","cwd":"/","hook_event_name":"PreToolUse","tool_name":"Bash","tool_input":{"command":"ls -la"}}"#;
        let (result, out) = run_str(&Config::default(), payload);
        assert_eq!(result.unwrap(), ExitDisposition::Success);
        assert!(out.ends_with('\n'));
        assert_eq!(out.lines().count(), 1);
    }

    #[test]
    fn unknown_event_writes_nothing() {
        let payload = r#"{"session_id":"s1","transcript_path":"t","cwd":"/","hook_event_name":"Bogus"}"#;
        let (result, out) = run_str(&Config::default(), payload);
        assert!(matches!(result, Err(Error::InvalidEvent(_))));
        assert!(out.is_empty());
    }

    #[test]
    fn config_file_is_honoured() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[guards.command]\nenabled = false\n").unwrap();
        let config = load_config_from(&path).unwrap();

        let payload = r#"{"session_id":"s1","transcript_path":"t","cwd":"/","hook_event_name":"PreToolUse","tool_name":"Bash","tool_input":{"command":"sudo ls"}}"#;
        let (result, _) = run_str(&config, payload);
        assert_eq!(result.unwrap(), ExitDisposition::Success);
    }
}
