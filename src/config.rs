//! Configuration loading and management.
//!
//! Configuration is loaded with the following precedence:
//! 1. Environment variables (`HOOKROUTE_*`)
//! 2. Config file (`~/.hookroute/config.toml`)
//! 3. Defaults

use crate::dispatch::{ExecutionMode, ResolutionMode};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration struct.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Dispatch configuration.
    pub router: RouterConfig,

    /// Bundled blocking guards.
    pub guards: GuardsConfig,

    /// Audit logging.
    pub audit: AuditConfig,
}

/// Dispatch configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RouterConfig {
    /// How handlers for one event are run.
    pub execution: ExecutionMode,

    /// How their results become one decision.
    pub resolution: ResolutionMode,

    /// Deadline for one dispatch, in seconds.
    pub timeout_seconds: u64,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            execution: ExecutionMode::Sequential,
            resolution: ResolutionMode::BlockWins,
            timeout_seconds: 30,
        }
    }
}

impl RouterConfig {
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

/// Bundled guard configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GuardsConfig {
    /// Shell command guard for `PreToolUse`.
    pub command: CommandGuardConfig,

    /// Prompt guard for `UserPromptSubmit`.
    pub prompt: PromptGuardConfig,
}

/// Shell command guard.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CommandGuardConfig {
    pub enabled: bool,

    /// Case-insensitive regexes matched against `Bash` commands.
    pub patterns: Vec<String>,
}

impl Default for CommandGuardConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            patterns: [
                r"\brm\s+-(?:[a-z]*r[a-z]*f|[a-z]*f[a-z]*r)",
                r"\bsudo\b",
                r"\bchmod\s+777\b",
                r"\bmkfs(\.\w+)?\b",
                r"\bdd\b.*\bof=/dev/",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
        }
    }
}

/// Prompt guard.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PromptGuardConfig {
    pub enabled: bool,

    /// Case-insensitive substrings that reject a prompt.
    pub blocked_terms: Vec<String>,
}

impl Default for PromptGuardConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            blocked_terms: ["password", "secret", "private key", "ssn", "credit card"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

/// Audit configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditConfig {
    /// Log tool use and session events.
    pub enabled: bool,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Get the default hookroute home directory.
fn default_home() -> PathBuf {
    dirs::home_dir().map_or_else(|| PathBuf::from(".hookroute"), |h| h.join(".hookroute"))
}

/// Load configuration with precedence: env vars → file → defaults.
///
/// # Errors
///
/// Returns an error if the config file exists but cannot be parsed.
pub fn load_config() -> Result<Config> {
    load_config_from(&get_config_path())
}

/// Load configuration from an explicit file, then apply env overrides.
///
/// A missing file yields the defaults.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_config_from(path: &Path) -> Result<Config> {
    let mut config = if path.exists() {
        let contents = fs::read_to_string(path)?;
        toml::from_str(&contents).map_err(|e| Error::Config(format!("{}: {e}", path.display())))?
    } else {
        Config::default()
    };

    apply_env_overrides(&mut config);

    Ok(config)
}

/// Get the path to the config file.
#[must_use]
pub fn get_config_path() -> PathBuf {
    if let Ok(path) = env::var("HOOKROUTE_CONFIG") {
        return PathBuf::from(path);
    }

    if let Ok(home) = env::var("HOOKROUTE_HOME") {
        return PathBuf::from(home).join("config.toml");
    }

    default_home().join("config.toml")
}

/// Apply environment variable overrides to config.
fn apply_env_overrides(config: &mut Config) {
    apply_overrides(config, |key| env::var(key).ok());
}

/// Apply `HOOKROUTE_*` overrides read through `lookup`.
///
/// Values that do not parse are ignored.
fn apply_overrides(config: &mut Config, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(mode) = lookup("HOOKROUTE_EXECUTION") {
        if let Ok(mode) = mode.parse() {
            config.router.execution = mode;
        }
    }

    if let Some(mode) = lookup("HOOKROUTE_RESOLUTION") {
        if let Ok(mode) = mode.parse() {
            config.router.resolution = mode;
        }
    }

    if let Some(val) = lookup("HOOKROUTE_TIMEOUT_SECONDS") {
        if let Ok(secs) = val.parse() {
            config.router.timeout_seconds = secs;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn default_config() {
        let config = Config::default();
        assert_eq!(config.router.execution, ExecutionMode::Sequential);
        assert_eq!(config.router.resolution, ResolutionMode::BlockWins);
        assert_eq!(config.router.timeout(), Duration::from_secs(30));
        assert!(config.guards.command.enabled);
        assert!(config.guards.prompt.blocked_terms.contains(&"password".to_string()));
        assert!(config.audit.enabled);
    }

    #[test]
    fn parse_config_toml() {
        let toml = r#"
            [router]
            execution = "concurrent"
            resolution = "first-win"
            timeout_seconds = 5

            [guards.command]
            patterns = ["curl .* \\| sh"]

            [guards.prompt]
            enabled = false

            [audit]
            enabled = false
        "#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.router.execution, ExecutionMode::Concurrent);
        assert_eq!(config.router.resolution, ResolutionMode::FirstWin);
        assert_eq!(config.router.timeout_seconds, 5);
        assert_eq!(config.guards.command.patterns, vec![r"curl .* \| sh"]);
        assert!(config.guards.command.enabled);
        assert!(!config.guards.prompt.enabled);
        assert!(!config.audit.enabled);
    }

    #[test]
    fn partial_config_uses_defaults() {
        let toml = r#"
            [router]
            resolution = "merge"
        "#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.router.resolution, ResolutionMode::Merge);
        assert_eq!(config.router.timeout_seconds, 30); // Default
        assert!(config.guards.prompt.enabled); // Default
    }

    #[test]
    fn unknown_mode_is_rejected() {
        let toml = r#"
            [router]
            execution = "parallel"
        "#;
        assert!(toml::from_str::<Config>(toml).is_err());
    }

    #[test]
    fn load_from_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config_from(&dir.path().join("absent.toml")).unwrap();
        assert!(config.guards.command.enabled);
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[audit]\nenabled = false").unwrap();
        let config = load_config_from(file.path()).unwrap();
        assert!(!config.audit.enabled);
    }

    #[test]
    fn load_from_broken_file_fails() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[router\nexecution = 1").unwrap();
        assert!(matches!(load_config_from(file.path()), Err(Error::Config(_))));
    }

    fn overrides(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn env_overrides_win_over_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[router]\nexecution = \"pipeline\"\nresolution = \"merge\"\ntimeout_seconds = 5"
        )
        .unwrap();
        let mut config: Config =
            toml::from_str(&fs::read_to_string(file.path()).unwrap()).unwrap();

        apply_overrides(
            &mut config,
            overrides(&[
                ("HOOKROUTE_EXECUTION", "async"),
                ("HOOKROUTE_RESOLUTION", "first_win"),
                ("HOOKROUTE_TIMEOUT_SECONDS", "12"),
            ]),
        );
        assert_eq!(config.router.execution, ExecutionMode::Concurrent);
        assert_eq!(config.router.resolution, ResolutionMode::FirstWin);
        assert_eq!(config.router.timeout_seconds, 12);
    }

    #[test]
    fn invalid_env_overrides_are_ignored() {
        let mut config = Config::default();
        config.router.execution = ExecutionMode::Pipeline;
        config.router.timeout_seconds = 7;

        apply_overrides(
            &mut config,
            overrides(&[
                ("HOOKROUTE_EXECUTION", "parallel"),
                ("HOOKROUTE_RESOLUTION", "majority"),
                ("HOOKROUTE_TIMEOUT_SECONDS", "soon"),
            ]),
        );
        assert_eq!(config.router.execution, ExecutionMode::Pipeline);
        assert_eq!(config.router.resolution, ResolutionMode::BlockWins);
        assert_eq!(config.router.timeout_seconds, 7);
    }

    #[test]
    fn no_env_leaves_config_alone() {
        let mut config = Config::default();
        apply_overrides(&mut config, |_| None);
        assert_eq!(config.router.execution, ExecutionMode::Sequential);
        assert_eq!(config.router.timeout_seconds, 30);
    }

    #[test]
    fn config_round_trips_through_toml() {
        let text = toml::to_string(&Config::default()).unwrap();
        let parsed: Config = toml::from_str(&text).unwrap();
        assert_eq!(parsed.guards.command.patterns, Config::default().guards.command.patterns);
    }
}
