//! Bot configuration from the environment and the command line.

use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{name} must be a number, got '{value}'")]
    NotANumber { name: String, value: String },

    #[error("{0} needs a value")]
    MissingValue(String),

    #[error("Unknown option {0}. Run with --help for usage.")]
    UnknownOption(String),
}

/// What `main` should do after reading the arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Run,
    Help,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BotConfig {
    pub api_key: Option<String>,
    pub narrator_model: Option<String>,
    pub narrator_max_tokens: Option<usize>,
    /// Fixed seed for reproducible dice.
    pub seed: Option<u64>,
    pub idle_timeout: Option<Duration>,
    /// Never call the narration API.
    pub offline: bool,
}

impl BotConfig {
    /// Read the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through `lookup`, which maps a variable name to its value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        Ok(Self {
            api_key: get("ANTHROPIC_API_KEY"),
            narrator_model: get("DUNGEON_NARRATOR_MODEL"),
            narrator_max_tokens: get("DUNGEON_NARRATOR_MAX_TOKENS")
                .map(|v| number("DUNGEON_NARRATOR_MAX_TOKENS", &v))
                .transpose()?,
            seed: get("DUNGEON_SEED")
                .map(|v| number("DUNGEON_SEED", &v))
                .transpose()?,
            idle_timeout: get("DUNGEON_IDLE_TIMEOUT_SECS")
                .map(|v| number("DUNGEON_IDLE_TIMEOUT_SECS", &v).map(Duration::from_secs))
                .transpose()?,
            offline: false,
        })
    }

    /// Apply command line flags on top of the environment.
    pub fn apply_args(&mut self, args: &[String]) -> Result<Mode, ConfigError> {
        let mut args = args.iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "-h" | "--help" => return Ok(Mode::Help),
                "--offline" => self.offline = true,
                "--seed" => {
                    let value = args
                        .next()
                        .ok_or_else(|| ConfigError::MissingValue(arg.clone()))?;
                    self.seed = Some(number(arg, value)?);
                }
                "--idle-timeout" => {
                    let value = args
                        .next()
                        .ok_or_else(|| ConfigError::MissingValue(arg.clone()))?;
                    self.idle_timeout = Some(Duration::from_secs(number(arg, value)?));
                }
                other => return Err(ConfigError::UnknownOption(other.to_string())),
            }
        }
        Ok(Mode::Run)
    }

    /// Whether narration should go to the API.
    pub fn narration_enabled(&self) -> bool {
        !self.offline && self.api_key.is_some()
    }
}

fn number<T: std::str::FromStr>(name: &str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::NotANumber {
        name: name.to_string(),
        value: value.to_string(),
    })
}
