//! Runner configuration management.
//!
//! Consolidates command-line overrides and environment variable reads into a
//! validated configuration.

use milly_shuffle::TournamentConfig;
use std::path::PathBuf;

/// Match length used when neither a best-of nor a first-to is given
pub const DEFAULT_BEST_OF: u32 = 21;

/// Rounds played when none are configured
pub const DEFAULT_ROUNDS: u32 = 4;

/// Command-line values that take precedence over the environment
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub players_file: Option<PathBuf>,
    pub rounds: Option<u32>,
    pub best_of: Option<u32>,
    pub first_to: Option<u32>,
    pub seed: Option<u64>,
    pub opponents_as_partners: bool,
    pub json: bool,
}

/// Complete runner configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    /// File with one player per line, in seed order
    pub players_file: PathBuf,
    /// Tournament settings
    pub tournament: TournamentConfig,
    /// Seed for reproducible bye selection
    pub seed: Option<u64>,
    /// Print final standings as JSON instead of a table
    pub json: bool,
}

impl CliConfig {
    /// Load configuration from overrides, falling back to environment variables
    ///
    /// # Errors
    ///
    /// Returns error if the players file is missing or a numeric variable
    /// doesn't parse
    pub fn from_env(overrides: Overrides) -> Result<Self, ConfigError> {
        let players_file = overrides
            .players_file
            .or_else(|| std::env::var("SHUFFLE_PLAYERS_FILE").ok().map(PathBuf::from))
            .ok_or_else(|| ConfigError::MissingRequired {
                var: "SHUFFLE_PLAYERS_FILE".to_string(),
                hint: "Pass --players FILE with one name per line".to_string(),
            })?;

        let num_rounds = match overrides.rounds {
            Some(rounds) => rounds,
            None => parse_env_or("SHUFFLE_ROUNDS", DEFAULT_ROUNDS)?,
        };

        // An explicit first-to wins over a best-of; flags win over env
        let first_to = match (overrides.first_to, overrides.best_of) {
            (Some(first_to), _) => first_to,
            (None, Some(best_of)) => first_to_from_best_of(best_of),
            (None, None) => match parse_env::<u32>("SHUFFLE_FIRST_TO")? {
                Some(first_to) => first_to,
                None => first_to_from_best_of(parse_env_or("SHUFFLE_BEST_OF", DEFAULT_BEST_OF)?),
            },
        };

        let seed = match overrides.seed {
            Some(seed) => Some(seed),
            None => parse_env("SHUFFLE_SEED")?,
        };

        let mut tournament = TournamentConfig::new(num_rounds, first_to);
        tournament.opponents_count_as_partners = overrides.opponents_as_partners
            || parse_env_or("SHUFFLE_OPPONENTS_AS_PARTNERS", false)?;

        Ok(Self {
            players_file,
            tournament,
            seed,
            json: overrides.json,
        })
    }

    /// Validate configuration after loading
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tournament.num_rounds == 0 {
            return Err(ConfigError::Invalid {
                var: "SHUFFLE_ROUNDS".to_string(),
                reason: "Must be greater than 0".to_string(),
            });
        }

        if self.tournament.first_to == 0 {
            return Err(ConfigError::Invalid {
                var: "SHUFFLE_FIRST_TO".to_string(),
                reason: "Must be greater than 0".to_string(),
            });
        }

        Ok(())
    }
}

fn first_to_from_best_of(best_of: u32) -> u32 {
    TournamentConfig::from_best_of(1, best_of).first_to
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required setting: {var}\nHint: {hint}")]
    MissingRequired { var: String, hint: String },

    #[error("Invalid configuration for {var}: {reason}")]
    Invalid { var: String, reason: String },
}

/// Parse an optional environment variable, rejecting values that don't parse
fn parse_env<T>(key: &str) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Invalid {
                var: key.to_string(),
                reason: format!("Can't parse {raw:?}"),
            }),
        Err(_) => Ok(None),
    }
}

/// Helper to parse environment variable with default fallback
fn parse_env_or<T>(key: &str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
{
    Ok(parse_env(key)?.unwrap_or(default))
}
