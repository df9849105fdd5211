//! Runtime configuration, loaded from environment variables and CLI flags.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use tracing::Level;

pub const DEFAULT_SCORES_PATH: &str = "tone-puzzle-scores.json";

/// Runtime configuration for the terminal game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// RNG seed. `None` means derive one from the clock at startup.
    pub seed: Option<u32>,
    /// JSON file holding cumulative scores.
    pub scores_path: PathBuf,
    /// Log file. Logging is off when unset (stdout belongs to the game).
    pub log_path: Option<PathBuf>,
    pub log_level: Level,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed: None,
            scores_path: PathBuf::from(DEFAULT_SCORES_PATH),
            log_path: None,
            log_level: Level::INFO,
        }
    }
}

impl Config {
    /// Load configuration from the process environment and arguments.
    ///
    /// Environment variables:
    /// - `TONE_PUZZLE_SEED` - RNG seed (default: from the clock)
    /// - `TONE_PUZZLE_SCORES` - score file (default: `tone-puzzle-scores.json`)
    /// - `TONE_PUZZLE_LOG` - log file (default: no logging)
    /// - `TONE_PUZZLE_LOG_LEVEL` - `trace|debug|info|warn|error` (default: `info`)
    ///
    /// CLI flags `--seed <n>`, `--scores <path>` and `--log <path>` take
    /// precedence over the matching variables.
    pub fn load() -> Self {
        let args: Vec<String> = std::env::args().collect();
        Self::from_sources(&args, |key| std::env::var(key).ok())
    }

    /// Build a config from explicit arguments and an environment lookup.
    pub fn from_sources(args: &[String], env: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let seed = Self::parse_cli_value(args, "--seed")
            .and_then(|v| v.parse().ok())
            .or_else(|| env("TONE_PUZZLE_SEED").and_then(|v| v.parse().ok()));

        let scores_path = Self::parse_cli_value(args, "--scores")
            .or_else(|| env("TONE_PUZZLE_SCORES"))
            .map(PathBuf::from)
            .unwrap_or(defaults.scores_path);

        let log_path = Self::parse_cli_value(args, "--log")
            .or_else(|| env("TONE_PUZZLE_LOG"))
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);

        let log_level = env("TONE_PUZZLE_LOG_LEVEL")
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.log_level);

        Config {
            seed,
            scores_path,
            log_path,
            log_level,
        }
    }

    /// The configured seed, or one derived from the wall clock.
    pub fn resolve_seed(&self) -> u32 {
        self.seed.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
                .unwrap_or(1)
        })
    }

    /// Parse a CLI flag value like `--seed 42`.
    fn parse_cli_value(args: &[String], flag: &str) -> Option<String> {
        args.windows(2).find_map(|pair| {
            if pair[0] == flag {
                Some(pair[1].clone())
            } else {
                None
            }
        })
    }
}
