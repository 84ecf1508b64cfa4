// Configuration module for reading Snake.toml
// All tunables live here so nothing in the engine depends on free-floating
// constants.

use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Main configuration structure containing all tunable parameters
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub board: BoardConfig,
    pub search: SearchConfig,
    pub sim: SimConfig,
    pub debug: DebugConfig,
}

/// Board and starting-position constants
#[derive(Debug, Deserialize, Clone)]
pub struct BoardConfig {
    pub size: i32,
    pub start_x: i32,
    pub start_y: i32,
}

/// Cycle-search tunables
#[derive(Debug, Deserialize, Clone)]
pub struct SearchConfig {
    /// A snake shorter than this cannot bite itself; the naive move is
    /// always enough below it.
    pub min_body_for_search: usize,
    /// When false the search runs to completion inside one decision.
    pub resumable: bool,
    /// How many suspension points one decision may burn through before the
    /// caller gets a resume token instead of a move.
    pub max_suspensions_per_tick: usize,
    /// Extra free cells a region must hold, beyond the body length, before
    /// the ranker considers it roomy enough.
    pub region_fit_margin: usize,
}

/// Headless simulation constants
#[derive(Debug, Deserialize, Clone)]
pub struct SimConfig {
    pub games: usize,
    pub max_ticks: usize,
    pub seed: u64,
}

/// Debug configuration
#[derive(Debug, Deserialize, Clone)]
pub struct DebugConfig {
    pub enabled: bool,
    pub log_file_path: String,
}

impl Config {
    /// Loads configuration from a TOML file
    ///
    /// # Arguments
    /// * `path` - Path to the Snake.toml configuration file
    ///
    /// # Returns
    /// * `Result<Config, String>` - Parsed configuration or error message
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let contents = fs::read_to_string(path.as_ref())
            .map_err(|e| format!("Failed to read config file: {}", e))?;

        toml::from_str(&contents).map_err(|e| format!("Failed to parse config file: {}", e))
    }

    /// Loads default configuration from Snake.toml in the project root
    pub fn load_default() -> Result<Self, String> {
        Self::from_file("Snake.toml")
    }

    /// Creates a configuration with hardcoded default values as fallback
    /// This should match the constants defined in Snake.toml
    pub fn default_hardcoded() -> Self {
        Config {
            board: BoardConfig {
                size: 20,
                start_x: 2,
                start_y: 2,
            },
            search: SearchConfig {
                min_body_for_search: 4,
                resumable: true,
                max_suspensions_per_tick: 64,
                region_fit_margin: 1,
            },
            sim: SimConfig {
                games: 3,
                max_ticks: 20000,
                seed: 42,
            },
            debug: DebugConfig {
                enabled: false,
                log_file_path: "snake_debug.jsonl".to_string(),
            },
        }
    }

    /// Attempts to load from file, falls back to hardcoded defaults on error
    pub fn load_or_default() -> Self {
        Self::load_default().unwrap_or_else(|e| {
            eprintln!(
                "Warning: Could not load Snake.toml ({}), using hardcoded defaults",
                e
            );
            Self::default_hardcoded()
        })
    }
}
