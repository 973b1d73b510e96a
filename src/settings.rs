use config::{Config, ConfigError, Environment};
use serde::Deserialize;

pub const ENV_PREFIX: &str = "PROMPT_ARCHITECT";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    /// Pretty-print JSON output.
    pub pretty: bool,
    /// Files handed to the rayon pool per batch chunk.
    pub chunk_size: usize,
    /// Comma-separated extensions `batch` picks up.
    pub notes_extensions: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            pretty: true,
            chunk_size: 500,
            notes_extensions: "md,txt".to_string(),
        }
    }
}

impl Settings {
    /// Defaults overlaid by `PROMPT_ARCHITECT_*` environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::builder(Environment::with_prefix(ENV_PREFIX))?.try_deserialize()
    }

    fn builder(env: Environment) -> Result<Config, ConfigError> {
        let defaults = Settings::default();
        Config::builder()
            .set_default("pretty", defaults.pretty)?
            .set_default("chunk_size", defaults.chunk_size as i64)?
            .set_default("notes_extensions", defaults.notes_extensions)?
            .add_source(env)
            .build()
    }

    pub fn extensions(&self) -> Vec<String> {
        self.notes_extensions
            .split(',')
            .map(|e| e.trim().trim_start_matches('.').to_lowercase())
            .filter(|e| !e.is_empty())
            .collect()
    }
}

// ── Tests ──
