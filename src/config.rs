use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, warn};

use crate::core::frequency::{DEFAULT_COMMUNITY_PREFIX, DEFAULT_TOP_COMMUNITIES, DEFAULT_TOP_WORDS};
use crate::core::BuildOptions;
use crate::error::{PersonaError, Result};

pub const DEFAULT_USER_AGENT: &str = "UserPersonaBuilder/0.1";
pub const DEFAULT_BASE_URL: &str = "https://www.reddit.com";
pub const USER_AGENT_ENV: &str = "PERSONA_USER_AGENT";

/// Reddit serves at most this many listing items per page.
pub const MAX_LIMIT: u32 = 100;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub base_url: String,
    pub user_agent: String,
    /// Items requested per listing (single page)
    pub limit: u32,
    pub top_words: usize,
    pub top_communities: usize,
    pub community_prefix: String,
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            limit: MAX_LIMIT,
            top_words: DEFAULT_TOP_WORDS,
            top_communities: DEFAULT_TOP_COMMUNITIES,
            community_prefix: DEFAULT_COMMUNITY_PREFIX.to_string(),
            timeout_secs: 30,
        }
    }
}

/// Command-line values that take precedence over the file and environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub limit: Option<u32>,
    pub top_words: Option<usize>,
    pub top_communities: Option<usize>,
}

impl Config {
    /// Load configuration with no command-line overrides.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with(path, &ConfigOverrides::default())
    }

    /// Resolve defaults, file, environment and overrides, then validate once.
    ///
    /// An explicit path must exist. Without one, the per-user config file
    /// is used when present and defaults otherwise.
    pub fn load_with(path: Option<&Path>, overrides: &ConfigOverrides) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => match Self::default_path().filter(|p| p.exists()) {
                Some(path) => Self::from_file(&path)?,
                None => {
                    debug!("no config file found, using defaults");
                    Self::default()
                }
            },
        };

        config.apply_overrides(std::env::var(USER_AGENT_ENV).ok());
        config.apply_cli(overrides);
        config.validate()?;
        Ok(config)
    }

    pub fn apply_cli(&mut self, overrides: &ConfigOverrides) {
        if let Some(limit) = overrides.limit {
            self.limit = limit;
        }
        if let Some(k) = overrides.top_words {
            self.top_words = k;
        }
        if let Some(k) = overrides.top_communities {
            self.top_communities = k;
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            PersonaError::Config(format!("failed to read {}: {}", path.display(), e))
        })?;

        if contents.trim().is_empty() {
            warn!(path = %path.display(), "config file is empty, using defaults");
            return Ok(Self::default());
        }

        let config = serde_json::from_str(&contents)?;
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// `<config dir>/persona-builder/config.json`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("persona-builder").join("config.json"))
    }

    pub fn apply_overrides(&mut self, user_agent: Option<String>) {
        if let Some(agent) = user_agent.filter(|a| !a.trim().is_empty()) {
            self.user_agent = agent;
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.limit == 0 || self.limit > MAX_LIMIT {
            return Err(PersonaError::Config(format!(
                "limit must be between 1 and {}, got {}",
                MAX_LIMIT, self.limit
            )));
        }
        if self.base_url.trim().is_empty() {
            return Err(PersonaError::Config("base_url must not be empty".to_string()));
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn build_options(&self) -> BuildOptions {
        BuildOptions {
            top_words: self.top_words,
            top_communities: self.top_communities,
            community_prefix: self.community_prefix.clone(),
        }
    }
}
