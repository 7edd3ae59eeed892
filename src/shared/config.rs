//! Application configuration. Handle, cache, timezone, goal.

use crate::domain::swim::{DEFAULT_ANNUAL_GOAL_M, DEFAULT_POOL_LENGTH_M};
use crate::domain::{DomainError, ReferenceZone, SwimGoal};
use crate::usecases::paginated_fetcher::DEFAULT_PAGE_LIMIT;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Default response cache lifetime (one hour).
pub const DEFAULT_CACHE_TTL_SECS: u64 = 3600;

#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    /// Handle to resolve. Read from MASTODON_SWIMS_USER (MASTODON_USER is handled by the CLI).
    #[serde(default)]
    pub user: Option<String>,

    /// Directory holding responses.db. Read from MASTODON_SWIMS_CACHE_DIR.
    #[serde(default)]
    pub cache_dir: Option<String>,

    #[serde(default)]
    pub cache_ttl_secs: Option<u64>,

    #[serde(default)]
    pub cache_enabled: Option<bool>,

    /// IANA timezone name; local system timezone when unset.
    #[serde(default)]
    pub timezone: Option<String>,

    #[serde(default)]
    pub page_limit: Option<u32>,

    // ─────────────────────────────────────────────────────────────────────────
    // Goal
    // ─────────────────────────────────────────────────────────────────────────
    #[serde(default)]
    pub annual_goal_m: Option<i64>,

    #[serde(default)]
    pub pool_length_m: Option<i64>,
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenv::dotenv().ok();
        let mut c = config::Config::builder();
        c = c.add_source(config::Environment::with_prefix("MASTODON_SWIMS"));
        if let Ok(path) = std::env::var("MASTODON_SWIMS_CONFIG") {
            c = c.add_source(config::File::with_name(&path));
        }
        c.build()?.try_deserialize()
    }

    /// Cache directory: configured, else the platform config dir, else ./data.
    pub fn cache_dir_or_default(&self) -> PathBuf {
        if let Some(dir) = &self.cache_dir {
            return PathBuf::from(dir);
        }
        directories::ProjectDirs::from("", "", "mastodon-swims")
            .map(|d| d.config_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("./data"))
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs.unwrap_or(DEFAULT_CACHE_TTL_SECS))
    }

    pub fn is_cache_enabled(&self) -> bool {
        self.cache_enabled.unwrap_or(true)
    }

    pub fn page_limit_or_default(&self) -> u32 {
        self.page_limit.filter(|&n| n > 0).unwrap_or(DEFAULT_PAGE_LIMIT)
    }

    pub fn reference_zone(&self) -> Result<ReferenceZone, DomainError> {
        match self.timezone.as_deref().map(str::trim) {
            None | Some("") => Ok(ReferenceZone::Local),
            Some(name) => name.parse(),
        }
    }

    pub fn goal(&self) -> SwimGoal {
        SwimGoal {
            annual_distance_m: self.annual_goal_m.unwrap_or(DEFAULT_ANNUAL_GOAL_M),
            pool_length_m: self.pool_length_m.unwrap_or(DEFAULT_POOL_LENGTH_M),
        }
    }
}
