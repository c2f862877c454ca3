use crate::error::{config_error, CalResult};
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::time::Duration;

/// Default duration of a game when no end time is recorded, in minutes
pub const DEFAULT_GAME_DURATION_MIN: u32 = 120;

/// Default duration of a training when no end time is recorded, in minutes
pub const DEFAULT_TRAINING_DURATION_MIN: u32 = 90;

/// Color used to flag placeholder events for records that failed to transform
pub const DEFAULT_ERROR_COLOR: &str = "#EF4444";

/// How long a fetched month stays fresh before a refetch, in seconds
pub const DEFAULT_PREFETCH_TTL_SECS: u64 = 300;

/// Main configuration structure for the calendar pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Fallback game duration in minutes when the record has no end time
    pub game_duration_min: u32,
    /// Fallback training duration in minutes when the record has no end time
    pub training_duration_min: u32,
    /// Freshness window for cached/prefetched months, in seconds
    pub prefetch_ttl_secs: u64,
    /// Color applied to error-flagged placeholder events
    pub error_color: String,
    /// Whether game titles use the tenant display name instead of the raw team name
    pub use_tenant_display_name: bool,
}

/// Partial configuration read from the optional TOML overlay file
#[derive(Debug, Default, Deserialize)]
struct ConfigOverlay {
    game_duration_min: Option<u32>,
    training_duration_min: Option<u32>,
    prefetch_ttl_secs: Option<u64>,
    error_color: Option<String>,
    use_tenant_display_name: Option<bool>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            game_duration_min: DEFAULT_GAME_DURATION_MIN,
            training_duration_min: DEFAULT_TRAINING_DURATION_MIN,
            prefetch_ttl_secs: DEFAULT_PREFETCH_TTL_SECS,
            error_color: DEFAULT_ERROR_COLOR.to_string(),
            use_tenant_display_name: true,
        }
    }
}

impl Config {
    /// Load configuration from the overlay file and environment.
    ///
    /// Precedence: defaults, then `config/calendar.toml` if present,
    /// then `CLUBCAL_*` environment variables.
    pub fn load() -> CalResult<Self> {
        // Load .env file if it exists
        dotenv().ok();

        let mut config = Config::default();

        // Overlay file is optional
        if let Ok(content) = fs::read_to_string("config/calendar.toml") {
            let overlay: ConfigOverlay = toml::from_str(&content)?;
            config.apply_overlay(overlay);
        }

        config.apply_env()?;

        Ok(config)
    }

    /// Apply `CLUBCAL_*` environment variables on top of the current
    /// values. A variable that is present but malformed is an error,
    /// not a silent fallback.
    fn apply_env(&mut self) -> CalResult<()> {
        if let Ok(value) = env::var("CLUBCAL_GAME_DURATION_MIN") {
            self.game_duration_min = value
                .parse::<u32>()
                .map_err(|_| config_error("Invalid CLUBCAL_GAME_DURATION_MIN value"))?;
        }

        if let Ok(value) = env::var("CLUBCAL_TRAINING_DURATION_MIN") {
            self.training_duration_min = value
                .parse::<u32>()
                .map_err(|_| config_error("Invalid CLUBCAL_TRAINING_DURATION_MIN value"))?;
        }

        if let Ok(value) = env::var("CLUBCAL_PREFETCH_TTL_SECS") {
            self.prefetch_ttl_secs = value
                .parse::<u64>()
                .map_err(|_| config_error("Invalid CLUBCAL_PREFETCH_TTL_SECS value"))?;
        }

        if let Ok(value) = env::var("CLUBCAL_ERROR_COLOR") {
            self.error_color = value;
        }

        if let Ok(value) = env::var("CLUBCAL_USE_TENANT_DISPLAY_NAME") {
            self.use_tenant_display_name = value
                .parse::<bool>()
                .map_err(|_| config_error("Invalid CLUBCAL_USE_TENANT_DISPLAY_NAME value"))?;
        }

        Ok(())
    }

    /// Freshness window for cached months as a `Duration`
    pub fn prefetch_ttl(&self) -> Duration {
        Duration::from_secs(self.prefetch_ttl_secs)
    }

    fn apply_overlay(&mut self, overlay: ConfigOverlay) {
        if let Some(value) = overlay.game_duration_min {
            self.game_duration_min = value;
        }
        if let Some(value) = overlay.training_duration_min {
            self.training_duration_min = value;
        }
        if let Some(value) = overlay.prefetch_ttl_secs {
            self.prefetch_ttl_secs = value;
        }
        if let Some(value) = overlay.error_color {
            self.error_color = value;
        }
        if let Some(value) = overlay.use_tenant_display_name {
            self.use_tenant_display_name = value;
        }
    }
}
