//! Runtime settings.
//!
//! Sources, lowest precedence first: built-in defaults, an optional TOML file,
//! then environment variables named after the keys (`SCRAPE_URL`, `TIMEZONE`, ...).

use std::path::Path;
use std::time::Duration;

use ::config::{Config, ConfigError, Environment, File};
use chrono_tz::Tz;
use serde::Deserialize;
use soupcal_core::{SoupCalError, SoupCalResult};

pub const DEFAULT_SCRAPE_URL: &str = "https://www.startherestl.org/food-programs--pantries.html";
pub const DEFAULT_TIMEZONE: &str = "America/Chicago";
pub const DEFAULT_UPDATE_INTERVAL_MINUTES: i64 = 1440;
pub const DEFAULT_USER_AGENT: &str = "SoupCalendarBot/0.1 (+https://pustl.com)";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: i64 = 20;
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";

/// Config file looked up in the working directory when none is given
static DEFAULT_CONFIG_NAME: &str = "soupcal";

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Page listing the food programs
    pub scrape_url: String,
    /// IANA timezone the schedules are written in
    pub timezone: String,
    pub update_interval_minutes: u64,
    pub user_agent: String,
    pub request_timeout_secs: u64,
    pub bind_addr: String,
}

impl Settings {
    /// Load settings, reading `path` if given (it must exist) or `./soupcal.toml` if present.
    pub fn load(path: Option<&Path>) -> SoupCalResult<Self> {
        Self::load_with_env(path, Environment::default())
    }

    fn load_with_env(path: Option<&Path>, env: Environment) -> SoupCalResult<Self> {
        let file = match path {
            Some(p) => File::from(p).required(true),
            None => File::with_name(DEFAULT_CONFIG_NAME).required(false),
        };

        let settings: Settings = Config::builder()
            .set_default("scrape_url", DEFAULT_SCRAPE_URL)
            .and_then(|b| b.set_default("timezone", DEFAULT_TIMEZONE))
            .and_then(|b| b.set_default("update_interval_minutes", DEFAULT_UPDATE_INTERVAL_MINUTES))
            .and_then(|b| b.set_default("user_agent", DEFAULT_USER_AGENT))
            .and_then(|b| b.set_default("request_timeout_secs", DEFAULT_REQUEST_TIMEOUT_SECS))
            .and_then(|b| b.set_default("bind_addr", DEFAULT_BIND_ADDR))
            .map_err(config_error)?
            .add_source(file)
            .add_source(env.try_parsing(true))
            .build()
            .and_then(|c| c.try_deserialize::<Settings>())
            .map_err(config_error)?;

        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> SoupCalResult<()> {
        if self.update_interval_minutes == 0 {
            return Err(SoupCalError::Config(
                "update_interval_minutes must be greater than zero".into(),
            ));
        }
        if self.request_timeout_secs == 0 {
            return Err(SoupCalError::Config(
                "request_timeout_secs must be greater than zero".into(),
            ));
        }
        self.timezone()?;
        Ok(())
    }

    pub fn timezone(&self) -> SoupCalResult<Tz> {
        self.timezone
            .parse::<Tz>()
            .map_err(|_| SoupCalError::Timezone(self.timezone.clone()))
    }

    pub fn update_interval(&self) -> Duration {
        Duration::from_secs(self.update_interval_minutes * 60)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

fn config_error(e: ConfigError) -> SoupCalError {
    SoupCalError::Config(e.to_string())
}
