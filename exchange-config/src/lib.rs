//! # Exchange Configuration
//!
//! Everything the runtime reads from disk before a simulation starts:
//!
//! - **Economy files**: stocks, processes and the optimize directive.
//! - **Trace files**: `cycle:process` launch records, resolved against a catalog.
//! - **Settings**: layered runtime settings (defaults, YAML, environment).

#![warn(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

mod economy;
mod error;
mod scheduler;
mod telemetry;
mod trace;
mod validation;

pub use economy::{load_economy, parse_economy};
pub use error::ConfigError;
pub use scheduler::SchedulerSettings;
pub use telemetry::TelemetrySettings;
pub use trace::{load_trace, parse_trace, render_trace};

const SETTINGS_FILE: &str = "config/exchange.yaml";
const ENV_PREFIX: &str = "EXCHANGE_";

/// Top-level runtime settings.
#[derive(Debug, Serialize, Deserialize, Validate, Default, Clone, PartialEq, Eq)]
pub struct ExchangeSettings {
    /// Logging level and format.
    #[validate(nested)]
    #[serde(default)]
    pub telemetry: TelemetrySettings,

    /// Greedy run limits and trace output.
    #[validate(nested)]
    #[serde(default)]
    pub scheduler: SchedulerSettings,
}

impl ExchangeSettings {
    /// Load settings from the default file and environment.
    ///
    /// Hierarchy:
    /// 1. Default values
    /// 2. `config/exchange.yaml`, when present
    /// 3. `EXCHANGE_*` environment variables, `__` separating nested keys
    ///    (`EXCHANGE_SCHEDULER__CYCLE_LIMIT=500`)
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(ExchangeSettings::default()));
        if Path::new(SETTINGS_FILE).exists() {
            figment = figment.merge(Yaml::file(SETTINGS_FILE));
        }
        Self::extract(figment)
    }

    /// Load settings from a specific YAML file, then the environment.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.to_path_buf()));
        }
        let figment =
            Figment::from(Serialized::defaults(ExchangeSettings::default())).merge(Yaml::file(path));
        Self::extract(figment)
    }

    fn extract(figment: Figment) -> Result<Self, ConfigError> {
        figment
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .map_err(ConfigError::from)
            .and_then(|settings: Self| {
                settings.validate()?;
                Ok(settings)
            })
    }
}
