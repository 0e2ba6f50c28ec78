use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

/// Top-level config (agenda.toml + AGENDA_* env overrides).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AgendaConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub trigger: TriggerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the SQLite file holding the occurrence records.
    #[serde(default = "default_db_path")]
    pub path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

/// When the weekly maintenance run fires, in local time.
///
/// The window size and the 7-day step are compile-time constants in
/// `agenda-window`; only the trigger instant is configurable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriggerConfig {
    /// ISO weekday: 0 = Monday … 6 = Sunday.
    #[serde(default = "default_weekday")]
    pub weekday: u8,
    /// Local hour of day (0–23).
    #[serde(default = "default_hour")]
    pub hour: u8,
    /// Local minute (0–59).
    #[serde(default)]
    pub minute: u8,
}

impl Default for TriggerConfig {
    fn default() -> Self {
        Self {
            weekday: default_weekday(),
            hour: default_hour(),
            minute: 0,
        }
    }
}

impl AgendaConfig {
    /// Load config from a TOML file with AGENDA_* env var overrides.
    ///
    /// Checks in order:
    ///   1. Explicit path argument
    ///   2. ~/.agenda/agenda.toml
    pub fn load(config_path: Option<&str>) -> crate::error::Result<Self> {
        let path = config_path
            .map(String::from)
            .unwrap_or_else(default_config_path);

        let config: AgendaConfig = Figment::new()
            .merge(Toml::file(&path))
            .merge(Env::prefixed("AGENDA_").split("_"))
            .extract()
            .map_err(|e| crate::error::AgendaError::Config(e.to_string()))?;

        Ok(config)
    }
}

fn default_config_path() -> String {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    format!("{}/.agenda/agenda.toml", home)
}

fn default_db_path() -> String {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    format!("{}/.agenda/agenda.db", home)
}

/// Sunday — after the teaching week, before Monday's classes.
fn default_weekday() -> u8 {
    6
}

fn default_hour() -> u8 {
    3
}
