use anyhow::{Context, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub flows: FlowsConfig,
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiConfig {
    /// Event poll interval; pending login and claim timers resolve on these ticks
    #[serde(default = "default_tick_rate_ms")]
    pub tick_rate_ms: u64,
}

fn default_tick_rate_ms() -> u64 {
    100
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate_ms(),
        }
    }
}

/// Timings and pricing for the simulated marketplace flows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowsConfig {
    /// Delay between confirming a node claim and opening its profile
    #[serde(default = "default_claim_delay_ms")]
    pub claim_delay_ms: u64,

    /// Delay between submitting credentials and entering the app
    #[serde(default = "default_login_delay_ms")]
    pub login_delay_ms: u64,

    /// Checkout fee as a fraction of the subtotal
    #[serde(default = "default_fee_rate")]
    pub fee_rate: Decimal,

    /// Amount pre-filled on the checkout form
    #[serde(default = "default_checkout_amount")]
    pub default_checkout_amount: String,
}

fn default_claim_delay_ms() -> u64 {
    2000
}

fn default_login_delay_ms() -> u64 {
    1000
}

fn default_fee_rate() -> Decimal {
    Decimal::new(1, 3)
}

fn default_checkout_amount() -> String {
    "100".to_string()
}

impl Default for FlowsConfig {
    fn default() -> Self {
        Self {
            claim_delay_ms: default_claim_delay_ms(),
            login_delay_ms: default_login_delay_ms(),
            fee_rate: default_fee_rate(),
            default_checkout_amount: default_checkout_amount(),
        }
    }
}

impl FlowsConfig {
    pub fn claim_delay(&self) -> Duration {
        Duration::from_millis(self.claim_delay_ms)
    }

    pub fn login_delay(&self) -> Duration {
        Duration::from_millis(self.login_delay_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Directory holding the session file and logs
    #[serde(default = "default_state_dir")]
    pub state: String,
}

fn default_state_dir() -> String {
    dirs::data_local_dir()
        .map(|dir| dir.join("orange-pages"))
        .unwrap_or_else(|| PathBuf::from(".orange-pages"))
        .to_string_lossy()
        .to_string()
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            state: default_state_dir(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Whether to log to file in TUI mode (false = stderr for debugging)
    #[serde(default = "default_log_to_file")]
    pub to_file: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_to_file() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            to_file: default_log_to_file(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ui: UiConfig::default(),
            flows: FlowsConfig::default(),
            paths: PathsConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    /// `~/.config/orange-pages/config.toml`
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("orange-pages").join("config.toml"))
    }

    pub fn load(config_path: Option<&str>) -> Result<Self> {
        // Start with embedded defaults so the app works without config files
        let defaults = Config::default();
        let defaults_json =
            serde_json::to_string(&defaults).context("Failed to serialize default config")?;

        let mut builder = config::Config::builder().add_source(config::File::from_str(
            &defaults_json,
            config::FileFormat::Json,
        ));

        // User config (optional global overrides)
        if let Some(user_config) = Self::user_config_path() {
            if user_config.exists() {
                builder = builder.add_source(config::File::from(user_config));
            }
        }

        // Explicit config file (CLI override)
        if let Some(path) = config_path {
            builder = builder.add_source(config::File::with_name(path));
        }

        // Environment variables, e.g. ORANGE_PAGES__FLOWS__CLAIM_DELAY_MS=500
        builder = builder.add_source(
            config::Environment::with_prefix("ORANGE_PAGES")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build().context("Failed to load configuration")?;
        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }

    /// Save config to the user config file
    pub fn save(&self) -> Result<PathBuf> {
        let config_path =
            Self::user_config_path().context("No user config directory on this platform")?;
        self.save_to(&config_path)?;
        Ok(config_path)
    }

    pub fn save_to(&self, config_path: &std::path::Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let toml_str =
            toml::to_string_pretty(self).context("Failed to serialize config to TOML")?;

        std::fs::write(config_path, toml_str).context("Failed to write config file")?;

        tracing::info!(path = %config_path.display(), "configuration saved");
        Ok(())
    }

    /// Get absolute path to state directory
    pub fn state_path(&self) -> PathBuf {
        let path = PathBuf::from(&self.paths.state);
        if path.is_absolute() {
            path
        } else {
            std::env::current_dir().unwrap_or_default().join(path)
        }
    }

    /// Get absolute path to logs directory
    pub fn logs_path(&self) -> PathBuf {
        self.state_path().join("logs")
    }

    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.ui.tick_rate_ms.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.flows.claim_delay(), Duration::from_millis(2000));
        assert_eq!(config.flows.login_delay(), Duration::from_millis(1000));
        assert_eq!(config.flows.fee_rate, Decimal::new(1, 3));
        assert_eq!(config.flows.default_checkout_amount, "100");
        assert_eq!(config.logging.level, "info");
        assert!(config.logging.to_file);
    }

    #[test]
    fn test_explicit_file_overrides_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("custom.toml");
        std::fs::write(
            &path,
            "[flows]\nclaim_delay_ms = 50\nfee_rate = \"0.002\"\n\n[logging]\nlevel = \"debug\"\n",
        )
        .unwrap();

        let config = Config::load(Some(path.to_str().unwrap())).unwrap();
        assert_eq!(config.flows.claim_delay_ms, 50);
        assert_eq!(config.flows.fee_rate, Decimal::new(2, 3));
        assert_eq!(config.logging.level, "debug");
        // Untouched sections keep their defaults
        assert_eq!(config.flows.login_delay_ms, 1000);
        assert_eq!(config.ui.tick_rate_ms, 100);
    }

    #[test]
    fn test_save_round_trips_through_toml() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("config.toml");
        let mut config = Config::default();
        config.paths.state = temp_dir.path().to_string_lossy().to_string();
        config.logging.to_file = false;
        config.save_to(&path).unwrap();

        let loaded = Config::load(Some(path.to_str().unwrap())).unwrap();
        assert_eq!(loaded.paths.state, config.paths.state);
        assert!(!loaded.logging.to_file);
    }

    #[test]
    fn test_relative_state_path_is_absolutized() {
        let mut config = Config::default();
        config.paths.state = ".orange-pages".to_string();
        assert!(config.state_path().is_absolute());
        assert!(config.logs_path().ends_with("logs"));
    }
}
